use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("length is not minimally encoded")]
    NonMinimalLength,
    #[error("length field of {0} bytes is too long")]
    LengthTooLong(u8),
    #[error("high tag number form is not supported")]
    HighTagNumber,
    #[error("constructed values nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("empty input")]
    Empty,
}

pub type Result<T> = std::result::Result<T, Error>;
