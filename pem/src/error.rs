use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The label is not one of [`crate::Label`].
    #[error("invalid label")]
    InvalidLabel,
}

pub type Result<T> = std::result::Result<T, Error>;
