use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Key(#[from] kagi_rsa::Error),

    #[error("{0}")]
    Encoding(#[from] kagi_rsa::EncodingError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("no key text in input")]
    EmptyKeyText,
}

pub type Result<T> = std::result::Result<T, Error>;
