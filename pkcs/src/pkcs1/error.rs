use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ASN.1 error: {0}")]
    Asn1(#[from] kagi_asn1::error::Error),

    #[error("invalid DER: {0}")]
    InvalidDer(#[from] kagi_der::error::Error),

    #[error("expected SEQUENCE")]
    ExpectedSequence,

    #[error("expected {expected} elements, got {actual}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("expected INTEGER for {field}")]
    ExpectedInteger { field: &'static str },

    #[error("invalid version: {0} (must be 0 for two-prime or 1 for multi-prime)")]
    InvalidVersion(String),

    #[error("multi-prime keys are not supported")]
    MultiPrimeNotSupported,

    #[error("empty ASN1Object")]
    EmptyAsn1Object,

    #[error("trailing data after the key")]
    TrailingData,

    /// The input is a well-formed PKCS#8 PrivateKeyInfo rather than a PKCS#1 key.
    #[error("input is a PKCS#8 PrivateKeyInfo")]
    Pkcs8Detected,
}

pub type Result<T> = std::result::Result<T, Error>;
