use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("expected SEQUENCE")]
    ExpectedSequence,

    #[error("expected {expected} elements, got {actual}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("expected OCTET STRING for {field}")]
    ExpectedOctetString { field: &'static str },

    #[error("expected INTEGER for version")]
    ExpectedVersionInteger,

    #[error("expected BIT STRING for publicKey")]
    ExpectedPublicKeyBitString,

    #[error("empty ASN1Object")]
    EmptyAsn1Object,

    #[error("trailing data after the key")]
    TrailingData,

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] kagi_asn1::error::Error),

    #[error("DER error: {0}")]
    Der(#[from] kagi_der::error::Error),

    #[error("PKIX types error: {0}")]
    PkixTypes(#[from] kagi_pkix_types::Error),
}
