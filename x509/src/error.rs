use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid certificate: {0}")]
    InvalidCertificate(&'static str),
    #[error("invalid TBS certificate: {0}")]
    InvalidTBSCertificate(&'static str),
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    #[error("invalid certificate serial number: expected INTEGER")]
    InvalidCertificateSerialNumber,
    #[error("invalid validity: {0}")]
    InvalidValidity(&'static str),
    #[error("invalid DER: {0}")]
    InvalidDer(#[source] kagi_der::error::Error),
    #[error("invalid ASN.1: {0}")]
    InvalidASN1(#[from] kagi_asn1::error::Error),
    #[error("PKIX types error: {0}")]
    PKIXTypesError(#[from] kagi_pkix_types::Error),
}
