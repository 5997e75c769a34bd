use kagi_pkcs::KeyAlgorithm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no PEM block found")]
    NoBlockFound,

    #[error("invalid transport encoding: {0}")]
    Encoding(#[from] EncodingError),

    #[error("malformed key: {0}")]
    MalformedKey(#[from] KeyError),

    #[error("expected an RSA key, found {0}")]
    WrongKeyType(KeyAlgorithm),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported encoding variant: {0} (expected 1 or 8)")]
    UnsupportedVariant(u8),

    #[error("unknown encoding variant: {0:?} (expected pkcs1 or pkcs8)")]
    UnknownVariant(String),

    #[error("failed to encode key: {0}")]
    Encode(#[from] kagi_pkcs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed Base64 or Hex text. Kept apart from [`KeyError`] so callers can
/// tell a transport problem from a bad key.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Why a byte buffer could not be read as an RSA key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("ASN.1: {0}")]
    Asn1(#[from] kagi_asn1::error::Error),

    #[error("PKCS#1: {0}")]
    Pkcs1(#[from] kagi_pkcs::pkcs1::Error),

    #[error("PKCS#8: {0}")]
    Pkcs8(#[from] kagi_pkcs::pkcs8::Error),

    #[error("SubjectPublicKeyInfo: {0}")]
    Spki(#[from] kagi_pkix_types::Error),

    #[error("certificate: {0}")]
    Certificate(#[from] kagi_x509::error::Error),

    #[error("invalid key: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<kagi_pkcs::Error> for KeyError {
    fn from(err: kagi_pkcs::Error) -> Self {
        match err {
            kagi_pkcs::Error::Asn1(e) => KeyError::Asn1(e),
            kagi_pkcs::Error::Pkcs1(e) => KeyError::Pkcs1(e),
            kagi_pkcs::Error::Pkcs8(e) => KeyError::Pkcs8(e),
            kagi_pkcs::Error::PKIXTypes(e) => KeyError::Spki(e),
        }
    }
}

/// The numbers do not form an RSA key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is negative")]
    Negative(&'static str),

    #[error("modulus is zero")]
    ZeroModulus,

    #[error("public exponent out of range (must be greater than 1 and less than 2^31)")]
    PublicExponentOutOfRange,

    #[error("{0} must be greater than 1")]
    PrimeTooSmall(&'static str),

    #[error("modulus is not the product of the primes")]
    ModulusMismatch,

    #[error("private exponent is not the inverse of the public exponent")]
    PrivateExponentMismatch,

    #[error("{0} does not match its definition")]
    CrtMismatch(&'static str),
}
