//! Algorithm-aware view of a PKCS#8 private key.
//!
//! A [`OneAsymmetricKey`] only says which algorithm its payload belongs to.
//! [`PrivateKey`] opens the payload for the algorithms this crate can parse
//! and keeps the raw bytes for the rest:
//!
//! ```no_run
//! use kagi::decoder::Decoder;
//! use kagi_pkcs::pkcs8::OneAsymmetricKey;
//! use kagi_pkcs::PrivateKey;
//!
//! # fn run(der: &[u8]) -> kagi_pkcs::Result<()> {
//! let info: OneAsymmetricKey = der.decode()?;
//! match PrivateKey::try_from(&info)? {
//!     PrivateKey::Rsa(key) => println!("RSA {} bits", key.key_size()),
//!     other => println!("{} key", other.algorithm()),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use kagi::decoder::Decoder;
use kagi::encoder::Encoder;
use kagi_asn1::ObjectIdentifier;
use kagi_pkix_types::AlgorithmIdentifier;

use crate::error::{Error, Result};
use crate::pkcs1::RSAPrivateKey;
use crate::pkcs8::OneAsymmetricKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Ec,
    Ed25519,
    Ed448,
    Unknown,
}

impl KeyAlgorithm {
    pub fn oid(&self) -> Option<&'static str> {
        match self {
            KeyAlgorithm::Rsa => Some(AlgorithmIdentifier::OID_RSA_ENCRYPTION),
            KeyAlgorithm::Ec => Some(AlgorithmIdentifier::OID_EC_PUBLIC_KEY),
            KeyAlgorithm::Ed25519 => Some(AlgorithmIdentifier::OID_ED25519),
            KeyAlgorithm::Ed448 => Some(AlgorithmIdentifier::OID_ED448),
            KeyAlgorithm::Unknown => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Ec => "EC",
            KeyAlgorithm::Ed25519 => "Ed25519",
            KeyAlgorithm::Ed448 => "Ed448",
            KeyAlgorithm::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&ObjectIdentifier> for KeyAlgorithm {
    fn from(oid: &ObjectIdentifier) -> Self {
        match oid.to_string().as_str() {
            AlgorithmIdentifier::OID_RSA_ENCRYPTION => KeyAlgorithm::Rsa,
            AlgorithmIdentifier::OID_EC_PUBLIC_KEY => KeyAlgorithm::Ec,
            AlgorithmIdentifier::OID_ED25519 => KeyAlgorithm::Ed25519,
            AlgorithmIdentifier::OID_ED448 => KeyAlgorithm::Ed448,
            _ => KeyAlgorithm::Unknown,
        }
    }
}

impl From<&AlgorithmIdentifier> for KeyAlgorithm {
    fn from(algorithm: &AlgorithmIdentifier) -> Self {
        KeyAlgorithm::from(algorithm.algorithm())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Rsa(RSAPrivateKey),
    /// Any key whose payload is not parsed here. `key` is the content of
    /// the privateKey OCTET STRING.
    Other {
        algorithm: AlgorithmIdentifier,
        key: Vec<u8>,
    },
}

impl PrivateKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateKey::Other { algorithm, .. } => KeyAlgorithm::from(algorithm),
        }
    }

    /// Wraps the key in a version 1 PKCS#8 structure.
    pub fn to_pkcs8(&self) -> Result<OneAsymmetricKey> {
        match self {
            PrivateKey::Rsa(key) => {
                let der: Vec<u8> = key.encode()?;
                Ok(OneAsymmetricKey::new(
                    AlgorithmIdentifier::rsa_encryption()?,
                    der,
                ))
            }
            PrivateKey::Other { algorithm, key } => {
                Ok(OneAsymmetricKey::new(algorithm.clone(), key.clone()))
            }
        }
    }
}

impl TryFrom<&OneAsymmetricKey> for PrivateKey {
    type Error = Error;

    fn try_from(info: &OneAsymmetricKey) -> Result<Self> {
        match KeyAlgorithm::from(info.algorithm()) {
            KeyAlgorithm::Rsa => {
                let key: RSAPrivateKey = info.private_key().decode()?;
                Ok(PrivateKey::Rsa(key))
            }
            _ => Ok(PrivateKey::Other {
                algorithm: info.algorithm().clone(),
                key: info.private_key().to_vec(),
            }),
        }
    }
}
