//! Algorithm-aware view of a SubjectPublicKeyInfo.

use kagi::decoder::Decoder;
use kagi::encoder::Encoder;
use kagi_asn1::BitString;
use kagi_pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::error::{Error, Result};
use crate::pkcs1::RSAPublicKey;
use crate::private_key::KeyAlgorithm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RSAPublicKey),
    /// `key` is the content of the subjectPublicKey BIT STRING.
    Other {
        algorithm: AlgorithmIdentifier,
        key: Vec<u8>,
    },
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Rsa(_) => KeyAlgorithm::Rsa,
            PublicKey::Other { algorithm, .. } => KeyAlgorithm::from(algorithm),
        }
    }

    pub fn to_subject_public_key_info(&self) -> Result<SubjectPublicKeyInfo> {
        match self {
            PublicKey::Rsa(key) => SubjectPublicKeyInfo::try_from(key),
            PublicKey::Other { algorithm, key } => Ok(SubjectPublicKeyInfo::new(
                algorithm.clone(),
                BitString::new(0, key.clone()),
            )),
        }
    }
}

impl TryFrom<&SubjectPublicKeyInfo> for PublicKey {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        let key = spki.subject_public_key().as_bytes();
        match KeyAlgorithm::from(spki.algorithm()) {
            KeyAlgorithm::Rsa => {
                let key: RSAPublicKey = key.decode()?;
                Ok(PublicKey::Rsa(key))
            }
            _ => Ok(PublicKey::Other {
                algorithm: spki.algorithm().clone(),
                key: key.to_vec(),
            }),
        }
    }
}

impl TryFrom<&RSAPublicKey> for SubjectPublicKeyInfo {
    type Error = Error;

    fn try_from(key: &RSAPublicKey) -> Result<Self> {
        let der: Vec<u8> = key.encode()?;
        Ok(SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::rsa_encryption()?,
            BitString::new(0, der),
        ))
    }
}
