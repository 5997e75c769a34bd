//! AlgorithmIdentifier
//!
//! [RFC 5280 Section 4.1.1.2](https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.1.2):
//! ```asn1
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//! ```

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use kagi_asn1::{Element, ObjectIdentifier};

use crate::OidName;
use crate::error::{Error, Result};

/// Parameters of an [`AlgorithmIdentifier`].
///
/// An absent field is `None` on the identifier. RSA uses an explicit NULL;
/// EC carries the named curve OID in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    Null,
    Other(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<AlgorithmParameters>,
}

impl AlgorithmIdentifier {
    // key algorithms (RFC 3279, RFC 8410)
    pub const OID_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.1";
    pub const OID_EC_PUBLIC_KEY: &'static str = "1.2.840.10045.2.1";
    pub const OID_ED25519: &'static str = "1.3.101.112";
    pub const OID_ED448: &'static str = "1.3.101.113";

    // signature algorithms seen on certificates
    pub const OID_SHA1_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.5";
    pub const OID_SHA256_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.11";
    pub const OID_SHA384_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.12";
    pub const OID_SHA512_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.13";
    pub const OID_ECDSA_WITH_SHA256: &'static str = "1.2.840.10045.4.3.2";
    pub const OID_ECDSA_WITH_SHA384: &'static str = "1.2.840.10045.4.3.3";
    pub const OID_ECDSA_WITH_SHA512: &'static str = "1.2.840.10045.4.3.4";

    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    pub fn new_with_params(algorithm: ObjectIdentifier, parameters: AlgorithmParameters) -> Self {
        Self {
            algorithm,
            parameters: Some(parameters),
        }
    }

    /// `rsaEncryption` with NULL parameters, as written in PKCS#8 and SPKI.
    pub fn rsa_encryption() -> Result<Self> {
        let algorithm = Self::OID_RSA_ENCRYPTION.parse::<ObjectIdentifier>()?;
        Ok(Self::new_with_params(algorithm, AlgorithmParameters::Null))
    }

    pub fn algorithm(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    pub fn parameters(&self) -> Option<&AlgorithmParameters> {
        self.parameters.as_ref()
    }
}

impl OidName for AlgorithmIdentifier {
    fn oid_name(&self) -> Option<&'static str> {
        match self.algorithm.to_string().as_str() {
            Self::OID_RSA_ENCRYPTION => Some("rsaEncryption"),
            Self::OID_EC_PUBLIC_KEY => Some("ecPublicKey"),
            Self::OID_ED25519 => Some("Ed25519"),
            Self::OID_ED448 => Some("Ed448"),
            Self::OID_SHA1_WITH_RSA_ENCRYPTION => Some("sha1WithRSAEncryption"),
            Self::OID_SHA256_WITH_RSA_ENCRYPTION => Some("sha256WithRSAEncryption"),
            Self::OID_SHA384_WITH_RSA_ENCRYPTION => Some("sha384WithRSAEncryption"),
            Self::OID_SHA512_WITH_RSA_ENCRYPTION => Some("sha512WithRSAEncryption"),
            Self::OID_ECDSA_WITH_SHA256 => Some("ecdsa-with-SHA256"),
            Self::OID_ECDSA_WITH_SHA384 => Some("ecdsa-with-SHA384"),
            Self::OID_ECDSA_WITH_SHA512 => Some("ecdsa-with-SHA512"),
            _ => None,
        }
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let Element::Sequence(elements) = self else {
            return Err(Error::AlgorithmIdentifierExpectedSequence);
        };

        let (oid, parameters) = match elements.as_slice() {
            [oid] => (oid, None),
            [oid, Element::Null] => (oid, Some(AlgorithmParameters::Null)),
            [oid, other] => (oid, Some(AlgorithmParameters::Other(other.clone()))),
            _ => {
                return Err(Error::AlgorithmIdentifierInvalidElementCount(
                    elements.len(),
                ));
            }
        };
        let Element::ObjectIdentifier(algorithm) = oid else {
            return Err(Error::AlgorithmIdentifierExpectedOid);
        };

        Ok(AlgorithmIdentifier {
            algorithm: algorithm.clone(),
            parameters,
        })
    }
}

impl EncodableTo<AlgorithmIdentifier> for Element {}

impl Encoder<AlgorithmIdentifier, Element> for AlgorithmIdentifier {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let mut elements = vec![Element::ObjectIdentifier(self.algorithm.clone())];
        match &self.parameters {
            Some(AlgorithmParameters::Null) => elements.push(Element::Null),
            Some(AlgorithmParameters::Other(elm)) => elements.push(elm.clone()),
            None => {}
        }
        Ok(Element::Sequence(elements))
    }
}
