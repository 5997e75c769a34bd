use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use kagi_asn1::{ASN1Object, BitString, Element, Integer, OctetString};
use kagi_der::{Der, Tag};
use kagi_pkix_types::AlgorithmIdentifier;

use super::error::{Error, Result};

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}

PrivateKeyInfo ::= OneAsymmetricKey

Version ::= INTEGER { v1(0), v2(1) } (v1, ..., v2)

PrivateKey ::= OCTET STRING

PublicKey ::= BIT STRING
*/

const ATTRIBUTES_SLOT: u8 = 0;
const PUBLIC_KEY_SLOT: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1 = 0,
    /// Carries the optional public key.
    V2 = 1,
}

impl From<Version> for Integer {
    fn from(v: Version) -> Self {
        Integer::from(v as i64)
    }
}

impl TryFrom<&Integer> for Version {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        match value.to_i64() {
            Some(0) => Ok(Version::V1),
            Some(1) => Ok(Version::V2),
            _ => Err(Error::InvalidVersion(value.to_string())),
        }
    }
}

/// A private key of any algorithm, wrapped with its algorithm identifier.
///
/// `private_key` holds the algorithm-specific encoding, e.g. a PKCS#1
/// `RSAPrivateKey` for `rsaEncryption`. Attributes are not interpreted and
/// are kept as read so that they re-encode unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneAsymmetricKey {
    pub version: Version,
    pub private_key_algorithm: AlgorithmIdentifier,
    pub private_key: OctetString,
    pub attributes: Option<Element>,
    pub public_key: Option<BitString>,
}

/// RFC 5208 name of the same structure.
pub type PrivateKeyInfo = OneAsymmetricKey;

impl OneAsymmetricKey {
    /// A version 1 key without attributes.
    pub fn new(private_key_algorithm: AlgorithmIdentifier, private_key: Vec<u8>) -> Self {
        Self {
            version: Version::V1,
            private_key_algorithm,
            private_key: OctetString::from(private_key),
            attributes: None,
            public_key: None,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.private_key_algorithm
    }

    pub fn private_key(&self) -> &[u8] {
        self.private_key.as_bytes()
    }

    pub fn public_key(&self) -> Option<&BitString> {
        self.public_key.as_ref()
    }
}

impl DecodableFrom<Element> for OneAsymmetricKey {}

impl Decoder<Element, OneAsymmetricKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };
        let [version, algorithm, private_key, rest @ ..] = elements.as_slice() else {
            return Err(Error::InvalidElementCount {
                expected: "at least 3",
                actual: elements.len(),
            });
        };

        let Element::Integer(version) = version else {
            return Err(Error::ExpectedVersionInteger);
        };
        let version = Version::try_from(version)?;
        let private_key_algorithm: AlgorithmIdentifier = algorithm.decode()?;
        let Element::OctetString(private_key) = private_key else {
            return Err(Error::ExpectedOctetString {
                field: "privateKey",
            });
        };

        let mut attributes = None;
        let mut public_key = None;
        for element in rest {
            match element {
                Element::ContextSpecific {
                    slot: ATTRIBUTES_SLOT,
                    ..
                } if attributes.is_none() && public_key.is_none() => {
                    attributes = Some(element.clone());
                }
                // [0] holding several attributes is kept as raw TLV
                Element::Unimplemented(tlv)
                    if matches!(
                        tlv.tag(),
                        Tag::ContextSpecific {
                            slot: ATTRIBUTES_SLOT,
                            constructed: true
                        }
                    ) && attributes.is_none()
                        && public_key.is_none() =>
                {
                    attributes = Some(element.clone());
                }
                Element::ContextSpecific {
                    slot: PUBLIC_KEY_SLOT,
                    constructed: false,
                    element: inner,
                } if public_key.is_none() => {
                    let Element::OctetString(raw) = inner.as_ref() else {
                        return Err(Error::ExpectedPublicKeyBitString);
                    };
                    public_key = Some(BitString::try_from(raw.as_bytes())?);
                }
                _ => {
                    return Err(Error::InvalidElementCount {
                        expected: "at most 5",
                        actual: elements.len(),
                    });
                }
            }
        }

        if public_key.is_some() && version != Version::V2 {
            return Err(Error::InvalidVersion(
                "publicKey requires version 2".to_string(),
            ));
        }

        Ok(OneAsymmetricKey {
            version,
            private_key_algorithm,
            private_key: private_key.clone(),
            attributes,
            public_key,
        })
    }
}

impl DecodableFrom<ASN1Object> for OneAsymmetricKey {}

impl Decoder<ASN1Object, OneAsymmetricKey> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        match self.elements() {
            [element] => element.decode(),
            [] => Err(Error::EmptyAsn1Object),
            _ => Err(Error::TrailingData),
        }
    }
}

impl DecodableFrom<&[u8]> for OneAsymmetricKey {}

impl Decoder<&[u8], OneAsymmetricKey> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        let der: Der = self.decode()?;
        let obj: ASN1Object = der.decode()?;
        obj.decode()
    }
}

impl EncodableTo<OneAsymmetricKey> for Element {}

impl Encoder<OneAsymmetricKey, Element> for OneAsymmetricKey {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let mut elements = vec![
            Element::Integer(Integer::from(self.version)),
            self.private_key_algorithm.encode()?,
            Element::OctetString(self.private_key.clone()),
        ];
        if let Some(attributes) = &self.attributes {
            elements.push(attributes.clone());
        }
        if let Some(public_key) = &self.public_key {
            elements.push(Element::ContextSpecific {
                slot: PUBLIC_KEY_SLOT,
                constructed: false,
                element: Box::new(Element::BitString(public_key.clone())),
            });
        }
        Ok(Element::Sequence(elements))
    }
}

impl EncodableTo<OneAsymmetricKey> for Vec<u8> {}

impl Encoder<OneAsymmetricKey, Vec<u8>> for OneAsymmetricKey {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let element: Element = self.encode()?;
        let bytes: Vec<u8> = element.encode()?;
        Ok(bytes)
    }
}
