//! Subject Public Key Info
//!
//! RFC 5280 Section 4.1.2.7
//!
//! ```asn1
//! SubjectPublicKeyInfo  ::=  SEQUENCE  {
//!     algorithm            AlgorithmIdentifier,
//!     subjectPublicKey     BIT STRING
//! }
//! ```

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use kagi_asn1::{ASN1Object, BitString, Element};

use crate::OidName;
use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        Self {
            algorithm,
            subject_public_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    pub fn subject_public_key(&self) -> &BitString {
        &self.subject_public_key
    }
}

impl DecodableFrom<Element> for SubjectPublicKeyInfo {}

impl Decoder<Element, SubjectPublicKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::SubjectPublicKeyInfoExpectedSequence);
        };
        let [algorithm, public_key] = elements.as_slice() else {
            return Err(Error::SubjectPublicKeyInfoInvalidElementCount(
                elements.len(),
            ));
        };

        let algorithm = algorithm.decode()?;
        let Element::BitString(subject_public_key) = public_key else {
            return Err(Error::SubjectPublicKeyInfoExpectedBitString);
        };
        // every key format carried here is a whole number of octets
        if subject_public_key.unused_bits() != 0 {
            return Err(Error::SubjectPublicKeyInfoUnusedBits(
                subject_public_key.unused_bits(),
            ));
        }

        Ok(SubjectPublicKeyInfo {
            algorithm,
            subject_public_key: subject_public_key.clone(),
        })
    }
}

impl DecodableFrom<ASN1Object> for SubjectPublicKeyInfo {}

impl Decoder<ASN1Object, SubjectPublicKeyInfo> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        match self.elements() {
            [element] => element.decode(),
            elements => Err(Error::SubjectPublicKeyInfoInvalidElementCount(
                elements.len(),
            )),
        }
    }
}

impl EncodableTo<SubjectPublicKeyInfo> for Element {}

impl Encoder<SubjectPublicKeyInfo, Element> for SubjectPublicKeyInfo {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let algorithm = self.algorithm.encode()?;
        Ok(Element::Sequence(vec![
            algorithm,
            Element::BitString(self.subject_public_key.clone()),
        ]))
    }
}

impl OidName for SubjectPublicKeyInfo {
    fn oid_name(&self) -> Option<&'static str> {
        self.algorithm.oid_name()
    }
}
