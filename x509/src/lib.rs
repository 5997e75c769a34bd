//! X.509 certificates, read far enough to reach the subject public key.
//!
//! Extensions and unique identifiers are skipped and signatures are not
//! verified. Decoding follows the usual chain:
//!
//! ```ignore
//! let der: Der = bytes.decode()?;
//! let obj: ASN1Object = der.decode()?;
//! let cert: Certificate = obj.decode()?;
//! ```

use chrono::NaiveDateTime;
use kagi::decoder::{DecodableFrom, Decoder};
use kagi_asn1::{ASN1Object, BitString, Element, Integer};
use kagi_der::Der;
use kagi_pkix_types::{AlgorithmIdentifier, Name, SubjectPublicKeyInfo};

use crate::error::{Error, Result};

pub mod error;

/*
https://datatracker.ietf.org/doc/html/rfc5280#section-4.1

Certificate  ::=  SEQUENCE  {
    tbsCertificate       TBSCertificate,
    signatureAlgorithm   AlgorithmIdentifier,
    signatureValue       BIT STRING
}
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    tbs_certificate: TBSCertificate,
    signature_algorithm: AlgorithmIdentifier,
    signature_value: BitString,
}

impl Certificate {
    pub fn tbs_certificate(&self) -> &TBSCertificate {
        &self.tbs_certificate
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn signature_value(&self) -> &BitString {
        &self.signature_value
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.tbs_certificate.subject_public_key_info
    }

    pub fn into_subject_public_key_info(self) -> SubjectPublicKeyInfo {
        self.tbs_certificate.subject_public_key_info
    }
}

impl DecodableFrom<Element> for Certificate {}

impl Decoder<Element, Certificate> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidCertificate("expected SEQUENCE"));
        };
        let [tbs, signature_algorithm, signature_value] = elements.as_slice() else {
            return Err(Error::InvalidCertificate("expected 3 elements"));
        };
        let Element::BitString(signature_value) = signature_value else {
            return Err(Error::InvalidCertificate(
                "expected BIT STRING for signatureValue",
            ));
        };

        Ok(Certificate {
            tbs_certificate: tbs.decode()?,
            signature_algorithm: signature_algorithm.decode()?,
            signature_value: signature_value.clone(),
        })
    }
}

impl DecodableFrom<ASN1Object> for Certificate {}

impl Decoder<ASN1Object, Certificate> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        match self.elements() {
            [element] => element.decode(),
            [] => Err(Error::InvalidCertificate("empty input")),
            _ => Err(Error::InvalidCertificate("trailing data after certificate")),
        }
    }
}

impl DecodableFrom<&[u8]> for Certificate {}

impl Decoder<&[u8], Certificate> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        let der: Der = self.decode().map_err(Error::InvalidDer)?;
        let obj: ASN1Object = der.decode()?;
        obj.decode()
    }
}

/*
TBSCertificate  ::=  SEQUENCE  {
     version         [0]  EXPLICIT Version DEFAULT v1,
     serialNumber         CertificateSerialNumber,
     signature            AlgorithmIdentifier,
     issuer               Name,
     validity             Validity,
     subject              Name,
     subjectPublicKeyInfo SubjectPublicKeyInfo,
     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
     extensions      [3]  EXPLICIT Extensions OPTIONAL
}
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TBSCertificate {
    version: Version,
    serial_number: Integer,
    signature: AlgorithmIdentifier,
    issuer: Name,
    validity: Validity,
    subject: Name,
    subject_public_key_info: SubjectPublicKeyInfo,
}

impl TBSCertificate {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn serial_number(&self) -> &Integer {
        &self.serial_number
    }

    pub fn signature(&self) -> &AlgorithmIdentifier {
        &self.signature
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.subject_public_key_info
    }
}

impl DecodableFrom<Element> for TBSCertificate {}

impl Decoder<Element, TBSCertificate> for Element {
    type Error = Error;

    fn decode(&self) -> Result<TBSCertificate> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidTBSCertificate("expected SEQUENCE"));
        };

        let (version, rest): (Version, &[Element]) = match elements.as_slice() {
            [
                Element::ContextSpecific {
                    slot: 0,
                    constructed: true,
                    element,
                },
                rest @ ..,
            ] => (element.as_ref().decode()?, rest),
            rest => (Version::V1, rest),
        };

        // the optional [1], [2] and [3] fields follow and are not read
        let [
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            ..,
        ] = rest
        else {
            return Err(Error::InvalidTBSCertificate("too few elements"));
        };
        let Element::Integer(serial_number) = serial_number else {
            return Err(Error::InvalidCertificateSerialNumber);
        };

        Ok(TBSCertificate {
            version,
            serial_number: serial_number.clone(),
            signature: signature.decode()?,
            issuer: issuer.decode()?,
            validity: validity.decode()?,
            subject: subject.decode()?,
            subject_public_key_info: subject_public_key_info.decode()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Version {
    V1 = 0,
    V2 = 1,
    V3 = 2,
}

impl DecodableFrom<Element> for Version {}

impl Decoder<Element, Version> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Version> {
        let Element::Integer(i) = self else {
            return Err(Error::InvalidVersion(
                "expected INTEGER for Version".to_string(),
            ));
        };
        match i.to_u64() {
            Some(0) => Ok(Version::V1),
            Some(1) => Ok(Version::V2),
            Some(2) => Ok(Version::V3),
            _ => Err(Error::InvalidVersion(format!("unknown version value: {}", i))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    pub not_before: NaiveDateTime,
    pub not_after: NaiveDateTime,
}

impl DecodableFrom<Element> for Validity {}

impl Decoder<Element, Validity> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Validity> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidValidity("expected SEQUENCE"));
        };
        let [not_before, not_after] = elements.as_slice() else {
            return Err(Error::InvalidValidity("expected 2 elements"));
        };
        Ok(Validity {
            not_before: time(not_before).ok_or(Error::InvalidValidity("invalid notBefore"))?,
            not_after: time(not_after).ok_or(Error::InvalidValidity("invalid notAfter"))?,
        })
    }
}

fn time(element: &Element) -> Option<NaiveDateTime> {
    match element {
        Element::UTCTime(dt) | Element::GeneralizedTime(dt) => Some(*dt),
        _ => None,
    }
}
