use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use kagi_asn1::{ASN1Object, Element, Integer};
use kagi_der::Der;

use super::error::{Error, Result};
use crate::pkcs8::OneAsymmetricKey;

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
    (CONSTRAINED BY {-- version must be multi if otherPrimeInfos present --})

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    TwoPrime = 0,
    Multi = 1,
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
            Some(0) => Ok(Version::TwoPrime),
            Some(1) => Ok(Version::Multi),
            _ => Err(Error::InvalidVersion(value.to_string())),
        }
    }
}

/// Two-prime RSA private key as stored on the wire.
///
/// The numbers are taken as read; checking that they form a usable key is
/// left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPrivateKey {
    pub version: Version,
    pub modulus: Integer,
    pub public_exponent: Integer,
    pub private_exponent: Integer,
    pub prime1: Integer,
    pub prime2: Integer,
    pub exponent1: Integer,
    pub exponent2: Integer,
    pub coefficient: Integer,
}

impl RSAPrivateKey {
    pub fn public_key(&self) -> RSAPublicKey {
        RSAPublicKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }

    /// Modulus length in bits.
    pub fn key_size(&self) -> u64 {
        self.modulus.bits()
    }
}

fn integer(element: &Element, field: &'static str) -> Result<Integer> {
    match element {
        Element::Integer(value) => Ok(value.clone()),
        _ => Err(Error::ExpectedInteger { field }),
    }
}

// A PrivateKeyInfo starts with INTEGER, SEQUENCE, OCTET STRING where an
// RSAPrivateKey has three INTEGERs.
fn is_private_key_info(element: &Element, elements: &[Element]) -> bool {
    matches!(
        elements,
        [Element::Integer(_), Element::Sequence(_), Element::OctetString(_), ..]
    ) && Decoder::<Element, OneAsymmetricKey>::decode(element).is_ok()
}

impl DecodableFrom<Element> for RSAPrivateKey {}

impl Decoder<Element, RSAPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };
        if is_private_key_info(self, elements) {
            return Err(Error::Pkcs8Detected);
        }

        let Some(version) = elements.first() else {
            return Err(Error::InvalidElementCount {
                expected: "9",
                actual: 0,
            });
        };
        let version = Version::try_from(&integer(version, "version")?)?;
        if version == Version::Multi {
            return Err(Error::MultiPrimeNotSupported);
        }

        let [
            _,
            modulus,
            public_exponent,
            private_exponent,
            prime1,
            prime2,
            exponent1,
            exponent2,
            coefficient,
        ] = elements.as_slice()
        else {
            return Err(Error::InvalidElementCount {
                expected: "9",
                actual: elements.len(),
            });
        };

        Ok(RSAPrivateKey {
            version,
            modulus: integer(modulus, "modulus")?,
            public_exponent: integer(public_exponent, "publicExponent")?,
            private_exponent: integer(private_exponent, "privateExponent")?,
            prime1: integer(prime1, "prime1")?,
            prime2: integer(prime2, "prime2")?,
            exponent1: integer(exponent1, "exponent1")?,
            exponent2: integer(exponent2, "exponent2")?,
            coefficient: integer(coefficient, "coefficient")?,
        })
    }
}

impl DecodableFrom<ASN1Object> for RSAPrivateKey {}

impl Decoder<ASN1Object, RSAPrivateKey> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKey> {
        match self.elements() {
            [element] => element.decode(),
            [] => Err(Error::EmptyAsn1Object),
            _ => Err(Error::TrailingData),
        }
    }
}

impl DecodableFrom<&[u8]> for RSAPrivateKey {}

impl Decoder<&[u8], RSAPrivateKey> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKey> {
        let der: Der = self.decode()?;
        let obj: ASN1Object = der.decode()?;
        obj.decode()
    }
}

impl EncodableTo<RSAPrivateKey> for Element {}

impl Encoder<RSAPrivateKey, Element> for RSAPrivateKey {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(Integer::from(self.version)),
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
            Element::Integer(self.private_exponent.clone()),
            Element::Integer(self.prime1.clone()),
            Element::Integer(self.prime2.clone()),
            Element::Integer(self.exponent1.clone()),
            Element::Integer(self.exponent2.clone()),
            Element::Integer(self.coefficient.clone()),
        ]))
    }
}

impl EncodableTo<RSAPrivateKey> for Vec<u8> {}

impl Encoder<RSAPrivateKey, Vec<u8>> for RSAPrivateKey {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let element: Element = self.encode()?;
        let bytes: Vec<u8> = element.encode()?;
        Ok(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPublicKey {
    pub modulus: Integer,
    pub public_exponent: Integer,
}

impl RSAPublicKey {
    /// Modulus length in bits.
    pub fn key_size(&self) -> u64 {
        self.modulus.bits()
    }
}

impl DecodableFrom<Element> for RSAPublicKey {}

impl Decoder<Element, RSAPublicKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RSAPublicKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };
        let [modulus, public_exponent] = elements.as_slice() else {
            return Err(Error::InvalidElementCount {
                expected: "2",
                actual: elements.len(),
            });
        };
        Ok(RSAPublicKey {
            modulus: integer(modulus, "modulus")?,
            public_exponent: integer(public_exponent, "publicExponent")?,
        })
    }
}

impl DecodableFrom<ASN1Object> for RSAPublicKey {}

impl Decoder<ASN1Object, RSAPublicKey> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<RSAPublicKey> {
        match self.elements() {
            [element] => element.decode(),
            [] => Err(Error::EmptyAsn1Object),
            _ => Err(Error::TrailingData),
        }
    }
}

impl DecodableFrom<&[u8]> for RSAPublicKey {}

impl Decoder<&[u8], RSAPublicKey> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<RSAPublicKey> {
        let der: Der = self.decode()?;
        let obj: ASN1Object = der.decode()?;
        obj.decode()
    }
}

impl EncodableTo<RSAPublicKey> for Element {}

impl Encoder<RSAPublicKey, Element> for RSAPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
        ]))
    }
}

impl EncodableTo<RSAPublicKey> for Vec<u8> {}

impl Encoder<RSAPublicKey, Vec<u8>> for RSAPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let element: Element = self.encode()?;
        let bytes: Vec<u8> = element.encode()?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use kagi_asn1::OctetString;
    use kagi_pem::parse_blocks;
    use kagi_pkix_types::AlgorithmIdentifier;
    use rstest::rstest;

    use super::*;

    const RSA1024_PKCS1: &str = include_str!("../../../testdata/keys/rsa1024_pkcs1.pem");
    const RSA2048_PKCS1: &str = include_str!("../../../testdata/keys/rsa2048_pkcs1.pem");
    const RSA1024_PKCS8: &str = include_str!("../../../testdata/keys/rsa1024_pkcs8.pem");
    const RSA1024_PKCS1_PUB: &str = include_str!("../../../testdata/keys/rsa1024_pkcs1_pub.pem");

    fn der(pem: &str) -> Vec<u8> {
        parse_blocks(pem.as_bytes()).remove(0).into_bytes()
    }

    fn ints(values: &[i64]) -> Vec<Element> {
        values.iter().map(|v| Element::Integer(Integer::from(*v))).collect()
    }

    #[rstest]
    #[case::rsa1024(RSA1024_PKCS1, 1024)]
    #[case::rsa2048(RSA2048_PKCS1, 2048)]
    fn test_decode_openssl_private_key(#[case] pem: &str, #[case] bits: u64) {
        let bytes = der(pem);
        let key: RSAPrivateKey = bytes.as_slice().decode().unwrap();

        assert_eq!(Version::TwoPrime, key.version);
        assert_eq!(bits, key.key_size());
        assert_eq!(Some(65537), key.public_exponent.to_u64());

        let encoded: Vec<u8> = key.encode().unwrap();
        assert_eq!(bytes, encoded);
    }

    #[test]
    fn test_decode_openssl_public_key() {
        let bytes = der(RSA1024_PKCS1_PUB);
        let key: RSAPublicKey = bytes.as_slice().decode().unwrap();
        assert_eq!(1024, key.key_size());

        let private: RSAPrivateKey = der(RSA1024_PKCS1).as_slice().decode().unwrap();
        assert_eq!(private.public_key(), key);

        let encoded: Vec<u8> = key.encode().unwrap();
        assert_eq!(bytes, encoded);
    }

    #[test]
    fn test_pkcs8_input_is_detected() {
        let bytes = der(RSA1024_PKCS8);
        let result: Result<RSAPrivateKey> = bytes.as_slice().decode();
        assert!(matches!(result, Err(Error::Pkcs8Detected)));
    }

    #[test]
    fn test_pkcs8_lookalike_is_not_detected() {
        // INTEGER, SEQUENCE, OCTET STRING but the SEQUENCE is no AlgorithmIdentifier
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(0)),
            Element::Sequence(vec![Element::Null]),
            Element::OctetString(OctetString::from(vec![0x00])),
        ]);
        let result: Result<RSAPrivateKey> = element.decode();
        assert!(matches!(
            result,
            Err(Error::InvalidElementCount { actual: 3, .. })
        ));
    }

    #[test]
    fn test_wrapped_pkcs8_shape_is_detected() {
        let inner = RSAPrivateKey {
            version: Version::TwoPrime,
            modulus: Integer::from(15),
            public_exponent: Integer::from(3),
            private_exponent: Integer::from(3),
            prime1: Integer::from(5),
            prime2: Integer::from(3),
            exponent1: Integer::from(3),
            exponent2: Integer::from(1),
            coefficient: Integer::from(2),
        };
        let pkcs1: Vec<u8> = inner.encode().unwrap();
        let wrapped = OneAsymmetricKey::new(AlgorithmIdentifier::rsa_encryption().unwrap(), pkcs1);
        let element: Element = wrapped.encode().unwrap();

        let result: Result<RSAPrivateKey> = element.decode();
        assert!(matches!(result, Err(Error::Pkcs8Detected)));
    }

    #[rstest]
    #[case::not_sequence(Element::Null, "SEQUENCE")]
    #[case::empty(Element::Sequence(vec![]), "elements")]
    #[case::short(Element::Sequence(ints(&[0, 1, 2])), "elements")]
    #[case::long(Element::Sequence(ints(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9])), "elements")]
    #[case::bad_version(Element::Sequence(ints(&[2, 1, 2, 3, 4, 5, 6, 7, 8])), "version")]
    #[case::multi_prime(Element::Sequence(ints(&[1, 1, 2, 3, 4, 5, 6, 7, 8, 9])), "multi-prime")]
    fn test_decode_private_key_error(#[case] element: Element, #[case] message: &str) {
        let result: Result<RSAPrivateKey> = element.decode();
        let err = result.unwrap_err();
        assert!(err.to_string().contains(message), "{}", err);
    }

    #[test]
    fn test_non_integer_field() {
        let mut elements = ints(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        elements[4] = Element::Null;
        let result: Result<RSAPrivateKey> = Element::Sequence(elements).decode();
        assert!(matches!(
            result,
            Err(Error::ExpectedInteger { field: "prime1" })
        ));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::trailing(vec![0x30, 0x06, 0x02, 0x01, 0x0f, 0x02, 0x01, 0x03, 0x05, 0x00])]
    #[case::not_der(vec![0xde, 0xad, 0xbe, 0xef])]
    fn test_decode_public_key_bytes_error(#[case] input: Vec<u8>) {
        let result: Result<RSAPublicKey> = input.as_slice().decode();
        assert!(result.is_err());
    }
}
