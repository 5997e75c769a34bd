use std::{fmt::Display, str::FromStr};

use chrono::NaiveDateTime;
use error::Error;
use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use kagi_der::{Der, PrimitiveTag, Tag, Tlv};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive};

pub mod error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object, Error> {
        let elements = self
            .elements()
            .iter()
            .map(Element::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ASN1Object { elements })
    }
}

impl EncodableTo<ASN1Object> for Der {}

impl Encoder<ASN1Object, Der> for ASN1Object {
    type Error = Error;

    fn encode(&self) -> Result<Der, Self::Error> {
        let tlvs = self
            .elements
            .iter()
            .map(Tlv::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Der::new(tlvs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    UTF8String(String),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    PrintableString(String),
    IA5String(String),
    UTCTime(NaiveDateTime),
    GeneralizedTime(NaiveDateTime),
    ContextSpecific {
        slot: u8,
        constructed: bool,
        element: Box<Element>,
    },
    Unimplemented(Tlv),
}

fn children(tlv: &Tlv) -> Result<Vec<Element>, Error> {
    tlv.tlvs()
        .unwrap_or_default()
        .iter()
        .map(Element::try_from)
        .collect()
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self, Self::Error> {
        let data = tlv.data().unwrap_or_default();
        match tlv.tag() {
            Tag::Primitive(primitive_tag, _) => match primitive_tag {
                PrimitiveTag::Boolean => match data {
                    [0x00] => Ok(Element::Boolean(false)),
                    [0xff] => Ok(Element::Boolean(true)),
                    _ => Err(Error::InvalidBoolean),
                },
                PrimitiveTag::Integer => Ok(Element::Integer(Integer::try_from(data)?)),
                PrimitiveTag::BitString => Ok(Element::BitString(BitString::try_from(data)?)),
                PrimitiveTag::OctetString => Ok(Element::OctetString(OctetString::from(data))),
                PrimitiveTag::Null => Ok(Element::Null),
                PrimitiveTag::ObjectIdentifier => Ok(Element::ObjectIdentifier(
                    ObjectIdentifier::try_from(data)?,
                )),
                PrimitiveTag::UTF8String => String::from_utf8(data.to_vec())
                    .map(Element::UTF8String)
                    .map_err(|_| Error::Utf8StringInvalidUtf8),
                PrimitiveTag::PrintableString => String::from_utf8(data.to_vec())
                    .map(Element::PrintableString)
                    .map_err(|_| Error::PrintableStringInvalidEncoding),
                PrimitiveTag::IA5String => {
                    if !data.is_ascii() {
                        return Err(Error::Ia5StringInvalidEncoding);
                    }
                    Ok(Element::IA5String(String::from_utf8_lossy(data).into_owned()))
                }
                PrimitiveTag::UTCTime => Ok(Element::UTCTime(parse_utc_time(data)?)),
                PrimitiveTag::GeneralizedTime => {
                    Ok(Element::GeneralizedTime(parse_generalized_time(data)?))
                }
                PrimitiveTag::Sequence => Ok(Element::Sequence(children(tlv)?)),
                PrimitiveTag::Set => Ok(Element::Set(children(tlv)?)),
                PrimitiveTag::Unimplemented(_) => Ok(Element::Unimplemented(tlv.clone())),
            },
            Tag::ContextSpecific { slot, constructed } => {
                if *constructed {
                    // EXPLICIT tagging wraps exactly one element. An IMPLICIT
                    // SET OF with another count is kept as raw TLV.
                    let [inner] = tlv.tlvs().unwrap_or_default() else {
                        return Ok(Element::Unimplemented(tlv.clone()));
                    };
                    Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: true,
                        element: Box::new(Element::try_from(inner)?),
                    })
                } else {
                    // IMPLICIT tagging: the schema above decides how to read the octets.
                    Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: false,
                        element: Box::new(Element::OctetString(OctetString::from(data))),
                    })
                }
            }
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({} bits)", bs.bit_len()),
            Element::OctetString(os) => write!(f, "OctetString({})", os),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::UTF8String(s) => write!(f, "UTF8String({})", s),
            Element::Sequence(seq) => write!(f, "Sequence({} elements)", seq.len()),
            Element::Set(set) => write!(f, "Set({} elements)", set.len()),
            Element::PrintableString(s) => write!(f, "PrintableString({})", s),
            Element::IA5String(s) => write!(f, "IA5String({})", s),
            Element::UTCTime(dt) => write!(f, "UTCTime({})", dt),
            Element::GeneralizedTime(dt) => write!(f, "GeneralizedTime({})", dt),
            Element::ContextSpecific { slot, element, .. } => write!(f, "[{}] {}", slot, element),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv.tag()),
        }
    }
}

impl TryFrom<&Element> for Tlv {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self, Self::Error> {
        let primitive = |tag: PrimitiveTag, data: Vec<u8>| Tlv::new_primitive(Tag::universal(tag), data);
        match element {
            Element::Boolean(b) => Ok(primitive(
                PrimitiveTag::Boolean,
                vec![if *b { 0xff } else { 0x00 }],
            )),
            Element::Integer(i) => Ok(primitive(PrimitiveTag::Integer, i.to_der_bytes())),
            Element::BitString(bs) => Ok(primitive(PrimitiveTag::BitString, Vec::from(bs))),
            Element::OctetString(os) => Ok(primitive(PrimitiveTag::OctetString, os.to_vec())),
            Element::Null => Ok(primitive(PrimitiveTag::Null, vec![])),
            Element::ObjectIdentifier(oid) => {
                Ok(primitive(PrimitiveTag::ObjectIdentifier, Vec::try_from(oid)?))
            }
            Element::UTF8String(s) => Ok(primitive(PrimitiveTag::UTF8String, s.as_bytes().to_vec())),
            Element::PrintableString(s) => Ok(primitive(
                PrimitiveTag::PrintableString,
                s.as_bytes().to_vec(),
            )),
            Element::IA5String(s) => Ok(primitive(PrimitiveTag::IA5String, s.as_bytes().to_vec())),
            // times are only read, from certificate validity
            Element::UTCTime(_) => Err(Error::ElementCannotEncode("UTCTime")),
            Element::GeneralizedTime(_) => Err(Error::ElementCannotEncode("GeneralizedTime")),
            Element::Sequence(elements) => Ok(Tlv::new_constructed(
                Tag::universal(PrimitiveTag::Sequence),
                elements
                    .iter()
                    .map(Tlv::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Element::Set(elements) => Ok(Tlv::new_constructed(
                Tag::universal(PrimitiveTag::Set),
                elements
                    .iter()
                    .map(Tlv::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => {
                let tag = Tag::ContextSpecific {
                    slot: *slot,
                    constructed: *constructed,
                };
                if *constructed {
                    let inner = Tlv::try_from(element.as_ref())?;
                    return Ok(Tlv::new_constructed(tag, vec![inner]));
                }
                let inner = Tlv::try_from(element.as_ref())?;
                let data = inner
                    .data()
                    .ok_or(Error::ElementCannotEncode("implicit tag over constructed value"))?;
                Ok(Tlv::new_primitive(tag, data.to_vec()))
            }
            Element::Unimplemented(tlv) => Ok(tlv.clone()),
        }
    }
}

impl EncodableTo<Element> for Tlv {}

impl Encoder<Element, Tlv> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Tlv, Self::Error> {
        Tlv::try_from(self)
    }
}

impl EncodableTo<Element> for Vec<u8> {}

impl Encoder<Element, Vec<u8>> for Element {
    type Error = Error;

    /// Serializes a single element straight to DER bytes.
    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(Tlv::try_from(self)?.to_bytes())
    }
}

// ASN.1 INTEGER is an arbitrary-size two's complement value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    pub fn bits(&self) -> u64 {
        self.inner.bits()
    }

    pub fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }

    /// Magnitude as an unsigned value, `None` when the integer is negative.
    pub fn to_biguint(&self) -> Option<BigUint> {
        self.inner.to_biguint()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }

    fn to_der_bytes(&self) -> Vec<u8> {
        self.inner.to_signed_bytes_be()
    }
}

impl From<BigInt> for Integer {
    fn from(inner: BigInt) -> Self {
        Integer { inner }
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer {
            inner: BigInt::from_biguint(Sign::Plus, value),
        }
    }
}

impl From<&BigUint> for Integer {
    fn from(value: &BigUint) -> Self {
        Integer::from(value.clone())
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl TryFrom<&[u8]> for Integer {
    type Error = Error;

    /// Reads DER content octets, rejecting empty and padded encodings.
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value {
            [] => Err(Error::IntegerNoData),
            [0x00, next, ..] if next & 0x80 == 0 => Err(Error::IntegerNotMinimal),
            [0xff, next, ..] if next & 0x80 != 0 => Err(Error::IntegerNotMinimal),
            _ => Ok(Integer {
                inner: BigInt::from_signed_bytes_be(value),
            }),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for v in value {
            val = (val << 7) | (*v as u64 & 0x7f);
            pending = *v & 0x80 != 0;
            if !pending {
                subidentifiers.push(val);
                val = 0;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first subidentifier packs two arcs: 40 * X + Y.
        let first = subidentifiers[0];
        let (x, y) = match first {
            0..40 => (0, first),
            40..80 => (1, first - 40),
            _ => (2, first - 80),
        };
        let inner = [x, y]
            .into_iter()
            .chain(subidentifiers[1..].iter().copied())
            .collect();
        Ok(ObjectIdentifier { inner })
    }
}

impl TryFrom<&ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self, Self::Error> {
        let [x, y, rest @ ..] = oid.inner.as_slice() else {
            return Err(Error::ObjectIdentifierTooFewComponents);
        };

        let mut result = Vec::new();
        for v in std::iter::once(x * 40 + y).chain(rest.iter().copied()) {
            let mut encoded = vec![(v & 0x7f) as u8];
            let mut value = v >> 7;
            while value > 0 {
                encoded.push((value & 0x7f) as u8 | 0x80);
                value >>= 7;
            }
            result.extend(encoded.into_iter().rev());
        }
        Ok(result)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .inner
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .split('.')
            .map(|s| s.parse::<u64>().map_err(Error::ParseInt))
            .collect::<Result<Vec<u64>, Error>>()?;
        if inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused as usize)
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.split_first() {
            Some((&unused, _)) if unused > 7 => Err(Error::BitStringUnusedBitsOutOfRange(unused)),
            Some((&unused, data)) => Ok(BitString {
                unused,
                data: data.to_vec(),
            }),
            None => Err(Error::BitStringNoData),
        }
    }
}

impl From<&BitString> for Vec<u8> {
    fn from(value: &BitString) -> Self {
        std::iter::once(value.unused)
            .chain(value.data.iter().copied())
            .collect()
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut result = String::new();
        for (i, byte) in self.data.iter().enumerate() {
            if i == self.data.len() - 1 && self.unused > 0 {
                let bit_count = 8 - self.unused as usize;
                result.push_str(&format!("{:0bit_count$b}", byte >> self.unused));
            } else {
                result.push_str(&format!("{:08b}", byte));
            }
        }
        write!(f, "{}", result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl TryFrom<&[u8]> for ASN1Object {
    type Error = Error;

    /// Parses nested DER, such as the payload of an OCTET STRING or BIT STRING.
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let der: Der = value.decode().map_err(Error::FailedToDecodeDer)?;
        der.decode()
    }
}

fn parse_utc_time(data: &[u8]) -> Result<NaiveDateTime, Error> {
    let s = std::str::from_utf8(data).map_err(|_| Error::UtcTimeInvalidFormat)?;
    NaiveDateTime::parse_from_str(s, "%y%m%d%H%M%SZ").map_err(|_| Error::UtcTimeInvalidFormat)
}

fn parse_generalized_time(data: &[u8]) -> Result<NaiveDateTime, Error> {
    let s = std::str::from_utf8(data).map_err(|_| Error::GeneralizedTimeInvalidFormat)?;
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%SZ")
        .map_err(|_| Error::GeneralizedTimeInvalidFormat)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDateTime;
    use kagi::decoder::Decoder;
    use kagi::encoder::Encoder;
    use kagi_der::{Der, PrimitiveTag, Tag, Tlv};
    use num_bigint::BigInt;
    use rstest::rstest;

    use crate::error::Error;
    use crate::{ASN1Object, BitString, Element, Integer, ObjectIdentifier, OctetString};

    #[rstest(input, expected,
        case(vec![0x01], "1"),
        case(vec![0x00], "0"),
        case(vec![0xff], "-1"),
        case(vec![0x00, 0x80], "128"),
        case(vec![0x03, 0xd4, 0x15, 0x31, 0x8e, 0x2c, 0x57, 0x1d, 0x29, 0x05, 0xfc, 0x3e, 0x05, 0x27, 0x68, 0x9d, 0x0d, 0x09], "333504890676592408951587385614406537514249")
    )]
    fn test_parse_element_integer(input: Vec<u8>, expected: &str) {
        let expected_num = Integer::from(BigInt::from_str(expected).unwrap());
        let value = Integer::try_from(input.as_slice()).unwrap();
        assert_eq!(expected_num, value);
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::padded_positive(vec![0x00, 0x01])]
    #[case::padded_negative(vec![0xff, 0x80])]
    fn test_parse_element_integer_rejects_non_der(#[case] input: Vec<u8>) {
        assert!(Integer::try_from(input.as_slice()).is_err());
    }

    #[rstest]
    #[case::zero(0, vec![0x00])]
    #[case::high_bit(128, vec![0x00, 0x80])]
    #[case::f4(65537, vec![0x01, 0x00, 0x01])]
    #[case::negative(-129, vec![0xff, 0x7f])]
    fn test_integer_to_der_bytes(#[case] value: i64, #[case] expected: Vec<u8>) {
        assert_eq!(expected, Integer::from(value).to_der_bytes());
    }

    #[test]
    fn test_integer_to_biguint() {
        assert_eq!(Some(65537u32.into()), Integer::from(65537).to_biguint());
        assert_eq!(None, Integer::from(-3).to_biguint());
    }

    #[rstest(input, expected,
        case("1.2.3.4", vec![1, 2, 3, 4]),
        case("1.2.840.113549.1.1.1", vec![1, 2, 840, 113549, 1, 1, 1])
    )]
    fn test_object_identifier_from_string(input: &str, expected: Vec<u64>) {
        let actual = ObjectIdentifier::from_str(input).unwrap();
        assert_eq!(expected, actual.arcs());
        assert_eq!(input, actual.to_string());
    }

    #[rstest]
    #[case::single("1")]
    #[case::garbage("1.x.3")]
    fn test_object_identifier_from_string_error(#[case] input: &str) {
        assert!(ObjectIdentifier::from_str(input).is_err());
    }

    #[rstest(input, expected,
        // ISO/ITU-T joint standards (1.2)
        case(vec![0x2A], vec![1, 2]),
        // private enterprise arc (1.3.6.1.4.1)
        case(vec![0x2B, 0x06, 0x01, 0x04, 0x01], vec![1, 3, 6, 1, 4, 1]),
        // ITU-T data (0.9.2342.19200300.100.1.1)
        case(vec![0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01], vec![0, 9, 2342, 19200300, 100, 1, 1]),
        // rsaEncryption (1.2.840.113549.1.1.1)
        case(vec![0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01], vec![1, 2, 840, 113549, 1, 1, 1]),
        // Ed25519 (1.3.101.112)
        case(vec![0x2B, 0x65, 0x70], vec![1, 3, 101, 112]),
        // zero arc inside the identifier (2.5.4.0)
        case(vec![0x55, 0x04, 0x00], vec![2, 5, 4, 0])
    )]
    fn test_object_identifier_bytes(input: Vec<u8>, expected: Vec<u64>) {
        let oid = ObjectIdentifier::try_from(input.as_slice()).unwrap();
        assert_eq!(expected, oid.arcs());
        assert_eq!(input, Vec::<u8>::try_from(&oid).unwrap());
    }

    #[test]
    fn test_object_identifier_incomplete() {
        let result = ObjectIdentifier::try_from([0x2a, 0x86].as_slice());
        assert!(matches!(
            result,
            Err(Error::ObjectIdentifierIncompleteEncoding)
        ));
    }

    #[rstest(input, expected,
        case(BitString::new(0, vec![0b10101010]), "10101010"),
        case(BitString::new(0, vec![0b10101010, 0b11001100]), "1010101011001100"),
        case(BitString::new(2, vec![0b10101010, 0b11001100]), "10101010110011"),
        case(BitString::new(0, vec![]), ""),
        case(BitString::new(4, vec![0b10100000]), "1010")
    )]
    fn test_bitstring_to_string(input: BitString, expected: &str) {
        assert_eq!(expected, input.to_string());
    }

    #[test]
    fn test_bitstring_unused_bits_out_of_range() {
        let result = BitString::try_from([0x08, 0x00].as_slice());
        assert!(matches!(result, Err(Error::BitStringUnusedBitsOutOfRange(8))));
    }

    #[rstest(input, expected,
        case(OctetString::from(vec![0x01]), "01"),
        case(OctetString::from(vec![0x01, 0x02, 0x03]), "010203"),
        case(OctetString::from(vec![]), ""),
        case(OctetString::from(vec![0x00, 0x7f, 0x80, 0xff]), "007f80ff")
    )]
    fn test_octetstring_to_string(input: OctetString, expected: &str) {
        assert_eq!(expected, input.to_string());
    }

    const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    #[rstest(input, expected,
        case(b"191216030210Z".to_vec(), "2019-12-16 03:02:10"),
        case(b"260514090000Z".to_vec(), "2026-05-14 09:00:00")
    )]
    fn test_parse_der_to_utc_time(input: Vec<u8>, expected: &str) {
        let expected = NaiveDateTime::parse_from_str(expected, DATE_FORMAT).unwrap();
        assert_eq!(expected, crate::parse_utc_time(&input).unwrap());
    }

    #[rstest(input, expected,
        case(b"20191216030210Z".to_vec(), "2019-12-16 03:02:10"),
        case(b"20500101000000Z".to_vec(), "2050-01-01 00:00:00")
    )]
    fn test_parse_der_to_generalized_time(input: Vec<u8>, expected: &str) {
        let expected = NaiveDateTime::parse_from_str(expected, DATE_FORMAT).unwrap();
        assert_eq!(expected, crate::parse_generalized_time(&input).unwrap());
    }

    #[rstest]
    #[case::boolean(Element::Boolean(true), PrimitiveTag::Boolean, vec![0xff])]
    #[case::integer(Element::Integer(Integer::from(65537)), PrimitiveTag::Integer, vec![0x01, 0x00, 0x01])]
    #[case::null(Element::Null, PrimitiveTag::Null, vec![])]
    #[case::octet_string(Element::OctetString(OctetString::from(vec![0xde, 0xad])), PrimitiveTag::OctetString, vec![0xde, 0xad])]
    #[case::bit_string(Element::BitString(BitString::new(0, vec![0x30, 0x00])), PrimitiveTag::BitString, vec![0x00, 0x30, 0x00])]
    #[case::oid(Element::ObjectIdentifier(ObjectIdentifier::from_str("1.2.840.10045.2.1").unwrap()), PrimitiveTag::ObjectIdentifier, vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01])]
    fn test_element_to_tlv_primitive(
        #[case] element: Element,
        #[case] expected_tag: PrimitiveTag,
        #[case] expected_data: Vec<u8>,
    ) {
        let tlv: Tlv = element.encode().unwrap();
        assert_eq!(&Tag::universal(expected_tag), tlv.tag());
        assert_eq!(Some(expected_data.as_slice()), tlv.data());
        assert_eq!(element, Element::try_from(&tlv).unwrap());
    }

    #[rstest]
    #[case::utc_time(Element::UTCTime(NaiveDateTime::default()), "UTCTime")]
    #[case::generalized_time(Element::GeneralizedTime(NaiveDateTime::default()), "GeneralizedTime")]
    fn test_time_is_decode_only(#[case] element: Element, #[case] kind: &str) {
        let result: Result<Tlv, Error> = element.encode();
        assert!(matches!(result, Err(Error::ElementCannotEncode(k)) if k == kind));
    }

    #[test]
    fn test_element_sequence_bytes() {
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(0)),
            Element::Sequence(vec![
                Element::ObjectIdentifier(
                    ObjectIdentifier::from_str("1.2.840.113549.1.1.1").unwrap(),
                ),
                Element::Null,
            ]),
        ]);
        let bytes: Vec<u8> = element.encode().unwrap();
        assert_eq!(
            vec![
                0x30, 0x12, 0x02, 0x01, 0x00, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86,
                0xf7, 0x0d, 0x01, 0x01, 0x01, 0x05, 0x00
            ],
            bytes
        );
        let obj = ASN1Object::try_from(bytes.as_slice()).unwrap();
        assert_eq!(&[element], obj.elements());
    }

    #[rstest]
    #[case::explicit(vec![0xa0, 0x03, 0x02, 0x01, 0x02], Element::ContextSpecific {
        slot: 0,
        constructed: true,
        element: Box::new(Element::Integer(Integer::from(2))),
    })]
    #[case::implicit(vec![0x81, 0x02, 0x00, 0xff], Element::ContextSpecific {
        slot: 1,
        constructed: false,
        element: Box::new(Element::OctetString(OctetString::from(vec![0x00, 0xff]))),
    })]
    fn test_context_specific(#[case] input: Vec<u8>, #[case] expected: Element) {
        let der: Der = input.decode().unwrap();
        let obj: ASN1Object = der.decode().unwrap();
        assert_eq!(&[expected], obj.elements());

        let encoded: Der = obj.encode().unwrap();
        assert_eq!(input, encoded.to_bytes());
    }

    #[test]
    fn test_constructed_context_specific_with_two_children_is_kept_raw() {
        let input = vec![0xa0, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
        let der: Der = input.decode().unwrap();
        let obj: ASN1Object = der.decode().unwrap();
        assert!(matches!(obj.elements(), [Element::Unimplemented(_)]));

        let encoded: Der = obj.encode().unwrap();
        assert_eq!(input, encoded.to_bytes());
    }

    #[test]
    fn test_unimplemented_tag_survives_round_trip() {
        // APPLICATION 1, primitive
        let input = vec![0x41, 0x01, 0x07];
        let der: Der = input.decode().unwrap();
        let obj: ASN1Object = der.decode().unwrap();
        assert!(matches!(obj.elements(), [Element::Unimplemented(_)]));
        let encoded: Der = obj.encode().unwrap();
        assert_eq!(input, encoded.to_bytes());
    }
}
