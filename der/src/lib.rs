//! DER (Distinguished Encoding Rules) tag-length-value layer.
//!
//! [`Der`] is a flat list of top-level [`Tlv`]s. Constructed values are parsed
//! recursively, primitive values keep their raw content octets. Only the
//! definite, minimal forms DER allows are accepted:
//!
//! - indefinite length (`0x80`) is rejected
//! - long-form lengths must be minimal
//! - tag numbers must fit the low-tag-number form
//! - constructed values nest at most [`MAX_DEPTH`] levels

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use nom::{IResult, Parser};

use crate::error::Error;

pub mod error;

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_CLASS_UNIVERSAL: u8 = 0x00;
const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_NUMBER_MASK: u8 = 0x1f;

/// Deepest constructed nesting accepted by the parser. Top-level values are depth 0.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.elements.iter().flat_map(Tlv::to_bytes).collect()
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_der(self)
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_der(self)
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.to_bytes())
    }
}

fn parse_der(input: &[u8]) -> Result<Der, Error> {
    if input.is_empty() {
        return Err(Error::Empty);
    }
    let mut elements = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let (remaining, tlv) = Tlv::parse(rest).map_err(|e| match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        })?;
        elements.push(tlv);
        rest = remaining;
    }
    Ok(Der { elements })
}

/// Universal tag numbers understood by the upper layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimitiveTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    Unimplemented(u8),
}

impl From<u8> for PrimitiveTag {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x10 => Self::Sequence,
            0x11 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            n => Self::Unimplemented(n),
        }
    }
}

impl From<&PrimitiveTag> for u8 {
    fn from(value: &PrimitiveTag) -> Self {
        match value {
            PrimitiveTag::Boolean => 0x01,
            PrimitiveTag::Integer => 0x02,
            PrimitiveTag::BitString => 0x03,
            PrimitiveTag::OctetString => 0x04,
            PrimitiveTag::Null => 0x05,
            PrimitiveTag::ObjectIdentifier => 0x06,
            PrimitiveTag::UTF8String => 0x0c,
            PrimitiveTag::Sequence => 0x10,
            PrimitiveTag::Set => 0x11,
            PrimitiveTag::PrintableString => 0x13,
            PrimitiveTag::IA5String => 0x16,
            PrimitiveTag::UTCTime => 0x17,
            PrimitiveTag::GeneralizedTime => 0x18,
            PrimitiveTag::Unimplemented(n) => *n,
        }
    }
}

/// A DER identifier octet.
///
/// `Primitive` covers every non context-specific class and keeps the raw
/// identifier byte so that application and private tags survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Primitive(PrimitiveTag, u8),
    ContextSpecific { slot: u8, constructed: bool },
}

impl Tag {
    pub fn universal(tag: PrimitiveTag) -> Self {
        let number = u8::from(&tag);
        let raw = match tag {
            PrimitiveTag::Sequence | PrimitiveTag::Set => number | TAG_CONSTRUCTED,
            _ => number,
        };
        Tag::Primitive(tag, raw)
    }

    pub fn is_constructed(&self) -> bool {
        match self {
            Tag::Primitive(_, raw) => raw & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            Tag::Primitive(_, raw) => *raw,
            Tag::ContextSpecific { slot, constructed } => {
                let flag = if *constructed { TAG_CONSTRUCTED } else { 0 };
                TAG_CLASS_CONTEXT_SPECIFIC | flag | (slot & TAG_NUMBER_MASK)
            }
        }
    }
}

impl From<u8> for Tag {
    fn from(raw: u8) -> Self {
        let number = raw & TAG_NUMBER_MASK;
        match raw & TAG_CLASS_MASK {
            TAG_CLASS_CONTEXT_SPECIFIC => Tag::ContextSpecific {
                slot: number,
                constructed: raw & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            },
            TAG_CLASS_UNIVERSAL => Tag::Primitive(PrimitiveTag::from(number), raw),
            _ => Tag::Primitive(PrimitiveTag::Unimplemented(raw), raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        Tlv {
            tag,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Content octets of a primitive value.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Children of a constructed value.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let content = match &self.value {
            Value::Data(data) => data.clone(),
            Value::Tlv(tlvs) => tlvs.iter().flat_map(Tlv::to_bytes).collect(),
        };
        let mut out = Vec::with_capacity(content.len() + 6);
        out.push(self.tag.to_byte());
        out.extend(encode_length(content.len()));
        out.extend(content);
        out
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv, Error> {
        Self::parse_at(input, 0)
    }

    fn parse_at(input: &[u8], depth: usize) -> IResult<&[u8], Tlv, Error> {
        if depth > MAX_DEPTH {
            return Err(nom::Err::Failure(Error::NestingTooDeep(MAX_DEPTH)));
        }
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = take_bytes(input, length)?;

        if tag.is_constructed() {
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, tlv) = Self::parse_at(data, depth + 1)?;
                data = rest;
                tlvs.push(tlv);
            }
            return Ok((input, Tlv::new_constructed(tag, tlvs)));
        }

        Ok((input, Tlv::new_primitive(tag, data.to_vec())))
    }
}

impl<I> nom::error::ParseError<I> for Error {
    fn from_error_kind(_input: I, kind: nom::error::ErrorKind) -> Self {
        Error::Parser(kind)
    }

    fn append(_input: I, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

fn take_byte(input: &[u8]) -> IResult<&[u8], u8, Error> {
    nom::number::be_u8().parse(input)
}

fn take_bytes(input: &[u8], count: usize) -> IResult<&[u8], &[u8], Error> {
    nom::bytes::complete::take(count).parse(input)
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag, Error> {
    let (input, raw) = take_byte(input)?;
    if raw & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        return Err(nom::Err::Failure(Error::HighTagNumber));
    }
    Ok((input, Tag::from(raw)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize, Error> {
    let (input, n) = take_byte(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, n as usize));
    }
    // long form: the low 7 bits count the length octets that follow.
    let count = n & 0x7f;
    if count == 0 {
        return Err(nom::Err::Failure(Error::IndefiniteLength));
    }
    if count as usize > std::mem::size_of::<usize>() {
        return Err(nom::Err::Failure(Error::LengthTooLong(count)));
    }
    let (input, bs) = take_bytes(input, count as usize)?;
    if bs[0] == 0 {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    let length = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
    if length < 0x80 {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    Ok((input, length))
}

fn encode_length(length: usize) -> Vec<u8> {
    if length < 0x80 {
        return vec![length as u8];
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let mut out = Vec::with_capacity(bytes.len() - skip + 1);
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

#[cfg(test)]
mod tests {
    use kagi::decoder::Decoder;
    use rstest::rstest;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x02], Tag::Primitive(PrimitiveTag::Integer, 0x02)),
        case(vec![0x02, 0x01], Tag::Primitive(PrimitiveTag::Integer, 0x02)),
        case(vec![0x30, 0x01], Tag::Primitive(PrimitiveTag::Sequence, 0x30)),
        case(vec![0xa0], Tag::ContextSpecific { slot: 0, constructed: true }),
        case(vec![0x81], Tag::ContextSpecific { slot: 1, constructed: false }),
        case(vec![0x61], Tag::Primitive(PrimitiveTag::Unimplemented(0x61), 0x61))
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let (_, actual) = parse_tag(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let (_, actual) = parse_length(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest]
    #[case::indefinite(vec![0x80], Error::IndefiniteLength)]
    #[case::long_form_for_short_value(vec![0x81, 0x05], Error::NonMinimalLength)]
    #[case::leading_zero(vec![0x82, 0x00, 0x90], Error::NonMinimalLength)]
    #[case::too_many_octets(vec![0x89, 1, 1, 1, 1, 1, 1, 1, 1, 1], Error::LengthTooLong(9))]
    fn test_parse_length_rejects_non_der(#[case] input: Vec<u8>, #[case] expected: Error) {
        match parse_length(&input) {
            Err(nom::Err::Failure(e)) => assert_eq!(expected, e),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[rstest]
    #[case::short(0, vec![0x00])]
    #[case::short_max(0x7f, vec![0x7f])]
    #[case::one_octet(0x80, vec![0x81, 0x80])]
    #[case::two_octets(0x0110, vec![0x82, 0x01, 0x10])]
    #[case::three_octets(0x010000, vec![0x83, 0x01, 0x00, 0x00])]
    fn test_encode_length(#[case] length: usize, #[case] expected: Vec<u8>) {
        assert_eq!(expected, encode_length(length));
    }

    #[rstest(input, expected_tag, expected_data,
        case(vec![0x02, 0x01, 0x01], PrimitiveTag::Integer, vec![0x01]),
        case(vec![0x02, 0x09, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01], PrimitiveTag::Integer, vec![0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
        case(vec![0x13, 0x02, 0x68, 0x69], PrimitiveTag::PrintableString, vec![0x68, 0x69]),
        case(vec![0x0c, 0x04, 0xf0, 0x9f, 0x98, 0x8e], PrimitiveTag::UTF8String, vec![0xf0, 0x9f, 0x98, 0x8e]),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], PrimitiveTag::ObjectIdentifier, vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]),
        case(vec![0x05, 0x00], PrimitiveTag::Null, vec![]),
        case(vec![0x04, 0x04, 0x03, 0x02, 0x06, 0xa0], PrimitiveTag::OctetString, vec![0x03, 0x02, 0x06, 0xa0]),
        case(vec![0x03, 0x04, 0x06, 0x6e, 0x5d, 0xc0], PrimitiveTag::BitString, vec![0x06, 0x6e, 0x5d, 0xc0])
    )]
    fn test_tlv_parse_primitive(input: Vec<u8>, expected_tag: PrimitiveTag, expected_data: Vec<u8>) {
        let (rest, actual) = Tlv::parse(&input).unwrap();
        assert!(rest.is_empty());
        match actual.tag() {
            Tag::Primitive(tag, _) => assert_eq!(&expected_tag, tag),
            other => panic!("expected primitive tag, got {:?}", other),
        }
        assert_eq!(Some(expected_data.as_slice()), actual.data());
    }

    #[test]
    fn test_tlv_parse_structured() {
        let input = vec![
            0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09,
        ];
        let (_, actual) = Tlv::parse(&input).unwrap();
        let children = actual.tlvs().unwrap();
        assert_eq!(3, children.len());
        let values: Vec<&[u8]> = children.iter().filter_map(Tlv::data).collect();
        let expected: Vec<&[u8]> = vec![&[0x07], &[0x08], &[0x09]];
        assert_eq!(expected, values);
    }

    #[test]
    fn test_tlv_parse_context_specific_explicit() {
        // [0] EXPLICIT INTEGER 2, as in a certificate version field.
        let input = vec![0xa0, 0x03, 0x02, 0x01, 0x02];
        let (_, actual) = Tlv::parse(&input).unwrap();
        assert_eq!(
            &Tag::ContextSpecific {
                slot: 0,
                constructed: true
            },
            actual.tag()
        );
        assert_eq!(1, actual.tlvs().map(<[Tlv]>::len).unwrap_or_default());
    }

    #[rstest]
    #[case::sequence(vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x05, 0x00])]
    #[case::long_octet_string({
        let mut v = vec![0x04, 0x81, 0xc8];
        v.extend(std::iter::repeat_n(0xab, 200));
        v
    })]
    #[case::two_top_level(vec![0x05, 0x00, 0x02, 0x01, 0x05])]
    fn test_der_bytes_survive_parse_and_write(#[case] input: Vec<u8>) {
        let der: Der = input.decode().unwrap();
        assert_eq!(input, der.to_bytes());
    }

    #[rstest]
    #[case::empty(vec![], Error::Empty)]
    #[case::truncated_value(vec![0x02, 0x05, 0x01], Error::Parser(nom::error::ErrorKind::Eof))]
    #[case::high_tag(vec![0x1f, 0x81, 0x01, 0x00], Error::HighTagNumber)]
    #[case::indefinite(vec![0x30, 0x80, 0x00, 0x00], Error::IndefiniteLength)]
    fn test_der_decode_error(#[case] input: Vec<u8>, #[case] expected: Error) {
        let slice: &[u8] = &input;
        let result: Result<Der, Error> = slice.decode();
        assert_eq!(Err(expected), result);
    }

    /// `depth` SEQUENCEs wrapped around a NULL, built back to front.
    fn nested_sequences(depth: usize) -> Vec<u8> {
        let mut reversed = vec![0x00, 0x05];
        for _ in 0..depth {
            let length = encode_length(reversed.len());
            reversed.extend(length.iter().rev());
            reversed.push(0x30);
        }
        reversed.reverse();
        reversed
    }

    #[rstest]
    #[case::shallow(1, true)]
    #[case::at_limit(MAX_DEPTH, true)]
    #[case::past_limit(MAX_DEPTH + 1, false)]
    #[case::very_deep(10_000, false)]
    fn test_der_decode_nesting_depth(#[case] depth: usize, #[case] accepted: bool) {
        let input = nested_sequences(depth);
        let result: Result<Der, Error> = input.decode();
        if accepted {
            assert_eq!(input, result.unwrap().to_bytes());
        } else {
            assert_eq!(Err(Error::NestingTooDeep(MAX_DEPTH)), result);
        }
    }

    #[test]
    fn test_der_decode_truncated_child_is_error() {
        // SEQUENCE claims 4 bytes of content but the INTEGER inside claims 5.
        let input = vec![0x30, 0x04, 0x02, 0x05, 0x01, 0x02];
        let result: Result<Der, Error> = input.decode();
        assert!(result.is_err());
    }
}
