//! Name and related types
//!
//! Defined in RFC 5280 Section 4.1.2.4
//!
//! ```asn1
//! Name ::= CHOICE { -- only one possibility for now --
//!     rdnSequence  RDNSequence
//! }
//!
//! RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
//!
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//!
//! AttributeTypeAndValue ::= SEQUENCE {
//!     type     AttributeType,
//!     value    AttributeValue
//! }
//! ```

use kagi::decoder::{DecodableFrom, Decoder};
use kagi_asn1::{Element, ObjectIdentifier};

use crate::error::{Error, Result};

/// A certificate issuer or subject, decoded for structure only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub rdn_sequence: Vec<RelativeDistinguishedName>,
}

impl Name {
    pub fn rdn_sequence(&self) -> &[RelativeDistinguishedName] {
        &self.rdn_sequence
    }
}

impl DecodableFrom<Element> for Name {}

impl Decoder<Element, Name> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Name> {
        let Element::Sequence(elements) = self else {
            return Err(Error::NameExpectedSequence);
        };
        let rdn_sequence = elements
            .iter()
            .map(|elem| elem.decode())
            .collect::<Result<Vec<RelativeDistinguishedName>>>()?;
        Ok(Name { rdn_sequence })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    pub attributes: Vec<AttributeTypeAndValue>,
}

impl DecodableFrom<Element> for RelativeDistinguishedName {}

impl Decoder<Element, RelativeDistinguishedName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RelativeDistinguishedName> {
        let Element::Set(elements) = self else {
            return Err(Error::RdnExpectedSet);
        };
        let attributes = elements
            .iter()
            .map(|elem| elem.decode())
            .collect::<Result<Vec<AttributeTypeAndValue>>>()?;
        Ok(RelativeDistinguishedName { attributes })
    }
}

/// The value is kept as whatever element the certificate carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub attribute_type: ObjectIdentifier,
    pub attribute_value: Element,
}

impl DecodableFrom<Element> for AttributeTypeAndValue {}

impl Decoder<Element, AttributeTypeAndValue> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AttributeTypeAndValue> {
        let Element::Sequence(seq) = self else {
            return Err(Error::AttributeTypeAndValueExpectedSequence);
        };
        match seq.as_slice() {
            [Element::ObjectIdentifier(oid), value] => Ok(AttributeTypeAndValue {
                attribute_type: oid.clone(),
                attribute_value: value.clone(),
            }),
            [_, _] => Err(Error::AttributeTypeAndValueExpectedOid),
            _ => Err(Error::AttributeTypeAndValueInvalidElementCount),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn attribute(oid: &str, value: Element) -> Element {
        Element::Sequence(vec![
            Element::ObjectIdentifier(ObjectIdentifier::from_str(oid).unwrap()),
            value,
        ])
    }

    #[test]
    fn test_name_decode() {
        let elem = Element::Sequence(vec![
            Element::Set(vec![attribute("2.5.4.6", Element::PrintableString("JP".into()))]),
            Element::Set(vec![
                attribute("2.5.4.3", Element::UTF8String("kagi test".into())),
                attribute("1.2.3.4", Element::Null),
            ]),
        ]);
        let name: Name = elem.decode().unwrap();

        assert_eq!(2, name.rdn_sequence().len());
        let last = &name.rdn_sequence()[1].attributes;
        assert_eq!("2.5.4.3", last[0].attribute_type.to_string());
        assert_eq!(Element::UTF8String("kagi test".into()), last[0].attribute_value);
        assert_eq!(Element::Null, last[1].attribute_value);
    }

    #[test]
    fn test_empty_name() {
        let name: Name = Element::Sequence(vec![]).decode().unwrap();
        assert!(name.rdn_sequence().is_empty());
    }

    #[rstest]
    #[case::not_sequence(Element::Null, Error::NameExpectedSequence)]
    #[case::rdn_not_set(Element::Sequence(vec![Element::Sequence(vec![])]), Error::RdnExpectedSet)]
    #[case::attribute_not_sequence(
        Element::Sequence(vec![Element::Set(vec![Element::Null])]),
        Error::AttributeTypeAndValueExpectedSequence
    )]
    #[case::attribute_without_oid(
        Element::Sequence(vec![Element::Set(vec![
            Element::Sequence(vec![Element::Null, Element::Null]),
        ])]),
        Error::AttributeTypeAndValueExpectedOid
    )]
    #[case::attribute_one_element(
        Element::Sequence(vec![Element::Set(vec![Element::Sequence(vec![Element::Null])])]),
        Error::AttributeTypeAndValueInvalidElementCount
    )]
    fn test_name_decode_error(#[case] elem: Element, #[case] expected: Error) {
        let result: Result<Name> = elem.decode();
        assert_eq!(expected.to_string(), result.unwrap_err().to_string());
    }
}
