//! PEM armor for key material.
//!
//! [`parse_blocks`] walks arbitrary text, collects every readable
//! `BEGIN`/`END` section and silently skips the rest. [`Pem`] writes a single
//! block. [`format_key`] rebuilds armored text from a loosely formatted key
//! string.

pub mod blocks;
pub mod error;
pub mod format;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use error::Error;

pub use blocks::{PemBlock, parse_blocks};
pub use format::{
    DEFAULT_LINE_WIDTH, format_key, format_pkcs1_private_key, format_pkcs8_private_key,
    format_public_key,
};

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// PKCS#8 private key
    PrivateKey,
    EncryptedPrivateKey,
    /// PKCS#1 RSA private key
    RSAPrivateKey,
    ECPrivateKey,
    /// SubjectPublicKeyInfo
    PublicKey,
    /// PKCS#1 RSA public key
    RSAPublicKey,
    Certificate,
    Unknown,
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Label::PrivateKey => PRIVATE_KEY_LABEL,
            Label::EncryptedPrivateKey => ENCRYPTED_PRIVATE_KEY_LABEL,
            Label::RSAPrivateKey => RSA_PRIVATE_KEY_LABEL,
            Label::ECPrivateKey => EC_PRIVATE_KEY_LABEL,
            Label::PublicKey => PUBLIC_KEY_LABEL,
            Label::RSAPublicKey => RSA_PUBLIC_KEY_LABEL,
            Label::Certificate => CERTIFICATE_LABEL,
            Label::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIVATE_KEY_LABEL => Ok(Label::PrivateKey),
            ENCRYPTED_PRIVATE_KEY_LABEL => Ok(Label::EncryptedPrivateKey),
            RSA_PRIVATE_KEY_LABEL => Ok(Label::RSAPrivateKey),
            EC_PRIVATE_KEY_LABEL => Ok(Label::ECPrivateKey),
            PUBLIC_KEY_LABEL => Ok(Label::PublicKey),
            RSA_PUBLIC_KEY_LABEL => Ok(Label::RSAPublicKey),
            CERTIFICATE_LABEL => Ok(Label::Certificate),
            _ => Err(Error::InvalidLabel),
        }
    }
}

impl Label {
    pub fn begin_marker(&self) -> String {
        format!("-----BEGIN {}-----", self)
    }

    pub fn end_marker(&self) -> String {
        format!("-----END {}-----", self)
    }
}


/// A single armored block ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: Label,
    base64_data: String,
}

impl Pem {
    pub fn from_bytes(label: Label, data: &[u8]) -> Self {
        Pem {
            label,
            base64_data: STANDARD.encode(data),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }
}

impl Display for Pem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.label.begin_marker())?;
        for chunk in self.base64_data.as_bytes().chunks(DEFAULT_LINE_WIDTH) {
            let line = std::str::from_utf8(chunk).map_err(|_| std::fmt::Error)?;
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}", self.label.end_marker())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use crate::{Error, Label, Pem, parse_blocks};

    const RSA1024_PKCS1: &str = include_str!("../../testdata/keys/rsa1024_pkcs1.pem");
    const RSA1024_SPKI: &str = include_str!("../../testdata/keys/rsa1024_spki.pem");
    const RSA1024_CERT: &str = include_str!("../../testdata/keys/rsa1024_cert.pem");

    #[rstest]
    #[case("PRIVATE KEY", Label::PrivateKey)]
    #[case("ENCRYPTED PRIVATE KEY", Label::EncryptedPrivateKey)]
    #[case("RSA PRIVATE KEY", Label::RSAPrivateKey)]
    #[case("EC PRIVATE KEY", Label::ECPrivateKey)]
    #[case("PUBLIC KEY", Label::PublicKey)]
    #[case("RSA PUBLIC KEY", Label::RSAPublicKey)]
    #[case("CERTIFICATE", Label::Certificate)]
    fn test_label(#[case] text: &str, #[case] label: Label) {
        assert_eq!(label, Label::from_str(text).unwrap());
        assert_eq!(text, label.to_string());
        assert_eq!(format!("-----BEGIN {}-----", text), label.begin_marker());
        assert_eq!(format!("-----END {}-----", text), label.end_marker());
    }

    #[rstest]
    #[case::openssh("OPENSSH PRIVATE KEY")]
    #[case::lower_case("public key")]
    #[case::empty("")]
    fn test_unknown_label(#[case] text: &str) {
        assert_eq!(Err(Error::InvalidLabel), Label::from_str(text));
    }

    #[rstest]
    #[case(RSA1024_PKCS1, Label::RSAPrivateKey)]
    #[case(RSA1024_SPKI, Label::PublicKey)]
    #[case(RSA1024_CERT, Label::Certificate)]
    fn test_pem_matches_openssl_layout(#[case] input: &str, #[case] label: Label) {
        let block = parse_blocks(input.as_bytes()).remove(0);
        assert_eq!(label, block.kind());

        let pem = Pem::from_bytes(label, block.bytes());
        assert_eq!(label, pem.label());
        assert_eq!(input.trim_end(), pem.to_string());
    }

    #[test]
    fn test_pem_empty_body() {
        let pem = Pem::from_bytes(Label::PublicKey, &[]);
        assert_eq!("", pem.data());
        assert_eq!(
            "-----BEGIN PUBLIC KEY-----\n-----END PUBLIC KEY-----",
            pem.to_string()
        );
    }
}
