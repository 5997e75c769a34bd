//! Reading keys from PEM text and PEM files.
//!
//! Only the first block is used and its label is ignored: the decoders
//! work out the format from the DER itself.

use std::path::Path;

use kagi_pem::parse_blocks;
use tracing::debug;

use crate::codec::{decode_private_key, decode_public_key};
use crate::error::{Error, Result};
use crate::key::{EncodingVariant, RsaPrivateKey, RsaPublicKey};

fn first_block(data: &[u8]) -> Result<Vec<u8>> {
    let mut blocks = parse_blocks(data);
    if blocks.is_empty() {
        return Err(Error::NoBlockFound);
    }
    let block = blocks.swap_remove(0);
    debug!(label = block.label(), len = block.bytes().len(), "using first PEM block");
    Ok(block.into_bytes())
}

pub fn parse_private_key_pem(data: &[u8]) -> Result<(RsaPrivateKey, EncodingVariant)> {
    decode_private_key(&first_block(data)?)
}

/// Accepts `PUBLIC KEY`, `RSA PUBLIC KEY` and `CERTIFICATE` blocks.
pub fn parse_public_key_pem(data: &[u8]) -> Result<RsaPublicKey> {
    decode_public_key(&first_block(data)?)
}

pub fn parse_private_key_file(path: impl AsRef<Path>) -> Result<(RsaPrivateKey, EncodingVariant)> {
    let data = std::fs::read(path)?;
    parse_private_key_pem(&data)
}

pub fn parse_public_key_file(path: impl AsRef<Path>) -> Result<RsaPublicKey> {
    let data = std::fs::read(path)?;
    parse_public_key_pem(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{private_key_to_pem, public_key_to_pkcs1_pem};
    use crate::key::tests::toy_key;

    #[test]
    fn test_first_block_wins() {
        let key = toy_key();
        let first = private_key_to_pem(&key, EncodingVariant::Pkcs8).unwrap();
        let text = format!("{}\n{}\n", first, public_key_to_pkcs1_pem(&key.public_key()));

        let (decoded, variant) = parse_private_key_pem(text.as_bytes()).unwrap();
        assert_eq!(key, decoded);
        assert_eq!(EncodingVariant::Pkcs8, variant);
    }

    #[test]
    fn test_label_is_ignored() {
        let key = toy_key();
        // PKCS#1 body under a PKCS#8 label
        let text = private_key_to_pem(&key, EncodingVariant::Pkcs1)
            .unwrap()
            .replace("RSA PRIVATE KEY", "PRIVATE KEY");

        let (_, variant) = parse_private_key_pem(text.as_bytes()).unwrap();
        assert_eq!(EncodingVariant::Pkcs1, variant);
    }

    #[test]
    fn test_no_block() {
        assert!(matches!(
            parse_private_key_pem(b"no armor here"),
            Err(Error::NoBlockFound)
        ));
        assert!(matches!(parse_public_key_pem(b""), Err(Error::NoBlockFound)));
    }
}
