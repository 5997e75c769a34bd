//! Compact text encodings for keys carried in URLs, headers and config
//! values: unpadded URL-safe Base64 and lowercase Hex.
//!
//! Private keys are written in the variant the caller picks. Public keys go
//! out as PKCS#1 and are read back as PKCS#1 only.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::codec::{
    decode_pkcs1_public_key, decode_private_key, encode_private_key, encode_public_key,
};
use crate::error::{EncodingError, Result};
use crate::key::{EncodingVariant, RsaPrivateKey, RsaPublicKey};

pub fn to_base64(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub fn from_base64(text: &str) -> std::result::Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}

pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Accepts upper and lower case digits.
pub fn from_hex(text: &str) -> std::result::Result<Vec<u8>, EncodingError> {
    Ok(hex::decode(text)?)
}

pub fn private_key_to_base64(key: &RsaPrivateKey, variant: EncodingVariant) -> Result<String> {
    Ok(to_base64(&encode_private_key(key, variant)?))
}

pub fn private_key_to_hex(key: &RsaPrivateKey, variant: EncodingVariant) -> Result<String> {
    Ok(to_hex(&encode_private_key(key, variant)?))
}

pub fn public_key_to_base64(key: &RsaPublicKey) -> String {
    to_base64(&encode_public_key(key))
}

pub fn public_key_to_hex(key: &RsaPublicKey) -> String {
    to_hex(&encode_public_key(key))
}

pub fn private_key_from_base64(text: &str) -> Result<(RsaPrivateKey, EncodingVariant)> {
    decode_private_key(&from_base64(text)?)
}

pub fn private_key_from_hex(text: &str) -> Result<(RsaPrivateKey, EncodingVariant)> {
    decode_private_key(&from_hex(text)?)
}

pub fn public_key_from_base64(text: &str) -> Result<RsaPublicKey> {
    decode_pkcs1_public_key(&from_base64(text)?)
}

pub fn public_key_from_hex(text: &str) -> Result<RsaPublicKey> {
    decode_pkcs1_public_key(&from_hex(text)?)
}
