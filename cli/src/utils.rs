use std::fs;
use std::io::{self, Read};

use kagi_rsa::transport;
use kagi_rsa::{EncodingVariant, RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::error::Result;
use crate::output::InputEncoding;

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

pub(crate) fn read_text(file: Option<&str>) -> Result<String> {
    Ok(String::from_utf8(read_input(file)?)?)
}

/// Turns transport text into DER. PEM input is passed through untouched.
fn unwrap_transport(input: Vec<u8>, encoding: InputEncoding) -> Result<Vec<u8>> {
    match encoding {
        InputEncoding::Pem | InputEncoding::Der => Ok(input),
        InputEncoding::Base64 => {
            let text = String::from_utf8(input)?;
            Ok(transport::from_base64(text.trim())?)
        }
        InputEncoding::Hex => {
            let text = String::from_utf8(input)?;
            Ok(transport::from_hex(text.trim())?)
        }
    }
}

pub(crate) fn load_private_key(
    file: Option<&str>,
    encoding: InputEncoding,
) -> Result<(RsaPrivateKey, EncodingVariant)> {
    let input = read_input(file)?;
    debug!(len = input.len(), "read private key input");

    let key = match encoding {
        InputEncoding::Pem => kagi_rsa::parse_private_key_pem(&input)?,
        _ => kagi_rsa::decode_private_key(&unwrap_transport(input, encoding)?)?,
    };
    Ok(key)
}

pub(crate) fn load_public_key(file: Option<&str>, encoding: InputEncoding) -> Result<RsaPublicKey> {
    let input = read_input(file)?;
    debug!(len = input.len(), "read public key input");

    let key = match encoding {
        InputEncoding::Pem => kagi_rsa::parse_public_key_pem(&input)?,
        _ => kagi_rsa::decode_public_key(&unwrap_transport(input, encoding)?)?,
    };
    Ok(key)
}
