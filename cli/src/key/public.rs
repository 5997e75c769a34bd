use clap::{Args, ValueEnum};
use kagi_rsa::transport;
use kagi_rsa::{public_key_to_pem, public_key_to_pkcs1_pem};

use crate::error::Result;
use crate::output::InputEncoding;
use crate::utils::{load_private_key, load_public_key};

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum PublicOutput {
    /// SubjectPublicKeyInfo under `PUBLIC KEY`
    Pem,
    /// PKCS#1 under `RSA PUBLIC KEY`
    Pkcs1Pem,
    /// PKCS#1 DER as unpadded URL-safe Base64
    Base64,
    /// PKCS#1 DER as hex
    Hex,
}

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the key. If not specified, reads from stdin
    file: Option<String>,

    /// Read a public key (SPKI, certificate or PKCS#1) instead of a private key
    #[arg(long)]
    from_public: bool,

    /// Encoding of the input
    #[arg(short, long, value_enum, default_value = "pem")]
    input_encoding: InputEncoding,

    /// Encoding of the output
    #[arg(short, long, value_enum, default_value = "pem")]
    encoding: PublicOutput,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let key = if config.from_public {
        load_public_key(config.file.as_deref(), config.input_encoding)?
    } else {
        load_private_key(config.file.as_deref(), config.input_encoding)?
            .0
            .public_key()
    };

    let output = match config.encoding {
        PublicOutput::Pem => public_key_to_pem(&key)?,
        PublicOutput::Pkcs1Pem => public_key_to_pkcs1_pem(&key),
        PublicOutput::Base64 => transport::public_key_to_base64(&key),
        PublicOutput::Hex => transport::public_key_to_hex(&key),
    };
    println!("{}", output);
    Ok(())
}
