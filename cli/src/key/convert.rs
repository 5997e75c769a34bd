use clap::{Args, ValueEnum};
use kagi_rsa::transport;
use kagi_rsa::{EncodingVariant, private_key_to_pem};
use tracing::info;

use crate::error::Result;
use crate::output::InputEncoding;
use crate::utils::load_private_key;

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Variant {
    Pkcs1,
    Pkcs8,
}

impl From<Variant> for EncodingVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Pkcs1 => EncodingVariant::Pkcs1,
            Variant::Pkcs8 => EncodingVariant::Pkcs8,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum PrivateOutput {
    Pem,
    Base64,
    Hex,
}

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the private key. If not specified, reads from stdin
    file: Option<String>,

    /// Target encoding variant
    #[arg(short, long, value_enum, default_value = "pkcs8")]
    to: Variant,

    /// Encoding of the input
    #[arg(short, long, value_enum, default_value = "pem")]
    input_encoding: InputEncoding,

    /// Text encoding of the output
    #[arg(short, long, value_enum, default_value = "pem")]
    encoding: PrivateOutput,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let (key, from) = load_private_key(config.file.as_deref(), config.input_encoding)?;
    let to = EncodingVariant::from(config.to);
    info!(%from, %to, bits = key.size(), "converting private key");

    let output = match config.encoding {
        PrivateOutput::Pem => private_key_to_pem(&key, to)?,
        PrivateOutput::Base64 => transport::private_key_to_base64(&key, to)?,
        PrivateOutput::Hex => transport::private_key_to_hex(&key, to)?,
    };
    println!("{}", output);
    Ok(())
}
