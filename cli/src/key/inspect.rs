use std::fmt::Write;

use clap::Args;
use kagi_rsa::{EncodingVariant, RsaPublicKey};
use serde::Serialize;

use crate::error::Result;
use crate::output::{InputEncoding, OutputFormat, format_colon_hex};
use crate::utils::{load_private_key, load_public_key};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the key file (PEM, DER or transport text). If not specified, reads from stdin
    file: Option<String>,

    /// Treat the input as a public key (SPKI, certificate or PKCS#1)
    #[arg(long)]
    public: bool,

    /// Encoding of the input
    #[arg(short, long, value_enum, default_value = "pem")]
    input_encoding: InputEncoding,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Serialize)]
struct KeySummary {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    bits: u64,
    public_exponent: String,
    modulus: String,
    #[serde(skip)]
    variant: Option<EncodingVariant>,
    #[serde(skip)]
    modulus_bytes: Vec<u8>,
}

impl KeySummary {
    fn new(key: &RsaPublicKey, variant: Option<EncodingVariant>) -> Self {
        KeySummary {
            kind: if variant.is_some() { "private" } else { "public" },
            encoding: variant.map(|v| v.to_string()),
            bits: key.size(),
            public_exponent: key.e().to_string(),
            modulus: key.n().to_str_radix(16),
            variant,
            modulus_bytes: key.n().to_bytes_be(),
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let summary = if config.public {
        let key = load_public_key(config.file.as_deref(), config.input_encoding)?;
        KeySummary::new(&key, None)
    } else {
        let (key, variant) = load_private_key(config.file.as_deref(), config.input_encoding)?;
        KeySummary::new(&key.public_key(), Some(variant))
    };

    let output = match config.output {
        OutputFormat::Text => format_text(&summary)?,
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
    };
    println!("{}", output);
    Ok(())
}

fn format_text(summary: &KeySummary) -> Result<String> {
    let mut output = String::new();

    match summary.variant {
        Some(EncodingVariant::Pkcs1) => writeln!(output, "RSA Private Key (PKCS#1)")?,
        Some(EncodingVariant::Pkcs8) => writeln!(output, "RSA Private Key (PKCS#8)")?,
        None => writeln!(output, "RSA Public Key")?,
    }
    writeln!(output, "    Key Size: {} bit", summary.bits)?;
    writeln!(output, "    Public Exponent: {}", summary.public_exponent)?;
    writeln!(output, "    Modulus:")?;
    write!(output, "{}", format_colon_hex(&summary.modulus_bytes, 8))?;

    Ok(output)
}
