use clap::{Args, ValueEnum};
use kagi_pem::format::{
    DEFAULT_LINE_WIDTH, PKCS1_PRIVATE_KEY_PREFIX, PKCS1_PRIVATE_KEY_SUFFIX,
    PKCS8_PRIVATE_KEY_PREFIX, PKCS8_PRIVATE_KEY_SUFFIX, PUBLIC_KEY_PREFIX, PUBLIC_KEY_SUFFIX,
    format_key,
};

use crate::error::{Error, Result};
use crate::utils::read_text;

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Markers {
    /// `PUBLIC KEY`
    PublicKey,
    /// `RSA PRIVATE KEY`
    RsaPrivateKey,
    /// `PRIVATE KEY`
    PrivateKey,
}

impl Markers {
    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Markers::PublicKey => (PUBLIC_KEY_PREFIX, PUBLIC_KEY_SUFFIX),
            Markers::RsaPrivateKey => (PKCS1_PRIVATE_KEY_PREFIX, PKCS1_PRIVATE_KEY_SUFFIX),
            Markers::PrivateKey => (PKCS8_PRIVATE_KEY_PREFIX, PKCS8_PRIVATE_KEY_SUFFIX),
        }
    }
}

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the key text. If not specified, reads from stdin
    file: Option<String>,

    /// Markers to wrap the key with
    #[arg(short, long, value_enum, default_value = "public-key")]
    label: Markers,

    /// Characters per body line
    #[arg(short, long, default_value_t = DEFAULT_LINE_WIDTH)]
    width: usize,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let raw = read_text(config.file.as_deref())?;
    let (prefix, suffix) = config.label.pair();

    let text = format_key(&raw, prefix, suffix, config.width).ok_or(Error::EmptyKeyText)?;
    println!("{}", text);
    Ok(())
}
