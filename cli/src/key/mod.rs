pub(crate) mod convert;
pub(crate) mod inspect;
pub(crate) mod public;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum KeyCommands {
    /// Show the size, exponent and modulus of a key
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Re-encode a private key as PKCS#1 or PKCS#8
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
    /// Extract or re-encode a public key
    Public {
        #[command(flatten)]
        config: public::Config,
    },
}
