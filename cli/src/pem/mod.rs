pub(crate) mod blocks;
pub(crate) mod format;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum PemCommands {
    /// List the PEM blocks found in a file
    Blocks {
        #[command(flatten)]
        config: blocks::Config,
    },
    /// Rebuild armored text from a key pasted without line breaks
    Format {
        #[command(flatten)]
        config: format::Config,
    },
}
