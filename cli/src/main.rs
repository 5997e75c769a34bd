use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod key;
mod output;
mod pem;
mod utils;

use error::Result;

use key::KeyCommands;
use pem::PemCommands;

#[derive(Parser)]
#[command(name = "kagi")]
#[command(about = "RSA key material toolkit", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// RSA key operations
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// PEM text operations
    Pem {
        #[command(subcommand)]
        command: PemCommands,
    },
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Key { command } => match command {
            KeyCommands::Inspect { config } => key::inspect::execute(config)?,
            KeyCommands::Convert { config } => key::convert::execute(config)?,
            KeyCommands::Public { config } => key::public::execute(config)?,
        },
        Commands::Pem { command } => match command {
            PemCommands::Blocks { config } => pem::blocks::execute(config)?,
            PemCommands::Format { config } => pem::format::execute(config)?,
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
