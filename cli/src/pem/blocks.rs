use std::fmt::Write;

use clap::Args;
use kagi_pem::parse_blocks;
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Serialize)]
struct BlockSummary {
    index: usize,
    label: String,
    known: bool,
    length: usize,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let blocks: Vec<BlockSummary> = parse_blocks(&input)
        .iter()
        .enumerate()
        .map(|(index, block)| BlockSummary {
            index,
            label: block.label().to_string(),
            known: block.kind() != kagi_pem::Label::Unknown,
            length: block.bytes().len(),
        })
        .collect();

    let output = match config.output {
        OutputFormat::Text => {
            let mut output = String::new();
            if blocks.is_empty() {
                write!(output, "no PEM blocks found")?;
            }
            for block in &blocks {
                writeln!(
                    output,
                    "[{}] {} ({} bytes){}",
                    block.index,
                    block.label,
                    block.length,
                    if block.known { "" } else { " unknown label" }
                )?;
            }
            output.trim_end().to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(&blocks)?,
    };
    println!("{}", output);
    Ok(())
}
