#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// How key bytes arrive on input.
#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum InputEncoding {
    /// PEM armored text; the first block is used
    Pem,
    /// Raw DER bytes
    Der,
    /// Unpadded URL-safe Base64
    Base64,
    /// Hexadecimal text
    Hex,
}

/// Colon separated hex, fifteen bytes per line, each line indented.
pub(crate) fn format_colon_hex(data: &[u8], indent: usize) -> String {
    const BYTES_PER_LINE: usize = 15;
    let pad = " ".repeat(indent);

    data.chunks(BYTES_PER_LINE)
        .map(|chunk| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            format!("{}{}", pad, hex.join(":"))
        })
        .collect::<Vec<_>>()
        .join(":\n")
}
