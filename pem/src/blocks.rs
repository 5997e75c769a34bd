use std::{str::FromStr, sync::LazyLock};

use base64::{Engine, engine::general_purpose::STANDARD};
use regex::Regex;
use tracing::trace;

use crate::Label;

static BEGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^-----BEGIN ([^\r\n]*?)-----[ \t]*\r?$").expect("begin pattern compiles")
});

static END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^-----END ([^\r\n]*?)-----[ \t]*\r?$").expect("end pattern compiles")
});

/// A section found by [`parse_blocks`]: the label as written plus the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    label: String,
    bytes: Vec<u8>,
}

impl PemBlock {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        PemBlock {
            label: label.into(),
            bytes,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label mapped onto [`Label`]; anything unrecognized is `Label::Unknown`.
    pub fn kind(&self) -> Label {
        Label::from_str(&self.label).unwrap_or(Label::Unknown)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

enum Skip {
    /// The section cannot be read; scanning resumes after its BEGIN line.
    Malformed(&'static str),
    /// No END line follows; nothing after this point can form a block.
    Truncated,
}

/// Collects every readable armored section of `data`, in order.
///
/// Text outside of sections is ignored. A section with a bad body or a
/// mismatching END label is skipped. A BEGIN line without any END line after
/// it stops the scan. Returning no blocks is not an error.
pub fn parse_blocks(data: &[u8]) -> Vec<PemBlock> {
    let text = String::from_utf8_lossy(data);
    let mut blocks = Vec::new();
    let mut rest: &str = &text;

    while let Some(captured) = BEGIN.captures(rest) {
        let (Some(line), Some(label)) = (captured.get(0), captured.get(1)) else {
            break;
        };
        let label = label.as_str();
        let after_begin = &rest[line.end()..];

        match read_block(label, after_begin) {
            Ok((block, remaining)) => {
                trace!(label, len = block.bytes.len(), "read PEM block");
                blocks.push(block);
                rest = remaining;
            }
            Err(Skip::Malformed(reason)) => {
                trace!(label, reason, "skipping malformed PEM block");
                rest = after_begin;
            }
            Err(Skip::Truncated) => {
                trace!(label, "PEM block has no END line, stopping");
                break;
            }
        }
    }

    blocks
}

fn read_block<'a>(label: &str, body: &'a str) -> Result<(PemBlock, &'a str), Skip> {
    let captured = END.captures(body).ok_or(Skip::Truncated)?;
    let (Some(line), Some(end_label)) = (captured.get(0), captured.get(1)) else {
        return Err(Skip::Truncated);
    };
    if end_label.as_str() != label {
        return Err(Skip::Malformed("END label does not match"));
    }

    let payload: String = strip_headers(&body[..line.start()])
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| Skip::Malformed("body is not base64"))?;

    Ok((PemBlock::new(label, bytes), &body[line.end()..]))
}

// RFC 1421 headers ("Proc-Type: 4,ENCRYPTED") sit at the top of the body and
// end with a blank line.
fn strip_headers(body: &str) -> &str {
    let body = body.trim_start_matches(['\r', '\n']);
    let Some(first) = body.lines().next() else {
        return body;
    };
    if !first.contains(':') {
        return body;
    }

    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        offset += line.len();
        if line.trim().is_empty() {
            break;
        }
    }
    &body[offset..]
}
