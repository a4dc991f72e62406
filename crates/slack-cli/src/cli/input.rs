//! Message text and block arguments as typed on the command line.

use crate::cli::main_types::FormatArgs;
use serde_json::Value;
use slack_core::api::messages::MessageFormat;
use slack_core::error::{AppError, CliError};
use std::io::BufRead;

const STDIN_MARKER: &str = "-";

/// Characters some shells (zsh history expansion, for one) make users escape.
const SHELL_ESCAPED: [char; 4] = ['!', '$', '`', '#'];

/// Resolves the text argument: `-` reads stdin, shell escapes are removed,
/// and an empty result is an error.
pub fn read_text(text: &str, stdin: &mut dyn BufRead) -> Result<String, AppError> {
    let raw = if text == STDIN_MARKER {
        let mut lines = Vec::new();
        for line in stdin.lines() {
            lines.push(line.map_err(CliError::Stdin)?);
        }
        lines.join("\n")
    } else {
        text.to_string()
    };

    let text = unescape_shell_chars(&raw);
    if text.is_empty() {
        return Err(CliError::EmptyText.into());
    }
    Ok(text)
}

pub fn unescape_shell_chars(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if SHELL_ESCAPED.contains(&next) {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }
    result
}

pub fn parse_blocks(json: &str) -> Result<Vec<Value>, CliError> {
    serde_json::from_str::<Vec<Value>>(json).map_err(|e| CliError::InvalidBlocks(e.to_string()))
}

/// Explicit blocks win; otherwise `--simple` picks plain text over the default block.
pub fn message_format(args: &FormatArgs) -> Result<MessageFormat, CliError> {
    match args.blocks.as_deref().filter(|b| !b.is_empty()) {
        Some(json) => Ok(MessageFormat::Blocks(parse_blocks(json)?)),
        None if args.simple => Ok(MessageFormat::Simple),
        None => Ok(MessageFormat::Default),
    }
}
