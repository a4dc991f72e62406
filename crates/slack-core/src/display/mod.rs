pub mod table;

use crate::error::DisplayError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use table::{TableDisplay, render_key_values, user_role};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DisplayError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_render_json_is_pretty() {
        let rendered = render_json(&json!({"ts": "1.2"})).expect("render");
        assert_eq!(rendered, "{\n  \"ts\": \"1.2\"\n}");
    }
}
