//! Input validation for identifiers and flags
//!
//! Shape checks only; whether an identifier exists is for the API to decide.

use crate::error::CliError;
use regex::Regex;
use std::sync::LazyLock;

static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[CG][A-Z0-9]+$").expect("valid channel regex"));
static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[UW][A-Z0-9]+$").expect("valid user regex"));
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("valid timestamp regex"));

pub const MAX_LIMIT: u32 = 1000;

/// Channel IDs start with C (public) or G (private/group).
pub fn validate_channel_id(id: &str) -> crate::Result<()> {
    if !CHANNEL_ID.is_match(id) {
        return Err(CliError::InvalidArguments(format!(
            "invalid channel ID {:?}: must start with C or G (e.g., C01234ABCDE)",
            id
        ))
        .into());
    }
    Ok(())
}

/// User IDs start with U (regular user) or W (enterprise user).
pub fn validate_user_id(id: &str) -> crate::Result<()> {
    if !USER_ID.is_match(id) {
        return Err(CliError::InvalidArguments(format!(
            "invalid user ID {:?}: must start with U or W (e.g., U01234ABCDE)",
            id
        ))
        .into());
    }
    Ok(())
}

pub fn validate_timestamp(ts: &str) -> crate::Result<()> {
    if !TIMESTAMP.is_match(ts) {
        return Err(CliError::InvalidArguments(format!(
            "invalid timestamp {:?}: must be format 1234567890.123456",
            ts
        ))
        .into());
    }
    Ok(())
}

pub fn validate_limit(limit: u32) -> crate::Result<()> {
    if limit < 1 {
        return Err(
            CliError::InvalidArguments(format!("invalid limit {}: must be at least 1", limit)).into(),
        );
    }
    if limit > MAX_LIMIT {
        return Err(CliError::InvalidArguments(format!(
            "invalid limit {}: must be at most {}",
            limit, MAX_LIMIT
        ))
        .into());
    }
    Ok(())
}

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_channel_id() {
        for valid in ["C01234ABCDE", "G1", "C123"] {
            assert!(validate_channel_id(valid).is_ok(), "{}", valid);
        }
        for invalid in ["", "c123", "D123", "C", "C12-3", "#general"] {
            assert!(validate_channel_id(invalid).is_err(), "{}", invalid);
        }
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("U01234ABCDE").is_ok());
        assert!(validate_user_id("W999").is_ok());
        assert!(validate_user_id("B123").is_err());
        assert!(validate_user_id("u123").is_err());
    }

    #[test]
    fn test_validate_timestamp() {
        assert!(validate_timestamp("1234567890.123456").is_ok());
        assert!(validate_timestamp("1.2").is_ok());
        for invalid in ["1234567890", "abc.def", ".123", "123.", ""] {
            assert!(validate_timestamp(invalid).is_err(), "{}", invalid);
        }
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(1000).is_ok());
        let err = validate_limit(0).expect_err("zero");
        assert!(err.to_string().contains("at least 1"));
        let err = validate_limit(1001).expect_err("too big");
        assert!(err.to_string().contains("at most 1000"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://slack.com/api").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("slack.com").is_err());
    }
}
