//! Search query modifiers (`is:`, `in:`, `from:`, `has:` ...).

use crate::error::CliError;
use regex::Regex;
use std::sync::LazyLock;

pub const VALID_SCOPES: [&str; 5] = ["all", "public", "private", "dm", "mpim"];

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Filters layered on top of a free-text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub scope: Option<String>,
    pub in_channel: Option<String>,
    pub from_user: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub has_link: bool,
    pub has_reaction: bool,
    pub has_pin: bool,
    pub file_type: Option<String>,
}

impl QueryOptions {
    pub fn validate(&self) -> Result<(), CliError> {
        validate_scope(self.scope.as_deref())?;
        validate_date(self.after.as_deref())?;
        validate_date(self.before.as_deref())
    }
}

pub fn validate_scope(scope: Option<&str>) -> Result<(), CliError> {
    match scope {
        None | Some("") => Ok(()),
        Some(s) if VALID_SCOPES.contains(&s) => Ok(()),
        Some(s) => Err(CliError::InvalidArguments(format!(
            "invalid scope: {:?} (must be one of: {})",
            s,
            VALID_SCOPES.join(", ")
        ))),
    }
}

pub fn validate_date(date: Option<&str>) -> Result<(), CliError> {
    match date {
        None | Some("") => Ok(()),
        Some(d) if DATE_PATTERN.is_match(d) => Ok(()),
        Some(d) => Err(CliError::InvalidArguments(format!(
            "invalid date format: {:?} (must be YYYY-MM-DD)",
            d
        ))),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Prefixes the modifiers to `base`, in a fixed order, separated by single spaces.
pub fn build_query(base: &str, opts: &QueryOptions) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(scope) = non_empty(&opts.scope).filter(|s| *s != "all") {
        parts.push(format!("is:{}", scope));
    }
    if let Some(channel) = non_empty(&opts.in_channel) {
        parts.push(format!("in:#{}", channel.strip_prefix('#').unwrap_or(channel)));
    }
    if let Some(user) = non_empty(&opts.from_user) {
        parts.push(format!("from:@{}", user.strip_prefix('@').unwrap_or(user)));
    }
    if let Some(after) = non_empty(&opts.after) {
        parts.push(format!("after:{}", after));
    }
    if let Some(before) = non_empty(&opts.before) {
        parts.push(format!("before:{}", before));
    }
    if opts.has_link {
        parts.push("has:link".to_string());
    }
    if opts.has_reaction {
        parts.push("has:reaction".to_string());
    }
    if opts.has_pin {
        parts.push("has:pin".to_string());
    }
    if let Some(file_type) = non_empty(&opts.file_type) {
        parts.push(format!("type:{}", file_type));
    }

    parts.push(base.to_string());
    parts.join(" ")
}
