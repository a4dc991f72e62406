use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("invalid blocks JSON: {0}")]
    InvalidBlocks(String),
    #[error("message text cannot be empty")]
    EmptyText,
    #[error("reading stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("writing output: {0}")]
    Output(#[source] std::io::Error),
}

/// Failures of a single API call, always tagged with the endpoint that was attempted.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, timeout, or a response that is not an API envelope.
    #[error("{endpoint}: request failed: {message}")]
    Transport { endpoint: String, message: String },
    /// The body is not JSON or lacks the `ok` flag.
    #[error("{endpoint}: could not decode response: {message}")]
    Decode { endpoint: String, message: String },
    /// The platform answered `ok: false`. `code` is passed through verbatim.
    #[error("{endpoint}: slack API error: {code}")]
    Remote {
        endpoint: String,
        code: String,
        raw: String,
    },
    /// The server kept returning cursors past the page guard.
    #[error("{endpoint}: protocol error: {message}")]
    Protocol { endpoint: String, message: String },
}

impl ApiError {
    /// The remote error code, when this is an `ok: false` failure.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Remote { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Decode { endpoint, .. }
            | ApiError::Remote { endpoint, .. }
            | ApiError::Protocol { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(
        "no API token configured: set SLACK_API_TOKEN or run 'slack-cli config set-token'"
    )]
    TokenNotFound,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Remote { code, .. } if is_auth_code(code) => ErrorSeverity::High,
                ApiError::Remote { .. } => ErrorSeverity::Medium,
                ApiError::Transport { .. } => ErrorSeverity::High,
                ApiError::Decode { .. } | ApiError::Protocol { .. } => ErrorSeverity::Critical,
            },
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::TokenNotFound) => Some(
                "export SLACK_API_TOKEN=xoxb-... or run 'slack-cli config set-token'".to_string(),
            ),
            AppError::Api(ApiError::Remote { code, .. }) => match code.as_str() {
                "invalid_auth" | "not_authed" | "token_revoked" | "token_expired" => {
                    Some("Check your API token with 'slack-cli config test'".to_string())
                }
                "missing_scope" => {
                    Some("The token lacks the OAuth scope this method requires".to_string())
                }
                "not_in_channel" => Some("Invite the bot to the channel first".to_string()),
                "channel_not_found" => {
                    Some("'slack-cli channels list' to see available channels".to_string())
                }
                "user_not_found" => {
                    Some("'slack-cli users list' to see available users".to_string())
                }
                _ => None,
            },
            AppError::Api(ApiError::Transport { .. }) => {
                Some("Check your network connection and the API base URL".to_string())
            }
            _ => None,
        }
    }
}

fn is_auth_code(code: &str) -> bool {
    matches!(
        code,
        "invalid_auth" | "not_authed" | "token_revoked" | "token_expired" | "account_inactive"
    )
}
