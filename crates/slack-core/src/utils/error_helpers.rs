use crate::error::ApiError;

/// Helper functions for standardizing error conversions across the API layer.
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    let message = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };

    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message,
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}
