//! Interprets the `{ok, error, ...}` wrapper every response carries.

use crate::error::ApiError;
use crate::utils::error_helpers::convert_json_error;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// The fields shared by every response, independent of the endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}

const UNKNOWN_ERROR: &str = "unknown_error";

/// Maps a decoded body to the endpoint's typed response, or to a typed error.
///
/// The HTTP status plays no part here: `ok: false` is always a remote error.
pub fn into_result<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
    let envelope = Envelope::deserialize(&value).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("missing response envelope: {}", e),
    })?;

    if !envelope.ok {
        let code = envelope
            .error
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Err(ApiError::Remote {
            endpoint: endpoint.to_string(),
            code,
            raw: value.to_string(),
        });
    }

    if let Some(warning) = envelope.warning {
        warn!(endpoint, %warning, "API returned a warning");
    }

    T::deserialize(value).map_err(|e| convert_json_error(e, endpoint))
}
