use crate::api::envelope;
use crate::api::pagination::{self, Paged};
use crate::api::params::Params;
use crate::api::transport::{HttpTransport, Transport};
use crate::error::ApiError;
use crate::utils::logging::Timer;
use reqwest::Method;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Immutable connection settings, built once and handed to the client.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout_secs: u64,
    pub max_pages: usize,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// API client. Resource operations live in the sibling modules
/// (`channels`, `users`, `messages`, `reactions`, `team`, `search`).
#[derive(Debug, Clone)]
pub struct SlackClient<T = HttpTransport> {
    transport: T,
    max_pages: usize,
}

impl SlackClient<HttpTransport> {
    /// Client against the public API with default settings.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(token))
    }

    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(token).with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            max_pages: config.max_pages,
        })
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

impl<T: Transport> SlackClient<T> {
    pub fn with_transport(transport: T, max_pages: usize) -> Self {
        Self {
            transport,
            max_pages,
        }
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<R, ApiError> {
        self.call(Method::GET, endpoint, params).await
    }

    pub(crate) async fn post<R: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<R, ApiError> {
        self.call(Method::POST, endpoint, params).await
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: Params,
    ) -> Result<R, ApiError> {
        let _timer = Timer::new(endpoint);
        let value = self.transport.call(method, endpoint, &params).await?;
        envelope::into_result(endpoint, value)
    }

    pub(crate) async fn paginate<P: Paged>(
        &self,
        endpoint: &str,
        params: Params,
    ) -> Result<Vec<P::Item>, ApiError> {
        let _timer = Timer::new(endpoint);
        pagination::paginate::<T, P>(&self.transport, endpoint, &params, self.max_pages).await
    }
}
