//! Configuration service: turns config file, flags and stored token into a ClientConfig

use crate::AppError;
use crate::api::client::{ClientConfig, SlackClient};
use crate::storage::config::Config;
use crate::storage::credentials::{ResolvedToken, TokenStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values the command line may override.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub base_url: Option<String>,
}

pub struct ConfigService {
    config: Config,
    config_path: PathBuf,
    store: TokenStore,
}

impl ConfigService {
    pub fn new(config: Config, config_path: PathBuf, store: TokenStore) -> Self {
        Self {
            config,
            config_path,
            store,
        }
    }

    /// Load `<config_dir>/config.toml`, or the platform default location.
    ///
    /// SLACK_API_TOKEN is expected in [`Overrides::token`], not read here.
    pub fn load(config_dir: Option<&Path>, use_keyring: bool) -> Result<Self, AppError> {
        let config_path = Config::config_file_path(config_dir)?;
        let config = Config::load(&config_path)?;
        let store = if use_keyring {
            TokenStore::new(&config_path)
        } else {
            TokenStore::file_only(&config_path)
        };
        Ok(Self::new(config, config_path, store.without_env()))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    pub fn base_url(&self, overrides: &Overrides) -> String {
        self.config.resolve_base_url(overrides.base_url.as_deref())
    }

    pub fn resolve_token(&self, overrides: &Overrides) -> Result<ResolvedToken, AppError> {
        self.store.resolve(overrides.token.as_deref())
    }

    /// Fails with an auth error when no token is available anywhere.
    pub fn client_config(&self, overrides: &Overrides) -> Result<ClientConfig, AppError> {
        let resolved = self.resolve_token(overrides)?;
        let base_url = self.base_url(overrides);
        debug!(%base_url, source = %resolved.source, "client configured");
        Ok(ClientConfig::new(resolved.token).with_base_url(base_url))
    }

    pub fn build_client(&self, overrides: &Overrides) -> Result<SlackClient, AppError> {
        Ok(SlackClient::from_config(&self.client_config(overrides)?)?)
    }
}
