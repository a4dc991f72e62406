//! # slack-core
//!
//! Core library for Slack Web API interaction, used by the `slack-cli` binary.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use slack_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> slack_core::Result<()> {
//!     let client = SlackClient::new("xoxb-...")?;
//!
//!     let channels = client.list_channels("public_channel", true, 200).await?;
//!     let sent = client
//!         .send_message(&channels[0].id, "Hello", None, &MessageFormat::Default)
//!         .await?;
//!     println!("posted {}", sent.ts);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  Transport, envelope, pagination, operations
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Config service, search query builder
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  TOML config, token resolution and storage
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, text helpers, logging
//! └─────────────────────────────────────┘
//! ```
//!
//! Every operation issues its requests one after another; list operations
//! follow `next_cursor` until the server returns an empty one.

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use slack_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError};

    pub use crate::api::client::{ClientConfig, SlackClient};
    pub use crate::api::messages::MessageFormat;
    pub use crate::api::models::{AuthInfo, Channel, Message, SearchResults, Team, Ts, User};

    pub use crate::core::query::{QueryOptions, build_query};
    pub use crate::core::services::config_service::{ConfigService, Overrides};

    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::{TokenSource, TokenStore};

    pub use crate::display::{OutputFormat, TableDisplay};
}

/// Business logic layer.
///
/// - [`core::services::config_service`]: builds the client configuration
/// - [`core::query`]: search query modifiers
pub mod core;

/// Storage layer - configuration and token persistence.
pub mod storage;

/// Utilities layer - validation, text formatting, logging.
pub mod utils;

/// API layer - Slack Web API client and data models.
///
/// - [`api::transport`]: one authenticated HTTP round trip
/// - [`api::envelope`]: `ok`/`error` interpretation
/// - [`api::pagination`]: cursor loop
/// - [`api::client`]: client type; operations are spread over the resource modules
pub mod api;

/// Display layer - tables and JSON output.
pub mod display;

/// Error handling - hierarchical error system with troubleshooting hints.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
