use crate::api::client::SlackClient;
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::de::IgnoredAny;

/// Strips the colons users tend to type around emoji names (`:thumbsup:`).
pub fn normalize_emoji(name: &str) -> &str {
    name.trim_matches(':')
}

fn reaction_params(channel: &str, ts: &str, name: &str) -> Params {
    Params::new()
        .with("channel", channel)
        .with("timestamp", ts)
        .with("name", normalize_emoji(name))
}

impl<T: Transport> SlackClient<T> {
    pub async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post("reactions.add", reaction_params(channel, ts, name))
            .await?;
        Ok(())
    }

    pub async fn remove_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post("reactions.remove", reaction_params(channel, ts, name))
            .await?;
        Ok(())
    }
}
