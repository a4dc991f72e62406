use crate::api::client::SlackClient;
use crate::api::models::Channel;
use crate::api::pagination::{Page, Paged, ResponseMetadata};
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::Deserialize;
use serde::de::IgnoredAny;

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct ChannelListPage {
    #[serde(default)]
    channels: Vec<Channel>,
    response_metadata: Option<ResponseMetadata>,
}

impl Paged for ChannelListPage {
    type Item = Channel;

    fn into_page(self) -> Page<Channel> {
        Page::new(self.channels, self.response_metadata)
    }
}

impl<T: Transport> SlackClient<T> {
    pub async fn get_channel_info(&self, channel: &str) -> Result<Channel, ApiError> {
        let response: ChannelResponse = self
            .get("conversations.info", Params::new().with("channel", channel))
            .await?;
        Ok(response.channel)
    }

    /// All conversations visible to the token. `types` is a comma-separated
    /// list such as `public_channel,private_channel`; empty means the server default.
    pub async fn list_channels(
        &self,
        types: &str,
        exclude_archived: bool,
        limit: u32,
    ) -> Result<Vec<Channel>, ApiError> {
        let params = Params::new()
            .with_non_empty("types", Some(types))
            .with("exclude_archived", exclude_archived)
            .with("limit", limit);
        self.paginate::<ChannelListPage>("conversations.list", params)
            .await
    }

    pub async fn create_channel(&self, name: &str, is_private: bool) -> Result<Channel, ApiError> {
        let response: ChannelResponse = self
            .post(
                "conversations.create",
                Params::new().with("name", name).with("is_private", is_private),
            )
            .await?;
        Ok(response.channel)
    }

    pub async fn archive_channel(&self, channel: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post("conversations.archive", Params::new().with("channel", channel))
            .await?;
        Ok(())
    }

    pub async fn unarchive_channel(&self, channel: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post("conversations.unarchive", Params::new().with("channel", channel))
            .await?;
        Ok(())
    }

    pub async fn set_channel_topic(&self, channel: &str, topic: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post(
                "conversations.setTopic",
                Params::new().with("channel", channel).with("topic", topic),
            )
            .await?;
        Ok(())
    }

    pub async fn set_channel_purpose(&self, channel: &str, purpose: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post(
                "conversations.setPurpose",
                Params::new().with("channel", channel).with("purpose", purpose),
            )
            .await?;
        Ok(())
    }

    pub async fn invite_to_channel(&self, channel: &str, users: &[String]) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post(
                "conversations.invite",
                Params::new()
                    .with("channel", channel)
                    .with("users", users.join(",")),
            )
            .await?;
        Ok(())
    }
}
