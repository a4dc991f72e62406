//! Posting, editing and reading messages.

use crate::api::client::SlackClient;
use crate::api::models::{Message, Ts};
use crate::api::pagination::{Page, Paged, ResponseMetadata};
use crate::api::params::Params;
use crate::api::transport::Transport;
use crate::error::ApiError;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Value, json};

/// How a message body is laid out on the wire.
///
/// `text` is always sent alongside as the notification fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MessageFormat {
    /// One `section` block wrapping the text as mrkdwn.
    #[default]
    Default,
    /// Plain text only; no `blocks` parameter.
    Simple,
    /// Caller-supplied blocks, sent verbatim.
    Blocks(Vec<Value>),
}

impl MessageFormat {
    pub fn blocks_for(&self, text: &str) -> Option<Value> {
        match self {
            MessageFormat::Default => Some(Value::Array(default_blocks(text))),
            MessageFormat::Simple => None,
            MessageFormat::Blocks(blocks) => Some(Value::Array(blocks.clone())),
        }
    }
}

pub fn default_blocks(text: &str) -> Vec<Value> {
    vec![json!({
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": text,
        }
    })]
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ts: Ts,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    message: Option<PostedMessage>,
}

impl PostMessageResponse {
    fn into_message(self, channel: &str, text: &str, thread_ts: Option<&str>) -> Message {
        let (user, posted_text) = match self.message {
            Some(m) => (m.user, m.text),
            None => (None, None),
        };
        Message {
            ts: self.ts,
            channel: Some(self.channel.unwrap_or_else(|| channel.to_string())),
            user,
            text: posted_text.or(self.text).unwrap_or_else(|| text.to_string()),
            thread_ts: thread_ts.map(Ts::from),
            reply_count: None,
        }
    }
}

/// `chat.update` may answer with the bare envelope; missing fields come from the request.
#[derive(Debug, Default, Deserialize)]
struct UpdateMessageResponse {
    #[serde(default)]
    ts: Option<Ts>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl UpdateMessageResponse {
    fn into_message(self, channel: &str, ts: &str, text: &str) -> Message {
        Message {
            ts: self.ts.filter(|t| !t.is_empty()).unwrap_or_else(|| Ts::from(ts)),
            channel: Some(self.channel.unwrap_or_else(|| channel.to_string())),
            text: self.text.unwrap_or_else(|| text.to_string()),
            ..Message::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageListPage {
    #[serde(default)]
    messages: Vec<Message>,
    response_metadata: Option<ResponseMetadata>,
}

impl Paged for MessageListPage {
    type Item = Message;

    fn into_page(self) -> Page<Message> {
        Page::new(self.messages, self.response_metadata)
    }
}

fn with_format(params: Params, text: &str, format: &MessageFormat) -> Params {
    params
        .with("text", text)
        .with_opt("blocks", format.blocks_for(text))
}

impl<T: Transport> SlackClient<T> {
    /// Posts `text` to `channel`, as a thread reply when `thread_ts` is non-empty.
    pub async fn send_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
        format: &MessageFormat,
    ) -> Result<Message, ApiError> {
        let thread_ts = thread_ts.filter(|ts| !ts.is_empty());
        let params = with_format(Params::new().with("channel", channel), text, format)
            .with_non_empty("thread_ts", thread_ts);

        let response: PostMessageResponse = self.post("chat.postMessage", params).await?;
        Ok(response.into_message(channel, text, thread_ts))
    }

    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        text: &str,
        format: &MessageFormat,
    ) -> Result<Message, ApiError> {
        let params = with_format(Params::new().with("channel", channel).with("ts", ts), text, format);

        let response: UpdateMessageResponse = self.post("chat.update", params).await?;
        Ok(response.into_message(channel, ts, text))
    }

    pub async fn delete_message(&self, channel: &str, ts: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .post("chat.delete", Params::new().with("channel", channel).with("ts", ts))
            .await?;
        Ok(())
    }

    /// Every message in the window, newest first as the server returns them.
    /// `limit` is the page size hint.
    pub async fn get_channel_history(
        &self,
        channel: &str,
        limit: u32,
        oldest: Option<&str>,
        latest: Option<&str>,
    ) -> Result<Vec<Message>, ApiError> {
        let params = Params::new()
            .with("channel", channel)
            .with("limit", limit)
            .with_non_empty("oldest", oldest)
            .with_non_empty("latest", latest);

        let messages = self
            .paginate::<MessageListPage>("conversations.history", params)
            .await?;
        Ok(messages.into_iter().map(|m| m.in_channel(channel)).collect())
    }

    /// The parent message followed by its replies.
    pub async fn get_thread_replies(
        &self,
        channel: &str,
        ts: &str,
        limit: u32,
    ) -> Result<Vec<Message>, ApiError> {
        let params = Params::new()
            .with("channel", channel)
            .with("ts", ts)
            .with("limit", limit);

        let messages = self
            .paginate::<MessageListPage>("conversations.replies", params)
            .await?;
        Ok(messages.into_iter().map(|m| m.in_channel(channel)).collect())
    }
}
