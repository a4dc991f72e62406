use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Message timestamp, which doubles as the message identifier within a channel.
///
/// Kept as the exact string the platform sent; comparison uses its numeric
/// `seconds.microseconds` value so `"9.5"` sorts before `"10.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ts(String);

impl Ts {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(seconds, microseconds)`; the fraction is padded or cut to six digits.
    pub fn parts(&self) -> Option<(u64, u32)> {
        let (secs, frac) = self.0.split_once('.').unwrap_or((self.0.as_str(), ""));
        let secs = secs.parse::<u64>().ok()?;
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let micros: String = frac.chars().chain(std::iter::repeat('0')).take(6).collect();
        Some((secs, micros.parse().ok()?))
    }
}

impl Ord for Ts {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts()
            .cmp(&other.parts())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Ts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ts {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Ts {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Ts {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Ts {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ChannelText {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub num_members: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<ChannelText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ChannelText>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Message {
    pub ts: Ts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<Ts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u32>,
}

impl Message {
    /// History pages omit the channel on each message; fill it from the request.
    pub(crate) fn in_channel(mut self, channel: &str) -> Self {
        if self.channel.is_none() {
            self.channel = Some(channel.to_string());
        }
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
}

/// Identity behind the current token, as reported by `auth.test`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SearchChannel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SearchMatch {
    pub ts: Ts,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub channel: SearchChannel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub total: u32,
    pub page: u32,
    pub page_count: u32,
    pub matches: Vec<SearchMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ts_orders_numerically() {
        let mut stamps = vec![
            Ts::from("10.000001"),
            Ts::from("9.5"),
            Ts::from("1234567890.123456"),
            Ts::from("9.400000"),
        ];
        stamps.sort();
        let ordered: Vec<&str> = stamps.iter().map(Ts::as_str).collect();
        assert_eq!(ordered, vec!["9.400000", "9.5", "10.000001", "1234567890.123456"]);
    }

    #[test]
    fn test_ts_keeps_exact_text() {
        let ts = Ts::from("1234567890.123400");
        assert_eq!(ts.parts(), Some((1234567890, 123400)));
        assert_eq!(ts.to_string(), "1234567890.123400");
        assert!(ts == "1234567890.123400");
        assert_ne!(ts, Ts::from("1234567890.1234"));
        assert_eq!(ts.cmp(&Ts::from("1234567890.1234")), Ordering::Greater);
    }

    #[test]
    fn test_ts_extra_precision_is_cut() {
        assert_eq!(Ts::from("1704067200.123456789").parts(), Some((1704067200, 123456)));
        assert_eq!(Ts::from("1704067200").parts(), Some((1704067200, 0)));
        assert_eq!(Ts::from("not-a-ts").parts(), None);
    }

    #[test]
    fn test_ts_serializes_as_plain_string() {
        let message: Message = serde_json::from_value(json!({
            "ts": "1234567890.123456",
            "text": "hi",
        }))
        .expect("message should decode");
        assert_eq!(message.ts, "1234567890.123456");
        assert_eq!(
            serde_json::to_value(&message).expect("encode"),
            json!({"ts": "1234567890.123456", "text": "hi"})
        );
    }

    #[test]
    fn test_channel_tolerates_missing_fields() {
        let channel: Channel =
            serde_json::from_value(json!({"id": "C1", "name": "general"})).expect("decode");
        assert_eq!(channel.num_members, 0);
        assert!(!channel.is_private);
        assert!(channel.topic.is_none());
    }

    #[test]
    fn test_in_channel_keeps_existing_channel() {
        let message = Message {
            ts: Ts::from("1.0"),
            channel: Some("C1".to_string()),
            ..Message::default()
        };
        assert_eq!(message.in_channel("C2").channel.as_deref(), Some("C1"));
        assert_eq!(
            Message::default().in_channel("C2").channel.as_deref(),
            Some("C2")
        );
    }
}
