use crate::api::models::{Channel, Message, SearchResults, User};
use crate::utils::text::{format_timestamp, truncate};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

const TEXT_PREVIEW_WIDTH: usize = 60;
const PURPOSE_PREVIEW_WIDTH: usize = 40;

pub struct TableDisplay {
    max_width: Option<u16>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    /// Width follows the terminal when stdout is a TTY.
    pub fn new() -> Self {
        Self {
            max_width: None,
            use_colors: true,
        }
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(cells);
        table
    }

    pub fn render_channels(&self, channels: &[Channel]) -> String {
        let mut table = self.new_table(&["ID", "Name", "Members", "Visibility", "Purpose"]);

        for channel in channels {
            let visibility = match (channel.is_private, channel.is_archived) {
                (_, true) => "archived",
                (true, false) => "private",
                (false, false) => "public",
            };
            let purpose = channel
                .purpose
                .as_ref()
                .map(|p| truncate(&p.value, PURPOSE_PREVIEW_WIDTH))
                .unwrap_or_default();

            table.add_row(vec![
                self.colored_cell(&channel.id, Color::Cyan),
                Cell::new(format!("#{}", channel.name)),
                Cell::new(channel.num_members),
                Cell::new(visibility),
                self.colored_cell(&purpose, Color::DarkGrey),
            ]);
        }

        table.to_string()
    }

    pub fn render_users(&self, users: &[User]) -> String {
        let mut table = self.new_table(&["ID", "Name", "Real Name", "Role"]);

        for user in users {
            table.add_row(vec![
                self.colored_cell(&user.id, Color::Cyan),
                Cell::new(&user.name),
                Cell::new(&user.real_name),
                Cell::new(user_role(user)),
            ]);
        }

        table.to_string()
    }

    pub fn render_messages(&self, messages: &[Message]) -> String {
        let mut table = self.new_table(&["Time", "TS", "User", "Text", "Replies"]);

        for message in messages {
            let replies = message
                .reply_count
                .filter(|n| *n > 0)
                .map(|n| n.to_string())
                .unwrap_or_default();

            table.add_row(vec![
                Cell::new(format_timestamp(message.ts.as_str())),
                self.colored_cell(message.ts.as_str(), Color::DarkGrey),
                Cell::new(message.user.as_deref().unwrap_or("-")),
                Cell::new(truncate(&message.text, TEXT_PREVIEW_WIDTH)),
                Cell::new(replies),
            ]);
        }

        table.to_string()
    }

    pub fn render_search_results(&self, results: &SearchResults) -> String {
        let mut table = self.new_table(&["Time", "Channel", "User", "Text"]);

        for found in &results.matches {
            let user = found
                .username
                .as_deref()
                .or(found.user.as_deref())
                .unwrap_or("-");

            table.add_row(vec![
                Cell::new(format_timestamp(found.ts.as_str())),
                self.colored_cell(&format!("#{}", found.channel.name), Color::Cyan),
                Cell::new(user),
                Cell::new(truncate(&found.text, TEXT_PREVIEW_WIDTH)),
            ]);
        }

        format!(
            "{}\nShowing {} of {} matches (page {} of {})",
            table,
            results.matches.len(),
            results.total,
            results.page,
            results.page_count
        )
    }
}

pub fn user_role(user: &User) -> &'static str {
    if user.deleted {
        "deactivated"
    } else if user.is_bot {
        "bot"
    } else if user.is_admin {
        "admin"
    } else {
        "member"
    }
}

/// `Key: value` lines with keys padded to a common width.
pub fn render_key_values(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    pairs
        .iter()
        .map(|(key, value)| format!("{:<width$} {}", format!("{}:", key), value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ChannelText, SearchChannel, SearchMatch, Ts};

    fn plain() -> TableDisplay {
        TableDisplay::new().with_colors(false).with_max_width(160)
    }

    #[test]
    fn test_render_channels() {
        let channels = vec![
            Channel {
                id: "C123".to_string(),
                name: "general".to_string(),
                num_members: 42,
                purpose: Some(ChannelText {
                    value: "Company-wide\nannouncements".to_string(),
                }),
                ..Channel::default()
            },
            Channel {
                id: "G456".to_string(),
                name: "secret".to_string(),
                is_private: true,
                ..Channel::default()
            },
        ];

        let output = plain().render_channels(&channels);
        assert!(output.contains("C123"));
        assert!(output.contains("#general"));
        assert!(output.contains("42"));
        assert!(output.contains("Company-wide announcements"));
        assert!(output.contains("private"));
    }

    #[test]
    fn test_render_users_roles() {
        let users = vec![
            User {
                id: "U1".to_string(),
                name: "alice".to_string(),
                is_admin: true,
                ..User::default()
            },
            User {
                id: "U2".to_string(),
                name: "robot".to_string(),
                is_bot: true,
                ..User::default()
            },
        ];

        let output = plain().render_users(&users);
        assert!(output.contains("alice"));
        assert!(output.contains("admin"));
        assert!(output.contains("bot"));
    }

    #[test]
    fn test_render_messages_flattens_text() {
        let messages = vec![Message {
            ts: Ts::from("1704067200.123456"),
            user: Some("U1".to_string()),
            text: "first line\nsecond line".to_string(),
            reply_count: Some(3),
            ..Message::default()
        }];

        let output = plain().render_messages(&messages);
        assert!(output.contains("first line second line"));
        assert!(output.contains("1704067200.123456"));
        assert!(output.contains("U1"));
    }

    #[test]
    fn test_render_search_results_footer() {
        let results = SearchResults {
            query: "deploy".to_string(),
            total: 25,
            page: 1,
            page_count: 3,
            matches: vec![SearchMatch {
                ts: Ts::from("1704067200.000100"),
                text: "deploy done".to_string(),
                username: Some("alice".to_string()),
                channel: SearchChannel {
                    id: "C1".to_string(),
                    name: "eng".to_string(),
                },
                ..SearchMatch::default()
            }],
        };

        let output = plain().render_search_results(&results);
        assert!(output.contains("#eng"));
        assert!(output.contains("alice"));
        assert!(output.ends_with("Showing 1 of 25 matches (page 1 of 3)"));
    }

    #[test]
    fn test_render_key_values_aligns_keys() {
        let output = render_key_values(&[
            ("ID", "T123".to_string()),
            ("Domain", "acme".to_string()),
        ]);
        assert_eq!(output, "ID:     T123\nDomain: acme");
    }
}
