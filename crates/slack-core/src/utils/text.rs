use crate::api::models::Ts;
use chrono::{DateTime, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Format a message timestamp as local `YYYY-MM-DD HH:MM`.
///
/// Anything that is not a `seconds[.micros]` value comes back unchanged.
///
/// # Examples
/// ```
/// use slack_core::utils::text::format_timestamp;
/// assert_eq!(format_timestamp("not-a-timestamp"), "not-a-timestamp");
/// assert_eq!(format_timestamp("1704067200.123456").len(), 16);
/// ```
pub fn format_timestamp(ts: &str) -> String {
    Ts::from(ts)
        .parts()
        .and_then(|(secs, micros)| {
            DateTime::from_timestamp(i64::try_from(secs).ok()?, micros * 1000)
        })
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Single-line preview of message text: newlines become spaces, then the
/// result is cut to `max_width` columns including the trailing `...`.
pub fn truncate(text: &str, max_width: usize) -> String {
    let flattened = text.replace("\r\n", " ").replace('\n', " ");
    truncate_text_unicode(&flattened, max_width)
}

pub fn truncate_text_unicode(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}
