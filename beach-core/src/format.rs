//! Display helpers shared by marker popups and the control panel.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Human-readable timestamp in the browser's local time zone,
/// e.g. "3/14/2025, 9:05:00 AM".
pub fn display_timestamp(ts: &DateTime<Utc>) -> String {
    display_timestamp_in(ts, &Local)
}

/// Same as [`display_timestamp`] in an explicit zone.
pub fn display_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// One decimal place, as shown in history rows ("0.7").
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Escape text for interpolation into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_display_timestamp_in_offset() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 3, 35, 7).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(display_timestamp_in(&ts, &ist), "3/14/2025, 9:05:07 AM");
        assert_eq!(display_timestamp_in(&ts, &Utc), "3/14/2025, 3:35:07 AM");
    }

    #[test]
    fn test_one_decimal() {
        assert_eq!(one_decimal(0.7999999999999999), "0.8");
        assert_eq!(one_decimal(0.0), "0.0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
        assert_eq!(escape_html("Marvé Beach"), "Marvé Beach");
    }
}
