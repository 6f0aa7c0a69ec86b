//! Number, date and link formatting for the dashboard widgets

use chrono::{DateTime, NaiveDate, Utc};

use crate::state::global::PostView;

/// 1_500 -> "1.5K", 2_300_000 -> "2.3M", 999 -> "999"
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Y axis labels; same thresholds as [`format_compact`] on floating values
pub fn format_axis_tick(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", (value * 100.0).round() / 100.0)
    }
}

/// en-US grouping with at most two decimals: 1234.5 -> "1,234.5"
pub fn format_thousands(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_digits(cents / 100);

    match cents % 100 {
        0 => format!("{}{}", sign, whole),
        frac if frac % 10 == 0 => format!("{}{}.{}", sign, whole, frac / 10),
        frac => format!("{}{}.{:02}", sign, whole, frac),
    }
}

/// Integer counters with thousands separators
pub fn format_count(n: u64) -> String {
    group_digits(n)
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "Jan 5, 2024"; "N/A" when the post has no timestamp
pub fn format_date_long(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Chart x labels: "2024-01-05" -> "Jan 5"
pub fn format_date_short(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// First 8 characters followed by "..."
pub fn truncate_post_id(post_id: &str) -> String {
    let head: String = post_id.chars().take(8).collect();
    format!("{}...", head)
}

/// Outbound link: stored url, else the public video url, else "#"
pub fn post_url(post: &PostView) -> String {
    if let Some(url) = post.url.as_deref().filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    if !post.username.is_empty() && !post.post_id.is_empty() {
        return format!(
            "https://www.tiktok.com/@{}/video/{}",
            post.username, post.post_id
        );
    }

    "#".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(username: &str, post_id: &str, url: Option<&str>) -> PostView {
        PostView {
            id: None,
            username: username.to_string(),
            post_id: post_id.to_string(),
            likes: 0,
            views: 0,
            comments: 0,
            shares: 0,
            created_at: None,
            date: None,
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_format_compact_thresholds() {
        assert_eq!(format_compact(0), "0");
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_000), "1.0K");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(999_999), "1000.0K");
        assert_eq!(format_compact(1_000_000), "1.0M");
        assert_eq!(format_compact(2_340_000), "2.3M");
    }

    #[test]
    fn test_format_axis_tick() {
        assert_eq!(format_axis_tick(0.0), "0");
        assert_eq!(format_axis_tick(250.0), "250");
        assert_eq!(format_axis_tick(2_500.0), "2.5K");
        assert_eq!(format_axis_tick(4_000_000.0), "4.0M");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1_000.0), "1,000");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(1_234.5), "1,234.5");
        assert_eq!(format_thousands(1_234.25), "1,234.25");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }

    #[test]
    fn test_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 18, 30, 0).unwrap();
        assert_eq!(format_date_long(Some(dt)), "Jan 5, 2024");
        assert_eq!(format_date_long(None), "N/A");
        assert_eq!(format_date_short("2024-03-09"), "Mar 9");
        assert_eq!(format_date_short("garbage"), "garbage");
    }

    #[test]
    fn test_truncate_post_id() {
        assert_eq!(truncate_post_id("7301234567890"), "73012345...");
        assert_eq!(truncate_post_id("42"), "42...");
    }

    #[test]
    fn test_post_url_precedence() {
        let with_url = post("acme", "1", Some("https://vm.tiktok.com/x"));
        assert_eq!(post_url(&with_url), "https://vm.tiktok.com/x");

        let templated = post("acme", "7301", None);
        assert_eq!(
            post_url(&templated),
            "https://www.tiktok.com/@acme/video/7301"
        );

        let empty_url = post("acme", "7301", Some(""));
        assert_eq!(
            post_url(&empty_url),
            "https://www.tiktok.com/@acme/video/7301"
        );

        let bare = post("", "", None);
        assert_eq!(post_url(&bare), "#");
    }
}
