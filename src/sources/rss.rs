//! Pattern-based extraction of `<item>` blocks from RSS feeds.
//!
//! Only the handful of fields the dashboard shows are pulled out, so a full
//! XML parser is not needed. Items are yielded lazily in document order;
//! callers stop the scan with `take(n)` and later items are never examined.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<item>([\s\S]*?)</item>").expect("item pattern is valid"));
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<title><!\[CDATA\[(.*?)\]\]></title>").expect("title pattern is valid")
});
static PUB_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<pubDate>(.*?)</pubDate>").expect("pubDate pattern is valid"));
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<description><!\[CDATA\[(.*?)\]\]></description>")
        .expect("description pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RssItem<'a> {
    pub title: &'a str,
    pub pub_date: &'a str,
    pub description: Option<&'a str>,
}

/// 只回傳同時具有 title 與 pubDate 的 item
pub fn items(xml: &str) -> impl Iterator<Item = RssItem<'_>> {
    ITEM_RE.captures_iter(xml).filter_map(|caps| {
        let body = caps.get(1)?.as_str();
        let title = capture(&TITLE_RE, body)?;
        let pub_date = capture(&PUB_DATE_RE, body)?;

        Some(RssItem {
            title,
            pub_date,
            description: capture(&DESCRIPTION_RE, body),
        })
    })
}

fn capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 沒有時區的日期時間格式，一律視為 UTC
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a feed date. RFC 2822 is what RSS prescribes; RFC 3339 and bare
/// `YYYY-MM-DD[(T| )HH:MM:SS[.fff]]` (taken as UTC) are accepted as well.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_items_require_title_and_pub_date() {
        let xml = r#"<rss><channel>
<item><title><![CDATA[First]]></title><pubDate>Mon, 15 Jan 2024 10:30:00 GMT</pubDate></item>
<item><title><![CDATA[No date]]></title></item>
<item><pubDate>Mon, 15 Jan 2024 10:30:00 GMT</pubDate></item>
<item><title>Plain title</title><pubDate>Mon, 15 Jan 2024 10:30:00 GMT</pubDate></item>
<item><title><![CDATA[Second]]></title><pubDate>Tue, 16 Jan 2024 10:30:00 GMT</pubDate><description><![CDATA[Body]]></description></item>
</channel></rss>"#;

        let found: Vec<_> = items(xml).collect();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "First");
        assert_eq!(found[0].description, None);
        assert_eq!(found[1].title, "Second");
        assert_eq!(found[1].description, Some("Body"));
    }

    #[test]
    fn test_items_span_multiple_lines() {
        let xml = "<item>\n  <title><![CDATA[Multi]]></title>\n  <pubDate>2024-02-01</pubDate>\n</item>";
        let found: Vec<_> = items(xml).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pub_date, "2024-02-01");
    }

    #[test]
    fn test_items_in_empty_document() {
        assert_eq!(items("").count(), 0);
        assert_eq!(items("<rss><channel></channel></rss>").count(), 0);
    }

    #[test]
    fn test_parse_pub_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        assert_eq!(
            parse_pub_date("Mon, 15 Jan 2024 10:30:00 GMT"),
            Some(expected)
        );
        assert_eq!(
            parse_pub_date("Mon, 15 Jan 2024 05:30:00 -0500"),
            Some(expected)
        );
        assert_eq!(parse_pub_date("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_pub_date(" 2024-01-15 10:30:00 "), Some(expected));
        assert_eq!(parse_pub_date("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(
            parse_pub_date("2024-01-15T10:30:00.250"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
        assert_eq!(
            parse_pub_date("Mon, 15 Jan 2024 05:30:00 EST"),
            Some(expected)
        );
        assert_eq!(
            parse_pub_date("2024-01-15"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_pub_date_rejects_garbage() {
        assert_eq!(parse_pub_date("not a date"), None);
        assert_eq!(parse_pub_date(""), None);
    }
}
