//! Timestamp layouts.
//!
//! Layouts are tried in order and the first match wins:
//!
//! | Layout | Example |
//! |---|---|
//! | RFC 3339, optional fractional seconds | `2006-01-02T15:04:05.999999999+07:00` |
//! | date-time with space and zone | `2006-01-02 15:04:05.5Z` |
//! | RFC 822 with numeric zone | `02 Jan 06 15:04 -0700` |
//! | RFC 822 with zone abbreviation | `02 Jan 06 15:04 MST` |
//! | date-time with space, no zone | `2006-01-02 15:04:05.999999999` |
//! | date only | `2006-01-02` |
//!
//! Text without a numeric zone is read as UTC. Zone abbreviations carry no
//! offset information and are read as UTC as well.
use {
    crate::error::{invalid_timestamp, Result},
    chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc},
    std::borrow::Cow,
};

fn rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

fn spaced_with_zone(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = match text.strip_suffix('Z') {
        Some(rest) => Cow::Owned(format!("{rest}+00:00")),
        None => Cow::Borrowed(text),
    };
    DateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f%:z").ok()
}

fn rfc822_numeric_zone(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, "%d %b %y %H:%M %z").ok()
}

fn rfc822_named_zone(text: &str) -> Option<DateTime<FixedOffset>> {
    let (rest, zone) = text.rsplit_once(' ')?;
    if !(3..=5).contains(&zone.len()) || !zone.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(rest, "%d %b %y %H:%M").ok()?;
    Some(naive.and_utc().fixed_offset())
}

fn spaced(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok()?;
    Some(naive.and_utc().fixed_offset())
}

fn date_only(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(naive.and_utc().fixed_offset())
}

const LAYOUTS: [fn(&str) -> Option<DateTime<FixedOffset>>; 6] = [
    rfc3339,
    spaced_with_zone,
    rfc822_numeric_zone,
    rfc822_named_zone,
    spaced,
    date_only,
];

/// Parse `text` against the layout table, keeping its offset.
pub fn parse_fixed(text: &str) -> Result<DateTime<FixedOffset>> {
    LAYOUTS
        .iter()
        .find_map(|layout| layout(text))
        .ok_or_else(|| invalid_timestamp(text))
}

/// Parse `text` against the layout table and convert to UTC.
#[inline]
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>> {
    parse_fixed(text).map(|dt| dt.with_timezone(&Utc))
}

/// RFC 3339 with `Z` for a zero offset and only as many fractional digits as needed
/// (none, 3, 6 or 9).
pub fn format<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
