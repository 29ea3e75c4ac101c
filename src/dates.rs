//! Calendar-day helpers. Everything in the tracker is keyed by day, so any
//! time-of-day component is dropped on the way in.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    UtcOffset,
};

/// Parses `YYYY-MM-DD`, an RFC 3339 timestamp, or any string that starts
/// with `YYYY-MM-DD` (e.g. `2024-01-01T10:00:00` without offset).
pub fn parse_day(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(day) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(day);
    }
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt.date());
    }
    raw.get(..10)
        .and_then(|prefix| Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok())
}

pub fn format_day(day: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        day.year(),
        u8::from(day.month()),
        day.day()
    )
}

/// Unix milliseconds of UTC midnight on `day`.
pub fn to_timestamp(day: Date) -> i64 {
    day.midnight().assume_utc().unix_timestamp() * 1000
}

/// Calendar day of `now` as seen at `offset`.
pub fn day_at(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}

/// Today at `utc_offset_minutes` east of UTC, or in UTC when no offset is
/// given. `None` when the offset is out of range.
pub fn today(utc_offset_minutes: Option<i32>) -> Option<Date> {
    let offset = match utc_offset_minutes {
        Some(minutes) => UtcOffset::from_whole_seconds(minutes.checked_mul(60)?).ok()?,
        None => UtcOffset::UTC,
    };
    Some(day_at(OffsetDateTime::now_utc(), offset))
}
