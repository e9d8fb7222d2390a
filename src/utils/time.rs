use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Long date, e.g. "Friday, March 14, 2025"
pub fn format_event_date(date: &DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz).format("%A, %B %-d, %Y").to_string()
}

/// 12-hour clock time, e.g. "7:30 PM"
pub fn format_event_time(date: &DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// Date and time as shown on the event detail page
pub fn format_event_datetime(date: &DateTime<Utc>, tz: Tz) -> String {
    format!("{} at {}", format_event_date(date, tz), format_event_time(date, tz))
}

/// Compact form for event cards, e.g. "Mar 14, 2025, 7:30 PM"
pub fn format_event_short(date: &DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz).format("%b %-d, %Y, %-I:%M %p").to_string()
}
