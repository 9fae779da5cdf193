//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a front-matter or API date string into UTC.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`), naive date-times with `T` or a
/// space separator, and bare dates (`2024-03-01`, `2024/03/01`). Naive values
/// are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz2: TimeZone>(date: &DateTime<Tz2>, format: &str) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Format date the way the blog index shows it ("January 15, 2024")
pub fn full_date<Tz2: TimeZone>(date: &DateTime<Tz2>) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Current wall-clock time in an IANA zone, e.g. `"17:30 (+0530)"`.
///
/// Returns `None` when the zone name is not recognised.
pub fn local_time(timezone: &str, now: DateTime<Utc>) -> Option<String> {
    let tz: Tz = timezone.parse().ok()?;
    let local = now.with_timezone(&tz);
    Some(format!("{} ({})", local.format("%H:%M"), local.format("%Z")))
}

fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family so "MM" does not eat "MMMM"
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
