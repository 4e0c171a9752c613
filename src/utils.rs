//! Small shared helpers.

use chrono::{DateTime, Utc};

/// Format a timestamp the way feeds display it, e.g. "Aug 25, 2026, 3:04 PM".
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 25, 15, 4, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "Aug 25, 2026, 3:04 PM");
    }
}
