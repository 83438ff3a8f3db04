//! Human-readable elapsed-time formatting for validation messages

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
const MS_PER_YEAR: u64 = 365 * MS_PER_DAY;

/// Format a signed millisecond quantity as e.g. `"2 years 45 days 18h 9min 55s"`.
///
/// The sign is ignored. Zero components are omitted and an all-zero input
/// yields an empty string. Units are fixed-size, so a year is always 365 days.
pub fn format_duration(milliseconds: i64) -> String {
    let mut rest = milliseconds.unsigned_abs();

    let years = rest / MS_PER_YEAR;
    rest %= MS_PER_YEAR;
    let days = rest / MS_PER_DAY;
    rest %= MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    rest %= MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;
    rest %= MS_PER_MINUTE;
    let seconds = rest / MS_PER_SECOND;
    let millis = rest % MS_PER_SECOND;

    let mut parts = Vec::with_capacity(6);
    if years > 0 {
        parts.push(pluralize(years, "year"));
    }
    if days > 0 {
        parts.push(pluralize(days, "day"));
    }
    for (value, unit) in [(hours, "h"), (minutes, "min"), (seconds, "s"), (millis, "ms")] {
        if value > 0 {
            parts.push(format!("{value}{unit}"));
        }
    }

    parts.join(" ")
}

fn pluralize(value: u64, unit: &str) -> String {
    if value == 1 { format!("1 {unit}") } else { format!("{value} {unit}s") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(format_duration(1), "1ms");
        assert_eq!(format_duration(1000), "1s");
        assert_eq!(format_duration(60_000), "1min");
        assert_eq!(format_duration(3_600_000), "1h");
        assert_eq!(format_duration(86_400_000), "1 day");
        assert_eq!(format_duration(365 * 86_400_000), "1 year");
    }

    #[test]
    fn test_plural_days_and_years() {
        assert_eq!(format_duration(2 * 86_400_000 + 3_600_000), "2 days 1h");
        assert_eq!(format_duration(2 * 365 * 86_400_000), "2 years");
    }

    #[test]
    fn test_multi_year_gap_uses_every_unit() {
        let seconds: i64 = (2 * 365 + 45) * 86_400 + 18 * 3600 + 9 * 60 + 55;
        assert_eq!(format_duration(seconds * 1000), "2 years 45 days 18h 9min 55s");
        assert_eq!(
            format_duration(seconds * 1000 + 250),
            "2 years 45 days 18h 9min 55s 250ms"
        );
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(format_duration(0), "");
    }

    #[test]
    fn test_negative_uses_magnitude() {
        assert_eq!(format_duration(-90_000), "1min 30s");
        assert!(format_duration(i64::MIN).ends_with("808ms"));
    }

    #[test]
    fn test_middle_zero_components_are_skipped() {
        assert_eq!(format_duration(86_400_000 + 5_000), "1 day 5s");
    }
}
