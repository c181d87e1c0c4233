use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub string: String,
}

impl Duration {
    /// Scans `string` for `<integer><unit>` pairs. Units are lower case only.
    /// Repeated units add up and anything that does not match is ignored.
    pub fn new(string: &str) -> Duration {
        debug!("Parsing duration: {}", string);
        let mut duration = Duration {
            string: string.to_string(),
            ..Default::default()
        };

        lazy_static! {
            static ref DURATION_REGEX: Regex = Regex::new(r"(\d+)([dhms])").unwrap();
        }

        for capture in DURATION_REGEX.captures_iter(&duration.string) {
            let Some(value) = capture
                .get(1)
                .and_then(|value| value.as_str().parse::<i64>().ok())
            else {
                continue;
            };

            match capture.get(2).map(|unit| unit.as_str()) {
                Some("d") => duration.days = duration.days.saturating_add(value),
                Some("h") => duration.hours = duration.hours.saturating_add(value),
                Some("m") => duration.minutes = duration.minutes.saturating_add(value),
                Some("s") => duration.seconds = duration.seconds.saturating_add(value),
                _ => {}
            }
        }

        debug!("Parsed duration: {:?}", duration);
        duration
    }

    pub fn total_millis(&self) -> i64 {
        self.days
            .saturating_mul(DAY)
            .saturating_add(self.hours.saturating_mul(HOUR))
            .saturating_add(self.minutes.saturating_mul(MINUTE))
            .saturating_add(self.seconds.saturating_mul(SECOND))
    }

    /// `None` when nothing was matched or every component was zero.
    pub fn to_millis(&self) -> Option<i64> {
        match self.total_millis() {
            0 => None,
            millis => Some(millis),
        }
    }
}

pub fn parse_duration(string: &str) -> Option<i64> {
    Duration::new(string).to_millis()
}

/// Renders the non-zero components in descending order, e.g. `1d 2h 30m`.
pub fn format_duration(millis: i64, show_seconds: bool) -> String {
    let millis = millis.max(0);
    let days = millis / DAY;
    let hours = (millis % DAY) / HOUR;
    let minutes = (millis % HOUR) / MINUTE;
    let seconds = (millis % MINUTE) / SECOND;

    let mut parts = vec![];
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if show_seconds && seconds > 0 {
        parts.push(format!("{seconds}s"));
    }

    if !parts.is_empty() {
        parts.join(" ")
    } else if show_seconds {
        "0s".to_string()
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combined_units() {
        assert_eq!(
            parse_duration("1d2h30m"),
            Some(DAY + 2 * HOUR + 30 * MINUTE)
        );
    }

    #[test]
    fn test_parse_without_units_is_none() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("xyz"), None);
        assert_eq!(parse_duration("0d0h"), None);
    }

    #[test]
    fn test_parse_ignores_noise_and_accumulates_repeats() {
        assert_eq!(parse_duration("in 5m and 5m please"), Some(10 * MINUTE));
        assert_eq!(parse_duration("30s 1H"), Some(30 * SECOND));
    }

    #[test]
    fn test_upper_case_units_are_ignored() {
        assert_eq!(parse_duration("1D"), None);
        assert_eq!(parse_duration("1M"), None);
        assert_eq!(parse_duration("2H 5m"), Some(5 * MINUTE));
    }

    #[test]
    fn test_format_skips_zero_components() {
        assert_eq!(format_duration(DAY + 30 * MINUTE, true), "1d 30m");
        assert_eq!(format_duration(2 * HOUR + 5 * SECOND, false), "2h");
    }

    #[test]
    fn test_format_zero_depends_on_seconds_flag() {
        assert_eq!(format_duration(0, true), "0s");
        assert_eq!(format_duration(0, false), "N/A");
        assert_eq!(format_duration(45 * SECOND, false), "N/A");
    }

    #[test]
    fn test_format_then_parse_keeps_the_sum() {
        for input in ["1d2h30m", "90m", "3h75s", "2d 2d", "59s"] {
            let millis = parse_duration(input).unwrap();
            assert_eq!(parse_duration(&format_duration(millis, true)), Some(millis));
        }
    }
}
