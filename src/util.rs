use crate::error::{RepostatsError, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Resolves a `--since`/`--until` argument to a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 (the date in the given offset is kept), or
/// a relative duration such as `90days`, `2weeks` or `3 months ago`, counted
/// back from `today`.
pub fn parse_calendar_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    let relative = input.strip_suffix("ago").unwrap_or(input);
    let compact: String = relative.split_whitespace().collect();
    let std_duration = humantime::parse_duration(&compact)
        .map_err(|e| RepostatsError::InvalidDate(format!("'{input}': {e}")))?;
    let duration = Duration::from_std(std_duration)
        .map_err(|_| RepostatsError::InvalidDate(format!("Duration overflow for '{input}'")))?;

    today
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.checked_sub_signed(duration))
        .map(|dt| dt.date())
        .ok_or_else(|| RepostatsError::InvalidDate(format!("Duration overflow for '{input}'")))
}

/// Resolves both bounds and rejects an inverted range.
pub fn resolve_range(
    since: Option<&str>,
    until: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let today = Utc::now().date_naive();
    let since = since.map(|s| parse_calendar_date(s, today)).transpose()?;
    let until = until.map(|u| parse_calendar_date(u, today)).transpose()?;

    if let (Some(s), Some(u)) = (since, until) {
        if s > u {
            return Err(RepostatsError::InvalidDate(format!(
                "Invalid range: since ({s}) is after until ({u})"
            )));
        }
    }

    Ok((since, until))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_date() {
        assert_eq!(parse_calendar_date("2024-01-02", date(2030, 1, 1)).unwrap(), date(2024, 1, 2));
    }

    #[test]
    fn rfc3339_keeps_local_date() {
        assert_eq!(
            parse_calendar_date("2024-01-02T23:30:00-05:00", date(2030, 1, 1)).unwrap(),
            date(2024, 1, 2)
        );
    }

    #[test]
    fn relative_durations_count_back_from_today() {
        let today = date(2024, 3, 10);
        assert_eq!(parse_calendar_date("10days", today).unwrap(), date(2024, 2, 29));
        assert_eq!(parse_calendar_date("2 weeks ago", today).unwrap(), date(2024, 2, 25));
        assert_eq!(parse_calendar_date("1week", today).unwrap(), date(2024, 3, 3));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_calendar_date("next tuesday", date(2024, 1, 1)),
            Err(RepostatsError::InvalidDate(_))
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(resolve_range(Some("2024-02-01"), Some("2024-01-01")).is_err());
        assert_eq!(
            resolve_range(Some("2024-01-01"), None).unwrap(),
            (Some(date(2024, 1, 1)), None)
        );
    }
}
