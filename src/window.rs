use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a creation-date bound given on the command line.
///
/// Accepts a calendar date (`2024-03-01`, midnight UTC) or a humantime span
/// such as `2weeks` or `30d`, counted back from `now`.
pub fn parse_date_bound(s: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        bail!("Invalid date: empty value");
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .context("Invalid date")?;
        return Ok(midnight.and_utc());
    }

    let span = humantime::parse_duration(s).with_context(|| {
        format!("Invalid date '{}'. Use YYYY-MM-DD or a span like 2weeks", s)
    })?;
    let span = chrono::Duration::from_std(span).context("Date span is too large")?;
    now.checked_sub_signed(span).context("Date span is too large")
}
