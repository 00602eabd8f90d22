use crate::utils::error::{FeeError, Result};
use chrono::{Days, NaiveDate};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";
pub const RETURNS_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn parse_date(value: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, format).map_err(|_| FeeError::DateParseError {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// 把 `yyyy-mm-dd` 轉成 `dd Mon yyyy`，例如 `2001-01-01` -> `01 Jan 2001`
pub fn reformat_dates<S: AsRef<str>>(old_dates: &[S]) -> Result<Vec<String>> {
    old_dates
        .iter()
        .map(|d| {
            parse_date(d.as_ref(), ISO_DATE_FORMAT)
                .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        })
        .collect()
}

/// Parses a textual day count for [`date_range`].
pub fn parse_day_count(raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|e| FeeError::InvalidArgument {
        name: "n".to_string(),
        reason: format!("expected a non-negative integer, got '{}' ({})", raw, e),
    })
}

/// `n` consecutive calendar days beginning at `start` (`yyyy-mm-dd`).
pub fn date_range(start: &str, n: usize) -> Result<Vec<NaiveDate>> {
    let first = parse_date(start, ISO_DATE_FORMAT)?;

    // 先確認最後一天在 chrono 範圍內，再產生整段
    if first
        .checked_add_days(Days::new(n.saturating_sub(1) as u64))
        .is_none()
    {
        return Err(FeeError::InvalidArgument {
            name: "n".to_string(),
            reason: format!("range of {} days from {} is out of bounds", n, start),
        });
    }

    Ok(first.iter_days().take(n).collect())
}

/// Pairs each value with a date, one day apart, beginning at `start_date`.
pub fn add_date_range<T>(values: Vec<T>, start_date: &str) -> Result<Vec<(NaiveDate, T)>> {
    let dates = date_range(start_date, values.len())?;
    Ok(dates.into_iter().zip(values).collect())
}
