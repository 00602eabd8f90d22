use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};

/// One row of the book returns CSV. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReturnRecord {
    pub patron_id: String,
    pub date_due: String,
    pub date_returned: String,
}

/// 金額，以「分」為單位存整數，累加不會有浮點誤差
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee(i64);

impl Fee {
    pub const ZERO: Fee = Fee(0);

    pub fn from_cents(cents: i64) -> Self {
        Fee(cents)
    }

    /// `days × daily_rate`, rounded to two decimals (half away from zero).
    pub fn for_days(days: i64, daily_rate: f64) -> Self {
        Fee((days as f64 * daily_rate * 100.0).round() as i64)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Fee {
    type Output = Fee;

    fn add(self, rhs: Fee) -> Fee {
        Fee(self.0 + rhs.0)
    }
}

impl AddAssign for Fee {
    fn add_assign(&mut self, rhs: Fee) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Fee {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSummary {
    pub patron_id: String,
    pub late_fees: Fee,
}

#[derive(Debug, Clone, Default)]
pub struct FeeReport {
    pub summaries: Vec<FeeSummary>,
    pub records_read: usize,
    pub late_records: usize,
}

impl FeeReport {
    pub fn total(&self) -> Fee {
        self.summaries
            .iter()
            .fold(Fee::ZERO, |acc, s| acc + s.late_fees)
    }

    pub fn fee_for(&self, patron_id: &str) -> Option<Fee> {
        self.summaries
            .iter()
            .find(|s| s.patron_id == patron_id)
            .map(|s| s.late_fees)
    }
}
