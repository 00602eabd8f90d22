use crate::core::dates::parse_date;
use crate::domain::model::{Fee, FeeReport, FeeSummary, ReturnRecord};
use crate::utils::error::{FeeError, Result};
use indexmap::IndexMap;
use std::io::{Read, Write};

pub const DEFAULT_DAILY_RATE: f64 = 0.25;
pub const REQUIRED_COLUMNS: [&str; 3] = ["patron_id", "date_due", "date_returned"];
pub const SUMMARY_HEADER: [&str; 2] = ["patron_id", "late_fees"];

/// Whole days between due and returned; negative when returned early.
pub fn days_late(record: &ReturnRecord, date_format: &str) -> Result<i64> {
    let due = parse_date(&record.date_due, date_format)?;
    let returned = parse_date(&record.date_returned, date_format)?;
    Ok((returned - due).num_days())
}

pub fn record_fee(record: &ReturnRecord, date_format: &str, daily_rate: f64) -> Result<Fee> {
    let days = days_late(record, date_format)?;
    if days > 0 {
        Ok(Fee::for_days(days, daily_rate))
    } else {
        Ok(Fee::ZERO)
    }
}

/// Running per-patron totals, in order of first late return.
#[derive(Debug)]
pub struct FeeAccumulator {
    daily_rate: f64,
    date_format: String,
    totals: IndexMap<String, Fee>,
    records_read: usize,
    late_records: usize,
}

impl FeeAccumulator {
    pub fn new(daily_rate: f64, date_format: impl Into<String>) -> Self {
        Self {
            daily_rate,
            date_format: date_format.into(),
            totals: IndexMap::new(),
            records_read: 0,
            late_records: 0,
        }
    }

    pub fn add(&mut self, record: &ReturnRecord) -> Result<()> {
        self.records_read += 1;
        let fee = record_fee(record, &self.date_format, self.daily_rate)?;

        if fee.is_positive() {
            self.late_records += 1;
            *self.totals.entry(record.patron_id.clone()).or_default() += fee;
            tracing::trace!(patron_id = %record.patron_id, fee = %fee, "late return");
        }
        Ok(())
    }

    pub fn finish(self) -> FeeReport {
        let summaries = self
            .totals
            .into_iter()
            .filter(|(_, fee)| fee.is_positive())
            .map(|(patron_id, late_fees)| FeeSummary {
                patron_id,
                late_fees,
            })
            .collect();

        FeeReport {
            summaries,
            records_read: self.records_read,
            late_records: self.late_records,
        }
    }
}

pub fn aggregate<'a, I>(records: I, daily_rate: f64, date_format: &str) -> Result<FeeReport>
where
    I: IntoIterator<Item = &'a ReturnRecord>,
{
    let mut acc = FeeAccumulator::new(daily_rate, date_format);
    for record in records {
        acc.add(record)?;
    }
    Ok(acc.finish())
}

/// 讀取還書 CSV，缺少必要欄位時直接報錯
pub fn read_records<R: Read>(reader: R, source_name: &str) -> Result<Vec<ReturnRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(FeeError::MissingColumnError {
                column: column.to_string(),
                source_name: source_name.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<ReturnRecord>() {
        records.push(result?);
    }
    tracing::debug!("Read {} return records from {}", records.len(), source_name);
    Ok(records)
}

pub fn write_summary_csv<W: Write>(writer: W, report: &FeeReport) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // 沒有資料列時也要輸出表頭
    csv_writer.write_record(SUMMARY_HEADER)?;
    for summary in &report.summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads returns from `input`, writes the `patron_id,late_fees` summary to `output`.
pub fn fees_report<R: Read, W: Write>(
    input: R,
    output: W,
    daily_rate: f64,
    date_format: &str,
) -> Result<FeeReport> {
    let records = read_records(input, "input")?;
    let report = aggregate(&records, daily_rate, date_format)?;
    write_summary_csv(output, &report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::RETURNS_DATE_FORMAT;

    fn record(patron: &str, due: &str, returned: &str) -> ReturnRecord {
        ReturnRecord {
            patron_id: patron.to_string(),
            date_due: due.to_string(),
            date_returned: returned.to_string(),
        }
    }

    #[test]
    fn test_days_late() {
        let r = record("p1", "01/01/2020", "01/05/2020");
        assert_eq!(days_late(&r, RETURNS_DATE_FORMAT).unwrap(), 4);

        let early = record("p1", "03/01/2020", "02/28/2020");
        assert_eq!(days_late(&early, RETURNS_DATE_FORMAT).unwrap(), -2);
    }

    #[test]
    fn test_four_days_late_costs_one_dollar() {
        let records = vec![record("17-873-8783", "01/01/2020", "01/05/2020")];
        let report = aggregate(&records, DEFAULT_DAILY_RATE, RETURNS_DATE_FORMAT).unwrap();

        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.fee_for("17-873-8783"), Some(Fee::from_cents(100)));
    }

    #[test]
    fn test_on_time_patron_has_no_row() {
        let records = vec![
            record("on-time", "01/10/2020", "01/10/2020"),
            record("early", "01/10/2020", "01/02/2020"),
            record("late", "01/10/2020", "01/11/2020"),
        ];
        let report = aggregate(&records, DEFAULT_DAILY_RATE, RETURNS_DATE_FORMAT).unwrap();

        assert_eq!(report.records_read, 3);
        assert_eq!(report.late_records, 1);
        assert_eq!(report.fee_for("on-time"), None);
        assert_eq!(report.fee_for("early"), None);
        assert_eq!(report.fee_for("late"), Some(Fee::from_cents(25)));
    }

    #[test]
    fn test_multiple_records_sum_per_patron() {
        let records = vec![
            record("a", "01/01/2020", "01/05/2020"),
            record("b", "02/01/2020", "02/03/2020"),
            record("a", "03/01/2020", "03/11/2020"),
            record("a", "04/01/2020", "03/30/2020"),
        ];
        let report = aggregate(&records, DEFAULT_DAILY_RATE, RETURNS_DATE_FORMAT).unwrap();

        assert_eq!(report.fee_for("a"), Some(Fee::from_cents(350)));
        assert_eq!(report.fee_for("b"), Some(Fee::from_cents(50)));
        assert_eq!(report.total(), Fee::from_cents(400));
        // 依第一次逾期出現的順序
        let order: Vec<&str> = report.summaries.iter().map(|s| s.patron_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_rounding_happens_per_record() {
        // 1 × 0.333 -> 0.33，三筆加總 0.99 而不是 1.00
        let records = vec![
            record("a", "01/01/2020", "01/02/2020"),
            record("a", "01/01/2020", "01/02/2020"),
            record("a", "01/01/2020", "01/02/2020"),
        ];
        let report = aggregate(&records, 0.333, RETURNS_DATE_FORMAT).unwrap();
        assert_eq!(report.fee_for("a"), Some(Fee::from_cents(99)));
    }

    #[test]
    fn test_bad_date_propagates() {
        let records = vec![record("a", "2020-01-01", "01/02/2020")];
        let err = aggregate(&records, DEFAULT_DAILY_RATE, RETURNS_DATE_FORMAT).unwrap_err();
        assert!(matches!(err, FeeError::DateParseError { .. }));
    }

    #[test]
    fn test_read_records_ignores_extra_columns() {
        let csv = "id,book_uid,isbn_13,patron_id,date_checkout,date_due,date_returned\n\
                   1,abc,978-1,17-873-8783,12/18/2019,01/01/2020,01/05/2020\n";
        let records = read_records(csv.as_bytes(), "memory").unwrap();
        assert_eq!(records, vec![record("17-873-8783", "01/01/2020", "01/05/2020")]);
    }

    #[test]
    fn test_read_records_missing_column() {
        let csv = "patron_id,date_due\n1,01/01/2020\n";
        let err = read_records(csv.as_bytes(), "memory").unwrap_err();
        match err {
            FeeError::MissingColumnError { column, .. } => assert_eq!(column, "date_returned"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fees_report_writes_csv() {
        let input = "patron_id,date_due,date_returned\n\
                     p1,01/01/2020,01/05/2020\n\
                     p2,01/01/2020,01/01/2020\n\
                     p1,02/01/2020,02/02/2020\n";
        let mut out = Vec::new();
        let report = fees_report(
            input.as_bytes(),
            &mut out,
            DEFAULT_DAILY_RATE,
            RETURNS_DATE_FORMAT,
        )
        .unwrap();

        assert_eq!(report.summaries.len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "patron_id,late_fees\np1,1.25\n");
    }

    #[test]
    fn test_fees_report_header_only_when_no_late_returns() {
        let input = "patron_id,date_due,date_returned\np2,01/01/2020,01/01/2020\n";
        let mut out = Vec::new();
        fees_report(input.as_bytes(), &mut out, DEFAULT_DAILY_RATE, RETURNS_DATE_FORMAT).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "patron_id,late_fees\n");
    }
}
