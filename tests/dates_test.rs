use chrono::{Datelike, Duration, NaiveDate};
use late_fees::{add_date_range, date_range, parse_day_count, reformat_dates, FeeError};

#[test]
fn test_reformat_matches_display_format() {
    assert_eq!(reformat_dates(&["2020-01-01"]).unwrap(), vec!["01 Jan 2020"]);
    assert_eq!(
        reformat_dates(&["2001-09-11".to_string(), "2010-10-10".to_string()]).unwrap(),
        vec!["11 Sep 2001", "10 Oct 2010"]
    );
}

#[test]
fn test_date_range_spans_year_boundary() {
    let start = NaiveDate::from_ymd_opt(2019, 12, 25).unwrap();
    let dates = date_range("2019-12-25", 10).unwrap();

    assert_eq!(dates.len(), 10);
    assert_eq!(dates[0], start);
    for pair in dates.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(1));
    }
    assert_eq!(dates[9].year(), 2020);
    assert_eq!(dates[9], NaiveDate::from_ymd_opt(2020, 1, 3).unwrap());
}

#[test]
fn test_textual_day_count_is_type_checked() {
    let err = parse_day_count("ten").unwrap_err();
    assert!(matches!(err, FeeError::InvalidArgument { .. }));
    assert_eq!(err.exit_code(), 2);

    let n = parse_day_count("3").unwrap();
    assert_eq!(date_range("2020-03-01", n).unwrap().len(), 3);
}

#[test]
fn test_add_date_range_pairs_values() {
    let pairs = add_date_range(vec!["a", "b"], "2020-02-28").unwrap();
    assert_eq!(pairs[0], (NaiveDate::from_ymd_opt(2020, 2, 28).unwrap(), "a"));
    assert_eq!(pairs[1], (NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(), "b"));

    let empty: Vec<i32> = Vec::new();
    assert!(add_date_range(empty, "2020-02-28").unwrap().is_empty());
}
