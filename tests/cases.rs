use std::path::Path;

use assert_matches::assert_matches;

use gisaid_prep::cases::{YEAR_MON_COLUMN, load_case_counts};
use gisaid_prep::error::PrepError;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn loads_owid_export_with_month_buckets() {
    let cases = load_case_counts(&fixture("owid_cases.csv")).unwrap();
    assert_eq!(cases.len(), 6);
    assert_eq!(cases.headers().last().map(String::as_str), Some(YEAR_MON_COLUMN));
    assert_eq!(
        cases.column(YEAR_MON_COLUMN).unwrap(),
        vec!["2021-02", "2021-02", "2021-03", "2021-05", "2021-05", "2021-05"]
    );
    assert_eq!(cases.value(5, "new_cases"), Some(""));
    assert_eq!(cases.value(5, "location"), Some("Africa"));
}

#[test]
fn case_export_without_dates_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("cases.csv");
    std::fs::write(&path, "iso_code,location,new_cases\nKEN,Kenya,324\n").unwrap();
    let err = load_case_counts(&path).unwrap_err();
    assert_matches!(err, PrepError::MissingColumn { column } if column == "date");
}
