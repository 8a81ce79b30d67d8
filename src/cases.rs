use std::path::Path;

use crate::error::PrepError;
use crate::table::Table;

pub const YEAR_MON_COLUMN: &str = "year_mon";

/// Loads the OWID case-count export and appends its `year_mon` bucket.
pub fn load_case_counts(path: &Path) -> Result<Table, PrepError> {
    let mut table = Table::read_csv_path(path)?;
    add_year_mon(&mut table)?;
    Ok(table)
}

/// `year_mon` is every dash-separated part of `date` except the last.
pub fn add_year_mon(table: &mut Table) -> Result<(), PrepError> {
    let buckets = table
        .column("date")?
        .into_iter()
        .map(|date| {
            let parts = date.split('-').collect::<Vec<_>>();
            parts[..parts.len() - 1].join("-")
        })
        .collect::<Vec<_>>();
    table.push_column(YEAR_MON_COLUMN, buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_case_dates() {
        let csv = "iso_code,continent,location,date,new_cases\n\
                   KEN,Africa,Kenya,2021-03-14,512\n\
                   KEN,Africa,Kenya,2021-04-01,\n";
        let mut table = Table::read_delimited(csv.as_bytes(), b',').unwrap();
        add_year_mon(&mut table).unwrap();
        assert_eq!(
            table.column(YEAR_MON_COLUMN).unwrap(),
            vec!["2021-03", "2021-04"]
        );
    }
}
