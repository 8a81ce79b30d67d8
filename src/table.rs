use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::PrepError;

/// Cell contents treated as missing values when reading tabular exports.
/// Cells are compared as read; surrounding whitespace is data.
pub const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A",
];

pub fn is_null(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

/// Row-major string table with a named header.
///
/// Every row has exactly `headers.len()` cells; null cells are stored as
/// empty strings when produced by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, PrepError> {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn read_tsv_path(path: &Path) -> Result<Self, PrepError> {
        let file = File::open(path)
            .map_err(|err| PrepError::Filesystem(format!("open {}: {err}", path.display())))?;
        Self::read_delimited(file, b'\t')
    }

    pub fn read_csv_path(path: &Path) -> Result<Self, PrepError> {
        let file = File::open(path)
            .map_err(|err| PrepError::Filesystem(format!("open {}: {err}", path.display())))?;
        Self::read_delimited(file, b',')
    }

    pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Self, PrepError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|err| PrepError::TableParse(err.to_string()))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut table = Self::new(headers);
        for record in rdr.records() {
            let record = record.map_err(|err| PrepError::TableParse(err.to_string()))?;
            table.push_row(record.iter().map(str::to_string).collect())?;
        }
        Ok(table)
    }

    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), PrepError> {
        let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        wtr.write_record(&self.headers)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        }
        wtr.flush()
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, PrepError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| PrepError::MissingColumn {
                column: name.to_string(),
            })
    }

    pub fn column(&self, name: &str) -> Result<Vec<&str>, PrepError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name).ok()?;
        self.rows.get(row).map(|cells| cells[idx].as_str())
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: String) {
        self.rows[row][column] = value;
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), PrepError> {
        if row.len() != self.headers.len() {
            return Err(PrepError::RowWidth {
                row: self.rows.len() + 1,
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a column; `values` must hold one cell per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<(), PrepError> {
        if self.has_column(name) {
            return Err(PrepError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        if values.len() != self.rows.len() {
            return Err(PrepError::RowWidth {
                row: 0,
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["strain".to_string(), "country".to_string()],
            vec![
                vec!["A/1".to_string(), "Kenya".to_string()],
                vec!["A/2".to_string(), "Ghana".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn reads_tsv_with_header() {
        let input = "strain\tcountry\tdate\nA/1\tKenya\t2021-01-02\nA/2\t\t2021-02\n";
        let table = Table::read_delimited(input.as_bytes(), b'\t').unwrap();
        assert_eq!(table.headers(), ["strain", "country", "date"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "date"), Some("2021-02"));
        assert!(is_null(table.value(1, "country").unwrap()));
    }

    #[test]
    fn missing_column_is_typed() {
        let err = sample().column_index("region").unwrap_err();
        assert_matches!(err, PrepError::MissingColumn { column } if column == "region");
    }

    #[test]
    fn push_column_checks_length_and_name() {
        let mut table = sample();
        let err = table
            .push_column("iso3", vec!["KEN".to_string()])
            .unwrap_err();
        assert_matches!(err, PrepError::RowWidth { .. });

        let err = table
            .push_column("country", vec![String::new(), String::new()])
            .unwrap_err();
        assert_matches!(err, PrepError::DuplicateColumn { .. });

        table
            .push_column("iso3", vec!["KEN".to_string(), "GHA".to_string()])
            .unwrap();
        assert_eq!(table.column("iso3").unwrap(), vec!["KEN", "GHA"]);
    }

    #[test]
    fn writes_tsv() {
        let mut out = Vec::new();
        sample().write_tsv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "strain\tcountry\nA/1\tKenya\nA/2\tGhana\n"
        );
    }

    #[test]
    fn null_markers() {
        assert!(is_null(""));
        assert!(is_null("NaN"));
        assert!(!is_null(" NA "));
        assert!(!is_null("  "));
        assert!(!is_null("20A"));
    }
}
