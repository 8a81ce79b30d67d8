use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::dates::{days_between, is_valid_date, repair_partial_date, year_month};
use crate::error::PrepError;
use crate::extract::{ExtractSummary, extract_region};
use crate::labs::LabRuleSet;
use crate::table::{Table, is_null};

pub const DATE_COLUMN: &str = "date";
pub const DATE_SUBMITTED_COLUMN: &str = "date_submitted";
pub const CLADE_COLUMN: &str = "Nextstrain_clade";
pub const DATE_YEARMON_COLUMN: &str = "date_yearmon";
pub const DATE_SUBMITTED_YEARMON_COLUMN: &str = "date_submitted_yearmon";
pub const DAYS_TO_SUBMIT_COLUMN: &str = "days_to_submit";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanSummary {
    pub rows_in: usize,
    pub rows_kept: usize,
    pub dropped_invalid_date: usize,
    pub dropped_invalid_submission_date: usize,
    pub dropped_missing_clade: usize,
    pub labs_renamed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub extract: ExtractSummary,
    pub clean: CleanSummary,
}

#[derive(Debug, Clone)]
pub struct RegionSelector {
    pub column: String,
    pub region: String,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self {
            column: "region".to_string(),
            region: "Africa".to_string(),
        }
    }
}

/// Region extraction followed by record cleaning. Country and income-group
/// joins are left to the caller.
#[derive(Debug, Clone, Default)]
pub struct MetadataPipeline {
    selector: RegionSelector,
    lab_rules: LabRuleSet,
}

impl MetadataPipeline {
    pub fn new(selector: RegionSelector, lab_rules: LabRuleSet) -> Self {
        Self {
            selector,
            lab_rules,
        }
    }

    pub fn run(&self, input: &Path, filtered: &Path) -> Result<(Table, PipelineRun), PrepError> {
        let extract = extract_region(
            input,
            filtered,
            &self.selector.column,
            &self.selector.region,
        )?;
        let table = Table::read_tsv_path(filtered)?;
        let (table, clean) = self.clean(table)?;
        Ok((table, PipelineRun { extract, clean }))
    }

    pub fn clean(&self, mut table: Table) -> Result<(Table, CleanSummary), PrepError> {
        let date_idx = table.column_index(DATE_COLUMN)?;
        let submitted_idx = table.column_index(DATE_SUBMITTED_COLUMN)?;
        let clade_idx = table.column_index(CLADE_COLUMN)?;

        let mut summary = CleanSummary {
            rows_in: table.len(),
            ..CleanSummary::default()
        };

        for row in 0..table.len() {
            let repaired = repair_partial_date(&table.rows()[row][date_idx]);
            table.set_value(row, date_idx, repaired);
        }

        table.retain_rows(|row| {
            if !is_valid_date(&row[date_idx]) {
                summary.dropped_invalid_date += 1;
                return false;
            }
            if is_null(&row[clade_idx]) {
                summary.dropped_missing_clade += 1;
                return false;
            }
            if !is_valid_date(&row[submitted_idx]) {
                summary.dropped_invalid_submission_date += 1;
                return false;
            }
            true
        });
        if summary.dropped_invalid_submission_date > 0 {
            warn!(
                rows = summary.dropped_invalid_submission_date,
                "dropped records with an invalid submission date"
            );
        }

        summary.labs_renamed = self.lab_rules.apply(&mut table)?;

        let mut collected_yearmon = Vec::with_capacity(table.len());
        let mut submitted_yearmon = Vec::with_capacity(table.len());
        let mut days_to_submit = Vec::with_capacity(table.len());
        for row in table.rows() {
            let date = &row[date_idx];
            let submitted = &row[submitted_idx];
            collected_yearmon.push(year_month(date));
            submitted_yearmon.push(year_month(submitted));
            // both dates were validated above
            let days = days_between(date, submitted).unwrap_or_default();
            days_to_submit.push(days.to_string());
        }
        table.push_column(DATE_YEARMON_COLUMN, collected_yearmon)?;
        table.push_column(DATE_SUBMITTED_YEARMON_COLUMN, submitted_yearmon)?;
        table.push_column(DAYS_TO_SUBMIT_COLUMN, days_to_submit)?;

        summary.rows_kept = table.len();
        info!(
            rows_in = summary.rows_in,
            rows_kept = summary.rows_kept,
            labs_renamed = summary.labs_renamed,
            "cleaned metadata"
        );
        Ok((table, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 5]]) -> Table {
        Table::from_rows(
            ["country", "submitting_lab", "date", "date_submitted", "Nextstrain_clade"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn drops_incomplete_records() {
        let input = table(&[
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", "20A"],
            ["Kenya", "Lab", "2021", "2021-01-05", "20A"],
            ["Kenya", "Lab", "2021-02-30", "2021-03-05", "20A"],
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", ""],
            ["Kenya", "Lab", "2021-01-01", "?", "20B"],
        ]);
        let (out, summary) = MetadataPipeline::default().clean(input).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(summary.rows_in, 5);
        assert_eq!(summary.dropped_invalid_date, 2);
        assert_eq!(summary.dropped_missing_clade, 1);
        assert_eq!(summary.dropped_invalid_submission_date, 1);
    }

    #[test]
    fn blank_clade_cells_are_kept() {
        let input = table(&[
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", "  "],
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", " NA "],
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", "NA"],
        ]);
        let (out, summary) = MetadataPipeline::default().clean(input).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(summary.dropped_missing_clade, 1);
        assert_eq!(out.column(CLADE_COLUMN).unwrap(), vec!["  ", " NA "]);
    }

    #[test]
    fn derives_buckets_and_latency() {
        let input = table(&[
            ["Kenya", "Lab", "2021-01-01", "2021-01-05", "20A"],
            ["Ghana", "Lab", "2021-06", "2021-07-10", "20B"],
            ["Ghana", "Lab", "2021-03-10", "2021-03-01", "20B"],
        ]);
        let (out, _) = MetadataPipeline::default().clean(input).unwrap();
        assert_eq!(out.column("date").unwrap()[1], "2021-06-1");
        assert_eq!(
            out.column(DATE_YEARMON_COLUMN).unwrap(),
            vec!["2021-01", "2021-06", "2021-03"]
        );
        assert_eq!(
            out.column(DATE_SUBMITTED_YEARMON_COLUMN).unwrap(),
            vec!["2021-01", "2021-07", "2021-03"]
        );
        assert_eq!(
            out.column(DAYS_TO_SUBMIT_COLUMN).unwrap(),
            vec!["4", "39", "-9"]
        );
    }
}
