use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::info;

use crate::countries::CountryResolver;
use crate::error::PrepError;
use crate::table::{Table, is_null};

pub const ISO3_COLUMN: &str = "iso3";
pub const REGION_COLUMN: &str = "Region";
pub const INCOME_GROUP_COLUMN: &str = "Income group";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncomeGroupReference {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Region", default)]
    pub region: Option<String>,
    #[serde(rename = "Income group", default)]
    pub income_group: Option<String>,
}

/// World Bank classification keyed by ISO-3 code.
#[derive(Debug, Clone, Default)]
pub struct IncomeGroupTable {
    by_code: HashMap<String, IncomeGroupReference>,
}

impl IncomeGroupTable {
    pub fn new(rows: Vec<IncomeGroupReference>) -> Self {
        let by_code = rows
            .into_iter()
            .map(|row| (row.code.clone(), row))
            .collect();
        Self { by_code }
    }

    pub fn read_csv_path(path: &Path) -> Result<Self, PrepError> {
        let file = File::open(path)
            .map_err(|err| PrepError::Filesystem(format!("open {}: {err}", path.display())))?;
        Self::read_csv(file)
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self, PrepError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let rows = rdr
            .deserialize::<IncomeGroupReference>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| PrepError::TableParse(err.to_string()))?;
        Ok(Self::new(rows))
    }

    pub fn get(&self, iso3: &str) -> Option<&IncomeGroupReference> {
        self.by_code.get(iso3)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Appends `iso3`, `Region` and `Income group` to `table`, resolving
/// `column` through the GISAID ISO-3 mapping. Unknown codes get empty cells;
/// a name without exactly one mapping aborts the join.
pub fn insert_income_groups(
    table: &mut Table,
    resolver: &CountryResolver,
    income_groups: &IncomeGroupTable,
    column: &str,
) -> Result<(), PrepError> {
    let codes = table
        .column(column)?
        .into_iter()
        .map(|name| resolver.iso3_for(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut regions = Vec::with_capacity(codes.len());
    let mut groups = Vec::with_capacity(codes.len());
    let mut unmatched = 0usize;
    for code in &codes {
        match income_groups.get(code) {
            Some(entry) => {
                regions.push(non_null(entry.region.as_deref()));
                groups.push(non_null(entry.income_group.as_deref()));
            }
            None => {
                unmatched += 1;
                regions.push(String::new());
                groups.push(String::new());
            }
        }
    }

    table.push_column(ISO3_COLUMN, codes)?;
    table.push_column(REGION_COLUMN, regions)?;
    table.push_column(INCOME_GROUP_COLUMN, groups)?;
    info!(rows = table.len(), unmatched, "joined income groups");
    Ok(())
}

fn non_null(value: Option<&str>) -> String {
    match value {
        Some(value) if !is_null(value) => value.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_classification_export() {
        let csv = "Economy,Code,Region,Income group,Lending category\n\
                   Kenya,KEN,Sub-Saharan Africa,Lower middle income,IDA\n\
                   Sub-Saharan Africa,SSF,,,\n";
        let table = IncomeGroupTable::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let kenya = table.get("KEN").unwrap();
        assert_eq!(kenya.income_group.as_deref(), Some("Lower middle income"));
        let aggregate = table.get("SSF").unwrap();
        assert_eq!(non_null(aggregate.region.as_deref()), "");
    }
}
