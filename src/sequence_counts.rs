use std::path::Path;

use tracing::info;

use crate::countries::CountryResolver;
use crate::error::PrepError;
use crate::table::Table;

pub const CONTINENT_COLUMN: &str = "continent";
pub const ISO2_COLUMN: &str = "iso_2_code";

pub fn load_sequence_counts(path: &Path, resolver: &CountryResolver) -> Result<Table, PrepError> {
    let mut table = Table::read_csv_path(path)?;
    annotate_sequence_counts(&mut table, resolver)?;
    Ok(table)
}

/// Appends `continent` and `iso_2_code` for every row of a Nextstrain
/// per-country count table. Stops at the first name that cannot be resolved.
pub fn annotate_sequence_counts(
    table: &mut Table,
    resolver: &CountryResolver,
) -> Result<(), PrepError> {
    let resolved = table
        .column("country")?
        .into_iter()
        .map(|name| resolver.resolve(name))
        .collect::<Result<Vec<_>, _>>()?;
    let (continents, codes): (Vec<_>, Vec<_>) = resolved
        .into_iter()
        .map(|country| (country.continent, country.iso2))
        .unzip();
    table.push_column(CONTINENT_COLUMN, continents)?;
    table.push_column(ISO2_COLUMN, codes)?;
    info!(rows = table.len(), "annotated sequence counts");
    Ok(())
}
