//! Resolution of free-text country names to reference identifiers.

pub mod aliases;

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::PrepError;
use aliases::{
    GISAID_TO_REFERENCE, GISAID_TWO_LETTER_SEEDS, NEXTSTRAIN_TO_REFERENCE, TERRITORY_OVERRIDES,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReference {
    #[serde(rename = "Country_Name")]
    pub country_name: String,
    #[serde(rename = "Two_Letter_Country_Code")]
    pub iso2: String,
    #[serde(rename = "Three_Letter_Country_Code")]
    pub iso3: String,
    #[serde(rename = "Continent_Name")]
    pub continent: String,
}

impl CountryReference {
    fn same_country(&self, other: &CountryReference) -> bool {
        self.iso2 == other.iso2 && self.iso3 == other.iso3
    }
}

/// Countries-with-codes reference rows, in file order.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    rows: Vec<CountryReference>,
}

impl CountryTable {
    pub fn new(rows: Vec<CountryReference>) -> Self {
        Self { rows }
    }

    pub fn read_csv_path(path: &Path) -> Result<Self, PrepError> {
        let file = File::open(path)
            .map_err(|err| PrepError::Filesystem(format!("open {}: {err}", path.display())))?;
        Self::read_csv(file)
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self, PrepError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let rows = rdr
            .deserialize::<CountryReference>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| PrepError::TableParse(err.to_string()))?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CountryReference] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCountry {
    pub iso2: String,
    pub iso3: Option<String>,
    pub continent: String,
}

impl From<&CountryReference> for ResolvedCountry {
    fn from(row: &CountryReference) -> Self {
        Self {
            iso2: row.iso2.clone(),
            iso3: Some(row.iso3.clone()),
            continent: row.continent.clone(),
        }
    }
}

/// Strips diacritics and folds typographic punctuation to ASCII.
pub fn transliterate(name: &str) -> String {
    name.nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' | '\u{02bc}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect()
}

pub struct CountryResolver {
    countries: CountryTable,
    nextstrain: HashMap<&'static str, &'static str>,
    gisaid: HashMap<&'static str, &'static str>,
}

impl CountryResolver {
    pub fn new(countries: CountryTable) -> Self {
        Self {
            countries,
            nextstrain: NEXTSTRAIN_TO_REFERENCE.iter().copied().collect(),
            gisaid: GISAID_TO_REFERENCE.iter().copied().collect(),
        }
    }

    pub fn countries(&self) -> &CountryTable {
        &self.countries
    }

    /// Resolves a name to ISO codes and continent.
    ///
    /// Tries an exact reference-name match, then a substring match, then the
    /// territory overrides. The exact step succeeds when its matches all
    /// describe one country: rows repeated for transcontinental countries
    /// count once and the first row wins. The substring step needs exactly
    /// one row.
    pub fn resolve(&self, name: &str) -> Result<ResolvedCountry, PrepError> {
        let decoded = transliterate(name);
        let lookup = match self.nextstrain.get(decoded.as_str()) {
            Some(alias) => *alias,
            None => decoded.as_str(),
        };

        let exact = self
            .countries
            .rows()
            .iter()
            .filter(|row| row.country_name == lookup)
            .collect::<Vec<_>>();
        if let Some(row) = single_country(&exact) {
            return Ok(row.into());
        }

        let partial = self
            .countries
            .rows()
            .iter()
            .filter(|row| row.country_name.contains(lookup))
            .collect::<Vec<_>>();
        if let [row] = partial.as_slice() {
            return Ok((*row).into());
        }

        if let Some(territory) = TERRITORY_OVERRIDES.iter().find(|t| t.name == lookup) {
            debug!(name, iso2 = territory.iso2, "country resolved by override");
            return Ok(ResolvedCountry {
                iso2: territory.iso2.to_string(),
                iso3: None,
                continent: territory.continent.to_string(),
            });
        }

        Err(PrepError::UnresolvedCountry {
            name: name.to_string(),
        })
    }

    /// ISO-3 code for a GISAID country name. The name must map to exactly one
    /// reference row.
    pub fn iso3_for(&self, name: &str) -> Result<String, PrepError> {
        let matches = match self.gisaid.get(name) {
            Some(reference_name) => self
                .countries
                .rows()
                .iter()
                .filter(|row| row.country_name == *reference_name)
                .collect::<Vec<_>>(),
            None => Vec::new(),
        };
        match matches.as_slice() {
            [row] => Ok(row.iso3.clone()),
            _ => Err(PrepError::AmbiguousOrMissingMapping {
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// ISO-2 codes for a set of GISAID names: the static seeds, overwritten
    /// by any name that is a substring of exactly one reference row.
    pub fn two_letter_codes<'a, I>(&self, names: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut codes = GISAID_TWO_LETTER_SEEDS
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect::<BTreeMap<_, _>>();
        for name in names {
            let mut hits = self
                .countries
                .rows()
                .iter()
                .filter(|row| row.country_name.contains(name));
            if let (Some(row), None) = (hits.next(), hits.next()) {
                codes.insert(name.to_string(), row.iso2.clone());
            }
        }
        codes
    }
}

fn single_country<'a>(matches: &[&'a CountryReference]) -> Option<&'a CountryReference> {
    let (first, rest) = matches.split_first()?;
    if rest.iter().all(|row| row.same_country(first)) {
        Some(*first)
    } else {
        None
    }
}
