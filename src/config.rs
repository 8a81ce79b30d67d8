use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::PrepError;
use crate::pipeline::RegionSelector;

pub const DEFAULT_CONFIG_FILE: &str = "gisaid-prep.json";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    pub metadata: String,
    #[serde(default)]
    pub filtered_output: Option<String>,
    #[serde(default)]
    pub cleaned_output: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_column: Option<String>,
    #[serde(default)]
    pub references: ReferencePaths,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReferencePaths {
    #[serde(default)]
    pub countries: Option<String>,
    #[serde(default)]
    pub income_groups: Option<String>,
    #[serde(default)]
    pub cases: Option<String>,
    #[serde(default)]
    pub sequence_counts: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub metadata: Utf8PathBuf,
    pub filtered_output: Utf8PathBuf,
    pub cleaned_output: Option<Utf8PathBuf>,
    pub selector: RegionSelector,
    pub countries: Option<Utf8PathBuf>,
    pub income_groups: Option<Utf8PathBuf>,
    pub cases: Option<Utf8PathBuf>,
    pub sequence_counts: Option<Utf8PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, PrepError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Err(PrepError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| PrepError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| PrepError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, PrepError> {
        let schema_version = config.schema_version.unwrap_or(1);
        if schema_version != 1 {
            return Err(PrepError::InvalidConfig(format!(
                "unsupported schema_version {schema_version}"
            )));
        }
        if config.metadata.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "metadata path is empty".to_string(),
            ));
        }

        let defaults = RegionSelector::default();
        let selector = RegionSelector {
            column: non_empty(config.region_column).unwrap_or(defaults.column),
            region: non_empty(config.region).unwrap_or(defaults.region),
        };

        Ok(ResolvedConfig {
            schema_version,
            metadata: Utf8PathBuf::from(config.metadata),
            filtered_output: Utf8PathBuf::from(
                config
                    .filtered_output
                    .unwrap_or_else(|| "metadata.tsv".to_string()),
            ),
            cleaned_output: config.cleaned_output.map(Utf8PathBuf::from),
            selector,
            countries: config.references.countries.map(Utf8PathBuf::from),
            income_groups: config.references.income_groups.map(Utf8PathBuf::from),
            cases: config.references.cases.map(Utf8PathBuf::from),
            sequence_counts: config.references.sequence_counts.map(Utf8PathBuf::from),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
