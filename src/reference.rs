use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;

use crate::error::PrepError;
use crate::store::Store;

pub const COUNTRIES_URL: &str = "https://pkgstore.datahub.io/JohnSnowLabs/country-and-continent-codes-list/country-and-continent-codes-list-csv_csv/data/b7876b7f496677669644f3d1069d3121/country-and-continent-codes-list-csv_csv.csv";
pub const OWID_CASES_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Countries,
    Cases,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 2] = [ReferenceKind::Countries, ReferenceKind::Cases];

    pub fn url(self) -> &'static str {
        match self {
            ReferenceKind::Countries => COUNTRIES_URL,
            ReferenceKind::Cases => OWID_CASES_URL,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReferenceKind::Countries => "countries.csv",
            ReferenceKind::Cases => "owid-covid-data.csv",
        }
    }
}

pub trait ReferenceClient: Send + Sync {
    fn download(&self, url: &str, destination: &Path) -> Result<(), PrepError>;
}

#[derive(Clone)]
pub struct ReferenceHttpClient {
    client: Client,
}

impl ReferenceHttpClient {
    pub fn new() -> Result<Self, PrepError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("gisaid-prep/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PrepError::ReferenceHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| PrepError::ReferenceHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl ReferenceClient for ReferenceHttpClient {
    fn download(&self, url: &str, destination: &Path) -> Result<(), PrepError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| PrepError::ReferenceHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "reference request failed".to_string());
            return Err(PrepError::ReferenceStatus { status, message });
        }
        let bytes = response
            .bytes()
            .map_err(|err| PrepError::ReferenceHttp(err.to_string()))?;
        Store::write_bytes_atomic(destination, &bytes)
    }
}
