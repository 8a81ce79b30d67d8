use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::cases::load_case_counts;
use crate::config::ResolvedConfig;
use crate::countries::{CountryResolver, CountryTable, ResolvedCountry};
use crate::error::PrepError;
use crate::income::{IncomeGroupTable, insert_income_groups};
use crate::labs::LabRuleSet;
use crate::pipeline::{MetadataPipeline, PipelineRun};
use crate::reference::{ReferenceClient, ReferenceKind};
use crate::sequence_counts::load_sequence_counts;
use crate::store::Store;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub force: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub items: Vec<FetchItemResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchItemResult {
    pub kind: ReferenceKind,
    pub url: String,
    pub action: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareResult {
    pub run: PipelineRun,
    pub rows: usize,
    pub columns: usize,
    pub income_groups_joined: bool,
    pub case_rows: Option<usize>,
    pub sequence_count_rows: Option<usize>,
    pub country_codes: BTreeMap<String, String>,
    pub cleaned_output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Clone)]
pub struct App<R: ReferenceClient> {
    store: Store,
    reference: R,
}

impl<R: ReferenceClient> App<R> {
    pub fn new(store: Store, reference: R) -> Self {
        Self { store, reference }
    }

    pub fn fetch_references(
        &self,
        options: FetchOptions,
        sink: &dyn ProgressSink,
    ) -> Result<FetchResult, PrepError> {
        if !options.dry_run {
            self.store.ensure_cache_root()?;
        }

        let mut items = Vec::new();
        for kind in ReferenceKind::ALL {
            let path = self.store.reference_path(kind);
            let action = if self.store.has_reference(kind) && !options.force {
                "cache"
            } else if options.dry_run {
                "dry-run"
            } else {
                let started = Instant::now();
                sink.event(ProgressEvent {
                    message: format!("phase=Download; {}", kind.url()),
                    elapsed: None,
                });
                self.reference.download(kind.url(), path.as_std_path())?;
                sink.event(ProgressEvent {
                    message: format!("phase=Store; {path}"),
                    elapsed: Some(started.elapsed()),
                });
                "download"
            };
            items.push(FetchItemResult {
                kind,
                url: kind.url().to_string(),
                action: action.to_string(),
                path: path.to_string(),
            });
        }
        Ok(FetchResult { items })
    }

    /// Extracts and cleans the configured metadata, then works through the
    /// configured references: income groups are joined onto the table, case
    /// counts and Nextstrain sequence counts are loaded and summarized. The
    /// cleaned table is written if asked.
    pub fn prepare(
        &self,
        config: &ResolvedConfig,
        sink: &dyn ProgressSink,
    ) -> Result<(Table, PrepareResult), PrepError> {
        let started = Instant::now();
        sink.event(ProgressEvent {
            message: format!("phase=Extract; {}", config.metadata),
            elapsed: None,
        });
        let pipeline = MetadataPipeline::new(config.selector.clone(), LabRuleSet::default());
        let (mut table, run) = pipeline.run(
            config.metadata.as_std_path(),
            config.filtered_output.as_std_path(),
        )?;
        sink.event(ProgressEvent {
            message: format!("phase=Clean; {} records kept", run.clean.rows_kept),
            elapsed: Some(started.elapsed()),
        });

        let resolver = match self.countries_path(config.countries.as_ref()) {
            Some(path) => Some(CountryResolver::new(CountryTable::read_csv_path(
                path.as_std_path(),
            )?)),
            None => None,
        };

        let income_groups_joined = match &config.income_groups {
            Some(income_path) => {
                let resolver = resolver.as_ref().ok_or_else(no_countries)?;
                let income = IncomeGroupTable::read_csv_path(income_path.as_std_path())?;
                insert_income_groups(&mut table, resolver, &income, "country")?;
                sink.event(ProgressEvent {
                    message: "phase=Join; income groups".to_string(),
                    elapsed: Some(started.elapsed()),
                });
                true
            }
            None => false,
        };

        let cases_path = match &config.cases {
            Some(path) => Some(path.clone()),
            None if self.store.has_reference(ReferenceKind::Cases) => {
                Some(self.store.reference_path(ReferenceKind::Cases))
            }
            None => None,
        };
        let case_rows = match cases_path {
            Some(path) => {
                let cases = load_case_counts(path.as_std_path())?;
                sink.event(ProgressEvent {
                    message: format!("phase=Cases; {} rows from {path}", cases.len()),
                    elapsed: Some(started.elapsed()),
                });
                Some(cases.len())
            }
            None => None,
        };

        let sequence_count_rows = match &config.sequence_counts {
            Some(path) => {
                let resolver = resolver.as_ref().ok_or_else(no_countries)?;
                let counts = load_sequence_counts(path.as_std_path(), resolver)?;
                sink.event(ProgressEvent {
                    message: format!("phase=Sequences; {} rows from {path}", counts.len()),
                    elapsed: Some(started.elapsed()),
                });
                Some(counts.len())
            }
            None => None,
        };

        let country_codes = match &resolver {
            Some(resolver) => {
                let names = table.column("country")?.into_iter().collect::<BTreeSet<_>>();
                resolver.two_letter_codes(names)
            }
            None => BTreeMap::new(),
        };

        if let Some(path) = &config.cleaned_output {
            write_table(&table, path.as_std_path())?;
        }

        let result = PrepareResult {
            run,
            rows: table.len(),
            columns: table.headers().len(),
            income_groups_joined,
            case_rows,
            sequence_count_rows,
            country_codes,
            cleaned_output: config.cleaned_output.as_ref().map(|path| path.to_string()),
        };
        Ok((table, result))
    }

    pub fn resolve_country(
        &self,
        name: &str,
        countries: Option<&Utf8PathBuf>,
    ) -> Result<ResolvedCountry, PrepError> {
        let path = self.countries_path(countries).ok_or_else(no_countries)?;
        CountryResolver::new(CountryTable::read_csv_path(path.as_std_path())?).resolve(name)
    }

    /// The configured countries table, else the cached download.
    fn countries_path(&self, path: Option<&Utf8PathBuf>) -> Option<Utf8PathBuf> {
        match path {
            Some(path) => Some(path.clone()),
            None if self.store.has_reference(ReferenceKind::Countries) => {
                Some(self.store.reference_path(ReferenceKind::Countries))
            }
            None => None,
        }
    }
}

fn no_countries() -> PrepError {
    PrepError::InvalidConfig(
        "no countries table configured or cached; run fetch-references".to_string(),
    )
}

fn write_table(table: &Table, path: &Path) -> Result<(), PrepError> {
    let mut buffer = Vec::new();
    table.write_tsv(&mut buffer)?;
    Store::write_bytes_atomic(path, &buffer)
}
