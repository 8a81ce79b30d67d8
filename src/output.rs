use std::io::{self, Write};

use serde::Serialize;

use crate::app::{FetchItemResult, FetchResult, PrepareResult, ProgressEvent, ProgressSink};
use crate::countries::ResolvedCountry;
use crate::reference::ReferenceKind;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_fetch(result: &FetchResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_prepare(result: &PrepareResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_country(result: &ResolvedCountry) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Progress on stderr, summaries on stdout.
pub struct TextOutput;

impl TextOutput {
    pub fn print_fetch(result: &FetchResult) {
        for item in &result.items {
            println!("{:<9} {:<9} {}", item.action, format_kind(item), item.path);
        }
    }

    pub fn print_prepare(result: &PrepareResult) {
        let clean = &result.run.clean;
        println!(
            "kept {} of {} records ({} bad dates, {} bad submission dates, {} without clade, {} labs renamed)",
            clean.rows_kept,
            clean.rows_in,
            clean.dropped_invalid_date,
            clean.dropped_invalid_submission_date,
            clean.dropped_missing_clade,
            clean.labs_renamed,
        );
        if let Some(rows) = result.case_rows {
            println!("loaded {rows} case-count rows");
        }
        if let Some(rows) = result.sequence_count_rows {
            println!("annotated {rows} sequence-count rows");
        }
        for (country, code) in &result.country_codes {
            println!("{code}\t{country}");
        }
        if let Some(path) = &result.cleaned_output {
            println!("wrote {path}");
        }
    }

    pub fn print_country(result: &ResolvedCountry) {
        println!(
            "{}\t{}\t{}",
            result.iso2,
            result.iso3.as_deref().unwrap_or("-"),
            result.continent
        );
    }
}

impl ProgressSink for TextOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => eprintln!("{} ({:.1}s)", event.message, elapsed.as_secs_f64()),
            None => eprintln!("{}", event.message),
        }
    }
}

fn format_kind(item: &FetchItemResult) -> &'static str {
    match item.kind {
        ReferenceKind::Countries => "countries",
        ReferenceKind::Cases => "cases",
    }
}
