use std::path::Path;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use gisaid_prep::app::{App, FetchOptions};
use gisaid_prep::config::ConfigLoader;
use gisaid_prep::error::PrepError;
use gisaid_prep::output::{JsonOutput, OutputMode, TextOutput};
use gisaid_prep::reference::{ReferenceClient, ReferenceHttpClient};
use gisaid_prep::store::Store;

#[derive(Parser)]
#[command(name = "gisaid-prep")]
#[command(about = "Extract, clean and annotate regional GISAID metadata")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Download reference tables into the local cache")]
    FetchReferences(FetchArgs),
    #[command(about = "Extract the configured region and clean its metadata")]
    Prepare(PrepareArgs),
    #[command(about = "Resolve a country name to ISO codes and continent")]
    ResolveCountry(ResolveArgs),
}

#[derive(Args)]
struct FetchArgs {
    #[arg(long)]
    force: bool,

    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct PrepareArgs {
    #[arg(long)]
    config: Option<String>,
}

#[derive(Args)]
struct ResolveArgs {
    name: String,

    #[arg(long)]
    countries: Option<String>,
}

/// Stands in for the HTTP client on commands that never download.
#[derive(Clone, Copy)]
struct NopReference;

impl ReferenceClient for NopReference {
    fn download(&self, _url: &str, _destination: &Path) -> Result<(), PrepError> {
        Err(PrepError::ReferenceHttp("downloads disabled".to_string()))
    }
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<PrepError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &PrepError) -> u8 {
    match error {
        PrepError::UnresolvedCountry { .. }
        | PrepError::AmbiguousOrMissingMapping { .. }
        | PrepError::MissingColumn { .. }
        | PrepError::MissingConfig => 2,
        PrepError::ReferenceHttp(_) | PrepError::ReferenceStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let store = Store::new()?;

    match cli.command {
        Commands::FetchReferences(args) => {
            let app = App::new(store, ReferenceHttpClient::new()?);
            let options = FetchOptions {
                force: args.force,
                dry_run: args.dry_run,
            };
            match output_mode {
                OutputMode::Json => {
                    let result = app.fetch_references(options, &JsonOutput)?;
                    JsonOutput::print_fetch(&result).into_diagnostic()?;
                }
                OutputMode::Text => {
                    let result = app.fetch_references(options, &TextOutput)?;
                    TextOutput::print_fetch(&result);
                }
            }
        }
        Commands::Prepare(args) => {
            let config = ConfigLoader::resolve(args.config.as_deref())?;
            let app = App::new(store, NopReference);
            match output_mode {
                OutputMode::Json => {
                    let (_, result) = app.prepare(&config, &JsonOutput)?;
                    JsonOutput::print_prepare(&result).into_diagnostic()?;
                }
                OutputMode::Text => {
                    let (_, result) = app.prepare(&config, &TextOutput)?;
                    TextOutput::print_prepare(&result);
                }
            }
        }
        Commands::ResolveCountry(args) => {
            let app = App::new(store, NopReference);
            let countries = args.countries.map(Utf8PathBuf::from);
            let resolved = app.resolve_country(&args.name, countries.as_ref())?;
            match output_mode {
                OutputMode::Json => JsonOutput::print_country(&resolved).into_diagnostic()?,
                OutputMode::Text => TextOutput::print_country(&resolved),
            }
        }
    }
    Ok(())
}
