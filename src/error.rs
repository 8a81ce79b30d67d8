use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PrepError {
    #[error("unknown country: {name}")]
    #[diagnostic(help("add an alias for this name or extend the country reference table"))]
    UnresolvedCountry { name: String },

    #[error("wrong number of matches for {name}: {count}")]
    #[diagnostic(help("fix the GISAID country name mapping table"))]
    AmbiguousOrMissingMapping { name: String, count: usize },

    #[error("required column not found: {column}")]
    MissingColumn { column: String },

    #[error("row {row} has {found} fields, header has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {column} already exists")]
    DuplicateColumn { column: String },

    #[error("missing config file gisaid-prep.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("reference download failed: {0}")]
    ReferenceHttp(String),

    #[error("reference server returned status {status}: {message}")]
    ReferenceStatus { status: u16, message: String },

    #[error("failed to parse table: {0}")]
    TableParse(String),

    #[error("failed to decompress metadata: {0}")]
    Decompress(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
