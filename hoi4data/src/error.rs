use pdxtxt::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading converter input. All of them abort the run.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse {}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("Unexpected structure in {}: {message}", path.display())]
    Deserialize { path: PathBuf, message: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No unit mapping definitions loaded from {}", .0.display())]
    NoRuleSets(PathBuf),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
