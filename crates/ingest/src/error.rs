use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load trade log {path}: {source}")]
    TradeLog {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
