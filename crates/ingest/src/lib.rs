//! # Trade Log Ingest
//!
//! Discovers and loads CSV trade logs. A file that cannot be read, or whose
//! header lacks one of the required columns, fails as a whole with an
//! `IngestError` naming the file; the caller decides whether that aborts the
//! batch (it should not).

pub mod error;

use core_types::RawTradeRecord;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use error::IngestError;

/// Lists the `.csv` files directly inside `dir`, sorted by file name so a
/// batch run is deterministic.
pub fn discover_trade_logs(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|source| IngestError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), files = files.len(), "discovered trade logs");
    Ok(files)
}

/// Loads every row of one trade log file.
pub fn load_trade_log(path: &Path) -> Result<Vec<RawTradeRecord>, IngestError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| IngestError::TradeLog {
            path: path.to_path_buf(),
            source,
        })?;
    read_trade_log(reader).map_err(|source| IngestError::TradeLog {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserializes trade log rows from an already-open CSV reader. Unknown
/// columns are ignored; a missing required column fails the whole table.
pub fn read_trade_log<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawTradeRecord>, csv::Error> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: RawTradeRecord = result?;
        records.push(record);
    }
    Ok(records)
}
