//! # Workbook Exporter
//!
//! Serializes pre-formatted tables into xlsx workbooks, one worksheet per
//! input trade log. This crate knows nothing about trades; it writes whatever
//! tabular strings it is handed.

pub mod error;

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

pub use error::ExporterError;

/// Excel's hard limit on worksheet name length.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// One worksheet of tabular output.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Worksheet name, truncated to Excel's limit on write.
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Writes all sheets into a single workbook at `path`.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<(), ExporterError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(truncate_sheet_name(&sheet.name))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                worksheet.write_string((row + 1) as u32, col as u16, cell)?;
            }
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), sheets = sheets.len(), "workbook saved");
    Ok(())
}

/// Trims a worksheet name to Excel's 31-character limit.
pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}
