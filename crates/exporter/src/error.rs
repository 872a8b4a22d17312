use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
