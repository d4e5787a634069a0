use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV generation failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown export {kind}: {value}")]
    Unknown { kind: &'static str, value: String },

    #[error("export failed: {0}")]
    ExportFailed(String),
}
