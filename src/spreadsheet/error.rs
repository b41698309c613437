use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to build worksheet {sheet}: {source}")]
    Sheet {
        sheet: &'static str,
        source: XlsxError,
    },
    #[error("timestamp out of spreadsheet range: {0}")]
    Timestamp(String),
    #[error("failed to save spreadsheet {path}: {source}")]
    Save { path: String, source: XlsxError },
}
