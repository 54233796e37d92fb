//! Errors surfaced by the extraction pipeline.

use extrato_core::ExtratoError;
use extrato_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Core(#[from] ExtratoError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinanceError {
    /// True when the source document exists but could not be read or turned
    /// into text. A missing file is an `Io` error, not this.
    pub fn is_document_unreadable(&self) -> bool {
        matches!(self, FinanceError::Ingest(IngestError::DocumentUnreadable(_)))
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
