use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a PDF file: {0}")]
    NotPdf(String),

    #[error("document too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("document unreadable: {0}")]
    DocumentUnreadable(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
