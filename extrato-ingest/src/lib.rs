//! extrato-ingest: document-to-text conversion for statement PDFs.

pub mod error;
pub mod pdf;
pub mod types;

pub use error::{IngestError, Result};
pub use pdf::{is_pdf, pdf_pages, pdf_to_text, read_pdf, DEFAULT_MAX_DOCUMENT_BYTES};
pub use types::{join_pages, page_marker, PageText};
