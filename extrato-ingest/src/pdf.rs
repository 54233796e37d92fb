//! PDF to text conversion.
//!
//! Only digital PDFs with an embedded text layer are supported; scanned
//! images come out blank and produce an empty extraction.

use std::fs;
use std::panic;
use std::path::Path;

use tracing::{error, info};

use crate::error::{IngestError, Result};
use crate::types::{join_pages, PageText};

/// Upload size accepted by default (20 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Extract the text of every page.
pub fn pdf_pages(pdf_bytes: &[u8]) -> Result<Vec<PageText>> {
    // pdf-extract panics on some malformed content streams
    let texts = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(pdf_bytes))
        .map_err(|_| "PDF parser panicked".to_string())
        .and_then(|r| r.map_err(|e| e.to_string()))
        .map_err(|msg| {
            error!("PDF text extraction failed: {msg}");
            IngestError::DocumentUnreadable(msg)
        })?;

    let pages: Vec<PageText> = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageText { number: i + 1, text })
        .collect();

    info!(pages = pages.len(), "extracted text from PDF");
    Ok(pages)
}

/// Full document text with page markers between pages.
pub fn pdf_to_text(pdf_bytes: &[u8]) -> Result<String> {
    Ok(join_pages(&pdf_pages(pdf_bytes)?))
}

/// Accepts only `.pdf` file names (any case).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Validate, read and convert a PDF from disk.
///
/// A missing file is `Io`; a file that exists but cannot be read or
/// converted is `DocumentUnreadable`.
pub fn read_pdf(path: &Path, max_bytes: u64) -> Result<String> {
    if !is_pdf(path) {
        return Err(IngestError::NotPdf(path.display().to_string()));
    }

    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(IngestError::TooLarge { size, limit: max_bytes });
    }

    let bytes = fs::read(path).map_err(|e| {
        error!("reading {} failed: {e}", path.display());
        IngestError::DocumentUnreadable(e.to_string())
    })?;
    pdf_to_text(&bytes)
}
