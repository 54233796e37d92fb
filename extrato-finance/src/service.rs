//! End-to-end processing of one statement: text (or PDF) in, records,
//! totals and an optional CSV export out.

use extrato_core::ExtractionResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregator::summarize;
use crate::error::Result;
use crate::export::{save_export, ExportTarget};
use crate::extractor::StatementExtractor;

/// Result of processing one document
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub result: ExtractionResult,
    /// File name of the written export, if any
    pub export_file: Option<String>,
}

/// Totals reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractSummary {
    pub total_lancamentos: usize,
    pub total_debitos: f64,
    pub total_creditos: f64,
    pub saldo_liquido: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_filename: Option<String>,
}

impl From<&ProcessOutcome> for ExtractSummary {
    fn from(outcome: &ProcessOutcome) -> Self {
        let totals = outcome.result.totals;
        Self {
            total_lancamentos: outcome.result.len(),
            total_debitos: totals.total_debitos,
            total_creditos: totals.total_creditos,
            saldo_liquido: totals.saldo_liquido,
            export_filename: outcome.export_file.clone(),
        }
    }
}

/// Process already-extracted statement text.
///
/// Blank text is a valid, empty result. An export is written only when a
/// target is given and at least one record was found.
pub fn process_text(
    extractor: &StatementExtractor,
    bank_code: &str,
    text: &str,
    export: Option<&ExportTarget>,
) -> Result<ProcessOutcome> {
    if text.trim().is_empty() {
        return Ok(ProcessOutcome {
            result: ExtractionResult::empty(),
            export_file: None,
        });
    }

    let result = summarize(extractor.extract(bank_code, text));
    let export_file = match export {
        Some(target) => save_export(target, &result.records)?,
        None => None,
    };

    Ok(ProcessOutcome { result, export_file })
}

/// Read a PDF and process its text. Conversion failures propagate as
/// [`extrato_ingest::IngestError::DocumentUnreadable`].
pub fn process_pdf(
    extractor: &StatementExtractor,
    bank_code: &str,
    path: &Path,
    max_bytes: u64,
    export: Option<&ExportTarget>,
) -> Result<ProcessOutcome> {
    let text = extrato_ingest::read_pdf(path, max_bytes)?;
    process_text(extractor, bank_code, &text, export)
}
