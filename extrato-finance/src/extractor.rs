//! Walks a whole document: builds records line by line, folds wrapped
//! descriptions into the record above them, and drops duplicates.

use extrato_core::{dedup_records, PatternLibrary, Result, TransactionRecord};
use tracing::{debug, info};

use crate::builder::build_record;
use crate::classifier::is_continuation_line;

/// Lines shorter than this (in characters) are skipped.
pub const MIN_LINE_CHARS: usize = 5;
/// Characters of a continuation line appended to the description.
pub const CONTINUATION_CHARS: usize = 50;

/// Statement text extractor. Holds the compiled patterns; immutable, so one
/// instance can serve any number of documents.
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    patterns: PatternLibrary,
}

impl StatementExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self::with_patterns(PatternLibrary::new()?))
    }

    pub fn with_patterns(patterns: PatternLibrary) -> Self {
        Self { patterns }
    }

    pub fn build_record(&self, bank_code: &str, line: &str) -> Option<TransactionRecord> {
        build_record(&self.patterns, bank_code, line)
    }

    /// Deduplicated records in document order.
    pub fn extract(&self, bank_code: &str, text: &str) -> Vec<TransactionRecord> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut records: Vec<TransactionRecord> = Vec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if line.chars().count() < MIN_LINE_CHARS {
                continue;
            }

            let Some(mut record) = self.build_record(bank_code, line) else {
                continue;
            };
            debug!(
                line = i + 1,
                date = %record.date,
                "{}...",
                record.description.chars().take(30).collect::<String>()
            );

            if let Some(next) = lines.get(i + 1).map(|l| l.trim()) {
                if is_continuation_line(&self.patterns, next) {
                    record.description.push(' ');
                    record.description.extend(next.chars().take(CONTINUATION_CHARS));
                }
            }

            records.push(record);
        }

        let total = records.len();
        let unique = dedup_records(records);
        info!("extracted {} unique records from {} total", unique.len(), total);
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrato_core::Direction;

    fn extractor() -> StatementExtractor {
        StatementExtractor::new().unwrap()
    }

    #[test]
    fn test_continuation_line_is_merged() {
        let text = "10/01/2024 PIX pagamento 100,00 D\nfornecedor xyz";
        let records = extractor().extract("341", text);
        assert_eq!(records.len(), 1);
        assert!(records[0].description.ends_with(" fornecedor xyz"));
        assert_eq!(records[0].description, "PIX pagamento fornecedor xyz");
    }

    #[test]
    fn test_next_transaction_is_not_merged() {
        let text = "10/01/2024 PIX pagamento 100,00 D\n11/01/2024 TED recebida 200,00 C";
        let records = extractor().extract("341", text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "PIX pagamento");
        assert_eq!(records[1].direction, Direction::Credit);
    }

    #[test]
    fn test_dated_non_transaction_is_not_merged() {
        let text = "10/01/2024 PIX pagamento 100,00 D\n11/01/2024 SALDO DO DIA 900,00";
        let records = extractor().extract("341", text);
        assert_eq!(records[0].description, "PIX pagamento");
    }

    #[test]
    fn test_continuation_is_truncated() {
        let tail = "y".repeat(80);
        let text = format!("10/01/2024 PIX pagamento 100,00 D\n{tail}");
        let records = extractor().extract("341", &text);
        assert_eq!(records[0].description, format!("PIX pagamento {}", "y".repeat(50)));
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let text = "10/01/2024 PIX pagamento 100,00 D\n\n10/01/2024 PIX pagamento 100,00 D";
        let records = extractor().extract("341", text);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_short_and_blank_lines_skipped() {
        let records = extractor().extract("341", "\n  \nabc\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_page_markers_never_become_records() {
        let text = "\n--- PÁGINA 1 ---\n10/01/2024 PIX pagamento 100,00 D\n";
        let records = extractor().extract("341", text);
        assert_eq!(records.len(), 1);
    }
}
