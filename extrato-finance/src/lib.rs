//! extrato-finance: line classification, record building, document
//! extraction, totals and CSV export for bank-statement text

pub mod aggregator;
pub mod builder;
pub mod classifier;
pub mod error;
pub mod export;
pub mod extractor;
pub mod service;

pub use aggregator::{aggregate, summarize};
pub use builder::{build_record, detect_date, detect_value_and_direction, extract_description};
pub use classifier::{is_continuation_line, is_transaction_line};
pub use error::{FinanceError, Result};
pub use export::{save_export, sorted_for_export, write_csv, ExportTarget, EXPORT_COLUMNS};
pub use extractor::StatementExtractor;
pub use service::{process_pdf, process_text, ExtractSummary, ProcessOutcome};
