//! extrato-core: record model, pattern library and normalizers for
//! Brazilian bank-statement text

pub mod error;
pub mod model;
pub mod normalize;
pub mod patterns;

pub use error::{ExtratoError, Result};
pub use model::{dedup_records, DedupKey, Direction, ExtractionResult, Totals, TransactionRecord};
pub use normalize::{
    classify_direction, current_year, direction_from_sign, normalize_amount, normalize_date,
    normalize_date_with_year, parse_canonical_date,
};
pub use patterns::{DateKind, DatePattern, PatternLibrary, ValueMatch};
