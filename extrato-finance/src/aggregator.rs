//! Debit/credit totals over extracted records.

use extrato_core::{ExtractionResult, Totals, TransactionRecord};

/// Sum debits and credits. Undefined movements count toward neither.
pub fn aggregate(records: &[TransactionRecord]) -> Totals {
    let sum = |keep: fn(&TransactionRecord) -> bool| -> f64 {
        records.iter().filter(|r| keep(r)).map(|r| r.amount).sum()
    };

    let total_debitos = sum(TransactionRecord::is_debit);
    let total_creditos = sum(TransactionRecord::is_credit);
    Totals {
        total_debitos,
        total_creditos,
        saldo_liquido: total_creditos - total_debitos,
    }
}

/// Wrap deduplicated records with their totals.
pub fn summarize(records: Vec<TransactionRecord>) -> ExtractionResult {
    let totals = aggregate(&records);
    ExtractionResult { records, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrato_core::Direction;

    fn rec(direction: Direction, amount: f64) -> TransactionRecord {
        TransactionRecord::new("10/01/2024", direction, format!("{direction} {amount}"), amount, "1")
    }

    #[test]
    fn test_undefined_is_excluded() {
        let records = vec![
            rec(Direction::Debit, 50.0),
            rec(Direction::Credit, 30.0),
            rec(Direction::Undefined, 999.0),
        ];
        let totals = aggregate(&records);
        assert_eq!(totals.total_debitos, 50.0);
        assert_eq!(totals.total_creditos, 30.0);
        assert_eq!(totals.saldo_liquido, -20.0);
    }

    #[test]
    fn test_summarize_keeps_undefined_records() {
        let result = summarize(vec![rec(Direction::Undefined, 1.0), rec(Direction::Credit, 2.0)]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.totals.total_creditos, 2.0);
        assert_eq!(result.totals.saldo_liquido, 2.0);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(aggregate(&[]), Totals::default());
    }
}
