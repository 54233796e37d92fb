//! Line classification: does a line of statement text describe a movement?
//!
//! No layout information is available, so the decision is purely lexical:
//! a date, a value, a transaction keyword and no header/summary term.

use extrato_core::PatternLibrary;

/// All four conditions must hold.
pub fn is_transaction_line(patterns: &PatternLibrary, line: &str) -> bool {
    patterns.has_date(line)
        && patterns.has_value(line)
        && patterns.has_keyword(line)
        && !patterns.has_ignore_term(line)
}

/// A line that may be folded into the previous record's description.
pub fn is_continuation_line(patterns: &PatternLibrary, line: &str) -> bool {
    !line.is_empty() && !is_transaction_line(patterns, line) && !patterns.has_date(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    #[test]
    fn test_transaction_line_needs_keyword() {
        let p = patterns();
        assert!(is_transaction_line(&p, "10/01/2024 PIX pagamento 100,00 D"));
        assert!(!is_transaction_line(&p, "10/01/2024 mercado central 100,00 D"));
    }

    #[test]
    fn test_transaction_line_needs_date_and_value() {
        let p = patterns();
        assert!(!is_transaction_line(&p, "PIX pagamento 100,00 D"));
        assert!(!is_transaction_line(&p, "10/01/2024 PIX pagamento"));
    }

    #[test]
    fn test_ignored_lines() {
        let p = patterns();
        assert!(!is_transaction_line(&p, "10/01/2024 SALDO ANTERIOR PIX 1.000,00"));
        assert!(!is_transaction_line(&p, "10/01/2024 TOTAL DEBITOS 500,00"));
        assert!(!is_transaction_line(&p, "Agencia 1234 conta 10/01 pix 1,00"));
    }

    #[test]
    fn test_continuation_line() {
        let p = patterns();
        assert!(is_continuation_line(&p, "fornecedor xyz"));
        assert!(!is_continuation_line(&p, ""));
        assert!(!is_continuation_line(&p, "11/01/2024 mercado"));
        assert!(!is_continuation_line(&p, "11/01/2024 PIX 10,00 D"));
    }
}
