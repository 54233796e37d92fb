//! Builds a [`TransactionRecord`] from a single classified line.

use extrato_core::{
    classify_direction, direction_from_sign, normalize_amount, normalize_date, Direction,
    PatternLibrary, TransactionRecord,
};
use regex::Regex;

use crate::classifier::is_transaction_line;

pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Date of the line, normalized. See [`PatternLibrary::find_date_token`]
/// for which substring is chosen.
pub fn detect_date(patterns: &PatternLibrary, line: &str) -> Option<String> {
    patterns.find_date_token(line).map(normalize_date)
}

/// Magnitude and direction of the first value on the line.
///
/// An explicit indicator decides the direction; without one the sign of the
/// value does.
pub fn detect_value_and_direction(patterns: &PatternLibrary, line: &str) -> Option<(f64, Direction)> {
    let m = patterns.find_value(line)?;
    let amount = normalize_amount(m.value);
    let direction = match m.indicator {
        Some(ind) => classify_direction(ind),
        None => direction_from_sign(m.value),
    };
    Some((amount, direction))
}

/// The line with every date and value removed, whitespace collapsed,
/// outer hyphens trimmed, cut to [`MAX_DESCRIPTION_CHARS`].
pub fn extract_description(patterns: &PatternLibrary, line: &str) -> String {
    let mut text = line.to_string();
    for p in patterns.dates() {
        text = strip_matches(&p.regex, &text);
    }
    for re in patterns.values() {
        text = strip_matches(re, &text);
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect()
}

fn strip_matches(re: &Regex, text: &str) -> String {
    re.replace_all(text, "").into_owned()
}

/// `None` unless the line is a transaction with a date and a non-zero value.
pub fn build_record(patterns: &PatternLibrary, bank_code: &str, line: &str) -> Option<TransactionRecord> {
    if !is_transaction_line(patterns, line) {
        return None;
    }

    let date = detect_date(patterns, line)?;
    let (amount, direction) = detect_value_and_direction(patterns, line)?;
    if amount == 0.0 {
        return None;
    }

    let description = extract_description(patterns, line);
    Some(TransactionRecord::new(date, direction, description, amount, bank_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrato_core::current_year;

    fn patterns() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    #[test]
    fn test_build_debit_record() {
        let p = patterns();
        let r = build_record(&p, "341", "10/01/2024 pix pagamento fornecedor 1.234,56 D").unwrap();
        assert_eq!(r.date, "10/01/2024");
        assert_eq!(r.direction, Direction::Debit);
        assert_eq!(r.amount, 1234.56);
        assert_eq!(r.description, "pix pagamento fornecedor");
        assert_eq!(r.credit_account_tag, "341");
        assert_eq!(r.debit_account_tag, "");
    }

    #[test]
    fn test_direction_from_sign_without_indicator() {
        let p = patterns();
        let debit = build_record(&p, "1", "10/01/2024 TED enviada -50,00").unwrap();
        assert_eq!(debit.direction, Direction::Debit);
        assert_eq!(debit.amount, 50.0);

        let credit = build_record(&p, "1", "10/01/2024 TED recebida 50,00").unwrap();
        assert_eq!(credit.direction, Direction::Credit);
        assert_eq!(credit.debit_account_tag, "1");
    }

    #[test]
    fn test_parenthesised_indicators() {
        let p = patterns();
        let r = build_record(&p, "1", "10/01/2024 rendimento poupanca 3,10 (+)").unwrap();
        assert_eq!(r.direction, Direction::Credit);
        let r = build_record(&p, "1", "10/01/2024 tarifa pacote 19,90 (-)").unwrap();
        assert_eq!(r.direction, Direction::Debit);
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let p = patterns();
        assert!(build_record(&p, "1", "10/01/2024 tarifa isenta 0,00 D").is_none());
    }

    #[test]
    fn test_non_transaction_line_is_rejected() {
        let p = patterns();
        assert!(build_record(&p, "1", "10/01/2024 SALDO ANTERIOR PIX 1.000,00").is_none());
    }

    #[test]
    fn test_rightmost_full_date_wins() {
        let p = patterns();
        let r = build_record(&p, "1", "09/01/2024 10/01/2024 PIX recebido 10,00 C").unwrap();
        assert_eq!(r.date, "10/01/2024");
        assert_eq!(r.description, "PIX recebido");
    }

    #[test]
    fn test_day_month_and_abbreviated_dates() {
        let p = patterns();
        let year = current_year();
        let r = build_record(&p, "1", "05/08 PIX enviado 10,00 D").unwrap();
        assert_eq!(r.date, format!("05/08/{year}"));
        let r = build_record(&p, "1", "05/ago PIX enviado 10,00 D").unwrap();
        assert_eq!(r.date, format!("05/08/{year}"));
        let r = build_record(&p, "1", "05 / mai PIX enviado 10,00 D").unwrap();
        assert_eq!(r.date, format!("05/05/{year}"));
    }

    #[test]
    fn test_description_cleanup() {
        let p = patterns();
        assert_eq!(
            extract_description(&p, "10/01/2024 -  PIX   enviado  - 100,00 D"),
            "PIX enviado"
        );
        let long = format!("10/01/2024 PIX {} 1,00 D", "x".repeat(150));
        assert_eq!(extract_description(&p, &long).chars().count(), MAX_DESCRIPTION_CHARS);
    }
}
