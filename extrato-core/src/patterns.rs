//! Pattern library: date/value regexes and keyword vocabularies.
//!
//! Order is load-bearing. Date patterns are tried top to bottom and the first
//! one that matches decides which substring is the transaction date, so the
//! full `DD/MM/YYYY` form has to come before the day/month-only forms.

use regex::{Captures, Regex};

use crate::error::Result;

/// Which shape of date a pattern recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// `D[D]/M[M]/YY[YY]`, slash or hyphen
    Full,
    /// `D[D]/M[M]`, no year
    DayMonth,
    /// `D[D]/mmm`, no spaces; omits `mai`
    MonthAbbrev,
    /// `D[D] / mmm`, whitespace allowed around the separator
    MonthAbbrevSpaced,
}

#[derive(Debug, Clone)]
pub struct DatePattern {
    pub kind: DateKind,
    pub regex: Regex,
}

impl DatePattern {
    fn new(kind: DateKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            regex: Regex::new(pattern)?,
        })
    }
}

/// Month abbreviations in calendar order
pub const MONTH_ABBREVIATIONS: [(&str, u32); 12] = [
    ("jan", 1),
    ("fev", 2),
    ("mar", 3),
    ("abr", 4),
    ("mai", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("set", 9),
    ("out", 10),
    ("nov", 11),
    ("dez", 12),
];

/// Substrings that mark a line as a movement (matched on the lowercased line)
pub const TRANSACTION_KEYWORDS: &[&str] = &[
    "pix", "ted", "doc", "pagamento", "saque", "deposito", "transferencia", "dep", "depósito",
    "boleto", "tarifa", "cheque", "debito", "credito", "cobranca",
    "impostos", "agua", "água", "luz", "telefone", "rende facil", "rendimento", "seguros",
    "seguro", "pagto", "consorcio", "consórcio", "rende", "deb", "cred", "déb", "créd", "juros",
    "iof", "transf", "sispag", "rend", "rede", "cob", "tev", "envio", "dp", "db", "pg",
    "fornecedor", "recebimento",
];

/// Substrings that mark header, summary and page-break lines
pub const IGNORE_TERMS: &[&str] = &[
    "agencia",
    "conta corrente",
    "cliente",
    "periodo",
    "saldo anterior",
    "total",
    "pagina",
    "---",
    "informacoes adicionais",
];

/// Compiled, immutable pattern set. Build once and share by reference.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    dates: Vec<DatePattern>,
    values: Vec<Regex>,
    keywords: &'static [&'static str],
    ignore: &'static [&'static str],
}

impl PatternLibrary {
    pub fn new() -> Result<Self> {
        let dates = vec![
            DatePattern::new(DateKind::Full, r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b")?,
            DatePattern::new(DateKind::DayMonth, r"\b(\d{1,2}[/-]\d{1,2})\b")?,
            // `mai` is missing here on purpose; the spaced pattern below still catches it.
            DatePattern::new(
                DateKind::MonthAbbrev,
                r"(?i)\b(\d{1,2}[/-](jan|fev|mar|abr|jun|jul|ago|set|out|nov|dez))\b",
            )?,
            DatePattern::new(
                DateKind::MonthAbbrevSpaced,
                r"(?i)\b(\d{1,2}\s*[/-]\s*(jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez))\b",
            )?,
        ];

        // -1.234,56 | 1.234,56 | 1.234,56 D | 10,00 (+)
        let values = vec![Regex::new(
            r"(?P<valor>[+-]?\d{1,3}(?:\.\d{3})*,\d{2})(?:\s*(?P<ind>[DC]|\(\+\)|\(-\)))?",
        )?];

        Ok(Self {
            dates,
            values,
            keywords: TRANSACTION_KEYWORDS,
            ignore: IGNORE_TERMS,
        })
    }

    pub fn dates(&self) -> &[DatePattern] {
        &self.dates
    }

    pub fn values(&self) -> &[Regex] {
        &self.values
    }

    pub fn has_date(&self, line: &str) -> bool {
        self.dates.iter().any(|p| p.regex.is_match(line))
    }

    pub fn has_value(&self, line: &str) -> bool {
        self.values.iter().any(|re| re.is_match(line))
    }

    /// Raw date token chosen for a line: the first pattern (in priority
    /// order) that matches wins, and within it the rightmost match.
    pub fn find_date_token<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.dates.iter().find_map(|p| {
            p.regex
                .captures_iter(line)
                .last()
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
    }

    /// First value match in pattern order, with the captured pieces.
    pub fn find_value<'a>(&self, line: &'a str) -> Option<ValueMatch<'a>> {
        self.values
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| ValueMatch::from_captures(&caps))
    }

    /// Case-insensitive keyword check; expects any casing.
    pub fn has_keyword(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }

    pub fn has_ignore_term(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.ignore.iter().any(|t| lower.contains(t))
    }
}

/// A value token and its optional trailing direction indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMatch<'a> {
    pub value: &'a str,
    pub indicator: Option<&'a str>,
}

impl<'a> ValueMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            value: caps.name("valor")?.as_str(),
            indicator: caps.name("ind").map(|m| m.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    #[test]
    fn test_date_patterns_in_priority_order() {
        let kinds: Vec<_> = lib().dates().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DateKind::Full,
                DateKind::DayMonth,
                DateKind::MonthAbbrev,
                DateKind::MonthAbbrevSpaced
            ]
        );
    }

    #[test]
    fn test_full_date_wins_over_day_month() {
        let lib = lib();
        assert_eq!(lib.find_date_token("05/01 PIX 10/01/2024 12,00"), Some("10/01/2024"));
    }

    #[test]
    fn test_last_match_of_winning_pattern() {
        let lib = lib();
        assert_eq!(
            lib.find_date_token("09/01/2024 10/01/2024 TED 1,00"),
            Some("10/01/2024")
        );
    }

    #[test]
    fn test_abbreviated_month_patterns() {
        let lib = lib();
        assert_eq!(lib.find_date_token("05/AGO PIX 10,00"), Some("05/AGO"));
        // only the spaced pattern knows `mai`
        assert!(!lib.dates()[2].regex.is_match("05/mai"));
        assert!(lib.dates()[3].regex.is_match("05/mai"));
        assert_eq!(lib.find_date_token("05 / mai PIX 10,00"), Some("05 / mai"));
    }

    #[test]
    fn test_value_with_indicator() {
        let lib = lib();
        let m = lib.find_value("PIX pagamento 1.234,56 D").unwrap();
        assert_eq!(m.value, "1.234,56");
        assert_eq!(m.indicator, Some("D"));

        let m = lib.find_value("TED -50,00").unwrap();
        assert_eq!(m.value, "-50,00");
        assert_eq!(m.indicator, None);

        let m = lib.find_value("rendimento 3,10 (+)").unwrap();
        assert_eq!(m.indicator, Some("(+)"));
    }

    #[test]
    fn test_value_requires_two_decimals() {
        let lib = lib();
        assert!(!lib.has_value("PIX 10/01/2024 100"));
        assert!(!lib.has_value("PIX 100.00"));
        assert!(lib.has_value("PIX 100,00"));
    }

    #[test]
    fn test_vocabularies_are_case_insensitive() {
        let lib = lib();
        assert!(lib.has_keyword("PAGTO BOLETO"));
        assert!(lib.has_ignore_term("SALDO ANTERIOR 10,00"));
        assert!(lib.has_ignore_term("--- PÁGINA 2 ---"));
        assert!(!lib.has_keyword("compra no mercado"));
    }
}
