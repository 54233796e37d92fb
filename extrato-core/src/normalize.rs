//! Normalization of raw date and value tokens.
//!
//! None of these functions fail: a date that cannot be normalized comes back
//! as the raw token, and an amount that cannot be parsed comes back as `0.0`
//! (which the record builder then rejects).

use chrono::{Datelike, Local, NaiveDate};

use crate::model::Direction;
use crate::patterns::MONTH_ABBREVIATIONS;

/// Year used for dates printed without one.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Normalize a date token to `DD/MM/YYYY`, falling back to the raw token.
pub fn normalize_date(token: &str) -> String {
    normalize_date_with_year(token, current_year())
}

/// Same as [`normalize_date`] with an explicit year for year-less tokens.
pub fn normalize_date_with_year(token: &str, year: i32) -> String {
    let trimmed = token.trim();
    let lower = trimmed.to_lowercase();
    if MONTH_ABBREVIATIONS.iter().any(|(abbr, _)| lower.contains(abbr)) {
        return convert_month_abbrev(trimmed, year).unwrap_or_else(|| token.to_string());
    }

    let mut cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '/' || *c == '-')
        .collect();

    if cleaned.split('/').count() == 2 || cleaned.split('-').count() == 2 {
        cleaned.push_str(&format!("/{year}"));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| fmt.parse(&cleaned))
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Parse a canonical `DD/MM/YYYY` date. Exactly four year digits; raw
/// tokens the normalizer gave up on (e.g. `10/01/202`) yield `None`.
pub fn parse_canonical_date(date: &str) -> Option<NaiveDate> {
    DATE_FORMATS[0].parse(date)
}

fn convert_month_abbrev(token: &str, year: i32) -> Option<String> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '-' { '/' } else { c })
        .collect();

    let (day, month) = match compact.split('/').collect::<Vec<_>>().as_slice() {
        [day, month] => (*day, *month),
        _ => return None,
    };

    let month = month_number(month)?;
    Some(format!("{day:0>2}/{month:02}/{year}"))
}

fn month_number(abbr: &str) -> Option<u32> {
    let lower = abbr.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == lower)
        .or_else(|| MONTH_ABBREVIATIONS.iter().find(|(name, _)| *name == abbr))
        .map(|(_, n)| *n)
}

#[derive(Debug, Clone, Copy)]
enum YearWidth {
    Four,
    Two,
}

/// A `day<sep>month<sep>year` layout; day and month take one or two digits.
#[derive(Debug, Clone, Copy)]
struct DateFormat {
    sep: char,
    year: YearWidth,
}

/// Tried in order; the first that parses wins.
const DATE_FORMATS: [DateFormat; 4] = [
    DateFormat { sep: '/', year: YearWidth::Four },
    DateFormat { sep: '/', year: YearWidth::Two },
    DateFormat { sep: '-', year: YearWidth::Four },
    DateFormat { sep: '-', year: YearWidth::Two },
];

impl DateFormat {
    fn parse(&self, s: &str) -> Option<NaiveDate> {
        let mut parts = s.split(self.sep);
        let day = parse_digits(parts.next()?, 1, 2)?;
        let month = parse_digits(parts.next()?, 1, 2)?;
        let year_str = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        let year = match self.year {
            YearWidth::Four => parse_digits(year_str, 4, 4)? as i32,
            // 69-99 are 19xx, 00-68 are 20xx
            YearWidth::Two => {
                let yy = parse_digits(year_str, 2, 2)? as i32;
                if yy >= 69 { 1900 + yy } else { 2000 + yy }
            }
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn parse_digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a Brazilian-locale amount (`1.234,56`) into its magnitude.
/// Returns `0.0` when the token is not a number.
pub fn normalize_amount(token: &str) -> f64 {
    let mut cleaned = token.replace(' ', "").replace("(+)", "").replace("(-)", "");

    if cleaned.contains('.') && cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    let cleaned: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().map(f64::abs).unwrap_or(0.0)
}

/// Map an explicit direction indicator (`D`, `C`, `+`, `-`, `(+)`, `(-)`).
pub fn classify_direction(indicator: &str) -> Direction {
    match indicator.trim().to_uppercase().as_str() {
        "D" | "-" | "(-)" => Direction::Debit,
        "C" | "+" | "(+)" => Direction::Credit,
        _ => Direction::Undefined,
    }
}

/// Direction of a value with no indicator: a leading `-` is a debit,
/// anything else a credit.
pub fn direction_from_sign(value_token: &str) -> Direction {
    if value_token.trim().starts_with('-') {
        Direction::Debit
    } else {
        Direction::Credit
    }
}
