use crate::model::CellValue;
use crate::profile::schema::PostProcess;
use crate::parsing::normalize::collapse_whitespace;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Coerce an extracted string according to its field's post-processor.
///
/// Values that do not coerce stay as text; extraction never fails on a
/// value shape.
pub fn coerce(raw: &str, post: PostProcess) -> CellValue {
    match post {
        PostProcess::Trim => CellValue::Text(raw.trim().to_string()),
        PostProcess::Collapse => CellValue::Text(collapse_whitespace(raw)),
        PostProcess::Integer => match parse_integer(raw) {
            Some(v) => CellValue::Integer(v),
            None => CellValue::Text(raw.trim().to_string()),
        },
        PostProcess::Decimal => match parse_decimal(raw) {
            Some(v) => CellValue::Decimal(v),
            None => CellValue::Text(raw.trim().to_string()),
        },
    }
}

/// Parse an integer written with optional thousands separators, e.g.
/// "12,450".
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// Parse a decimal value such as "75.5" or "1,025.0".
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&normalized).ok()
}
