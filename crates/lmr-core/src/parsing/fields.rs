use crate::model::{CellValue, Record};
use crate::parsing::normalize::collapse_whitespace;
use crate::parsing::values::coerce;
use crate::profile::schema::FieldKind;
use crate::profile::CompiledField;
use regex::Regex;

/// First capture group of the first match, trimmed.
///
/// Falls back to `default` when nothing matches or when group 1 did not
/// take part in the match.
pub fn extract_value(pattern: &Regex, text: &str, default: Option<&str>) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .or_else(|| default.map(str::to_string))
}

/// Capture group 1 of every match, trimmed and joined with `separator`.
/// No match gives an empty string.
pub fn extract_joined(pattern: &Regex, text: &str, separator: &str) -> String {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Free text between the end of `start` and the first `stop` match after
/// it, whitespace collapsed. Without a stop match the text runs to the end
/// of the block.
pub fn extract_bounded(
    start: &Regex,
    stop: &Regex,
    text: &str,
    default: Option<&str>,
) -> Option<String> {
    let Some(m) = start.find(text) else {
        return default.map(str::to_string);
    };
    let rest = text[m.end()..].trim_start();
    let end = stop.find(rest).map(|s| s.start()).unwrap_or(rest.len());
    let value = collapse_whitespace(&rest[..end]);
    if value.is_empty() {
        default.map(str::to_string)
    } else {
        Some(value)
    }
}

/// Run every field definition over a block, in order, into `record`.
///
/// A field that does not match is set to its default, or null. Joined
/// fields are always present.
pub fn extract_fields(fields: &[CompiledField], block: &str, record: &mut Record) {
    for field in fields {
        let raw = match field.kind {
            FieldKind::Single => extract_value(&field.pattern, block, field.default.as_deref()),
            FieldKind::Joined => Some(extract_joined(&field.pattern, block, &field.separator)),
            FieldKind::Bounded => match &field.stop {
                Some(stop) => {
                    extract_bounded(&field.pattern, stop, block, field.default.as_deref())
                }
                None => field.default.clone(),
            },
        };

        let value = match raw {
            Some(s) => coerce(&s, field.post),
            None => CellValue::Null,
        };
        record.set(field.name.as_str(), value);
    }
}
