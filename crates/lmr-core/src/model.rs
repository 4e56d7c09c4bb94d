use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single scalar cell in an output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Decimal(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Null)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One output row: field name to value, in insertion order.
///
/// Rows are sparse. A field that was never set is absent, which is not the
/// same as a field set to [`CellValue::Null`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(CellValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut CellValue> {
        self.fields.iter_mut().map(|(_, v)| v)
    }

    /// Insert a field at the front of the row.
    pub fn prepend(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        self.fields.retain(|(k, _)| *k != name);
        self.fields.insert(0, (name, value.into()));
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A sparse table. Columns are the union of field names across rows.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Record>,
}

impl Table {
    /// Union of all field names, in first-seen order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            for (name, _) in row.iter() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The (Date, Rig, Well Name) triple copied onto every timeline entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIdentity {
    pub date: Option<String>,
    pub rig: Option<String>,
    pub well: Option<String>,
}

/// One time-banded line from a report's operations log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub identity: ReportIdentity,
    /// Start clock value as written, e.g. "0600".
    pub from: String,
    /// End clock value as written, e.g. "1400".
    pub to: String,
    /// Legacy elapsed value, see [`crate::parsing::timeline::legacy_duration`].
    /// `None` when a clock value is not four digits.
    pub duration: Option<i64>,
    /// The "Hrs" column, when the entry carries one.
    pub hours: Option<Decimal>,
    pub lateral: String,
    pub phase: String,
    pub category: String,
    pub major_op: String,
    pub action: String,
    pub object: String,
    pub resp_co: String,
    pub hole_depth_start: String,
    pub hole_depth_end: String,
    pub event_depth_start: String,
    pub event_depth_end: String,
    pub summary: String,
}

impl TimelineEntry {
    /// True when at least one structured code was recognized.
    pub fn is_structured(&self) -> bool {
        self.hours.is_some()
            || [
                &self.lateral,
                &self.phase,
                &self.category,
                &self.major_op,
                &self.action,
                &self.object,
                &self.resp_co,
                &self.hole_depth_start,
                &self.hole_depth_end,
                &self.event_depth_start,
                &self.event_depth_end,
            ]
            .iter()
            .any(|s| !s.is_empty())
    }

    /// Flatten into an output row.
    pub fn to_record(&self) -> Record {
        let mut row = Record::new();
        row.set("Date", self.identity.date.clone());
        row.set("Rig", self.identity.rig.clone());
        row.set("Well Name", self.identity.well.clone());
        row.set("From - To", format!("{} - {}", self.from, self.to));
        row.set("From", self.from.as_str());
        row.set("To", self.to.as_str());
        row.set(
            "Duration",
            self.duration.map(CellValue::Integer).unwrap_or(CellValue::Null),
        );
        row.set(
            "Hrs",
            self.hours.map(CellValue::Decimal).unwrap_or(CellValue::Null),
        );
        row.set("Lateral", self.lateral.as_str());
        row.set("Phase", self.phase.as_str());
        row.set("Cat.", self.category.as_str());
        row.set("Major OP", self.major_op.as_str());
        row.set("Action", self.action.as_str());
        row.set("Object", self.object.as_str());
        row.set("Resp. Co", self.resp_co.as_str());
        row.set("Hole Depth Start", self.hole_depth_start.as_str());
        row.set("Hole Depth End", self.hole_depth_end.as_str());
        row.set("Event Depth Start", self.event_depth_start.as_str());
        row.set("Event Depth End", self.event_depth_end.as_str());
        row.set("Summary of Operations", self.summary.as_str());
        row
    }
}

/// Page text for one submitted document, as delivered by the text
/// extraction collaborator. Decoding happens in the core.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub name: Option<String>,
    pub pages: Vec<Vec<u8>>,
}

impl RawDocument {
    pub fn new(name: Option<String>, pages: Vec<Vec<u8>>) -> Self {
        RawDocument { name, pages }
    }

    /// Build a document from already-decoded page text.
    pub fn from_text_pages<S: AsRef<str>>(name: Option<String>, pages: &[S]) -> Self {
        RawDocument {
            name,
            pages: pages
                .iter()
                .map(|p| p.as_ref().as_bytes().to_vec())
                .collect(),
        }
    }

    /// Name for diagnostics, falling back to the submission index.
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("document #{}", index + 1))
    }
}

/// A document that contributed nothing because it could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// Zero-based submission index within the batch.
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// The two merged tables for a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutput {
    pub well_records: Table,
    pub timeline: Table,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DocumentFailure>,
}
