use serde::{Deserialize, Serialize};

/// A data-driven description of one report layout: where each field's
/// value starts, what shape it has and how it is post-processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Start-of-report anchor used to segment a document.
    pub report_anchor: String,
    pub identity: IdentityDef,
    /// Scalar fields, extracted and emitted in this order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Capped repeating sub-records, flattened into positional columns.
    #[serde(default)]
    pub groups: Vec<GroupDef>,
    pub timeline: TimelineDef,
}

/// Names of the fields that form the (Date, Rig, Well Name) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDef {
    pub date: String,
    pub rig: String,
    pub well: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// First capture group of the first match.
    #[default]
    Single,
    /// Capture group 1 of every match, joined into one string.
    Joined,
    /// Free text from the end of the start anchor up to a stop pattern.
    Bounded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostProcess {
    #[default]
    Trim,
    Collapse,
    Integer,
    Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    pub pattern: String,
    /// Terminator for `bounded` fields.
    #[serde(default)]
    pub stop: Option<String>,
    /// Value used when the pattern does not match.
    #[serde(default)]
    pub default: Option<String>,
    /// Separator for `joined` fields. Defaults to "; ".
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub post: PostProcess,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDef {
    pub name: String,
    pub pattern: String,
    /// Maximum number of occurrences kept.
    pub cap: usize,
    /// Column templates; `{n}` is replaced with the 1-based occurrence
    /// number. Column i takes capture group i + 1.
    pub columns: Vec<String>,
    /// Restrict matching to a section of the block when it is present.
    #[serde(default)]
    pub section: Option<SectionDef>,
    /// Value for a column whose capture group did not participate.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDef {
    pub start: String,
    #[serde(default)]
    pub stop: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineDef {
    /// Time-range anchor with two capture groups: from and to.
    pub anchor: String,
    /// Structured sub-field row, applied at the start of each entry span.
    #[serde(default)]
    pub structured: Option<String>,
    /// Ends an entry span at the next non-operations section.
    #[serde(default)]
    pub stop: Option<String>,
}
