pub mod builtin;
pub mod schema;

use crate::error::LmrError;
use regex::Regex;
use schema::{ExtractionProfile, FieldKind, PostProcess};
use std::collections::HashSet;
use std::path::Path;

/// Named groups the structured timeline row may use.
pub const TIMELINE_GROUPS: &[&str] = &[
    "hours",
    "lateral",
    "phase",
    "category",
    "major_op",
    "action",
    "object",
    "resp_co",
    "hole_start",
    "hole_end",
    "event_start",
    "event_end",
];

const DEFAULT_SEPARATOR: &str = "; ";

/// Load an extraction profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<ExtractionProfile, LmrError> {
    let content = std::fs::read_to_string(path).map_err(|e| LmrError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse an extraction profile from a TOML string.
pub fn parse_profile(toml_str: &str, source: &Path) -> Result<ExtractionProfile, LmrError> {
    let profile: ExtractionProfile =
        toml::from_str(toml_str).map_err(|e| LmrError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse an extraction profile from a TOML string (no file path context).
pub fn parse_profile_str(toml_str: &str) -> Result<ExtractionProfile, LmrError> {
    let profile: ExtractionProfile = toml::from_str(toml_str)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed and every pattern compiles.
pub fn validate_profile(profile: &ExtractionProfile) -> Result<(), LmrError> {
    CompiledProfile::compile(profile.clone()).map(|_| ())
}

#[derive(Debug, Clone)]
pub struct CompiledField {
    pub name: String,
    pub kind: FieldKind,
    pub pattern: Regex,
    pub stop: Option<Regex>,
    pub default: Option<String>,
    pub separator: String,
    pub post: PostProcess,
}

#[derive(Debug, Clone)]
pub struct CompiledGroup {
    pub name: String,
    pub pattern: Regex,
    pub cap: usize,
    pub columns: Vec<String>,
    pub section_start: Option<Regex>,
    pub section_stop: Option<Regex>,
    pub default: Option<String>,
}

impl CompiledGroup {
    /// Column names for the occurrence at 1-based position `n`.
    pub fn column_names(&self, n: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.replace("{n}", &n.to_string()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompiledTimeline {
    pub anchor: Regex,
    pub structured: Option<Regex>,
    pub stop: Option<Regex>,
}

/// A profile with every pattern compiled, ready to run over a batch.
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    pub def: ExtractionProfile,
    pub report_anchor: Regex,
    pub fields: Vec<CompiledField>,
    pub groups: Vec<CompiledGroup>,
    pub timeline: CompiledTimeline,
}

impl CompiledProfile {
    pub fn compile(def: ExtractionProfile) -> Result<CompiledProfile, LmrError> {
        if def.name.trim().is_empty() {
            return Err(LmrError::ProfileInvalid(
                "profile name must not be empty".into(),
            ));
        }

        let report_anchor = compile_pattern("report_anchor", &def.report_anchor)?;

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            if field.name.trim().is_empty() {
                return Err(LmrError::ProfileInvalid(
                    "field name must not be empty".into(),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(LmrError::ProfileInvalid(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }

            let pattern = compile_pattern(&field.name, &field.pattern)?;
            let stop = match (&field.kind, &field.stop) {
                (FieldKind::Bounded, Some(stop)) => Some(compile_pattern(&field.name, stop)?),
                (FieldKind::Bounded, None) => {
                    return Err(LmrError::ProfileInvalid(format!(
                        "bounded field '{}' needs a stop pattern",
                        field.name
                    )));
                }
                (_, Some(stop)) => Some(compile_pattern(&field.name, stop)?),
                (_, None) => None,
            };

            if field.kind != FieldKind::Bounded && pattern.captures_len() < 2 {
                return Err(LmrError::ProfileInvalid(format!(
                    "field '{}': pattern has no capture group",
                    field.name
                )));
            }

            fields.push(CompiledField {
                name: field.name.clone(),
                kind: field.kind,
                pattern,
                stop,
                default: field.default.clone(),
                separator: field
                    .separator
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
                post: field.post,
            });
        }

        for (role, name) in [
            ("date", &def.identity.date),
            ("rig", &def.identity.rig),
            ("well", &def.identity.well),
        ] {
            let is_single = def
                .fields
                .iter()
                .any(|f| f.name == *name && f.kind == FieldKind::Single);
            if !is_single {
                return Err(LmrError::ProfileInvalid(format!(
                    "identity {} '{}' must name a single field",
                    role, name
                )));
            }
        }

        let mut groups = Vec::with_capacity(def.groups.len());
        for group in &def.groups {
            if group.cap == 0 {
                return Err(LmrError::ProfileInvalid(format!(
                    "group '{}' has a cap of 0",
                    group.name
                )));
            }
            if group.columns.is_empty() {
                return Err(LmrError::ProfileInvalid(format!(
                    "group '{}' has no columns",
                    group.name
                )));
            }
            if let Some(col) = group.columns.iter().find(|c| !c.contains("{n}")) {
                return Err(LmrError::ProfileInvalid(format!(
                    "group '{}': column '{}' is missing the {{n}} placeholder",
                    group.name, col
                )));
            }

            let pattern = compile_pattern(&group.name, &group.pattern)?;
            if pattern.captures_len() - 1 < group.columns.len() {
                return Err(LmrError::ProfileInvalid(format!(
                    "group '{}': {} columns but only {} capture groups",
                    group.name,
                    group.columns.len(),
                    pattern.captures_len() - 1
                )));
            }

            let (section_start, section_stop) = match &group.section {
                Some(section) => (
                    Some(compile_pattern(&group.name, &section.start)?),
                    section
                        .stop
                        .as_deref()
                        .map(|s| compile_pattern(&group.name, s))
                        .transpose()?,
                ),
                None => (None, None),
            };

            groups.push(CompiledGroup {
                name: group.name.clone(),
                pattern,
                cap: group.cap,
                columns: group.columns.clone(),
                section_start,
                section_stop,
                default: group.default.clone(),
            });
        }

        let anchor = compile_pattern("timeline.anchor", &def.timeline.anchor)?;
        if anchor.captures_len() != 3 {
            return Err(LmrError::ProfileInvalid(
                "timeline.anchor needs exactly two capture groups (from, to)".into(),
            ));
        }
        let structured = def
            .timeline
            .structured
            .as_deref()
            .map(|s| compile_pattern("timeline.structured", s))
            .transpose()?;
        if let Some(re) = &structured {
            if let Some(unknown) = re
                .capture_names()
                .flatten()
                .find(|n| !TIMELINE_GROUPS.contains(n))
            {
                return Err(LmrError::ProfileInvalid(format!(
                    "timeline.structured: unknown group '{}' (expected one of {})",
                    unknown,
                    TIMELINE_GROUPS.join(", ")
                )));
            }
        }
        let stop = def
            .timeline
            .stop
            .as_deref()
            .map(|s| compile_pattern("timeline.stop", s))
            .transpose()?;

        Ok(CompiledProfile {
            report_anchor,
            fields,
            groups,
            timeline: CompiledTimeline {
                anchor,
                structured,
                stop,
            },
            def,
        })
    }
}

fn compile_pattern(owner: &str, pattern: &str) -> Result<Regex, LmrError> {
    if pattern.is_empty() {
        return Err(LmrError::ProfileInvalid(format!(
            "'{}': pattern must not be empty",
            owner
        )));
    }
    Regex::new(pattern).map_err(|e| {
        LmrError::ProfileInvalid(format!("'{}': invalid pattern: {}", owner, e))
    })
}
