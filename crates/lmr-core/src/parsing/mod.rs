pub mod fields;
pub mod groups;
pub mod normalize;
pub mod segment;
pub mod timeline;
pub mod values;

use crate::model::{Record, ReportIdentity, TimelineEntry};
use crate::profile::CompiledProfile;
use fields::extract_fields;
use groups::apply_group;
use segment::{segment_reports, ReportBlock};
use timeline::parse_timeline;
use tracing::debug;

/// Everything extracted from one report block.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub well: Record,
    pub timeline: Vec<TimelineEntry>,
}

/// Join page texts into one document blob, in page order.
///
/// No normalization happens here, so anchors see the raw layout.
pub fn aggregate_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse aggregated document text into one report per anchor.
///
/// A document without any anchor yields an empty vec.
pub fn parse_document(text: &str, profile: &CompiledProfile) -> Vec<ParsedReport> {
    let blocks = segment_reports(text, &profile.report_anchor);
    debug!(blocks = blocks.len(), "segmented document");
    blocks.iter().map(|b| parse_block(b, profile)).collect()
}

/// Run the field, group and timeline extractors over a single block.
pub fn parse_block(block: &ReportBlock<'_>, profile: &CompiledProfile) -> ParsedReport {
    let mut well = Record::new();
    extract_fields(&profile.fields, block.text, &mut well);

    for group in &profile.groups {
        let stats = apply_group(group, block.text, &mut well);
        if stats.found > stats.kept {
            debug!(
                block = block.index,
                group = %group.name,
                found = stats.found,
                kept = stats.kept,
                "dropped occurrences beyond cap"
            );
        }
    }

    let identity = report_identity(&well, profile);
    let timeline = parse_timeline(&profile.timeline, block.text, &identity);
    debug!(
        block = block.index,
        entries = timeline.len(),
        date = identity.date.as_deref().unwrap_or("-"),
        "parsed report block"
    );

    ParsedReport { well, timeline }
}

fn report_identity(well: &Record, profile: &CompiledProfile) -> ReportIdentity {
    let text = |name: &str| well.get_text(name).map(str::to_string);
    ReportIdentity {
        date: text(&profile.def.identity.date),
        rig: text(&profile.def.identity.rig),
        well: text(&profile.def.identity.well),
    }
}
