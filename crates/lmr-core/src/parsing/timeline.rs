use crate::model::{ReportIdentity, TimelineEntry};
use crate::parsing::normalize::collapse_whitespace;
use crate::parsing::values::parse_decimal;
use crate::profile::CompiledTimeline;
use regex::Captures;

/// Encode a 4-digit clock value "HHMM" as `HH * 100 + MM`.
pub fn encode_clock(s: &str) -> Option<i64> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = s[..2].parse().ok()?;
    let minutes: i64 = s[2..].parse().ok()?;
    Some(hours * 100 + minutes)
}

/// Elapsed value as the legacy reports compute it:
/// `(end_encoded - start_encoded) / 100`, truncating.
///
/// Minutes are not converted ("0630 - 0700" gives 0) and a range that
/// crosses midnight goes negative ("2300 - 0100" gives -22). Downstream
/// consumers rely on these values, so they are kept as is.
pub fn legacy_duration(from: &str, to: &str) -> Option<i64> {
    Some((encode_clock(to)? - encode_clock(from)?) / 100)
}

/// Parse every time-ranged entry in a report block.
///
/// The number of entries always equals the number of anchor matches.
/// Entries without recognizable codes are kept with only the time range
/// and summary filled in.
pub fn parse_timeline(
    timeline: &CompiledTimeline,
    block: &str,
    identity: &ReportIdentity,
) -> Vec<TimelineEntry> {
    let anchors: Vec<Captures> = timeline.anchor.captures_iter(block).collect();

    anchors
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let span_end = anchors
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(block.len());
            let mut span = &block[whole.end..span_end];
            if let Some(stop) = timeline.stop.as_ref().and_then(|re| re.find(span)) {
                span = &span[..stop.start()];
            }

            let from = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let to = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            build_entry(timeline, identity, from, to, span)
        })
        .collect()
}

fn build_entry(
    timeline: &CompiledTimeline,
    identity: &ReportIdentity,
    from: &str,
    to: &str,
    span: &str,
) -> TimelineEntry {
    let mut entry = TimelineEntry {
        identity: identity.clone(),
        from: from.to_string(),
        to: to.to_string(),
        duration: legacy_duration(from, to),
        hours: None,
        lateral: String::new(),
        phase: String::new(),
        category: String::new(),
        major_op: String::new(),
        action: String::new(),
        object: String::new(),
        resp_co: String::new(),
        hole_depth_start: String::new(),
        hole_depth_end: String::new(),
        event_depth_start: String::new(),
        event_depth_end: String::new(),
        summary: String::new(),
    };

    let structured = timeline.structured.as_ref().and_then(|re| re.captures(span));
    let Some(caps) = structured else {
        entry.summary = collapse_whitespace(span);
        return entry;
    };

    let field = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };
    entry.hours = caps.name("hours").and_then(|m| parse_decimal(m.as_str()));
    entry.lateral = field("lateral");
    entry.phase = field("phase");
    entry.category = field("category");
    entry.major_op = field("major_op");
    entry.action = field("action");
    entry.object = field("object");
    entry.resp_co = field("resp_co");
    entry.hole_depth_start = field("hole_start");
    entry.hole_depth_end = field("hole_end");
    entry.event_depth_start = field("event_start");
    entry.event_depth_end = field("event_end");

    let consumed = caps.get(0).map(|m| m.end()).unwrap_or(0);
    entry.summary = collapse_whitespace(&span[consumed..]);
    entry
}
