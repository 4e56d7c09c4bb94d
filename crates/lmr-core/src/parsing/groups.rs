use crate::model::{CellValue, Record};
use crate::profile::CompiledGroup;
use regex::Regex;

/// One accepted occurrence: capture groups 1..n, trimmed. `None` marks a
/// group that did not participate in the match.
pub type GroupTuple = Vec<Option<String>>;

/// Outcome of applying one group definition to a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub found: usize,
    pub kept: usize,
}

/// All occurrences of `pattern` in textual order, truncated to `cap`.
pub fn extract_groups(pattern: &Regex, text: &str, cap: usize) -> Vec<GroupTuple> {
    pattern
        .captures_iter(text)
        .take(cap)
        .map(|caps| {
            (1..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str().trim().to_string()))
                .collect()
        })
        .collect()
}

/// The part of `block` a group is searched in: its section when the
/// section start is present, otherwise the whole block.
pub fn group_scope<'a>(group: &CompiledGroup, block: &'a str) -> &'a str {
    let Some(start) = &group.section_start else {
        return block;
    };
    let Some(m) = start.find(block) else {
        return block;
    };
    let rest = &block[m.end()..];
    match group.section_stop.as_ref().and_then(|stop| stop.find(rest)) {
        Some(stop) => &rest[..stop.start()],
        None => rest,
    }
}

/// Flatten the first `cap` occurrences of a group into positional columns.
///
/// Positions with no occurrence are left out of the record entirely.
pub fn apply_group(group: &CompiledGroup, block: &str, record: &mut Record) -> GroupStats {
    let scope = group_scope(group, block);
    let found = group.pattern.captures_iter(scope).count();
    let tuples = extract_groups(&group.pattern, scope, group.cap);

    for (i, tuple) in tuples.iter().enumerate() {
        for (column, value) in group.column_names(i + 1).into_iter().zip(tuple.iter()) {
            let cell = match value {
                Some(v) => CellValue::Text(v.clone()),
                None => CellValue::from(group.default.clone()),
            };
            record.set(column, cell);
        }
    }

    GroupStats {
        found,
        kept: tuples.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    fn formation_group(section: bool) -> CompiledGroup {
        CompiledGroup {
            name: "formation".into(),
            pattern: re(r"(?m)^[ \t]*([A-Z]{2,10})[ \t]+([0-9][0-9,]*)[ \t]*([^\r\n]*)"),
            cap: 5,
            columns: vec![
                "Formation {n} Name".into(),
                "Formation {n} Depth".into(),
                "Formation {n} Comment".into(),
            ],
            section_start: section.then(|| re(r"(?m)^[ \t]*Formation Tops\b")),
            section_stop: section.then(|| re(r"(?m)^[ \t]*Mud Data\b")),
            default: None,
        }
    }

    #[test]
    fn test_extract_groups_caps_in_order() {
        let text = "AB 1\nCD 2\nEF 3\nGH 4\n";
        let tuples = extract_groups(&re(r"([A-Z]{2}) (\d)"), text, 2);
        assert_eq!(tuples.len(), 2);
        assert_eq!(tuples[0], vec![Some("AB".into()), Some("1".into())]);
        assert_eq!(tuples[1], vec![Some("CD".into()), Some("2".into())]);
    }

    #[test]
    fn test_extract_groups_reports_missing_subgroup() {
        let tuples = extract_groups(&re(r"([A-Z]+)(?:=(\d+))?"), "PV", 3);
        assert_eq!(tuples, vec![vec![Some("PV".into()), None]]);
    }

    #[test]
    fn test_apply_group_flattens_and_caps() {
        let block = "Formation Tops\n\
                     UMER 1,200 top\n\
                     ARUMA 2,340 picked\n\
                     LAFFAN 3,100\n\
                     MISHRIF 4,050 est\n\
                     SHUAIBA 5,200 est\n\
                     BIYADH 6,010 est\n\
                     ARAB 7,300 est\n";
        let mut record = Record::new();
        let stats = apply_group(&formation_group(true), block, &mut record);

        assert_eq!(stats, GroupStats { found: 7, kept: 5 });
        assert_eq!(record.get_text("Formation 1 Name"), Some("UMER"));
        assert_eq!(record.get_text("Formation 2 Depth"), Some("2,340"));
        assert_eq!(record.get_text("Formation 3 Comment"), Some(""));
        assert_eq!(record.get_text("Formation 5 Name"), Some("SHUAIBA"));
        assert!(!record.contains("Formation 6 Name"));
    }

    #[test]
    fn test_fewer_occurrences_leave_columns_absent() {
        let block = "Formation Tops\nUMER 1200 top\n";
        let mut record = Record::new();
        apply_group(&formation_group(true), block, &mut record);
        assert!(record.contains("Formation 1 Name"));
        assert!(!record.contains("Formation 2 Name"));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_section_scope_excludes_other_lines() {
        let block = "DSLTA 1,204 days\n\
                     Formation Tops\n\
                     UMER 1200 top\n\
                     Mud Data\n\
                     PCF 75 heavy\n";
        let group = formation_group(true);
        assert_eq!(group_scope(&group, block).trim(), "UMER 1200 top");

        let mut record = Record::new();
        let stats = apply_group(&group, block, &mut record);
        assert_eq!(stats.kept, 1);
        assert_eq!(record.get_text("Formation 1 Name"), Some("UMER"));
    }

    #[test]
    fn test_missing_section_scans_whole_block() {
        let block = "DSLTA 1,204 days\nUMER 1200 top\n";
        let mut record = Record::new();
        let stats = apply_group(&formation_group(true), block, &mut record);
        assert_eq!(stats.kept, 2);
        assert_eq!(record.get_text("Formation 1 Name"), Some("DSLTA"));
    }

    #[test]
    fn test_non_participating_group_uses_default() {
        let group = CompiledGroup {
            name: "pairs".into(),
            pattern: re(r"([A-Z]{2})(?:=(\d+))?;"),
            cap: 3,
            columns: vec!["Pair {n} Key".into(), "Pair {n} Value".into()],
            section_start: None,
            section_stop: None,
            default: Some("n/a".into()),
        };
        let mut record = Record::new();
        apply_group(&group, "AB=1; CD;", &mut record);
        assert_eq!(record.get_text("Pair 1 Value"), Some("1"));
        assert_eq!(record.get_text("Pair 2 Value"), Some("n/a"));
    }
}
