use regex::Regex;

/// The text of one report instance inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportBlock<'a> {
    /// Zero-based position of the block within its document.
    pub index: usize,
    pub text: &'a str,
}

/// Split aggregated document text into report blocks.
///
/// Each block runs from one anchor match up to the next (or end of text)
/// and is trimmed. Text before the first anchor is discarded; a document
/// with no anchor yields no blocks.
pub fn segment_reports<'a>(text: &'a str, anchor: &Regex) -> Vec<ReportBlock<'a>> {
    let starts: Vec<usize> = anchor.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let end = starts.get(index + 1).copied().unwrap_or(text.len());
            ReportBlock {
                index,
                text: text[start..end].trim(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Regex {
        Regex::new(r"Limited Morning Report for\s+\d{2}/\d{2}/\d{4}").unwrap()
    }

    #[test]
    fn test_single_report() {
        let text = "cover page\nLimited Morning Report for 01/03/2024\nRig  R-1\n";
        let blocks = segment_reports(text, &anchor());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.starts_with("Limited Morning Report for 01/03/2024"));
        assert!(blocks[0].text.ends_with("R-1"));
    }

    #[test]
    fn test_multi_report_in_order() {
        let text = "Limited Morning Report for 01/03/2024\nWell  A-1\n\
                    Limited Morning Report for 02/03/2024\nWell  A-2\n\
                    Limited Morning Report for 03/03/2024\nWell  A-3\n";
        let blocks = segment_reports(text, &anchor());
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].text.contains("A-1") && !blocks[0].text.contains("A-2"));
        assert!(blocks[1].text.contains("A-2") && !blocks[1].text.contains("A-3"));
        assert!(blocks[2].text.contains("A-3"));
        assert_eq!(blocks[2].index, 2);
    }

    #[test]
    fn test_no_anchor_yields_nothing() {
        let text = "Daily Drilling Report\nRig  R-1\n";
        assert!(segment_reports(text, &anchor()).is_empty());
    }

    #[test]
    fn test_anchor_without_date_is_not_a_report() {
        let text = "See Limited Morning Report for details\n";
        assert!(segment_reports(text, &anchor()).is_empty());
    }
}
