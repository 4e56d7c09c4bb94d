use crate::model::{CellValue, Record, Table};
use crate::parsing::normalize::escape_formula;
use crate::parsing::ParsedReport;

pub const REPORT_SEQ_COLUMN: &str = "Report Seq";

/// Merge per-document reports into the well and timeline tables.
///
/// `documents` must already be in submission order; blocks keep their
/// in-document order. Every string cell of both tables is escaped once.
pub fn assemble_tables(documents: Vec<Vec<ParsedReport>>, report_seq: bool) -> (Table, Table) {
    let mut well_records = Table::default();
    let mut timeline = Table::default();

    for (seq, report) in documents.into_iter().flatten().enumerate() {
        let seq = seq as i64 + 1;

        let mut well = report.well;
        if report_seq {
            well.prepend(REPORT_SEQ_COLUMN, CellValue::Integer(seq));
        }
        escape_record(&mut well);
        well_records.rows.push(well);

        for entry in &report.timeline {
            let mut row = entry.to_record();
            if report_seq {
                row.prepend(REPORT_SEQ_COLUMN, CellValue::Integer(seq));
            }
            escape_record(&mut row);
            timeline.rows.push(row);
        }
    }

    (well_records, timeline)
}

/// Escape every text cell of a record that would be read as a formula.
/// Returns the number of cells changed.
pub fn escape_record(record: &mut Record) -> usize {
    let mut changed = 0;
    for value in record.values_mut() {
        if let CellValue::Text(s) = value {
            if let Some(escaped) = escape_formula(s) {
                *s = escaped;
                changed += 1;
            }
        }
    }
    changed
}
