use lmr_core::model::{BatchOutput, CellValue, Record, Table};

/// Timeline columns shown in the terminal view. The full set is in the
/// JSON output.
const TIMELINE_COLUMNS: &[&str] = &[
    "From - To",
    "Duration",
    "Phase",
    "Cat.",
    "Major OP",
    "Action",
    "Summary of Operations",
];

const SUMMARY_WIDTH: usize = 70;

pub fn print(batch: &BatchOutput) {
    if batch.well_records.is_empty() {
        println!("No reports found.");
    }

    let label_width = batch
        .well_records
        .columns()
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(10);

    for (i, well) in batch.well_records.rows.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", report_heading(well));

        for (name, value) in well.iter() {
            if is_blank(value) {
                continue;
            }
            println!("  {:<width$}  {}", name, value, width = label_width);
        }

        let entries: Vec<&Record> = timeline_for(&batch.timeline, well);
        if !entries.is_empty() {
            println!();
            print_timeline(&entries);
        }
    }

    if !batch.failures.is_empty() {
        println!();
        println!("Skipped documents:");
        for f in &batch.failures {
            println!("  #{} {}: {}", f.index + 1, f.name, f.reason);
        }
    }
}

fn report_heading(well: &Record) -> String {
    let part = |name: &str| well.get_text(name).filter(|s| !s.is_empty()).unwrap_or("?");
    format!("{} / {} / {}", part("Well Name"), part("Rig"), part("Date"))
}

fn is_blank(value: &CellValue) -> bool {
    value.is_null() || value.as_text().is_some_and(str::is_empty)
}

/// Timeline rows belonging to `well`: joined on `Report Seq` when present,
/// otherwise on the (Date, Rig, Well Name) triple.
fn timeline_for<'a>(timeline: &'a Table, well: &Record) -> Vec<&'a Record> {
    let key: &[&str] = if well.contains("Report Seq") {
        &["Report Seq"]
    } else {
        &["Date", "Rig", "Well Name"]
    };
    timeline
        .rows
        .iter()
        .filter(|row| key.iter().all(|k| row.get(k) == well.get(k)))
        .collect()
}

fn print_timeline(entries: &[&Record]) {
    let widths: Vec<usize> = TIMELINE_COLUMNS
        .iter()
        .map(|col| {
            entries
                .iter()
                .map(|row| cell(row, col).chars().count())
                .max()
                .unwrap_or(0)
                .max(col.len())
                .min(SUMMARY_WIDTH)
        })
        .collect();

    let header: Vec<String> = TIMELINE_COLUMNS
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<w$}", col, w = *w))
        .collect();
    println!("  {}", header.join("  ").trim_end());
    println!("  {}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in entries {
        let line: Vec<String> = TIMELINE_COLUMNS
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<w$}", truncate(&cell(row, col), *w), w = *w))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}

fn cell(row: &Record, column: &str) -> String {
    row.get(column).map(|v| v.to_string()).unwrap_or_default()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
