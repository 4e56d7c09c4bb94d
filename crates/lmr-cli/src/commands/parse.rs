use lmr_core::error::LmrError;
use lmr_core::extraction::pdftotext::PdftotextExtractor;
use lmr_core::extraction::{split_form_feed_pages, PdfExtractor, PdfInput};
use lmr_core::profile::builtin::default_profile;
use lmr_core::profile::{load_profile, CompiledProfile};
use lmr_core::{BatchOptions, FailurePolicy};
use std::path::PathBuf;
use tracing::debug;

use crate::output;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Sends PDFs to pdftotext and treats anything else as text that was
/// already extracted, one page per form feed.
struct FileExtractor {
    pdf: PdftotextExtractor,
}

impl PdfExtractor for FileExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<Vec<u8>>, LmrError> {
        if bytes.starts_with(PDF_MAGIC) {
            self.pdf.extract_pages(bytes)
        } else {
            Ok(split_form_feed_pages(bytes))
        }
    }

    fn backend_name(&self) -> &str {
        "pdftotext or plain text"
    }
}

pub fn run(
    input_files: Vec<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
    profile_file: Option<PathBuf>,
    fail_fast: bool,
    report_seq: bool,
) -> Result<(), LmrError> {
    let profile = match profile_file {
        Some(path) => CompiledProfile::compile(load_profile(&path)?)?,
        None => default_profile()?,
    };
    debug!(profile = %profile.def.name, version = %profile.def.version, "loaded profile");

    let mut inputs = Vec::with_capacity(input_files.len());
    for path in &input_files {
        let bytes = std::fs::read(path)?;
        inputs.push(PdfInput {
            name: Some(path.display().to_string()),
            bytes,
        });
    }

    let has_pdf = inputs.iter().any(|i| i.bytes.starts_with(PDF_MAGIC));
    if has_pdf && !PdftotextExtractor::is_available() {
        return Err(LmrError::PdftotextNotFound);
    }

    let extractor = FileExtractor {
        pdf: PdftotextExtractor::new(),
    };
    debug!(backend = extractor.backend_name(), files = inputs.len(), "extracting");

    let options = BatchOptions {
        failure_policy: if fail_fast {
            FailurePolicy::FailBatch
        } else {
            FailurePolicy::SkipDocument
        },
        report_seq,
    };
    let batch = lmr_core::parse_pdf_batch(&inputs, &extractor, &profile, &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&batch)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} report(s) with {} timeline entries, written to {}",
                batch.well_records.len(),
                batch.timeline.len(),
                path.display()
            );
            for failure in &batch.failures {
                eprintln!("  skipped {}: {}", failure.name, failure.reason);
            }
        }
        None => match output_format {
            "json" => output::json::print(&batch)?,
            _ => output::table::print(&batch),
        },
    }

    Ok(())
}
