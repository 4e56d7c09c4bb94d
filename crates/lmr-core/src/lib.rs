pub mod assemble;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;

use error::LmrError;
use extraction::{decode_page, PdfExtractor, PdfInput};
use model::{BatchOutput, DocumentFailure, RawDocument};
use parsing::{aggregate_pages, parse_document, ParsedReport};
use profile::CompiledProfile;
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to do when a document in a batch cannot be turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the document out and record it in [`BatchOutput::failures`].
    #[default]
    SkipDocument,
    /// Abort the whole batch on the first failing document.
    FailBatch,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub failure_policy: FailurePolicy,
    /// Add a batch-wide `Report Seq` column to both tables.
    pub report_seq: bool,
}

/// Main API entry point: extract both tables from a batch of documents.
///
/// Documents are processed independently; output order is submission
/// order, then report order within each document.
pub fn parse_batch(
    documents: &[RawDocument],
    profile: &CompiledProfile,
    options: &BatchOptions,
) -> Result<BatchOutput, LmrError> {
    let outcomes = process_all(documents, |doc| parse_raw_document(doc, profile));
    let names = documents
        .iter()
        .enumerate()
        .map(|(i, d)| d.display_name(i))
        .collect();
    collect_batch(outcomes, names, options)
}

/// Like [`parse_batch`], but runs page-text extraction first. A document
/// the extractor cannot read is a document failure.
pub fn parse_pdf_batch(
    inputs: &[PdfInput],
    extractor: &dyn PdfExtractor,
    profile: &CompiledProfile,
    options: &BatchOptions,
) -> Result<BatchOutput, LmrError> {
    let outcomes = process_all(inputs, |input| {
        let pages = extractor.extract_pages(&input.bytes)?;
        parse_raw_document(&RawDocument::new(input.name.clone(), pages), profile)
    });
    let names = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            input
                .name
                .clone()
                .unwrap_or_else(|| format!("document #{}", i + 1))
        })
        .collect();
    collect_batch(outcomes, names, options)
}

/// Decode, aggregate and parse a single document.
pub fn parse_raw_document(
    document: &RawDocument,
    profile: &CompiledProfile,
) -> Result<Vec<ParsedReport>, LmrError> {
    let pages = document
        .pages
        .iter()
        .enumerate()
        .map(|(i, bytes)| decode_page(i + 1, bytes))
        .collect::<Result<Vec<_>, _>>()?;
    let text = aggregate_pages(&pages);
    Ok(parse_document(&text, profile))
}

#[cfg(feature = "parallel")]
fn process_all<T, F>(items: &[T], f: F) -> Vec<Result<Vec<ParsedReport>, LmrError>>
where
    T: Sync,
    F: Fn(&T) -> Result<Vec<ParsedReport>, LmrError> + Sync + Send,
{
    // Indexed collect keeps submission order regardless of completion order.
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn process_all<T, F>(items: &[T], f: F) -> Vec<Result<Vec<ParsedReport>, LmrError>>
where
    F: Fn(&T) -> Result<Vec<ParsedReport>, LmrError>,
{
    items.iter().map(f).collect()
}

fn collect_batch(
    outcomes: Vec<Result<Vec<ParsedReport>, LmrError>>,
    names: Vec<String>,
    options: &BatchOptions,
) -> Result<BatchOutput, LmrError> {
    let document_count = outcomes.len();
    let mut documents = Vec::with_capacity(document_count);
    let mut failures = Vec::new();

    for (index, (outcome, name)) in outcomes.into_iter().zip(names).enumerate() {
        match outcome {
            Ok(reports) => documents.push(reports),
            Err(e) => match options.failure_policy {
                FailurePolicy::FailBatch => {
                    return Err(LmrError::DocumentFailed {
                        index,
                        name,
                        reason: e.to_string(),
                    });
                }
                FailurePolicy::SkipDocument => {
                    warn!(index, name = %name, error = %e, "skipping document");
                    failures.push(DocumentFailure {
                        index,
                        name,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    let (well_records, timeline) = assemble::assemble_tables(documents, options.report_seq);
    info!(
        documents = document_count,
        skipped = failures.len(),
        reports = well_records.len(),
        entries = timeline.len(),
        "batch parsed"
    );

    Ok(BatchOutput {
        well_records,
        timeline,
        failures,
    })
}
