pub mod pdftotext;

use crate::error::LmrError;

/// A binary document awaiting text extraction.
#[derive(Debug, Clone)]
pub struct PdfInput {
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Trait for page-text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract raw page text from document bytes, one entry per page, in
    /// page order. Bytes are decoded by the core, not by the backend.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>, LmrError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Decode one page of extracted text.
///
/// Invalid UTF-8 and embedded NUL bytes both mean the page is not text.
pub fn decode_page(page_number: usize, bytes: &[u8]) -> Result<String, LmrError> {
    let text = std::str::from_utf8(bytes).map_err(|e| LmrError::UndecodableDocument {
        page: page_number,
        reason: e.to_string(),
    })?;
    if let Some(offset) = text.find('\0') {
        return Err(LmrError::UndecodableDocument {
            page: page_number,
            reason: format!("binary content (NUL byte at offset {offset})"),
        });
    }
    Ok(text.to_string())
}

/// Split text that uses form feed as the page separator, the way
/// pdftotext writes it. A trailing empty page is dropped.
pub fn split_form_feed_pages(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut pages: Vec<Vec<u8>> = bytes.split(|b| *b == 0x0c).map(|p| p.to_vec()).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.iter().all(u8::is_ascii_whitespace)) {
        pages.pop();
    }
    pages
}
