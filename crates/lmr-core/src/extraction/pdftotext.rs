use crate::error::LmrError;
use crate::extraction::{split_form_feed_pages, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// Extraction backend using pdftotext (from poppler-utils).
///
/// Runs in raw reading order, which keeps each label next to its value.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>, LmrError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| LmrError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| LmrError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-raw")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LmrError::PdftotextNotFound
                } else {
                    LmrError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(LmrError::PdftotextFailed { code, stderr });
        }

        Ok(split_form_feed_pages(&output.stdout))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
