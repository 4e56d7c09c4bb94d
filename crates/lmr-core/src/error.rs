use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LmrError {
    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("page {page} is not decodable as text: {reason}")]
    UndecodableDocument { page: usize, reason: String },

    #[error("document {index} ({name}) failed: {reason}")]
    DocumentFailed {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("failed to load extraction profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid extraction profile: {0}")]
    ProfileInvalid(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
