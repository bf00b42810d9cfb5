use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not a file: {path}")]
    NotAFile { path: PathBuf },

    #[error("input is not a PDF: {path}")]
    NotAPdf { path: PathBuf },

    #[error("PDF file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("file does not start with a PDF header: {path}")]
    InvalidPdfHeader { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text extraction failed for {path}: {message}")]
    TextExtraction { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
