//! Text extraction behind a narrow trait seam.
//!
//! The actual layout analysis and decoding is delegated entirely to the
//! `pdf-extract` crate; this module only adapts it to a mockable interface
//! so the batch pipeline can be exercised without real PDFs.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Converts a document into plain text for the extraction step.
pub trait TextExtractor {
    /// Extract the full text of the document at `path`.
    ///
    /// Empty text is accepted here; a schema-validation failure downstream
    /// is the likely outcome.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// PDF text extraction via the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let text = pdf_extract::extract_text(path).map_err(|e| IngestError::TextExtraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            path = %path.display(),
            characters = text.len(),
            "text extraction completed"
        );
        Ok(text)
    }
}
