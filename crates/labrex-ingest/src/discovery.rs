//! PDF discovery and report-type detection.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use labrex_model::ReportType;

use crate::error::{IngestError, Result};

/// Lists all PDF files in a directory.
///
/// Returns regular files with a `.pdf` extension (case-insensitive), sorted
/// by filename so batches process in a stable order.
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Infers the report type from a filename.
///
/// Searches case-insensitively for the `IKC_` / `AKH_` tag substrings used
/// by the lab's export naming convention. Returns `None` when neither tag is
/// found; the fallback policy (default vs. fail) is the caller's decision.
pub fn detect_report_type(file_name: &str) -> Option<ReportType> {
    let upper = file_name.to_uppercase();
    if upper.contains("IKC_") {
        Some(ReportType::Ikc)
    } else if upper.contains("AKH_") {
        Some(ReportType::Akh)
    } else {
        None
    }
}

/// Checks that a path points at a readable, plausible PDF.
///
/// Rejects missing paths, directories, wrong extensions, empty files, and
/// files that do not start with the `%PDF-` magic bytes.
pub fn validate_pdf_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(IngestError::NotAPdf {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|e| IngestError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let mut header = [0u8; 5];
    let mut file = File::open(path).map_err(|e| IngestError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.read_exact(&mut header).map_err(|e| IngestError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    if &header != b"%PDF-" {
        return Err(IngestError::InvalidPdfHeader {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
