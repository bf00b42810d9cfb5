pub mod discovery;
pub mod error;
pub mod text;

pub use discovery::{detect_report_type, list_pdf_files, validate_pdf_file};
pub use error::{IngestError, Result};
pub use text::{PdfTextExtractor, TextExtractor};
