use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The report-type tag is outside the closed {IKC, AKH} enumeration.
    #[error("unknown report type: {0} (expected IKC or AKH)")]
    UnknownReportType(String),

    /// Model output did not deserialize into the selected schema.
    #[error("output does not conform to the {schema} schema: {source}")]
    SchemaValidation {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
