//! Shared report record types.
//!
//! `result` and `reference` stay opaque strings: source reports mix numeric
//! and symbolic notations (asterisks for abnormal values, thresholds like
//! "< 0.5") that the extraction step, not this layer, must normalize.

use serde::{Deserialize, Serialize};

use crate::akh::AkhReport;
use crate::enums::Gender;
use crate::ikc::IkcReport;

/// A single measured substance/value in a lab report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyte {
    /// Display name as printed on the report.
    pub caption: String,
    /// Raw result text; may carry an out-of-range marker.
    pub result: String,
    pub unit: String,
    /// Reference interval or threshold, e.g. "202.3 - 416.5" or "< 0.5".
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_range: Option<bool>,
}

/// Identifying fields common to every report variant.
///
/// `daily_id`, `date`, and `time` are required-but-nullable in the generated
/// JSON Schema: the keys appear in extracted output even when the document
/// lacks the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub report_id: String,
    pub project: String,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<String>,
    pub daily_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A named grouping of analytes in the generic report form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_name: String,
    pub data: Vec<Analyte>,
}

/// Generic report with a dynamic section list.
///
/// Fallback for documents whose panel composition is not known in advance;
/// the fixed IKC/AKH forms are preferred when the report type is recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub sections: Vec<Section>,
}

/// A fully extracted report in one of the three supported shapes.
///
/// Serializes as the inner record: an output file carries exactly one shape,
/// chosen by the schema selected at extraction time, so no discriminator is
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabReport {
    Ikc(IkcReport),
    Akh(AkhReport),
    Simple(SimpleReport),
}

impl LabReport {
    /// Identifying header fields, independent of the panel shape.
    pub fn header(&self) -> &ReportHeader {
        match self {
            LabReport::Ikc(report) => &report.header,
            LabReport::Akh(report) => &report.header,
            LabReport::Simple(report) => &report.header,
        }
    }
}
