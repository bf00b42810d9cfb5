//! Closed enumerations for report classification.
//!
//! Report-type tags identify which fixed lab-panel schema applies to a
//! document. The set is closed: anything outside {IKC, AKH} is an error at
//! this layer, and fallback policy belongs to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Report-type tag for the two fixed lab-panel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Institut für Klinische Chemie panel.
    #[serde(rename = "IKC")]
    Ikc,
    /// AKH hematology/hemostasis panel.
    #[serde(rename = "AKH")]
    Akh,
}

impl ReportType {
    /// Returns the canonical tag as it appears in filenames and documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Ikc => "IKC",
            ReportType::Akh => "AKH",
        }
    }

    /// All known report types, in registry order.
    pub fn all() -> &'static [ReportType] {
        &[ReportType::Ikc, ReportType::Akh]
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ModelError;

    /// Parse a report-type tag (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IKC" => Ok(ReportType::Ikc),
            "AKH" => Ok(ReportType::Akh),
            _ => Err(ModelError::UnknownReportType(s.to_string())),
        }
    }
}

/// Patient gender as printed on the reports: (M) or (W).
///
/// Kept as a closed enum so a value outside the domain is a deserialization
/// failure rather than a silently accepted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    W,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::W => "W",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_from_str() {
        assert_eq!("IKC".parse::<ReportType>().unwrap(), ReportType::Ikc);
        assert_eq!("akh".parse::<ReportType>().unwrap(), ReportType::Akh);
        assert_eq!(" Ikc ".parse::<ReportType>().unwrap(), ReportType::Ikc);
    }

    #[test]
    fn report_type_unknown_is_error() {
        let err = "XYZ".parse::<ReportType>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownReportType(tag) if tag == "XYZ"));
    }

    #[test]
    fn gender_domain_is_closed() {
        let m: Gender = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(m, Gender::M);
        let w: Gender = serde_json::from_str("\"W\"").unwrap();
        assert_eq!(w, Gender::W);
        assert!(serde_json::from_str::<Gender>("\"X\"").is_err());
        assert!(serde_json::from_str::<Gender>("\"m\"").is_err());
    }
}
