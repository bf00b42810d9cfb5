//! Fixed section layout of the AKH hematology/hemostasis panel.
//!
//! Unlike the IKC panel, AKH groups its sections one level deeper: the two
//! top-level examinations each hold named sub-sections.

use serde::{Deserialize, Serialize};

use crate::report::{Analyte, ReportHeader};

/// "Blutstatus"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodStatus {
    pub caption: String,
    pub hemoglobin: Analyte,
    pub hematocrit: Analyte,
    pub erythrocytes: Analyte,
    pub mcv: Analyte,
    pub mch: Analyte,
    pub mchc: Analyte,
    pub rdw: Analyte,
    pub platelets: Analyte,
    pub leukocytes: Analyte,
}

/// "Blutbild automatisch absolut"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodCountAbsolute {
    pub caption: String,
    pub neutrophils: Analyte,
    pub monocytes: Analyte,
    pub eosinophils: Analyte,
    pub basophils: Analyte,
    pub lymphocytes: Analyte,
    pub immature_granulocytes: Analyte,
    pub nrbc_abs: Analyte,
}

/// "Blutbild automatisch relativ"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodCountRelative {
    pub caption: String,
    pub neutrophils: Analyte,
    pub monocytes: Analyte,
    pub eosinophils: Analyte,
    pub basophils: Analyte,
    pub lymphocytes: Analyte,
    pub immature_granulocytes: Analyte,
    pub nrbc: Analyte,
}

/// "Hämatologische Untersuchungen"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HematologicalExaminations {
    pub caption: String,
    pub blood_status: BloodStatus,
    pub blood_count_absolute: BloodCountAbsolute,
    pub blood_count_relative: BloodCountRelative,
}

/// "Gerinnungsfaktoren"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoagulationFactors {
    pub caption: String,
    pub fibrinogen: Analyte,
}

/// "Hämostase Untersuchungen"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HemostasisExaminations {
    pub caption: String,
    pub coagulation_factors: CoagulationFactors,
}

/// The full fixed section set of an AKH report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AkhLabResult {
    pub hematological_examinations: HematologicalExaminations,
    pub hemostasis_examinations: HemostasisExaminations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AkhReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub lab_result: AkhLabResult,
}
