//! Fixed section layout of the IKC clinical-chemistry panel.
//!
//! The panel composition is known in advance, so each section is a record
//! with named analyte fields rather than a dynamic list. German captions
//! follow the printed report headings.

use serde::{Deserialize, Serialize};

use crate::report::{Analyte, ReportHeader};

/// "Elektrolyt- und Wasserhaushalt"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectrolyteAndWaterBalance {
    pub caption: String,
    pub sodium: Analyte,
    pub potassium: Analyte,
    pub total_calcium: Analyte,
    pub albumin_corrected_calcium: Analyte,
    pub phosphate: Analyte,
}

/// "Niere"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kidney {
    pub caption: String,
    pub urea: Analyte,
    pub creatinine: Analyte,
    pub egfr_crea_ckd_epi_2009: Analyte,
    pub uric_acid: Analyte,
}

/// "Aminosäure-, Bili.- und Hämstoffwechsel"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AminoAcidBilirubinAndHemeMetabolism {
    pub caption: String,
    pub bilirubin_total: Analyte,
}

/// "Proteine"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proteins {
    pub caption: String,
    pub protein: Analyte,
    pub albumin: Analyte,
}

/// "Enzyme"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enzymes {
    pub caption: String,
    pub ast_got: Analyte,
    pub ggt: Analyte,
    pub alkaline_phosphatase: Analyte,
}

/// "Entzündung"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inflammation {
    pub caption: String,
    pub crp: Analyte,
}

/// "Herz und Muskel"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartAndMuscle {
    pub caption: String,
    pub ck_total: Analyte,
    pub troponin_t_hs: Analyte,
    pub nt_pro_bnp: Analyte,
}

/// "Diabetes und Energiestoffwechsel"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiabetesAndEnergyMetabolism {
    pub caption: String,
    pub glucose_hep_plasma: Analyte,
    pub hba1c_ngsp: Analyte,
    pub hba1c_ifcc: Analyte,
}

/// "Lipidstoffwechsel und Arteriosklerose"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LipidAndArteriosclerosis {
    pub caption: String,
    pub total_cholesterol: Analyte,
    pub hdl_cholesterol: Analyte,
    pub non_hdl_cholesterol: Analyte,
    pub ldl_cholesterol_sampson: Analyte,
    pub triglycerides: Analyte,
    pub lipoprotein_a: Analyte,
    pub apolipoprotein_a1: Analyte,
    pub apolipoprotein_b: Analyte,
}

/// "Eisenstoffwechsel"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IronMetabolism {
    pub caption: String,
    pub iron: Analyte,
    pub ferritin_eclia: Analyte,
    pub ferritin_risk_eclia: Analyte,
    pub transferrin: Analyte,
}

/// "Vitamine"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitamins {
    pub caption: String,
    pub folic_acid: Analyte,
    pub vitamin_b12: Analyte,
    pub hydroxyvitamin_d: Analyte,
}

/// "Schilddrüsenfunktion"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThyroidFunction {
    pub caption: String,
    pub tsh_basal_ft4: Analyte,
    pub ft3_free: Analyte,
    pub ft4_free: Analyte,
}

/// "Sexualhormone"
///
/// LH, FSH, and progesterone appear only on reports for female patients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexualHormones {
    pub caption: String,
    pub testosterone: Analyte,
    pub estradiol: Analyte,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lh: Option<Analyte>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fsh: Option<Analyte>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progesterone: Option<Analyte>,
}

/// The full fixed section set of an IKC report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IkcLabResult {
    pub electrolyte_and_water_balance: ElectrolyteAndWaterBalance,
    pub kidney: Kidney,
    pub amino_acid_bilirubin_and_heme_metabolism: AminoAcidBilirubinAndHemeMetabolism,
    pub proteins: Proteins,
    pub enzymes: Enzymes,
    pub inflammation: Inflammation,
    pub heart_and_muscle: HeartAndMuscle,
    pub diabetes_and_energy_metabolism: DiabetesAndEnergyMetabolism,
    pub lipid_and_arteriosclerosis: LipidAndArteriosclerosis,
    pub iron_metabolism: IronMetabolism,
    pub vitamins: Vitamins,
    pub thyroid_function: ThyroidFunction,
    pub sexual_hormones: SexualHormones,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IkcReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub lab_result: IkcLabResult,
}
