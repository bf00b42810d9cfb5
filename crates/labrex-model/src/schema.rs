//! Report schema registry.
//!
//! Maps a report-type tag to the structural contract the extraction backend
//! must honor: a JSON-Schema document handed to the model as its
//! `response_format`, and a typed decode of the returned content. Decoding is
//! the validation gate; no further semantic checks (e.g. parsing reference
//! ranges) happen here.

use serde_json::{Value, json};

use crate::enums::ReportType;
use crate::error::{ModelError, Result};
use crate::report::LabReport;

/// Schema handle consumed by the extraction dispatcher.
///
/// `Generic` is the dynamic-sections fallback and is only ever selected
/// explicitly; filename detection resolves to the two fixed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSchema {
    Ikc,
    Akh,
    Generic,
}

impl From<ReportType> for ReportSchema {
    fn from(report_type: ReportType) -> Self {
        match report_type {
            ReportType::Ikc => ReportSchema::Ikc,
            ReportType::Akh => ReportSchema::Akh,
        }
    }
}

impl ReportSchema {
    /// Identifier used as the `json_schema.name` of the chat request.
    pub fn name(&self) -> &'static str {
        match self {
            ReportSchema::Ikc => "ikc_lab_report",
            ReportSchema::Akh => "akh_lab_report",
            ReportSchema::Generic => "generic_lab_report",
        }
    }

    /// Short label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ReportSchema::Ikc => "IKC",
            ReportSchema::Akh => "AKH",
            ReportSchema::Generic => "GENERIC",
        }
    }

    /// The JSON-Schema document describing this report shape.
    pub fn json_schema(&self) -> Value {
        match self {
            ReportSchema::Ikc => report_schema("lab_result", ikc_lab_result()),
            ReportSchema::Akh => report_schema("lab_result", akh_lab_result()),
            ReportSchema::Generic => report_schema("sections", generic_sections()),
        }
    }

    /// Deserialize model output into the matching report variant.
    ///
    /// A failure here means the generation did not conform to the schema and
    /// counts against the dispatcher's attempt budget.
    pub fn decode(&self, content: &str) -> Result<LabReport> {
        let decoded = match self {
            ReportSchema::Ikc => serde_json::from_str(content).map(LabReport::Ikc),
            ReportSchema::Akh => serde_json::from_str(content).map(LabReport::Akh),
            ReportSchema::Generic => serde_json::from_str(content).map(LabReport::Simple),
        };
        decoded.map_err(|source| ModelError::SchemaValidation {
            schema: self.name(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Schema composition helpers
// ---------------------------------------------------------------------------

fn string() -> Value {
    json!({"type": "string"})
}

fn nullable_string() -> Value {
    json!({"type": ["string", "null"]})
}

/// Object schema requiring exactly the listed keys, rejecting extras.
fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let props: serde_json::Map<String, Value> = properties
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": Value::Object(props),
        "required": required,
    })
}

fn analyte(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": false,
        "properties": {
            "caption": {"type": "string"},
            "result": {"type": "string"},
            "unit": {"type": "string"},
            "reference": {"type": "string"},
            "comments": {"type": ["string", "null"]},
            "out_of_range": {"type": ["boolean", "null"]},
        },
        "required": ["caption", "result", "unit", "reference"],
    })
}

fn nullable_analyte(description: &str) -> Value {
    json!({"anyOf": [analyte(description), {"type": "null"}]})
}

/// A fixed section: the printed caption plus named analyte fields.
fn section(caption: &str, analytes: &[(&str, &str)]) -> Value {
    section_with_optional(caption, analytes, &[])
}

fn section_with_optional(
    caption: &str,
    analytes: &[(&str, &str)],
    optional: &[(&str, &str)],
) -> Value {
    let mut properties = vec![(
        "caption",
        json!({"type": "string", "description": caption}),
    )];
    let mut required = vec!["caption"];
    for &(key, description) in analytes {
        properties.push((key, analyte(description)));
        required.push(key);
    }
    for &(key, description) in optional {
        properties.push((key, nullable_analyte(description)));
    }
    object(properties, &required)
}

/// A grouping node whose members are sub-sections (AKH nests one level).
fn group(caption: &str, members: Vec<(&str, Value)>) -> Value {
    let mut properties = vec![(
        "caption",
        json!({"type": "string", "description": caption}),
    )];
    let mut required = vec!["caption"];
    for (key, value) in members {
        required.push(key);
        properties.push((key, value));
    }
    object(properties, &required)
}

/// Composite node without a caption of its own (the `lab_result` roots).
fn composite(members: Vec<(&str, Value)>) -> Value {
    let required: Vec<&str> = members.iter().map(|(key, _)| *key).collect();
    object(members, &required)
}

/// Report envelope: identifying header fields plus the panel under
/// `result_key`. Header requirements match the source schemas: `daily_id`,
/// `date`, and `time` are required-but-nullable; `gender` and `birth_year`
/// are optional.
fn report_schema(result_key: &str, result: Value) -> Value {
    object(
        vec![
            ("report_id", string()),
            ("project", string()),
            ("patient_id", string()),
            (
                "gender",
                json!({
                    "type": ["string", "null"],
                    "enum": ["M", "W", null],
                    "description": "Patient gender as printed: (M) or (W)",
                }),
            ),
            ("birth_year", nullable_string()),
            ("daily_id", nullable_string()),
            ("date", nullable_string()),
            ("time", nullable_string()),
            (result_key, result),
        ],
        &[
            "report_id",
            "project",
            "patient_id",
            "daily_id",
            "date",
            "time",
            result_key,
        ],
    )
}

fn ikc_lab_result() -> Value {
    composite(vec![
        (
            "electrolyte_and_water_balance",
            section(
                "Elektrolyt- und Wasserhaushalt",
                &[
                    ("sodium", "Sodium"),
                    ("potassium", "Potassium"),
                    ("total_calcium", "Total Calcium"),
                    ("albumin_corrected_calcium", "Albumin-Corrected Calcium"),
                    ("phosphate", "Phosphate"),
                ],
            ),
        ),
        (
            "kidney",
            section(
                "Niere",
                &[
                    ("urea", "Urea"),
                    ("creatinine", "Creatinine"),
                    ("egfr_crea_ckd_epi_2009", "eGFR (CKD-EPI 2009)"),
                    ("uric_acid", "Uric Acid"),
                ],
            ),
        ),
        (
            "amino_acid_bilirubin_and_heme_metabolism",
            section(
                "Aminosäure-, Bili.- und Hämstoffwechsel",
                &[("bilirubin_total", "Bilirubin, total")],
            ),
        ),
        (
            "proteins",
            section("Proteine", &[("protein", "Protein"), ("albumin", "Albumin")]),
        ),
        (
            "enzymes",
            section(
                "Enzyme",
                &[
                    ("ast_got", "AST (GOT) Aspartate Aminotransferase"),
                    ("ggt", "GGT (Gamma-Glutamyltransferase)"),
                    ("alkaline_phosphatase", "Alkaline Phosphatase"),
                ],
            ),
        ),
        (
            "inflammation",
            section("Entzündung", &[("crp", "CRP (C-Reactive Protein)")]),
        ),
        (
            "heart_and_muscle",
            section(
                "Herz und Muskel",
                &[
                    ("ck_total", "CK, total"),
                    ("troponin_t_hs", "Troponin T, High Sensitive"),
                    ("nt_pro_bnp", "NT-proBNP (Roche)"),
                ],
            ),
        ),
        (
            "diabetes_and_energy_metabolism",
            section(
                "Diabetes und Energiestoffwechsel",
                &[
                    ("glucose_hep_plasma", "Glucose, Hepatic Plasma"),
                    ("hba1c_ngsp", "HbA1c (NGSP)"),
                    ("hba1c_ifcc", "HbA1c (IFCC)"),
                ],
            ),
        ),
        (
            "lipid_and_arteriosclerosis",
            section(
                "Lipidstoffwechsel und Arteriosklerose",
                &[
                    ("total_cholesterol", "Total Cholesterol"),
                    ("hdl_cholesterol", "HDL-Cholesterol"),
                    ("non_hdl_cholesterol", "non-HDL Cholesterol"),
                    ("ldl_cholesterol_sampson", "LDL-Cholesterol (Sampson)"),
                    ("triglycerides", "Triglycerides"),
                    ("lipoprotein_a", "Lipoprotein (a) (Roche)"),
                    ("apolipoprotein_a1", "Apolipoprotein A1"),
                    ("apolipoprotein_b", "Apolipoprotein B"),
                ],
            ),
        ),
        (
            "iron_metabolism",
            section(
                "Eisenstoffwechsel",
                &[
                    ("iron", "Iron"),
                    ("ferritin_eclia", "Ferritin (ECLIA)"),
                    ("ferritin_risk_eclia", "Ferritin (Risk) (ECLIA)"),
                    ("transferrin", "Transferrin"),
                ],
            ),
        ),
        (
            "vitamins",
            section(
                "Vitamine",
                &[
                    ("folic_acid", "Folic Acid"),
                    ("vitamin_b12", "Vitamin B12"),
                    ("hydroxyvitamin_d", "25-Hydroxy-Vitamin D (Roche)"),
                ],
            ),
        ),
        (
            "thyroid_function",
            section(
                "Schilddrüsenfunktion",
                &[
                    ("tsh_basal_ft4", "TSH, basal FT4 (free)"),
                    ("ft3_free", "FT3 (free)"),
                    ("ft4_free", "FT4 (free)"),
                ],
            ),
        ),
        (
            "sexual_hormones",
            section_with_optional(
                "Sexualhormone",
                &[("testosterone", "Testosterone"), ("estradiol", "Estradiol")],
                &[
                    ("lh", "LH"),
                    ("fsh", "FSH"),
                    ("progesterone", "Progesterone"),
                ],
            ),
        ),
    ])
}

fn akh_lab_result() -> Value {
    composite(vec![
        (
            "hematological_examinations",
            group(
                "Hämatologische Untersuchungen",
                vec![
                    (
                        "blood_status",
                        section(
                            "Blutstatus",
                            &[
                                ("hemoglobin", "Hämoglobin"),
                                ("hematocrit", "Hämatokrit"),
                                ("erythrocytes", "Erythrozyten"),
                                ("mcv", "MCV"),
                                ("mch", "MCH"),
                                ("mchc", "MCHC"),
                                ("rdw", "RDW"),
                                ("platelets", "Thrombozyten"),
                                ("leukocytes", "Leukozyten"),
                            ],
                        ),
                    ),
                    (
                        "blood_count_absolute",
                        section(
                            "Blutbild automatisch absolut",
                            &[
                                ("neutrophils", "Neutrophile"),
                                ("monocytes", "Monozyten"),
                                ("eosinophils", "Eosinophile"),
                                ("basophils", "Basophile"),
                                ("lymphocytes", "Lymphozyten"),
                                ("immature_granulocytes", "Immature Granulocytes"),
                                ("nrbc_abs", "NRBC abs."),
                            ],
                        ),
                    ),
                    (
                        "blood_count_relative",
                        section(
                            "Blutbild automatisch relativ",
                            &[
                                ("neutrophils", "Neutrophile"),
                                ("monocytes", "Monozyten"),
                                ("eosinophils", "Eosinophile"),
                                ("basophils", "Basophile"),
                                ("lymphocytes", "Lymphozyten"),
                                ("immature_granulocytes", "Immature Granulocytes"),
                                ("nrbc", "NRBC"),
                            ],
                        ),
                    ),
                ],
            ),
        ),
        (
            "hemostasis_examinations",
            group(
                "Hämostase Untersuchungen",
                vec![(
                    "coagulation_factors",
                    section("Gerinnungsfaktoren", &[("fibrinogen", "Fibrinogen (fkt.)")]),
                )],
            ),
        ),
    ])
}

fn generic_sections() -> Value {
    json!({
        "type": "array",
        "description": "All sections present in the document, in order",
        "items": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "section_name": {"type": "string"},
                "data": {
                    "type": "array",
                    "items": analyte("A single measured value"),
                },
            },
            "required": ["section_name", "data"],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn required_set(schema: &Value) -> BTreeSet<String> {
        schema["required"]
            .as_array()
            .expect("required array")
            .iter()
            .map(|v| v.as_str().expect("string").to_string())
            .collect()
    }

    #[test]
    fn fixed_schemas_require_exact_top_level_fields() {
        for report_type in ReportType::all() {
            let schema = ReportSchema::from(*report_type).json_schema();
            let required = required_set(&schema);
            let expected: BTreeSet<String> = [
                "report_id",
                "project",
                "patient_id",
                "daily_id",
                "date",
                "time",
                "lab_result",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
            assert_eq!(required, expected, "{report_type}");

            let properties = schema["properties"].as_object().expect("properties");
            assert!(properties.contains_key("gender"));
            assert!(properties.contains_key("birth_year"));
            assert!(!required.contains("gender"));
            assert!(!required.contains("birth_year"));
        }
    }

    #[test]
    fn generic_schema_uses_dynamic_sections() {
        let schema = ReportSchema::Generic.json_schema();
        let required = required_set(&schema);
        assert!(required.contains("sections"));
        assert!(!required.contains("lab_result"));
        assert_eq!(schema["properties"]["sections"]["type"], "array");
    }

    #[test]
    fn ikc_schema_names_every_section() {
        let schema = ReportSchema::Ikc.json_schema();
        let sections = schema["properties"]["lab_result"]["properties"]
            .as_object()
            .expect("sections");
        assert_eq!(sections.len(), 13);
        assert!(sections.contains_key("electrolyte_and_water_balance"));
        assert!(sections.contains_key("sexual_hormones"));
        // Female-specific hormones are present but not required.
        let hormones = &sections["sexual_hormones"];
        let required = required_set(hormones);
        assert!(required.contains("testosterone"));
        assert!(!required.contains("lh"));
        assert!(!required.contains("progesterone"));
    }

    #[test]
    fn akh_schema_nests_examination_groups() {
        let schema = ReportSchema::Akh.json_schema();
        let hematology = &schema["properties"]["lab_result"]["properties"]
            ["hematological_examinations"]["properties"];
        let groups = hematology.as_object().expect("hematology groups");
        assert!(groups.contains_key("blood_status"));
        assert!(groups.contains_key("blood_count_absolute"));
        assert!(groups.contains_key("blood_count_relative"));
    }

    #[test]
    fn decode_rejects_non_conforming_output() {
        let err = ReportSchema::Ikc.decode("{\"report_id\": \"R1\"}").unwrap_err();
        assert!(matches!(
            err,
            ModelError::SchemaValidation { schema: "ikc_lab_report", .. }
        ));
    }

    #[test]
    fn decode_generic_report() {
        let content = r#"{
            "report_id": "R-1",
            "project": "P-1",
            "patient_id": "PAT-1",
            "daily_id": null,
            "date": "01.02.24",
            "time": "08:15",
            "sections": [
                {
                    "section_name": "Elektrolyt- und Wasserhaushalt",
                    "data": [
                        {
                            "caption": "Sodium",
                            "result": "140",
                            "unit": "mmol/L",
                            "reference": "135 - 145"
                        }
                    ]
                }
            ]
        }"#;
        let report = ReportSchema::Generic.decode(content).expect("decode");
        let LabReport::Simple(simple) = report else {
            panic!("expected generic report");
        };
        assert_eq!(simple.sections.len(), 1);
        assert_eq!(simple.sections[0].data[0].result, "140");
        assert_eq!(simple.header.gender, None);
    }
}
