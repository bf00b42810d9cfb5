//! Batch pipeline tests with stubbed text extraction and completion backend.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use labrex_cli::pipeline::{
    BatchContext, UnknownTypePolicy, resolve_connection_with_env, run_batch,
};
use labrex_cli::types::FileStatus;
use labrex_extract::{
    ChatCompletion, ChatRequest, CompletionBackend, Dispatcher, ExtractOptions,
};
use labrex_ingest::{IngestError, TextExtractor};
use labrex_model::ReportSchema;
use tempfile::TempDir;

struct StubExtractor {
    fail_on: Option<String>,
}

impl TextExtractor for StubExtractor {
    fn extract_text(&self, path: &Path) -> labrex_ingest::Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(IngestError::TextExtraction {
                path: path.to_path_buf(),
                message: "damaged xref table".to_string(),
            });
        }
        Ok(format!("Laboratory report text for {name}"))
    }
}

struct StubBackend {
    replies: RefCell<VecDeque<String>>,
}

impl StubBackend {
    fn new(replies: Vec<String>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
        }
    }
}

impl CompletionBackend for StubBackend {
    fn complete(&self, _request: &ChatRequest) -> labrex_extract::Result<ChatCompletion> {
        let content = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| "{}".to_string());
        Ok(ChatCompletion {
            content,
            usage: None,
        })
    }
}

fn generic_report_json(patient_id: &str) -> String {
    serde_json::json!({
        "report_id": "R-001",
        "project": "ZD",
        "patient_id": patient_id,
        "daily_id": null,
        "date": "10.03.2024",
        "time": "08:15",
        "sections": [
            {
                "section_name": "Electrolytes",
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
    })
    .to_string()
}

fn touch_pdf(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"%PDF-1.4 stub").unwrap();
    path
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[test]
fn batch_continues_past_failures_and_writes_one_json_per_success() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let files = vec![
        touch_pdf(input.path(), "IKC_1001.pdf"),
        touch_pdf(input.path(), "IKC_1002.pdf"),
        touch_pdf(input.path(), "IKC_1003.pdf"),
    ];

    let backend = StubBackend::new(vec![
        generic_report_json("P-1001"),
        generic_report_json("P-1003"),
    ]);
    let dispatcher = Dispatcher::new(backend, ExtractOptions::new("test-model")).unwrap();
    let extractor = StubExtractor {
        fail_on: Some("IKC_1002.pdf".to_string()),
    };
    let ctx = BatchContext {
        dispatcher: &dispatcher,
        extractor: &extractor,
        output_dir: output.path(),
        forced_schema: Some(ReportSchema::Generic),
        unknown_type: UnknownTypePolicy::DefaultIkc,
        save_txt: false,
    };

    let result = run_batch(&files, &ctx);

    assert_eq!(result.succeeded(), 2);
    assert_eq!(result.failed(), 1);
    assert!(matches!(
        result.outcomes[1].status,
        FileStatus::Failed { .. }
    ));
    if let FileStatus::Failed { message } = &result.outcomes[1].status {
        assert!(message.contains("damaged xref table"), "{message}");
    }

    let written = json_files(output.path());
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("IKC_1001.json"));
    assert!(written[1].ends_with("IKC_1003.json"));

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(record["patient_id"], "P-1001");
    assert_eq!(record["sections"][0]["data"][0]["result"], "140");
}

#[test]
fn save_txt_writes_intermediate_text() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let files = vec![touch_pdf(input.path(), "AKH_2001.pdf")];

    let backend = StubBackend::new(vec![generic_report_json("P-2001")]);
    let dispatcher = Dispatcher::new(backend, ExtractOptions::new("test-model")).unwrap();
    let extractor = StubExtractor { fail_on: None };
    let ctx = BatchContext {
        dispatcher: &dispatcher,
        extractor: &extractor,
        output_dir: output.path(),
        forced_schema: Some(ReportSchema::Generic),
        unknown_type: UnknownTypePolicy::DefaultIkc,
        save_txt: true,
    };

    let result = run_batch(&files, &ctx);
    assert_eq!(result.succeeded(), 1);

    let txt = fs::read_to_string(output.path().join("AKH_2001.txt")).unwrap();
    assert_eq!(txt, "Laboratory report text for AKH_2001.pdf");
    assert!(output.path().join("AKH_2001.json").is_file());
}

#[test]
fn unknown_type_fail_policy_records_failure_without_calling_backend() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let files = vec![touch_pdf(input.path(), "report_007.pdf")];

    let backend = StubBackend::new(vec![]);
    let dispatcher = Dispatcher::new(backend, ExtractOptions::new("test-model")).unwrap();
    let extractor = StubExtractor { fail_on: None };
    let ctx = BatchContext {
        dispatcher: &dispatcher,
        extractor: &extractor,
        output_dir: output.path(),
        forced_schema: None,
        unknown_type: UnknownTypePolicy::Fail,
        save_txt: false,
    };

    let result = run_batch(&files, &ctx);
    assert_eq!(result.failed(), 1);
    assert_eq!(result.outcomes[0].schema, None);
    assert!(json_files(output.path()).is_empty());
}

#[test]
fn resolve_connection_accepts_explicit_values() {
    let connection = resolve_connection_with_env(
        Some("google/gemma-3-27b".to_string()),
        Some("http://localhost:1234/v1".to_string()),
        Some("secret".to_string()),
        |_| None,
    )
    .unwrap();
    assert_eq!(connection.model_name, "google/gemma-3-27b");
    assert_eq!(connection.base_url, "http://localhost:1234/v1");
    assert_eq!(connection.api_key.as_deref(), Some("secret"));
}

#[test]
fn resolve_connection_rejects_blank_model_name() {
    // A whitespace-only flag does not count as a configured model name,
    // and here the environment supplies nothing either.
    let error = resolve_connection_with_env(
        Some("   ".to_string()),
        Some("http://localhost:1234/v1".to_string()),
        None,
        |_| None,
    )
    .unwrap_err();
    assert!(error.to_string().contains("MODEL_NAME"), "{error}");
}

#[test]
fn resolve_connection_falls_back_to_environment() {
    let connection = resolve_connection_with_env(None, None, None, |name| match name {
        "MODEL_NAME" => Some("google/gemma-3-27b".to_string()),
        "BASE_URL" => Some("http://localhost:1234/v1".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(connection.model_name, "google/gemma-3-27b");
    assert_eq!(connection.base_url, "http://localhost:1234/v1");
    assert_eq!(connection.api_key, None);
}

#[test]
fn resolve_connection_requires_a_base_url() {
    let error = resolve_connection_with_env(
        Some("google/gemma-3-27b".to_string()),
        None,
        None,
        |_| None,
    )
    .unwrap_err();
    assert!(error.to_string().contains("BASE_URL"), "{error}");
}
