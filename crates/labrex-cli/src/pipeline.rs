//! Batch processing pipeline.
//!
//! Stages per file: schema selection (filename tag or forced), text
//! extraction, structured extraction, output writing. Per-file errors are
//! caught at the single-file boundary and converted into a `FileOutcome`;
//! nothing crosses into the batch loop, so one bad file never aborts the
//! rest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use labrex_extract::{CompletionBackend, Dispatcher};
use labrex_ingest::{TextExtractor, detect_report_type};
use labrex_model::{ReportSchema, ReportType};

use crate::types::{BatchResult, FileOutcome, FileStatus};

/// Environment fallbacks for the model connection flags.
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const API_KEY_ENV: &str = "API_KEY";

/// Fallback policy for filenames without a recognizable report-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Assume IKC and warn (the historical behavior, now explicit).
    DefaultIkc,
    /// Fail the file.
    Fail,
}

/// Resolved model connection parameters.
#[derive(Debug, Clone)]
pub struct Connection {
    pub model_name: String,
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Resolve connection parameters from CLI flags with env-var fallback.
///
/// Missing model name or base URL is a configuration error: the process
/// must exit before any file is touched.
pub fn resolve_connection(
    model_name: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
) -> Result<Connection> {
    resolve_connection_with_env(model_name, base_url, api_key, |name| {
        std::env::var(name).ok()
    })
}

/// [`resolve_connection`] with the environment lookup injected, so tests
/// stay independent of the process environment.
pub fn resolve_connection_with_env(
    model_name: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Connection> {
    let model_name = model_name
        .or_else(|| env(MODEL_NAME_ENV))
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            anyhow!("model name is required: pass --model-name or set {MODEL_NAME_ENV}")
        })?;
    let base_url = base_url
        .or_else(|| env(BASE_URL_ENV))
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("base URL is required: pass --base-url or set {BASE_URL_ENV}"))?;
    let api_key = api_key.or_else(|| env(API_KEY_ENV)).filter(|v| !v.is_empty());

    debug!(model = %model_name, base_url = %base_url, api_key = api_key.is_some(), "resolved connection");
    Ok(Connection {
        model_name,
        base_url,
        api_key,
    })
}

/// Select the schema for a file: forced choice first, then the filename tag,
/// then the configured fallback policy.
pub fn select_schema(
    file_name: &str,
    forced: Option<ReportSchema>,
    policy: UnknownTypePolicy,
) -> Result<ReportSchema> {
    if let Some(schema) = forced {
        return Ok(schema);
    }
    match detect_report_type(file_name) {
        Some(report_type) => Ok(ReportSchema::from(report_type)),
        None => match policy {
            UnknownTypePolicy::DefaultIkc => {
                warn!(
                    file = %file_name,
                    "no report-type tag in filename, defaulting to {}",
                    ReportType::Ikc
                );
                Ok(ReportSchema::Ikc)
            }
            UnknownTypePolicy::Fail => Err(anyhow!(
                "cannot determine report type of {file_name}: \
                 no IKC_/AKH_ tag in filename (use --report-type or \
                 --unknown-type default-ikc)"
            )),
        },
    }
}

/// Shared state for one batch run.
pub struct BatchContext<'a, B> {
    pub dispatcher: &'a Dispatcher<B>,
    pub extractor: &'a dyn TextExtractor,
    pub output_dir: &'a Path,
    pub forced_schema: Option<ReportSchema>,
    pub unknown_type: UnknownTypePolicy,
    pub save_txt: bool,
}

/// Output paths written for one successfully processed file.
#[derive(Debug)]
pub struct ProcessedFile {
    pub json_path: PathBuf,
    pub txt_path: Option<PathBuf>,
}

/// Process every file in sorted order, one at a time.
pub fn run_batch<B: CompletionBackend>(files: &[PathBuf], ctx: &BatchContext<'_, B>) -> BatchResult {
    let progress = ProgressBar::new(files.len() as u64);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        progress.set_message(file_name.clone());

        let schema = match select_schema(&file_name, ctx.forced_schema, ctx.unknown_type) {
            Ok(schema) => schema,
            Err(error) => {
                warn!(file = %file_name, %error, "skipping file");
                outcomes.push(FileOutcome {
                    file_name,
                    schema: None,
                    status: FileStatus::Failed {
                        message: format!("{error:#}"),
                    },
                });
                progress.inc(1);
                continue;
            }
        };

        match process_file(path, schema, ctx) {
            Ok(processed) => {
                info!(file = %file_name, schema = schema.label(), "file processed");
                outcomes.push(FileOutcome {
                    file_name,
                    schema: Some(schema.label()),
                    status: FileStatus::Succeeded {
                        json_path: processed.json_path,
                        txt_path: processed.txt_path,
                    },
                });
            }
            Err(error) => {
                warn!(file = %file_name, error = %error, "file failed");
                debug!(file = %file_name, "failure detail: {error:?}");
                outcomes.push(FileOutcome {
                    file_name,
                    schema: Some(schema.label()),
                    status: FileStatus::Failed {
                        message: format!("{error:#}"),
                    },
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    BatchResult {
        output_dir: ctx.output_dir.to_path_buf(),
        outcomes,
    }
}

/// Process a single file start to finish.
///
/// Output files are written whole, once; there is no atomic-replace
/// guarantee at this layer.
pub fn process_file<B: CompletionBackend>(
    path: &Path,
    schema: ReportSchema,
    ctx: &BatchContext<'_, B>,
) -> Result<ProcessedFile> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("invalid filename: {}", path.display()))?;

    let text = ctx
        .extractor
        .extract_text(path)
        .with_context(|| format!("extract text from {}", path.display()))?;

    let txt_path = if ctx.save_txt {
        let txt_path = ctx.output_dir.join(format!("{stem}.txt"));
        std::fs::write(&txt_path, &text)
            .with_context(|| format!("write {}", txt_path.display()))?;
        Some(txt_path)
    } else {
        None
    };

    let extraction = ctx
        .dispatcher
        .extract(&text, schema)
        .with_context(|| format!("structured extraction for {}", path.display()))?;
    debug!(
        file = %path.display(),
        patient_id = %extraction.report.header().patient_id,
        attempts = extraction.attempts,
        "record extracted"
    );

    let json_path = ctx.output_dir.join(format!("{stem}.json"));
    let mut json = serde_json::to_string_pretty(&extraction.report)
        .context("serialize extracted record")?;
    json.push('\n');
    std::fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;

    Ok(ProcessedFile {
        json_path,
        txt_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_schema_detects_tags() {
        let policy = UnknownTypePolicy::DefaultIkc;
        assert_eq!(
            select_schema("IKC_12345.pdf", None, policy).unwrap(),
            ReportSchema::Ikc
        );
        assert_eq!(
            select_schema("AKH_98765.pdf", None, policy).unwrap(),
            ReportSchema::Akh
        );
    }

    #[test]
    fn select_schema_defaults_with_warning_policy() {
        assert_eq!(
            select_schema("report_007.pdf", None, UnknownTypePolicy::DefaultIkc).unwrap(),
            ReportSchema::Ikc
        );
    }

    #[test]
    fn select_schema_fail_policy_errors() {
        assert!(select_schema("report_007.pdf", None, UnknownTypePolicy::Fail).is_err());
    }

    #[test]
    fn forced_schema_overrides_detection() {
        assert_eq!(
            select_schema(
                "IKC_12345.pdf",
                Some(ReportSchema::Generic),
                UnknownTypePolicy::Fail
            )
            .unwrap(),
            ReportSchema::Generic
        );
    }
}
