//! Command entry points wiring CLI arguments to the pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use labrex_extract::{Dispatcher, ExtractOptions, OpenAiBackend};
use labrex_ingest::{PdfTextExtractor, list_pdf_files, validate_pdf_file};
use labrex_model::ReportSchema;

use crate::cli::{ParseArgs, ReportTypeArg, UnknownTypeArg};
use crate::pipeline::{BatchContext, UnknownTypePolicy, resolve_connection, run_batch};
use crate::types::BatchResult;

/// Run the `parse` command: resolve configuration, collect input files and
/// process them as one batch.
///
/// Configuration and input errors abort before any file is processed.
/// Per-file failures do not: they are recorded in the returned
/// [`BatchResult`].
pub fn run_parse(args: &ParseArgs) -> Result<BatchResult> {
    let connection = resolve_connection(
        args.model_name.clone(),
        args.base_url.clone(),
        args.api_key.clone(),
    )?;

    let (files, default_output_dir) = collect_input(&args.input)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or(default_output_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    info!(
        files = files.len(),
        model = %connection.model_name,
        output_dir = %output_dir.display(),
        "starting batch"
    );

    let backend = OpenAiBackend::new(&connection.base_url, connection.api_key.clone())?;
    let options = ExtractOptions::new(&connection.model_name).with_max_attempts(args.max_attempts);
    let dispatcher = Dispatcher::new(backend, options)?;
    let extractor = PdfTextExtractor;

    let ctx = BatchContext {
        dispatcher: &dispatcher,
        extractor: &extractor,
        output_dir: &output_dir,
        forced_schema: args.report_type.map(forced_schema),
        unknown_type: match args.unknown_type {
            UnknownTypeArg::DefaultIkc => UnknownTypePolicy::DefaultIkc,
            UnknownTypeArg::Fail => UnknownTypePolicy::Fail,
        },
        save_txt: args.save_txt,
    };
    Ok(run_batch(&files, &ctx))
}

fn forced_schema(arg: ReportTypeArg) -> ReportSchema {
    match arg {
        ReportTypeArg::Ikc => ReportSchema::Ikc,
        ReportTypeArg::Akh => ReportSchema::Akh,
        ReportTypeArg::Generic => ReportSchema::Generic,
    }
}

/// Expand the input path into the file list plus the default output
/// directory (the directory the inputs live in).
fn collect_input(input: &PathBuf) -> Result<(Vec<PathBuf>, PathBuf)> {
    if input.is_dir() {
        let files = list_pdf_files(input)?;
        if files.is_empty() {
            bail!("no PDF files found in {}", input.display());
        }
        Ok((files, input.clone()))
    } else {
        validate_pdf_file(input)
            .with_context(|| format!("invalid input file {}", input.display()))?;
        let parent = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((vec![input.clone()], parent))
    }
}
