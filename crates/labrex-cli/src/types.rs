use std::path::PathBuf;

/// Outcome of one batch invocation.
#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Succeeded { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Per-file processing outcome.
#[derive(Debug)]
pub struct FileOutcome {
    pub file_name: String,
    /// Schema label, when selection got that far.
    pub schema: Option<&'static str>,
    pub status: FileStatus,
}

#[derive(Debug)]
pub enum FileStatus {
    Succeeded {
        json_path: PathBuf,
        txt_path: Option<PathBuf>,
    },
    Failed {
        message: String,
    },
}
