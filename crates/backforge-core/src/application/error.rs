//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// What a run had already done when it failed.
///
/// Nothing is rolled back, so this is the caller's map of the debris.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialProgress {
    /// Artifact paths written, relative to the project root.
    pub artifacts: Vec<String>,
    /// Command lines that exited successfully.
    pub completed_steps: Vec<String>,
}

impl PartialProgress {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty() && self.completed_steps.is_empty()
    }
}

impl fmt::Display for PartialProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} artifact(s) written, {} step(s) completed",
            self.artifacts.len(),
            self.completed_steps.len()
        )
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The request itself is unusable (missing or malformed project name).
    #[error("Invalid invocation: {reason}")]
    Invocation { reason: String },

    /// Destination already exists.
    #[error("Destination already exists: {path}")]
    Precondition { path: PathBuf },

    /// No template registered for the selection, or its root is missing.
    #[error("No template for {selection}: {reason}")]
    TemplateNotFound { selection: String, reason: String },

    /// Template catalog could not be read.
    #[error("Template catalog error: {reason}")]
    Catalog { reason: String },

    /// Tree clone failed part-way.
    #[error("Failed to clone {path}: {reason}")]
    CloneIo { path: PathBuf, reason: String },

    /// Artifact or manifest write failed.
    #[error("Failed to write {path}: {reason}")]
    Compose { path: PathBuf, reason: String },

    /// The generator exited successfully but the project directory is not
    /// where later steps expect it.
    #[error("{generator} did not create {path}")]
    GeneratorOutputMissing {
        generator: String,
        path: PathBuf,
        progress: PartialProgress,
    },

    /// An external command failed; later steps were not run.
    #[error("Step failed: {failed_step} ({})", exit_label(.exit_code))]
    Orchestration {
        failed_step: String,
        exit_code: Option<i32>,
        progress: PartialProgress,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Invocation { .. } => vec![
                "Provide a project name: backforge new <name>".into(),
            ],
            Self::Precondition { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Try: backforge list to see available templates".into(),
                "Set BACKFORGE_TEMPLATES_DIR to a directory containing templates".into(),
            ],
            Self::Catalog { .. } => vec![
                "Check templates.dir in your config file".into(),
                "Run: backforge config path to locate it".into(),
            ],
            Self::CloneIo { path, .. } | Self::Compose { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The destination may be partially populated; remove it before retrying".into(),
            ],
            Self::GeneratorOutputMissing { generator, path, .. } => vec![
                format!("Check the {generator} output above for the directory it created"),
                format!("Nothing was written to {}", path.display()),
            ],
            Self::Orchestration {
                failed_step,
                progress,
                ..
            } => {
                let mut out = vec![format!("Re-run manually: {failed_step}")];
                if !progress.is_empty() {
                    out.push(format!("Partial progress kept: {progress}"));
                }
                out
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Invocation { .. } | Self::Precondition { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Catalog { .. } => ErrorCategory::Configuration,
            Self::CloneIo { .. }
            | Self::Compose { .. }
            | Self::GeneratorOutputMissing { .. }
            | Self::Orchestration { .. } => ErrorCategory::Internal,
        }
    }
}
