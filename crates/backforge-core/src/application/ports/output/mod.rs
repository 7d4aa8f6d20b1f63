//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `backforge-adapters` crate provides implementations.

mod events;

pub use events::{EventSink, NoopEventSink, ScaffoldEvent, Stage};

#[cfg(test)]
pub use events::MockEventSink;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{
    Framework, InvocationStep, Permissions, RelativePath, SourceLanguage, TemplateEntry,
};

/// A filesystem failure, tagged with the offending path.
///
/// Services turn this into the `ApplicationError` variant for their stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{path}: {reason}")]
pub struct FsError {
    pub path: PathBuf,
    pub reason: String,
}

impl FsError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry of a template tree, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
    pub permissions: Permissions,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `backforge_adapters::filesystem::LocalFilesystem` (production)
/// - `backforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Every entry below `root`, sorted by path so parents precede children.
    ///
    /// A symbolic link is reported as a `File` only when its canonical
    /// target is a regular file inside `root`. Any other link is an error.
    fn read_tree(&self, root: &Path) -> Result<Vec<TreeEntry>, FsError>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Create or overwrite a file. The parent directory must exist.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), FsError>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> Result<(), FsError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for the set of bundled templates.
///
/// Implemented by:
/// - `backforge_adapters::catalog::FilesystemTemplateCatalog` (production)
/// - `backforge_adapters::catalog::InMemoryCatalog` (testing)
pub trait TemplateCatalog: Send + Sync {
    /// The template registered for `(language, framework)`, if any.
    fn lookup(
        &self,
        language: SourceLanguage,
        framework: Framework,
    ) -> Result<Option<TemplateEntry>, ApplicationError>;

    /// All registered templates.
    fn list(&self) -> Result<Vec<TemplateEntry>, ApplicationError>;
}

/// How an external command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// `None` when the process was killed (signal or timeout).
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl CommandOutcome {
    pub const fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            timed_out: false,
        }
    }

    pub const fn timed_out() -> Self {
        Self {
            exit_code: None,
            timed_out: true,
        }
    }

    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// The command could not be started at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to start '{command}': {reason}")]
pub struct SpawnError {
    pub command: String,
    pub reason: String,
}

/// Port for running external commands.
///
/// Implemented by `backforge_adapters::process::ProcessCommandRunner`.
/// Runs exactly one step and blocks until it ends.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, step: &InvocationStep) -> Result<CommandOutcome, SpawnError>;
}
