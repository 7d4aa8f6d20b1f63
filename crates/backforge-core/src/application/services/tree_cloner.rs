//! Recursive template copy with placeholder substitution.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem, FsError},
    },
    domain::{PlaceholderMap, RelativePath},
};

/// Extensions whose files get placeholder substitution.
const TEXT_EXTENSIONS: &[&str] = &[
    "cjs", "css", "env", "example", "html", "js", "json", "jsx", "md", "mjs", "prisma", "sh",
    "toml", "ts", "tsx", "txt", "yaml", "yml",
];

/// Extension-less or dotfile names that are text.
const TEXT_FILE_NAMES: &[&str] = &[
    ".dockerignore",
    ".editorconfig",
    ".env",
    ".eslintignore",
    ".eslintrc",
    ".gitignore",
    ".npmrc",
    ".nvmrc",
    ".prettierrc",
    "Dockerfile",
    "LICENSE",
    "Makefile",
];

/// Counts for one clone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneSummary {
    pub directories: usize,
    pub files: usize,
    /// Files that went through substitution.
    pub substituted: usize,
}

/// Whether a file's contents should be substituted.
pub fn is_text_path(path: &RelativePath) -> bool {
    if path
        .file_name()
        .is_some_and(|name| TEXT_FILE_NAMES.contains(&name))
    {
        return true;
    }
    path.extension()
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

pub struct TreeCloner {
    filesystem: Arc<dyn Filesystem>,
}

impl TreeCloner {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Reproduce `template_root` at `destination_root`.
    ///
    /// Not transactional: a failure leaves whatever was written so far.
    #[instrument(skip_all, fields(from = %template_root.display(), to = %destination_root.display()))]
    pub fn clone_tree(
        &self,
        template_root: &Path,
        destination_root: &Path,
        map: &PlaceholderMap,
    ) -> Result<CloneSummary, ApplicationError> {
        let entries = self.filesystem.read_tree(template_root).map_err(clone_io)?;
        self.filesystem
            .create_dir_all(destination_root)
            .map_err(clone_io)?;

        let mut summary = CloneSummary::default();
        let mut directory_modes = Vec::new();
        for entry in entries {
            let source = template_root.join(entry.path.as_path());
            let target = destination_root.join(entry.path.as_path());

            match entry.kind {
                EntryKind::Directory => {
                    self.filesystem.create_dir_all(&target).map_err(clone_io)?;
                    directory_modes.push((target, entry.permissions));
                    summary.directories += 1;
                }
                EntryKind::File => {
                    if let Some(parent) = target.parent() {
                        self.filesystem.create_dir_all(parent).map_err(clone_io)?;
                    }
                    let bytes = self.filesystem.read_file(&source).map_err(clone_io)?;
                    let content = match render(&entry.path, bytes, map) {
                        Rendered::Text(text) => {
                            summary.substituted += 1;
                            text.into_bytes()
                        }
                        Rendered::Verbatim(bytes) => bytes,
                    };
                    self.filesystem
                        .write_file(&target, &content)
                        .map_err(clone_io)?;
                    self.filesystem
                        .set_permissions(&target, entry.permissions)
                        .map_err(clone_io)?;
                    summary.files += 1;
                    trace!(path = %entry.path, "Copied");
                }
            }
        }

        // Deepest first, so a read-only directory never blocks writes below it.
        for (path, permissions) in directory_modes.into_iter().rev() {
            self.filesystem
                .set_permissions(&path, permissions)
                .map_err(clone_io)?;
        }

        debug!(
            files = summary.files,
            directories = summary.directories,
            substituted = summary.substituted,
            "Template cloned"
        );
        Ok(summary)
    }
}

enum Rendered {
    Text(String),
    Verbatim(Vec<u8>),
}

fn render(path: &RelativePath, bytes: Vec<u8>, map: &PlaceholderMap) -> Rendered {
    if !is_text_path(path) {
        return Rendered::Verbatim(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(text) => Rendered::Text(map.substitute(&text)),
        Err(err) => Rendered::Verbatim(err.into_bytes()),
    }
}

fn clone_io(err: FsError) -> ApplicationError {
    ApplicationError::CloneIo {
        path: err.path,
        reason: err.reason,
    }
}
