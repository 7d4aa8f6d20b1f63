//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use backforge_core::{
    application::ports::{EntryKind, Filesystem, FsError, TreeEntry},
    domain::{Permissions, RelativePath},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_tree(&self, root: &Path) -> Result<Vec<TreeEntry>, FsError> {
        let canonical_root = fs::canonicalize(root).map_err(|e| map_io_error(root, e, "resolve"))?;
        let mut entries = Vec::new();

        for walk_entry in WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let walk_entry = walk_entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                FsError::new(path, format!("directory walk error: {e}"))
            })?;
            let path = walk_entry.path();
            let rel = path
                .strip_prefix(root)
                .map_err(|_| FsError::new(path, "entry is outside the template root"))?;
            let rel = RelativePath::try_new(rel).map_err(|e| FsError::new(path, e))?;

            let file_type = walk_entry.file_type();
            let (kind, metadata) = if file_type.is_dir() {
                (EntryKind::Directory, walk_entry.metadata().map_err(|e| {
                    FsError::new(path, format!("failed to read metadata: {e}"))
                })?)
            } else if file_type.is_file() {
                (EntryKind::File, walk_entry.metadata().map_err(|e| {
                    FsError::new(path, format!("failed to read metadata: {e}"))
                })?)
            } else if file_type.is_symlink() {
                (EntryKind::File, resolve_link(path, &canonical_root)?)
            } else {
                return Err(FsError::new(path, "unsupported file type"));
            };

            trace!(path = %rel, ?kind, "Template entry");
            entries.push(TreeEntry {
                path: rel,
                kind,
                permissions: permissions_of(&metadata),
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), FsError> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> Result<(), FsError> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(permissions.mode()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            let mut perms = fs::metadata(path)
                .map_err(|e| map_io_error(path, e, "get metadata"))?
                .permissions();
            perms.set_readonly(permissions.readonly());
            fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Follow a link, accepting it only if it lands on a regular file inside the root.
fn resolve_link(path: &Path, canonical_root: &Path) -> Result<fs::Metadata, FsError> {
    let target = fs::canonicalize(path)
        .map_err(|e| FsError::new(path, format!("dangling symbolic link: {e}")))?;
    if !target.starts_with(canonical_root) {
        return Err(FsError::new(
            path,
            format!("symbolic link escapes the template root ({})", target.display()),
        ));
    }
    let metadata = fs::metadata(&target).map_err(|e| map_io_error(path, e, "read link target"))?;
    if !metadata.is_file() {
        return Err(FsError::new(
            path,
            "symbolic link does not point to a regular file",
        ));
    }
    Ok(metadata)
}

#[cfg(unix)]
fn permissions_of(metadata: &fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn permissions_of(metadata: &fs::Metadata) -> Permissions {
    match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, _) => Permissions::directory(),
        (false, true) => Permissions::from_mode(0o444),
        (false, false) => Permissions::read_write(),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FsError {
    FsError::new(path, format!("Failed to {operation}: {e}"))
}
