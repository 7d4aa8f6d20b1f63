//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use backforge_core::{
    application::ports::{EntryKind, Filesystem, FsError, TreeEntry},
    domain::{Permissions, RelativePath},
};

/// In-memory filesystem for testing.
///
/// Clones share storage, so a test can keep a handle while the service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, (Vec<u8>, Permissions)>,
    directories: BTreeMap<PathBuf, Permissions>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> &Self {
        self.add_file_with_permissions(path, content, Permissions::read_write())
    }

    pub fn add_file_with_permissions(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        permissions: Permissions,
    ) -> &Self {
        let path = path.as_ref();
        let mut inner = self.write();
        if let Some(parent) = path.parent() {
            insert_dirs(&mut inner, parent);
        }
        inner
            .files
            .insert(path.to_path_buf(), (content.into(), permissions));
        drop(inner);
        self
    }

    /// File contents as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read()
            .files
            .get(path.as_ref())
            .map(|(bytes, _)| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn permissions(&self, path: impl AsRef<Path>) -> Option<Permissions> {
        let inner = self.read();
        let path = path.as_ref();
        inner
            .files
            .get(path)
            .map(|(_, p)| *p)
            .or_else(|| inner.directories.get(path).copied())
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// Files below `root` as `(relative slash path, bytes)`, sorted.
    pub fn snapshot(&self, root: impl AsRef<Path>) -> Vec<(String, Vec<u8>)> {
        let root = root.as_ref();
        self.read()
            .files
            .iter()
            .filter_map(|(path, (bytes, _))| {
                let rel = path.strip_prefix(root).ok()?;
                Some((RelativePath::try_new(rel).ok()?.to_slash(), bytes.clone()))
            })
            .collect()
    }

    // Lock poisoning only follows a panic in another test thread.
    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn insert_dirs(inner: &mut MemoryFilesystemInner, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        if matches!(component, Component::Normal(_)) {
            inner
                .directories
                .entry(current.clone())
                .or_insert_with(Permissions::directory);
        }
    }
}

fn is_root(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::RootDir | Component::Prefix(_) | Component::CurDir))
}

impl Filesystem for MemoryFilesystem {
    fn read_tree(&self, root: &Path) -> Result<Vec<TreeEntry>, FsError> {
        let inner = self.read();
        if !is_root(root) && !inner.directories.contains_key(root) {
            return Err(FsError::new(root, "directory not found"));
        }

        let relative = |path: &Path| -> Option<RelativePath> {
            let rel = path.strip_prefix(root).ok()?;
            if rel.as_os_str().is_empty() {
                return None;
            }
            RelativePath::try_new(rel).ok()
        };

        let mut entries: Vec<TreeEntry> = inner
            .directories
            .iter()
            .filter_map(|(path, perms)| {
                Some(TreeEntry {
                    path: relative(path)?,
                    kind: EntryKind::Directory,
                    permissions: *perms,
                })
            })
            .chain(inner.files.iter().filter_map(|(path, (_, perms))| {
                Some(TreeEntry {
                    path: relative(path)?,
                    kind: EntryKind::File,
                    permissions: *perms,
                })
            }))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.read()
            .files
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| FsError::new(path, "file not found"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), FsError> {
        let mut inner = self.write();
        if let Some(parent) = path.parent() {
            if !is_root(parent) && !inner.directories.contains_key(parent) {
                return Err(FsError::new(path, "parent directory does not exist"));
            }
        }
        if inner.directories.contains_key(path) {
            return Err(FsError::new(path, "is a directory"));
        }
        let permissions = inner
            .files
            .get(path)
            .map_or_else(Permissions::read_write, |(_, p)| *p);
        inner
            .files
            .insert(path.to_path_buf(), (content.to_vec(), permissions));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.write();
        if inner.files.contains_key(path) {
            return Err(FsError::new(path, "a file already exists at this path"));
        }
        insert_dirs(&mut inner, path);
        Ok(())
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> Result<(), FsError> {
        let mut inner = self.write();
        if let Some((_, p)) = inner.files.get_mut(path) {
            *p = permissions;
            return Ok(());
        }
        match inner.directories.get_mut(path) {
            Some(p) => {
                *p = permissions;
                Ok(())
            }
            None => Err(FsError::new(path, "not found")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().directories.contains_key(path)
    }
}
