//! Writes selection-derived artifacts and patches `package.json`.

use std::path::Path;
use std::sync::Arc;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, FsError},
    },
    domain::{GeneratedArtifact, ManifestPatch, ProjectName, SelectionRecord, artifacts_for},
};

pub const MANIFEST_FILE: &str = "package.json";

/// What `compose` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub artifacts: Vec<GeneratedArtifact>,
    pub manifest_patch: ManifestPatch,
    /// `false` when there was nothing to add or no manifest to add it to.
    pub manifest_patched: bool,
}

impl Composition {
    pub fn artifact_paths(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.path.to_slash()).collect()
    }
}

pub struct FeatureComposer {
    filesystem: Arc<dyn Filesystem>,
}

impl FeatureComposer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Write every artifact the selection calls for, then patch the manifest.
    ///
    /// Existing files are overwritten, so running it twice is harmless.
    #[instrument(skip_all, fields(root = %destination_root.display(), selection = %selection))]
    pub fn compose(
        &self,
        destination_root: &Path,
        selection: &SelectionRecord,
        name: &ProjectName,
    ) -> Result<Composition, ApplicationError> {
        let artifacts = artifacts_for(selection, name);
        for artifact in &artifacts {
            let path = destination_root.join(artifact.path.as_path());
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent).map_err(compose_io)?;
            }
            self.filesystem
                .write_file(&path, artifact.content.as_bytes())
                .map_err(compose_io)?;
            debug!(path = %artifact.path, kind = %artifact.kind, "Artifact written");
        }

        let manifest_patch = ManifestPatch::for_selection(selection);
        let manifest_patched = self.patch_manifest(destination_root, &manifest_patch)?;

        Ok(Composition {
            artifacts,
            manifest_patch,
            manifest_patched,
        })
    }

    fn patch_manifest(&self, root: &Path, patch: &ManifestPatch) -> Result<bool, ApplicationError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let path = root.join(MANIFEST_FILE);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "No manifest to patch; packages are installed by command only");
            return Ok(false);
        }

        let bytes = self.filesystem.read_file(&path).map_err(compose_io)?;
        let text = String::from_utf8(bytes).map_err(|e| ApplicationError::Compose {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let patched = apply_manifest_patch(&text, patch).map_err(|reason| {
            ApplicationError::Compose {
                path: path.clone(),
                reason,
            }
        })?;
        self.filesystem
            .write_file(&path, patched.as_bytes())
            .map_err(compose_io)?;
        debug!(packages = patch.package_names().len(), "Manifest patched");
        Ok(true)
    }
}

/// Add the patch's packages to a `package.json` document.
///
/// Packages already declared keep their version; key order is preserved.
pub fn apply_manifest_patch(manifest: &str, patch: &ManifestPatch) -> Result<String, String> {
    let mut doc: Value = serde_json::from_str(manifest).map_err(|e| e.to_string())?;
    let root = doc
        .as_object_mut()
        .ok_or_else(|| "manifest is not a JSON object".to_string())?;

    merge_section(root, "dependencies", &patch.dependencies)?;
    merge_section(root, "devDependencies", &patch.dev_dependencies)?;

    let mut out = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
    out.push('\n');
    Ok(out)
}

fn merge_section(
    root: &mut Map<String, Value>,
    key: &str,
    packages: &std::collections::BTreeMap<String, String>,
) -> Result<(), String> {
    if packages.is_empty() {
        return Ok(());
    }
    let section = root
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| format!("'{key}' is not an object"))?;
    for (name, version) in packages {
        section
            .entry(name.clone())
            .or_insert_with(|| Value::String(version.clone()));
    }
    Ok(())
}

fn compose_io(err: FsError) -> ApplicationError {
    ApplicationError::Compose {
        path: err.path,
        reason: err.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Database, Extra};

    const MANIFEST: &str = r#"{
  "name": "api",
  "version": "1.0.0",
  "scripts": { "dev": "node src/index.js" },
  "dependencies": { "mongoose": "^8.0.0", "express": "^4.19.2" }
}"#;

    #[test]
    fn patch_keeps_existing_versions_and_order() {
        let selection = SelectionRecord::builder()
            .database(Database::MongoMongoose)
            .extra(Extra::LintFormat)
            .build();
        let out = apply_manifest_patch(MANIFEST, &ManifestPatch::for_selection(&selection)).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(doc["dependencies"]["mongoose"], "^8.0.0");
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["name", "version", "scripts", "dependencies", "devDependencies"]
        );
        let deps: Vec<_> = doc["dependencies"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(deps, vec!["mongoose", "express"]);
        assert_eq!(doc["devDependencies"]["prettier"], "latest");
    }

    #[test]
    fn patch_is_idempotent() {
        let patch = ManifestPatch::for_selection(
            &SelectionRecord::builder()
                .database(Database::PostgresPrisma)
                .build(),
        );
        let once = apply_manifest_patch(MANIFEST, &patch).unwrap();
        let twice = apply_manifest_patch(&once, &patch).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_object_manifest_is_rejected() {
        let patch = ManifestPatch::for_selection(
            &SelectionRecord::builder()
                .database(Database::PostgresPrisma)
                .build(),
        );
        assert!(apply_manifest_patch("[]", &patch).is_err());
        assert!(apply_manifest_patch(r#"{"dependencies": 3}"#, &patch).is_err());
    }
}
