//! Filesystem-based template catalog.
//!
//! Discovers and parses `template.toml` manifests from a directory tree,
//! turning each into a [`TemplateEntry`] the resolver can hand to the cloner.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── express-ts/
//! │   ├── template.toml        ← manifest (required)
//! │   └── files/               ← template root, cloned verbatim
//! │       ├── package.json
//! │       └── src/
//! │           ├── app.ts
//! │           ├── routes/index.ts
//! │           └── server.ts
//! └── hono-js/
//!     ├── template.toml
//!     └── files/
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id      = "express-ts"         # unique identifier
//! version = "1.0.0"
//!
//! [matcher]
//! language  = "typescript"       # typescript | javascript
//! framework = "express"          # express | fastify | hono
//!
//! [metadata]
//! description = "Express with TypeScript"   # optional
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use backforge_core::{
    application::{ApplicationError, ports::TemplateCatalog},
    domain::{Framework, SourceLanguage, TemplateEntry, TemplateId, capabilities::generator_for},
};

pub const MANIFEST_FILE: &str = "template.toml";
pub const TEMPLATE_FILES_DIR: &str = "files";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    pub matcher: MatcherSection,
    #[serde(default)]
    pub metadata: MetadataSection,
}

/// `[template]` section: identity of the template.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub id: String,
    pub version: String,
}

/// `[matcher]` section: the selection this template serves.
#[derive(Debug, Deserialize, Clone)]
pub struct MatcherSection {
    pub language: String,
    pub framework: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetadataSection {
    pub description: Option<String>,
}

impl TemplateManifest {
    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Convert into a catalog entry rooted at `template_dir/files`.
    pub fn into_entry(self, template_dir: &Path) -> Result<TemplateEntry, String> {
        let language: SourceLanguage = self.matcher.language.parse().map_err(|e| format!("{e}"))?;
        let framework: Framework = self.matcher.framework.parse().map_err(|e| format!("{e}"))?;
        if generator_for(framework).is_some() {
            return Err(format!(
                "{} projects come from an external generator, not a template",
                framework.label()
            ));
        }
        let id = TemplateId::parse(&format!("{}@{}", self.template.id, self.template.version))
            .map_err(|e| e.to_string())?;

        Ok(TemplateEntry {
            id,
            language,
            framework,
            description: self
                .metadata
                .description
                .unwrap_or_else(|| format!("{} ({})", framework.label(), language.label())),
            root: template_dir.join(TEMPLATE_FILES_DIR),
        })
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Catalog backed by a `templates/` directory.
///
/// Each immediate subdirectory holding a valid `template.toml` is one
/// template. Subdirectories with a missing or invalid manifest emit a `WARN`
/// log and are skipped; they do not prevent other templates from loading.
/// When two manifests claim the same selection the first by directory name wins.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateCatalog {
    templates_dir: PathBuf,
    entries: Vec<TemplateEntry>,
}

impl FilesystemTemplateCatalog {
    /// Load every valid template under `templates_dir`.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::Catalog`] if the directory is missing or unreadable.
    #[instrument(skip_all, fields(dir = %templates_dir.as_ref().display()))]
    pub fn load(templates_dir: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let templates_dir = templates_dir.as_ref().to_path_buf();
        let catalog_err = |reason: String| ApplicationError::Catalog { reason };

        if !templates_dir.is_dir() {
            return Err(catalog_err(format!(
                "templates directory not found: {}",
                templates_dir.display()
            )));
        }

        let mut dirs: Vec<PathBuf> = fs::read_dir(&templates_dir)
            .map_err(|e| {
                catalog_err(format!(
                    "failed to read templates directory '{}': {e}",
                    templates_dir.display()
                ))
            })?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut entries: Vec<TemplateEntry> = Vec::new();
        for dir in dirs {
            match load_entry(&dir) {
                Ok(entry) => {
                    if entries
                        .iter()
                        .any(|e| e.matches(entry.language, entry.framework))
                    {
                        warn!(dir = %dir.display(), template = %entry.id, "duplicate template for selection; skipping");
                        continue;
                    }
                    debug!(template = %entry.id, "loaded template");
                    entries.push(entry);
                }
                Err(reason) => {
                    warn!(dir = %dir.display(), error = %reason, "skipping template directory");
                }
            }
        }

        debug!(count = entries.len(), "finished loading templates");
        Ok(Self {
            templates_dir,
            entries,
        })
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn load_entry(dir: &Path) -> Result<TemplateEntry, String> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest_path)
        .map_err(|e| format!("failed to read '{}': {e}", manifest_path.display()))?;
    TemplateManifest::parse(&raw)
        .map_err(|e| format!("failed to parse '{}': {e}", manifest_path.display()))?
        .into_entry(dir)
}

impl TemplateCatalog for FilesystemTemplateCatalog {
    fn lookup(
        &self,
        language: SourceLanguage,
        framework: Framework,
    ) -> Result<Option<TemplateEntry>, ApplicationError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.matches(language, framework))
            .cloned())
    }

    fn list(&self) -> Result<Vec<TemplateEntry>, ApplicationError> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_template(root: &Path, dir: &str, manifest: &str) {
        let path = root.join(dir);
        fs::create_dir_all(path.join(TEMPLATE_FILES_DIR)).unwrap();
        fs::write(path.join(MANIFEST_FILE), manifest).unwrap();
    }

    const EXPRESS_TS: &str = r#"
[template]
id = "express-ts"
version = "1.0.0"

[matcher]
language = "typescript"
framework = "express"

[metadata]
description = "Express with TypeScript"
"#;

    #[test]
    fn loads_manifest_into_entry() {
        let dir = TempDir::new().unwrap();
        write_template(dir.path(), "express-ts", EXPRESS_TS);

        let catalog = FilesystemTemplateCatalog::load(dir.path()).unwrap();
        let entry = catalog
            .lookup(SourceLanguage::TypeScript, Framework::Express)
            .unwrap()
            .unwrap();
        assert_eq!(entry.id.to_string(), "express-ts@1.0.0");
        assert_eq!(entry.root, dir.path().join("express-ts").join("files"));
        assert!(
            catalog
                .lookup(SourceLanguage::JavaScript, Framework::Express)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn invalid_manifests_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_template(dir.path(), "express-ts", EXPRESS_TS);
        write_template(dir.path(), "broken", "not = [valid");
        write_template(
            dir.path(),
            "nest",
            "[template]\nid = \"nest\"\nversion = \"1\"\n[matcher]\nlanguage = \"ts\"\nframework = \"nestjs\"\n",
        );
        fs::create_dir_all(dir.path().join("no-manifest")).unwrap();

        let catalog = FilesystemTemplateCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_directory_is_a_catalog_error() {
        let dir = TempDir::new().unwrap();
        let err = FilesystemTemplateCatalog::load(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ApplicationError::Catalog { .. }));
    }

    #[test]
    fn description_defaults_to_labels() {
        let manifest = TemplateManifest::parse(
            "[template]\nid = \"hono-js\"\nversion = \"1.0.0\"\n[matcher]\nlanguage = \"javascript\"\nframework = \"hono\"\n",
        )
        .unwrap();
        let entry = manifest.into_entry(Path::new("t/hono-js")).unwrap();
        assert_eq!(entry.description, "Hono (JavaScript)");
    }
}
