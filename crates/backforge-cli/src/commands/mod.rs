//! Subcommand handlers. Each module exposes one `execute` function.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use backforge_adapters::{FilesystemTemplateCatalog, InMemoryCatalog};
use backforge_core::application::TemplateCatalog;

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

/// Load the template catalog from the first candidate directory that holds
/// at least one valid template.
///
/// Without one the catalog is empty; generator-backed frameworks still
/// resolve, standard ones fail with "not found".
pub(crate) fn load_catalog(config: &AppConfig) -> CliResult<Arc<dyn TemplateCatalog>> {
    match first_populated(config.template_dir_candidates()) {
        Some(catalog) => Ok(Arc::new(catalog)),
        None => {
            warn!("No templates directory found; only generator-backed frameworks are available");
            Ok(Arc::new(InMemoryCatalog::new()))
        }
    }
}

/// A directory named `templates` may belong to something else entirely
/// (view templates of an existing project), so empty ones are skipped.
fn first_populated(
    candidates: impl IntoIterator<Item = PathBuf>,
) -> Option<FilesystemTemplateCatalog> {
    for dir in candidates {
        match FilesystemTemplateCatalog::load(&dir) {
            Ok(catalog) if !catalog.is_empty() => {
                debug!(dir = %dir.display(), count = catalog.len(), "Using templates directory");
                return Some(catalog);
            }
            Ok(_) => warn!(dir = %dir.display(), "No template manifests found; skipping"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "Templates directory unreadable; skipping"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn bundled() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
    }

    #[test]
    fn unrelated_templates_folder_is_skipped() {
        let work = tempfile::tempdir().unwrap();
        let views = work.path().join("templates");
        fs::create_dir_all(views.join("views")).unwrap();
        fs::write(views.join("views/index.html"), "<h1>hi</h1>").unwrap();

        let catalog = first_populated([views, bundled()]).unwrap();
        assert_eq!(catalog.templates_dir(), bundled().as_path());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn no_populated_candidate_gives_none() {
        let work = tempfile::tempdir().unwrap();
        fs::create_dir_all(work.path().join("empty")).unwrap();
        assert!(first_populated([work.path().join("empty"), work.path().join("gone")]).is_none());
    }

    #[test]
    fn first_populated_candidate_wins() {
        let catalog = first_populated([bundled(), PathBuf::from("/nonexistent")]).unwrap();
        assert_eq!(catalog.len(), 6);
    }
}
