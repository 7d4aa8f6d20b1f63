//! Template catalog adapters.

mod filesystem;
mod memory;

pub use filesystem::{FilesystemTemplateCatalog, MANIFEST_FILE, TEMPLATE_FILES_DIR, TemplateManifest};
pub use memory::InMemoryCatalog;
