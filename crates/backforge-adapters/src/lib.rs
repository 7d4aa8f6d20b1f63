//! Infrastructure adapters for backforge.
//!
//! This crate implements the ports defined in `backforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod events;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use catalog::{FilesystemTemplateCatalog, InMemoryCatalog, TemplateManifest};
pub use events::TracingEventSink;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{OutputMode, ProcessCommandRunner};
