//! Application layer for backforge.
//!
//! This layer contains:
//! - **Services**: the scaffold pipeline and template listing
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    RunOptions, ScaffoldPreview, ScaffoldRequest, ScaffoldResult, ScaffoldService, TemplateInfo,
    TemplateService,
};

pub use ports::{CommandRunner, EventSink, Filesystem, TemplateCatalog};

pub use error::{ApplicationError, PartialProgress};
