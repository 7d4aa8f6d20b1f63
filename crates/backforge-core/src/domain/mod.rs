//! Core domain layer for backforge.
//!
//! Pure logic only: selections, the capability registry, placeholder
//! substitution, synthetic artifacts and invocation plans. All I/O goes
//! through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, process or network calls
//! - **No logging**: `tracing` stays in the application layer
//! - **Immutable values**: everything is `Clone + PartialEq`

pub mod artifacts;
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use artifacts::{ArtifactKind, GeneratedArtifact, ManifestPatch, artifacts_for};
pub use entities::{
    common::{Permissions, RelativePath},
    placeholder::{Placeholder, PlaceholderMap, substitute},
    plan::{InvocationPlan, InvocationStep, StepCategory, StepPhase},
    project::{ProjectName, ProjectTarget},
    selection::{SelectionBuilder, SelectionRecord},
    template::{
        ProvisioningStrategy, TemplateDescriptor, TemplateEntry, TemplateId, TemplateKind,
    },
};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{Database, Extra, Framework, SourceLanguage};
