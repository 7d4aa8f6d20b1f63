//! Application services - orchestrate use cases.
//!
//! The scaffold pipeline is split into one service per stage:
//! resolve, clone, compose, provision. `ScaffoldService` wires them.

pub mod feature_composer;
pub mod orchestrator;
pub mod run_options;
pub mod scaffold_service;
pub mod template_resolver;
pub mod template_service;
pub mod tree_cloner;

pub use feature_composer::{Composition, FeatureComposer, apply_manifest_patch};
pub use orchestrator::{ExecutionReport, Orchestrator, build_plan};
pub use run_options::RunOptions;
pub use scaffold_service::{ScaffoldPreview, ScaffoldRequest, ScaffoldResult, ScaffoldService};
pub use template_resolver::TemplateResolver;
pub use template_service::{TemplateInfo, TemplateService};
pub use tree_cloner::{CloneSummary, TreeCloner};
