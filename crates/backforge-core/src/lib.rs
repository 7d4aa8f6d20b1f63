//! backforge core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the backforge
//! Node.js backend generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          backforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ Resolver → Cloner → Composer → Orchestr.│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, Catalog, Runner, EventSink  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   backforge-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use backforge_core::prelude::*;
//!
//! let selection = SelectionRecord::builder()
//!     .framework(Framework::Fastify)
//!     .database(Database::PostgresPrisma)
//!     .extra(Extra::Container)
//!     .build();
//!
//! let service = ScaffoldService::new(catalog, filesystem, runner, events);
//! let request = ScaffoldRequest {
//!     project_name: "shop-api".into(),
//!     parent_dir: std::env::current_dir()?,
//!     selection,
//! };
//! let result = service.scaffold(&request, &RunOptions::new())?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RunOptions, ScaffoldPreview, ScaffoldRequest, ScaffoldResult, ScaffoldService,
        TemplateInfo, TemplateService,
        ports::{CommandRunner, EventSink, Filesystem, ScaffoldEvent, Stage, TemplateCatalog},
    };
    pub use crate::domain::{
        Database, Extra, Framework, InvocationPlan, InvocationStep, SelectionRecord,
        SourceLanguage, TemplateDescriptor, TemplateKind,
    };
    pub use crate::error::{BackforgeError, BackforgeResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
