//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: tree reads and file writes
//!   - `TemplateCatalog`: bundled template lookup
//!   - `CommandRunner`: external process execution
//!   - `EventSink`: progress reporting
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandOutcome, CommandRunner, EntryKind, EventSink, Filesystem, FsError, NoopEventSink,
    ScaffoldEvent, SpawnError, Stage, TemplateCatalog, TreeEntry,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockEventSink};
