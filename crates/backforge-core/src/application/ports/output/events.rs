use std::fmt;

/// Coarse phases of one scaffold run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Resolve,
    Clone,
    Generate,
    Compose,
    Install,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolve => "Resolving template",
            Self::Clone => "Copying template",
            Self::Generate => "Running generator",
            Self::Compose => "Writing project files",
            Self::Install => "Installing dependencies",
        })
    }
}

/// Structured progress the engine reports instead of printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    StageStarted(Stage),
    StageFinished(Stage),
    StepStarted {
        index: usize,
        total: usize,
        description: String,
    },
    StepFinished {
        index: usize,
        total: usize,
        description: String,
        exit_code: Option<i32>,
        success: bool,
    },
    /// An install step skipped because auto-install is off.
    StepDeferred { command_line: String },
}

/// Port for progress reporting. Must never fail the run.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ScaffoldEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &ScaffoldEvent) {}
}
