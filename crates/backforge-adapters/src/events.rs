//! Event sink that forwards engine progress to `tracing`.

use tracing::{debug, info, warn};

use backforge_core::application::ports::{EventSink, ScaffoldEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn emit(&self, event: &ScaffoldEvent) {
        match event {
            ScaffoldEvent::StageStarted(stage) => info!(%stage, "stage started"),
            ScaffoldEvent::StageFinished(stage) => debug!(%stage, "stage finished"),
            ScaffoldEvent::StepStarted {
                index,
                total,
                description,
            } => info!(step = index + 1, total, %description, "step started"),
            ScaffoldEvent::StepFinished {
                index,
                total,
                description,
                exit_code,
                success,
            } => {
                if *success {
                    debug!(step = index + 1, total, %description, "step finished");
                } else {
                    warn!(step = index + 1, total, %description, ?exit_code, "step failed");
                }
            }
            ScaffoldEvent::StepDeferred { command_line } => {
                info!(%command_line, "install deferred")
            }
        }
    }
}
