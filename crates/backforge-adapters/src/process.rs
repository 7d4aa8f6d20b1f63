//! External command runner using `std::process`.

use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use backforge_core::{
    application::ports::{CommandOutcome, CommandRunner, SpawnError},
    domain::InvocationStep,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where a child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Stream to the terminal, as the user would see running it by hand.
    #[default]
    Inherit,
    /// Discard.
    Null,
}

/// Runs each step as a child process and blocks until it ends.
///
/// stdin is always closed so an interactive prompt cannot hang the run.
/// Without a step timeout a hung command still hangs the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCommandRunner {
    output: OutputMode,
}

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    fn stdio(&self) -> Stdio {
        match self.output {
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Null => Stdio::null(),
        }
    }
}

impl CommandRunner for ProcessCommandRunner {
    #[instrument(skip_all, fields(command = %step.command_line(), dir = %step.working_dir.display()))]
    fn run(&self, step: &InvocationStep) -> Result<CommandOutcome, SpawnError> {
        let mut child = Command::new(program(&step.command))
            .args(&step.args)
            .current_dir(&step.working_dir)
            .stdin(Stdio::null())
            .stdout(self.stdio())
            .stderr(self.stdio())
            .spawn()
            .map_err(|e| SpawnError {
                command: step.command_line(),
                reason: e.to_string(),
            })?;

        let status = match step.timeout {
            Some(limit) => match wait_with_timeout(&mut child, limit) {
                Some(status) => status,
                None => {
                    warn!(timeout = ?limit, "Command exceeded its timeout; killed");
                    return Ok(CommandOutcome::timed_out());
                }
            },
            None => child.wait(),
        }
        .map_err(|e| SpawnError {
            command: step.command_line(),
            reason: format!("failed to wait for process: {e}"),
        })?;

        debug!(status = %status, "Command finished");
        Ok(CommandOutcome {
            exit_code: status.code(),
            timed_out: false,
        })
    }
}

/// `None` when the deadline passed and the child was killed.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Option<std::io::Result<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(Ok(status)),
            Ok(None) => {}
            Err(e) => return Some(Err(e)),
        }
        if Instant::now() >= deadline {
            // Already exited between the poll and the kill is fine.
            let _ = child.kill();
            let _ = child.wait();
            return None;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// npm and friends are `.cmd` shims on Windows.
#[cfg(windows)]
fn program(command: &str) -> String {
    match command {
        "npm" | "npx" | "nest" => format!("{command}.cmd"),
        other => other.to_string(),
    }
}

#[cfg(not(windows))]
fn program(command: &str) -> String {
    command.to_string()
}
