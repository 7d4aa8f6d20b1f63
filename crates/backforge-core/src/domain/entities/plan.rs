//! Invocation plans: the ordered external commands one scaffold run needs.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Which part of the selection a step serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCategory {
    Generator,
    Base,
    Database,
    Framework,
    Extras,
}

impl fmt::Display for StepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generator => "generator",
            Self::Base => "base",
            Self::Database => "database",
            Self::Framework => "framework",
            Self::Extras => "extras",
        })
    }
}

/// `Generate` steps always run; `Install` steps run only when auto-install
/// is enabled and are otherwise deferred to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    Generate,
    Install,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationStep {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub description: String,
    pub category: StepCategory,
    pub phase: StepPhase,
    /// Upper bound on wall time; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl InvocationStep {
    pub fn new<I, S>(
        command: impl Into<String>,
        args: I,
        working_dir: impl Into<PathBuf>,
        category: StepCategory,
        phase: StepPhase,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = command.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let description = format!("{category}: {}", render_command_line(&command, &args));
        Self {
            command,
            args,
            working_dir: working_dir.into(),
            description,
            category,
            phase,
            timeout: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `command arg1 arg2`, as a user would type it.
    pub fn command_line(&self) -> String {
        render_command_line(&self.command, &self.args)
    }
}

impl fmt::Display for InvocationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn render_command_line(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvocationPlan {
    steps: Vec<InvocationStep>,
}

impl InvocationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: InvocationStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[InvocationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn categories(&self) -> Vec<StepCategory> {
        self.steps.iter().map(|s| s.category).collect()
    }

    pub fn phase(&self, phase: StepPhase) -> impl Iterator<Item = &InvocationStep> {
        self.steps.iter().filter(move |s| s.phase == phase)
    }
}

impl IntoIterator for InvocationPlan {
    type Item = InvocationStep;
    type IntoIter = std::vec::IntoIter<InvocationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a InvocationPlan {
    type Item = &'a InvocationStep;
    type IntoIter = std::slice::Iter<'a, InvocationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
