//! Invocation plan construction and its interpreter.
//!
//! `build_plan` is pure. `Orchestrator::execute` runs steps one at a time
//! and stops at the first failure; nothing is retried or rolled back.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::run_options::RunOptions;
use crate::{
    application::{
        ApplicationError, PartialProgress,
        ports::{CommandRunner, EventSink, ScaffoldEvent},
    },
    domain::{
        InvocationPlan, InvocationStep, ProjectName, ProjectTarget, SelectionRecord,
        SourceLanguage, StepCategory, StepPhase, TemplateDescriptor,
        capabilities::{PACKAGE_MANAGER, database_packages, extra_dev_packages, framework_packages},
    },
};

/// Build the ordered command sequence for one scaffold run.
///
/// Standard templates: base install, database, framework, extras.
/// Delegated generators: global generator install and `new` in the parent
/// directory with the project directory pinned to the name, then database
/// and extras in the project.
pub fn build_plan(
    selection: &SelectionRecord,
    descriptor: &TemplateDescriptor,
    target: &ProjectTarget,
    name: &ProjectName,
    options: &RunOptions,
) -> InvocationPlan {
    let project_dir = target.path();
    let mut plan = InvocationPlan::new();
    let mut push = |step: InvocationStep| plan.push(step.with_timeout(options.command_timeout));

    match descriptor.generator() {
        Some(generator) => {
            push(
                InvocationStep::new(
                    PACKAGE_MANAGER,
                    ["install", "-g", generator.package],
                    target.parent(),
                    StepCategory::Generator,
                    StepPhase::Generate,
                )
                .with_description(format!("Install {} globally", generator.package)),
            );

            let mut args = vec![
                "new".to_string(),
                name.as_str().to_string(),
                // Otherwise nest dasherizes the name into the directory.
                "--directory".to_string(),
                name.as_str().to_string(),
                "--skip-git".to_string(),
                "--package-manager".to_string(),
                PACKAGE_MANAGER.to_string(),
                "--language".to_string(),
                generator_language(selection.language()).to_string(),
            ];
            if !options.auto_install {
                args.push("--skip-install".to_string());
            }
            push(
                InvocationStep::new(
                    generator.binary,
                    args,
                    target.parent(),
                    StepCategory::Generator,
                    StepPhase::Generate,
                )
                .with_description(format!("Generate project with {}", generator.binary)),
            );

            // The generator installs its own dependencies unless told not to.
            if !options.auto_install {
                push(install_step(&[], project_dir, StepCategory::Base, false));
            }
        }
        None => {
            push(install_step(&[], project_dir, StepCategory::Base, false));
        }
    }

    let db = database_packages(selection.database(), selection.framework());
    if !db.is_empty() {
        push(install_step(db, project_dir, StepCategory::Database, false));
    }

    if descriptor.generator().is_none() {
        let fw = framework_packages(selection.framework());
        if !fw.is_empty() {
            push(install_step(fw, project_dir, StepCategory::Framework, false));
        }
    }

    for extra in selection.extras() {
        let dev = extra_dev_packages(*extra);
        if !dev.is_empty() {
            push(
                install_step(dev, project_dir, StepCategory::Extras, true)
                    .with_description(format!("Install {} tooling", extra.label())),
            );
        }
    }

    plan
}

fn install_step(
    packages: &[&str],
    dir: &std::path::Path,
    category: StepCategory,
    dev: bool,
) -> InvocationStep {
    let mut args = vec!["install"];
    if dev {
        args.push("-D");
    }
    args.extend_from_slice(packages);
    InvocationStep::new(PACKAGE_MANAGER, args, dir, category, StepPhase::Install)
}

const fn generator_language(language: SourceLanguage) -> &'static str {
    match language {
        SourceLanguage::TypeScript => "TS",
        SourceLanguage::JavaScript => "JS",
    }
}

/// What `execute` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub completed: Vec<InvocationStep>,
    /// Install steps skipped because auto-install was off.
    pub deferred: Vec<InvocationStep>,
}

impl ExecutionReport {
    pub fn merge(&mut self, other: ExecutionReport) {
        self.completed.extend(other.completed);
        self.deferred.extend(other.deferred);
    }

    pub fn completed_lines(&self) -> Vec<String> {
        self.completed.iter().map(InvocationStep::command_line).collect()
    }
}

pub struct Orchestrator {
    runner: Arc<dyn CommandRunner>,
    events: Arc<dyn EventSink>,
}

impl Orchestrator {
    pub fn new(runner: Arc<dyn CommandRunner>, events: Arc<dyn EventSink>) -> Self {
        Self { runner, events }
    }

    /// Run `plan` in order.
    ///
    /// `Install` steps are deferred unless `options.auto_install` is set.
    /// The first failing step ends the run; later steps are never started.
    #[instrument(skip_all, fields(steps = plan.len(), auto_install = options.auto_install))]
    pub fn execute(
        &self,
        plan: &InvocationPlan,
        options: &RunOptions,
    ) -> Result<ExecutionReport, ApplicationError> {
        let mut report = ExecutionReport::default();
        let runnable: Vec<&InvocationStep> = plan
            .steps()
            .iter()
            .filter(|step| {
                let run = step.phase == StepPhase::Generate || options.auto_install;
                if !run {
                    self.events.emit(&ScaffoldEvent::StepDeferred {
                        command_line: step.command_line(),
                    });
                    report.deferred.push((*step).clone());
                }
                run
            })
            .collect();
        let total = runnable.len();

        for (index, step) in runnable.into_iter().enumerate() {
            self.events.emit(&ScaffoldEvent::StepStarted {
                index,
                total,
                description: step.description.clone(),
            });
            info!(command = %step.command_line(), dir = %step.working_dir.display(), "Running step");

            let failure = match self.runner.run(step) {
                Ok(outcome) => {
                    self.events.emit(&ScaffoldEvent::StepFinished {
                        index,
                        total,
                        description: step.description.clone(),
                        exit_code: outcome.exit_code,
                        success: outcome.success(),
                    });
                    if outcome.success() {
                        debug!(command = %step.command_line(), "Step succeeded");
                        report.completed.push(step.clone());
                        continue;
                    }
                    if outcome.timed_out {
                        warn!(command = %step.command_line(), timeout = ?step.timeout, "Step timed out");
                    }
                    outcome.exit_code
                }
                Err(err) => {
                    warn!(error = %err, "Step could not be started");
                    self.events.emit(&ScaffoldEvent::StepFinished {
                        index,
                        total,
                        description: step.description.clone(),
                        exit_code: None,
                        success: false,
                    });
                    None
                }
            };

            return Err(ApplicationError::Orchestration {
                failed_step: step.command_line(),
                exit_code: failure,
                progress: PartialProgress {
                    artifacts: Vec::new(),
                    completed_steps: report.completed_lines(),
                },
            });
        }

        Ok(report)
    }
}
