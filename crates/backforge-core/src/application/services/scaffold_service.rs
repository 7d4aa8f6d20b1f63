//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the request and check the destination is free
//! 2. Resolve the template for the selection
//! 3. Clone the template tree (standard templates only)
//! 4. Run generator steps and check the project directory exists
//!    (delegated generators only)
//! 5. Write artifacts and patch the manifest
//! 6. Run or defer install steps
//!
//! Artifacts are always on disk before any install command starts.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, info_span, instrument, warn};
use uuid::Uuid;

use super::{
    feature_composer::{Composition, FeatureComposer},
    orchestrator::{ExecutionReport, Orchestrator, build_plan},
    run_options::RunOptions,
    template_resolver::TemplateResolver,
    tree_cloner::{CloneSummary, TreeCloner},
};
use crate::{
    application::{
        ApplicationError, PartialProgress,
        ports::{CommandRunner, EventSink, Filesystem, ScaffoldEvent, Stage, TemplateCatalog},
    },
    domain::{
        Extra, GeneratedArtifact, InvocationPlan, InvocationStep, ManifestPatch, PlaceholderMap,
        ProjectName, ProjectTarget, SelectionRecord, StepCategory, StepPhase, TemplateDescriptor,
        artifacts_for, capabilities::start_command,
    },
    error::BackforgeResult,
};

/// Input to one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    /// Absolute directory the project is created in.
    pub parent_dir: PathBuf,
    pub selection: SelectionRecord,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ScaffoldResult {
    pub run_id: Uuid,
    pub created_path: PathBuf,
    pub template: TemplateDescriptor,
    pub applied_extras: Vec<Extra>,
    /// Packages whose install step actually ran.
    pub installed_dependencies: Vec<String>,
    /// Artifact paths written, relative to `created_path`.
    pub artifacts: Vec<String>,
    pub orchestration_report: ExecutionReport,
    pub clone_summary: Option<CloneSummary>,
    /// Command that starts the development server.
    pub start_command: String,
}

/// Everything a run would do, computed without touching disk.
#[derive(Debug, Clone)]
pub struct ScaffoldPreview {
    pub target: ProjectTarget,
    pub template: TemplateDescriptor,
    pub artifacts: Vec<GeneratedArtifact>,
    pub manifest_patch: ManifestPatch,
    pub plan: InvocationPlan,
    pub start_command: String,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    resolver: TemplateResolver,
    cloner: TreeCloner,
    composer: FeatureComposer,
    orchestrator: Orchestrator,
    events: Arc<dyn EventSink>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use backforge_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Arc::new(catalog),    // impl TemplateCatalog
    ///     Arc::new(filesystem), // impl Filesystem
    ///     Arc::new(runner),     // impl CommandRunner
    ///     Arc::new(events),     // impl EventSink
    /// );
    /// ```
    pub fn new(
        catalog: Arc<dyn TemplateCatalog>,
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn CommandRunner>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            resolver: TemplateResolver::new(catalog, Arc::clone(&filesystem)),
            cloner: TreeCloner::new(Arc::clone(&filesystem)),
            composer: FeatureComposer::new(Arc::clone(&filesystem)),
            orchestrator: Orchestrator::new(runner, Arc::clone(&events)),
            filesystem,
            events,
        }
    }

    /// Scaffold a new project.
    pub fn scaffold(
        &self,
        request: &ScaffoldRequest,
        options: &RunOptions,
    ) -> BackforgeResult<ScaffoldResult> {
        let run_id = Uuid::new_v4();
        let span = info_span!("scaffold", %run_id, project = %request.project_name);
        let _guard = span.enter();

        info!(selection = %request.selection, "Scaffolding project");
        let (name, target) = self.prepare(request)?;
        let selection = &request.selection;

        let template = self.stage(Stage::Resolve, || self.resolver.resolve(selection))?;
        let plan = build_plan(selection, &template, &target, &name, options);
        let (generate, install) = split_phases(&plan);

        let clone_summary = match template.root() {
            Some(root) => {
                let map = PlaceholderMap::for_selection(selection, &name);
                Some(self.stage(Stage::Clone, || {
                    self.cloner.clone_tree(root, target.path(), &map)
                })?)
            }
            None => None,
        };

        let mut report = ExecutionReport::default();
        if !generate.is_empty() {
            report = self.stage(Stage::Generate, || {
                self.orchestrator.execute(&generate, options)
            })?;
        }
        if let Some(generator) = template.generator() {
            self.ensure_generated(generator.binary, target.path(), &report)?;
        }

        let composition: Composition = self.stage(Stage::Compose, || {
            self.composer.compose(target.path(), selection, &name)
        })?;
        let artifacts = composition.artifact_paths();

        let installs = self
            .stage(Stage::Install, || self.orchestrator.execute(&install, options))
            .map_err(|err| with_progress(err, &artifacts, &report))?;
        report.merge(installs);

        info!(
            path = %target.path().display(),
            completed = report.completed.len(),
            deferred = report.deferred.len(),
            "Scaffold completed successfully"
        );

        Ok(ScaffoldResult {
            run_id,
            created_path: target.path().to_path_buf(),
            template,
            applied_extras: selection.extras().iter().copied().collect(),
            installed_dependencies: installed_packages(&report.completed),
            artifacts,
            orchestration_report: report,
            clone_summary,
            start_command: start_command(selection.framework()),
        })
    }

    /// Compute what `scaffold` would do. Reads only.
    #[instrument(skip_all, fields(project = %request.project_name))]
    pub fn preview(
        &self,
        request: &ScaffoldRequest,
        options: &RunOptions,
    ) -> BackforgeResult<ScaffoldPreview> {
        let (name, target) = self.prepare(request)?;
        let selection = &request.selection;
        let template = self.resolver.resolve(selection)?;
        let plan = build_plan(selection, &template, &target, &name, options);

        Ok(ScaffoldPreview {
            artifacts: artifacts_for(selection, &name),
            manifest_patch: ManifestPatch::for_selection(selection),
            start_command: start_command(selection.framework()),
            target,
            template,
            plan,
        })
    }

    /// Pre-flight checks. Nothing is mutated before these pass.
    fn prepare(&self, request: &ScaffoldRequest) -> Result<(ProjectName, ProjectTarget), ApplicationError> {
        let invocation = |reason: String| ApplicationError::Invocation { reason };

        let name = ProjectName::parse(&request.project_name).map_err(|e| invocation(e.to_string()))?;
        let path = request.parent_dir.join(name.as_str());
        let exists = self.filesystem.exists(&path);
        let target = ProjectTarget::new(&request.parent_dir, &name, exists)
            .map_err(|e| invocation(e.to_string()))?;

        if target.exists() {
            return Err(ApplicationError::Precondition { path });
        }
        Ok((name, target))
    }

    /// Later steps write into the destination, so a generator that put the
    /// project elsewhere must stop the run here.
    fn ensure_generated(
        &self,
        generator: &str,
        path: &Path,
        report: &ExecutionReport,
    ) -> Result<(), ApplicationError> {
        if self.filesystem.is_dir(path) {
            return Ok(());
        }
        warn!(generator, path = %path.display(), "Generator finished without creating the project directory");
        Err(ApplicationError::GeneratorOutputMissing {
            generator: generator.to_string(),
            path: path.to_path_buf(),
            progress: PartialProgress {
                artifacts: Vec::new(),
                completed_steps: report.completed_lines(),
            },
        })
    }

    fn stage<T>(
        &self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, ApplicationError>,
    ) -> Result<T, ApplicationError> {
        self.events.emit(&ScaffoldEvent::StageStarted(stage));
        let out = f()?;
        self.events.emit(&ScaffoldEvent::StageFinished(stage));
        Ok(out)
    }
}

fn split_phases(plan: &InvocationPlan) -> (InvocationPlan, InvocationPlan) {
    let mut generate = InvocationPlan::new();
    let mut install = InvocationPlan::new();
    for step in plan.steps() {
        match step.phase {
            StepPhase::Generate => generate.push(step.clone()),
            StepPhase::Install => install.push(step.clone()),
        }
    }
    (generate, install)
}

/// Fold earlier progress into an install-stage failure.
fn with_progress(
    err: ApplicationError,
    artifacts: &[String],
    earlier: &ExecutionReport,
) -> ApplicationError {
    match err {
        ApplicationError::Orchestration {
            failed_step,
            exit_code,
            mut progress,
        } => {
            progress.artifacts = artifacts.to_vec();
            let mut steps = earlier.completed_lines();
            steps.append(&mut progress.completed_steps);
            progress.completed_steps = steps;
            ApplicationError::Orchestration {
                failed_step,
                exit_code,
                progress,
            }
        }
        other => other,
    }
}

/// Package names from completed dependency steps, flags and globals excluded.
fn installed_packages(completed: &[InvocationStep]) -> Vec<String> {
    completed
        .iter()
        .filter(|s| {
            matches!(
                s.category,
                StepCategory::Database | StepCategory::Framework | StepCategory::Extras
            )
        })
        .flat_map(|s| s.args.iter().skip(1))
        .filter(|arg| !arg.starts_with('-'))
        .cloned()
        .collect()
}
