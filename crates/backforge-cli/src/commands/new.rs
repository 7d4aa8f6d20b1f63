//! Implementation of the `backforge new` command.
//!
//! Responsibility: turn flags, config defaults and prompt answers into a
//! `ScaffoldRequest`, call the core scaffold service, and display results.
//! No business logic lives here.

use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use backforge_adapters::{LocalFilesystem, ProcessCommandRunner};
use backforge_core::{
    application::{RunOptions, ScaffoldPreview, ScaffoldRequest, ScaffoldResult, ScaffoldService},
    domain::{
        Database, DomainError, Extra, Framework, SelectionRecord, SourceLanguage, StepPhase,
    },
};

use crate::{
    cli::NewArgs,
    commands::load_catalog,
    config::{AppConfig, Defaults},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::Prompter,
};

/// Execute the `backforge new` command.
///
/// Dispatch sequence:
/// 1. Collect the project name and selection (flags, config, prompts)
/// 2. Derive run options (install, timeout)
/// 3. Wire adapters into a `ScaffoldService`
/// 4. Preview on `--dry-run`, otherwise scaffold
/// 5. Print a summary and next steps
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("")))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let prompter = Prompter::new(
        !args.yes
            && !output.is_quiet()
            && std::io::stdin().is_terminal()
            && std::io::stderr().is_terminal(),
    );

    // 1. Project name and selection. A missing name reaches the core as an
    //    empty string and is rejected there.
    let project_name = match &args.name {
        Some(name) => name.clone(),
        None => prompter.text("Project name")?.unwrap_or_default(),
    };
    let selection = resolve_selection(&args, &config.defaults, &prompter)?;
    debug!(%selection, "Selection resolved");

    // 2. Run options
    let options = run_options(&args, &config);

    // 3. Adapters
    let parent_dir = std::env::current_dir().with_cli_context(|| "reading current directory")?;
    let progress = output.progress();
    let service = ScaffoldService::new(
        load_catalog(&config)?,
        Arc::new(LocalFilesystem::new()),
        Arc::new(ProcessCommandRunner::new()),
        progress.clone(),
    );
    let request = ScaffoldRequest {
        project_name,
        parent_dir,
        selection,
    };

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        let preview = service.preview(&request, &options)?;
        return print_preview(&preview, &request, &options, &output);
    }

    output.header(&format!(
        "Creating '{}' ({})",
        request.project_name.trim(),
        request.selection
    ))?;
    let outcome = service.scaffold(&request, &options);
    progress.finish();
    let result = outcome?;

    info!(run_id = %result.run_id, path = %result.created_path.display(), "Project created");

    // 5. Success + next steps
    print_summary(&result, &output)
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Resolve each choice from flag, then config default, then prompt, then
/// the builder default.
fn resolve_selection(
    args: &NewArgs,
    defaults: &Defaults,
    prompter: &Prompter,
) -> CliResult<SelectionRecord> {
    let mut builder = SelectionRecord::builder();

    if let Some(framework) = choose(
        args.framework.map(Framework::from),
        ("defaults.framework", defaults.framework.as_deref()),
        || prompter.select("Framework", &Framework::ALL, Framework::label),
    )? {
        builder = builder.framework(framework);
    }

    if let Some(language) = choose(
        args.language.map(SourceLanguage::from),
        ("defaults.language", defaults.language.as_deref()),
        || prompter.select("Language", &SourceLanguage::ALL, SourceLanguage::label),
    )? {
        builder = builder.language(language);
    }

    if let Some(database) = choose(
        args.database.map(Database::from),
        ("defaults.database", defaults.database.as_deref()),
        || prompter.select("Database", &Database::ALL, Database::label),
    )? {
        builder = builder.database(database);
    }

    let extras: Vec<Extra> = if !args.extras.is_empty() {
        args.extras.iter().copied().map(Extra::from).collect()
    } else if !defaults.extras.is_empty() {
        defaults
            .extras
            .iter()
            .map(|raw| parse_default::<Extra>("defaults.extras", Some(raw)))
            .collect::<CliResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect()
    } else {
        prompter
            .multi_select("Extras", &Extra::ALL, Extra::label)?
            .unwrap_or_default()
    };

    Ok(builder.extras(extras).build())
}

/// First of: the flag, the config default, the prompt answer.
fn choose<T>(
    flag: Option<T>,
    (key, default): (&str, Option<&str>),
    prompt: impl FnOnce() -> CliResult<Option<T>>,
) -> CliResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    if flag.is_some() {
        return Ok(flag);
    }
    match parse_default(key, default)? {
        Some(value) => Ok(Some(value)),
        None => prompt(),
    }
}

/// Parse a config default; a bad value is a configuration error.
fn parse_default<T>(key: &str, raw: Option<&str>) -> CliResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: DomainError| CliError::ConfigError {
                message: format!("{key}: {e}"),
                source: Some(Box::new(e)),
            }),
        None => Ok(None),
    }
}

/// Flags win over config. A timeout of zero means no timeout.
fn run_options(args: &NewArgs, config: &AppConfig) -> RunOptions {
    let timeout = args
        .timeout
        .or(config.install.command_timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    RunOptions::new()
        .with_auto_install(args.install || config.install.auto_install)
        .with_command_timeout(timeout)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn print_preview(
    preview: &ScaffoldPreview,
    request: &ScaffoldRequest,
    options: &RunOptions,
    out: &OutputManager,
) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would create '{}' at {}",
        request.project_name.trim(),
        preview.target.path().display()
    ))?;
    out.print(&format!("  Selection:  {}", request.selection))?;
    out.print(&format!(
        "  Template:   {} ({})",
        preview.template.id,
        preview.template.kind()
    ))?;

    if !preview.artifacts.is_empty() {
        out.print("")?;
        out.header("Generated files")?;
        for artifact in &preview.artifacts {
            out.print(&format!("  {} ({})", artifact.path, artifact.kind))?;
        }
    }

    if !preview.manifest_patch.is_empty() {
        out.print("")?;
        out.header("package.json additions")?;
        for (name, version) in &preview.manifest_patch.dependencies {
            out.print(&format!("  {name}@{version}"))?;
        }
        for (name, version) in &preview.manifest_patch.dev_dependencies {
            out.print(&format!("  {name}@{version} (dev)"))?;
        }
    }

    if !preview.plan.is_empty() {
        out.print("")?;
        out.header("Commands")?;
        for step in preview.plan.steps() {
            let deferred = step.phase == StepPhase::Install && !options.auto_install;
            out.print(&format!(
                "  {}{}  [in {}]",
                step.command_line(),
                if deferred { " (deferred)" } else { "" },
                step.working_dir.display()
            ))?;
        }
    }

    out.print("")?;
    out.print(&format!("  Start with: {}", preview.start_command))?;
    Ok(())
}

fn print_summary(result: &ScaffoldResult, out: &OutputManager) -> CliResult<()> {
    let dir_name = result
        .created_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| result.created_path.display().to_string());

    out.success(&format!(
        "Project '{dir_name}' created at {}",
        result.created_path.display()
    ))?;
    out.print(&format!(
        "  Template:   {} ({})",
        result.template.id,
        result.template.kind()
    ))?;
    if let Some(summary) = &result.clone_summary {
        out.print(&format!(
            "  Copied:     {} file(s), {} with placeholders",
            summary.files, summary.substituted
        ))?;
    }
    if !result.artifacts.is_empty() {
        out.print(&format!("  Generated:  {}", result.artifacts.join(", ")))?;
    }
    if !result.installed_dependencies.is_empty() {
        out.print(&format!(
            "  Installed:  {}",
            result.installed_dependencies.join(", ")
        ))?;
    }

    out.print("")?;
    out.header("Next steps")?;
    out.command(&format!("cd {dir_name}"))?;
    let deferred = &result.orchestration_report.deferred;
    if !deferred.is_empty() {
        out.warning("Dependencies were not installed. Run:")?;
        for step in deferred {
            out.command(&step.command_line())?;
        }
    }
    out.command(&result.start_command)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DatabaseArg, ExtraArg, FrameworkArg, LanguageArg};

    fn args() -> NewArgs {
        NewArgs {
            name: Some("api".into()),
            language: None,
            framework: None,
            database: None,
            extras: vec![],
            install: false,
            timeout: None,
            yes: true,
            dry_run: false,
        }
    }

    fn no_prompt() -> Prompter {
        Prompter::new(false)
    }

    #[test]
    fn flags_build_the_selection() {
        let mut a = args();
        a.language = Some(LanguageArg::JavaScript);
        a.framework = Some(FrameworkArg::Fastify);
        a.database = Some(DatabaseArg::Postgres);
        a.extras = vec![ExtraArg::Lint, ExtraArg::Docker];

        let s = resolve_selection(&a, &Defaults::default(), &no_prompt()).unwrap();
        assert_eq!(s.language(), SourceLanguage::JavaScript);
        assert_eq!(s.framework(), Framework::Fastify);
        assert_eq!(s.database(), Database::PostgresPrisma);
        assert!(s.has_extra(Extra::Container));
        assert!(s.has_extra(Extra::LintFormat));
    }

    #[test]
    fn unset_choices_fall_back_to_builder_defaults() {
        let s = resolve_selection(&args(), &Defaults::default(), &no_prompt()).unwrap();
        assert_eq!(s, SelectionRecord::builder().build());
    }

    #[test]
    fn config_defaults_fill_gaps_but_flags_win() {
        let defaults = Defaults {
            language: Some("js".into()),
            framework: Some("hono".into()),
            database: Some("mongo".into()),
            extras: vec!["docker".into()],
        };
        let mut a = args();
        a.framework = Some(FrameworkArg::Express);

        let s = resolve_selection(&a, &defaults, &no_prompt()).unwrap();
        assert_eq!(s.framework(), Framework::Express);
        assert_eq!(s.language(), SourceLanguage::JavaScript);
        assert_eq!(s.database(), Database::MongoMongoose);
        assert!(s.has_extra(Extra::Container));
    }

    #[test]
    fn bad_config_default_is_a_configuration_error() {
        let defaults = Defaults {
            framework: Some("koa".into()),
            ..Defaults::default()
        };
        let err = resolve_selection(&args(), &defaults, &no_prompt()).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn install_flag_or_config_enables_auto_install() {
        let mut config = AppConfig::default();
        assert!(!run_options(&args(), &config).auto_install);

        config.install.auto_install = true;
        assert!(run_options(&args(), &config).auto_install);

        let mut a = args();
        a.install = true;
        assert!(run_options(&a, &AppConfig::default()).auto_install);
    }

    #[test]
    fn timeout_flag_overrides_config_and_zero_disables() {
        let mut config = AppConfig::default();
        config.install.command_timeout_secs = Some(300);

        let mut a = args();
        assert_eq!(
            run_options(&a, &config).command_timeout,
            Some(Duration::from_secs(300))
        );

        a.timeout = Some(30);
        assert_eq!(
            run_options(&a, &config).command_timeout,
            Some(Duration::from_secs(30))
        );

        a.timeout = Some(0);
        assert_eq!(run_options(&a, &config).command_timeout, None);
    }
}
