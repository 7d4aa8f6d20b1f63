//! Implementation of the `backforge list` command.

use backforge_core::{
    application::{TemplateInfo, TemplateService},
    domain::{Framework, SourceLanguage},
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::load_catalog,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(load_catalog(&config)?);
    let templates = filter(
        service.list_templates()?,
        args.language.map(SourceLanguage::from),
        args.framework.map(Framework::from),
    );

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            if templates.is_empty() {
                output.warning("No templates match")?;
            }
            for t in &templates {
                output.print(&format!(
                    "  {:<20} {:<8} {:<11} {:<10} {}",
                    t.id,
                    t.framework.label(),
                    t.language.label(),
                    t.kind.to_string(),
                    t.description
                ))?;
            }
        }

        // JSON goes out even in quiet mode so it stays pipeable.
        ListFormat::Json => {
            let json =
                serde_json::to_string_pretty(&templates).map_err(|e| CliError::IoError {
                    message: "serialising template list".into(),
                    source: e.into(),
                })?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for t in &templates {
                output.data(&t.id)?;
            }
        }
    }

    Ok(())
}

fn filter(
    templates: Vec<TemplateInfo>,
    language: Option<SourceLanguage>,
    framework: Option<Framework>,
) -> Vec<TemplateInfo> {
    templates
        .into_iter()
        .filter(|t| language.is_none_or(|l| t.language == l))
        .filter(|t| framework.is_none_or(|f| t.framework == f))
        .collect()
}
