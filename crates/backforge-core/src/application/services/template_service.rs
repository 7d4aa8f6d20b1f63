//! Template Service - catalog queries for display.
//!
//! Separated from ScaffoldService for single responsibility.

use std::sync::Arc;

use crate::{
    application::ports::TemplateCatalog,
    domain::{
        Framework, SourceLanguage, TemplateKind,
        capabilities::{FRAMEWORK_REGISTRY, Provisioning},
    },
    error::BackforgeResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub language: SourceLanguage,
    pub framework: Framework,
    pub kind: TemplateKind,
    pub description: String,
}

/// Service for template listing.
pub struct TemplateService {
    catalog: Arc<dyn TemplateCatalog>,
}

impl TemplateService {
    pub fn new(catalog: Arc<dyn TemplateCatalog>) -> Self {
        Self { catalog }
    }

    /// Every way a project can be provisioned: bundled templates plus one
    /// entry per language for each delegated generator.
    pub fn list_templates(&self) -> BackforgeResult<Vec<TemplateInfo>> {
        let mut out: Vec<TemplateInfo> = self
            .catalog
            .list()?
            .into_iter()
            .map(|entry| TemplateInfo {
                id: entry.id.to_string(),
                language: entry.language,
                framework: entry.framework,
                kind: TemplateKind::StandardTemplate,
                description: entry.description,
            })
            .collect();

        for def in FRAMEWORK_REGISTRY {
            let Provisioning::Delegated(generator) = def.provisioning else {
                continue;
            };
            for language in SourceLanguage::ALL {
                out.push(TemplateInfo {
                    id: format!("{}-{}@latest", generator.binary, language.template_suffix()),
                    language,
                    framework: def.framework,
                    kind: TemplateKind::DelegatedGenerator,
                    description: format!("Generated by {} ({})", generator.package, generator.binary),
                });
            }
        }

        out.sort_by(|a, b| (a.framework, a.language).cmp(&(b.framework, b.language)));
        Ok(out)
    }
}
