//! Maps a selection to the template that provisions it.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateCatalog},
    },
    domain::{
        ProvisioningStrategy, SelectionRecord, TemplateDescriptor, TemplateId,
        capabilities::generator_for,
    },
};

/// Version tag for delegated descriptors; the generator is installed at latest.
const GENERATOR_VERSION: &str = "latest";

pub struct TemplateResolver {
    catalog: Arc<dyn TemplateCatalog>,
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateResolver {
    pub fn new(catalog: Arc<dyn TemplateCatalog>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            catalog,
            filesystem,
        }
    }

    /// Resolve `selection` to a descriptor.
    ///
    /// Only reads: the catalog and the existence of the template root.
    #[instrument(skip_all, fields(language = %selection.language(), framework = %selection.framework()))]
    pub fn resolve(&self, selection: &SelectionRecord) -> Result<TemplateDescriptor, ApplicationError> {
        let language = selection.language();
        let framework = selection.framework();

        if let Some(generator) = generator_for(framework) {
            debug!(binary = generator.binary, "Framework uses a delegated generator");
            return Ok(TemplateDescriptor {
                id: TemplateId::new(
                    format!("{}-{}", generator.binary, language.template_suffix()),
                    GENERATOR_VERSION,
                ),
                strategy: ProvisioningStrategy::DelegatedGenerator { generator },
            });
        }

        let not_found = |reason: String| ApplicationError::TemplateNotFound {
            selection: format!("{} {}", framework.label(), language.label()),
            reason,
        };

        let entry = self
            .catalog
            .lookup(language, framework)?
            .ok_or_else(|| not_found("no template registered".to_string()))?;

        if !self.filesystem.is_dir(&entry.root) {
            return Err(not_found(format!(
                "template root {} does not exist",
                entry.root.display()
            )));
        }

        debug!(template = %entry.id, root = %entry.root.display(), "Template resolved");
        Ok(entry.descriptor())
    }
}
