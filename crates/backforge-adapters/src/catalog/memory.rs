//! In-memory template catalog.

use backforge_core::{
    application::{ApplicationError, ports::TemplateCatalog},
    domain::{Framework, SourceLanguage, TemplateEntry},
};

/// Fixed list of entries, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<TemplateEntry>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: TemplateEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

impl FromIterator<TemplateEntry> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = TemplateEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TemplateCatalog for InMemoryCatalog {
    fn lookup(
        &self,
        language: SourceLanguage,
        framework: Framework,
    ) -> Result<Option<TemplateEntry>, ApplicationError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.matches(language, framework))
            .cloned())
    }

    fn list(&self) -> Result<Vec<TemplateEntry>, ApplicationError> {
        Ok(self.entries.clone())
    }
}
