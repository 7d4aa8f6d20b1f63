//! The `SelectionRecord` aggregate and its builder.
//!
//! A `SelectionRecord` is the finalized set of user choices. Every variant
//! combination is valid, so construction cannot fail; the builder exists to
//! give callers sensible defaults and a readable call site.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Database, Extra, Framework, SourceLanguage};

/// The finalized set of user choices driving scaffold generation.
///
/// Immutable once built. Extras live in a `BTreeSet` so iteration order is
/// deterministic, which keeps generated artifacts and plans reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRecord {
    language: SourceLanguage,
    framework: Framework,
    database: Database,
    extras: BTreeSet<Extra>,
}

impl SelectionRecord {
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }

    pub const fn language(&self) -> SourceLanguage {
        self.language
    }
    pub const fn framework(&self) -> Framework {
        self.framework
    }
    pub const fn database(&self) -> Database {
        self.database
    }
    pub fn extras(&self) -> &BTreeSet<Extra> {
        &self.extras
    }
    pub fn has_extra(&self, extra: Extra) -> bool {
        self.extras.contains(&extra)
    }
}

impl fmt::Display for SelectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.framework.label(), self.language.label())?;
        if !self.database.is_none() {
            write!(f, " + {}", self.database.label())?;
        }
        for extra in &self.extras {
            write!(f, " + {}", extra.label())?;
        }
        Ok(())
    }
}

/// Builder for [`SelectionRecord`].
///
/// Defaults mirror the first choice of each interactive prompt:
/// TypeScript, Express, no database, no extras.
#[derive(Debug, Clone)]
pub struct SelectionBuilder {
    language: SourceLanguage,
    framework: Framework,
    database: Database,
    extras: BTreeSet<Extra>,
}

impl Default for SelectionBuilder {
    fn default() -> Self {
        Self {
            language: SourceLanguage::TypeScript,
            framework: Framework::Express,
            database: Database::None,
            extras: BTreeSet::new(),
        }
    }
}

impl SelectionBuilder {
    pub fn language(mut self, language: SourceLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = framework;
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    /// Add one extra. Adding the same extra twice is a no-op.
    pub fn extra(mut self, extra: Extra) -> Self {
        self.extras.insert(extra);
        self
    }

    pub fn extras(mut self, extras: impl IntoIterator<Item = Extra>) -> Self {
        self.extras.extend(extras);
        self
    }

    pub fn build(self) -> SelectionRecord {
        SelectionRecord {
            language: self.language,
            framework: self.framework,
            database: self.database,
            extras: self.extras,
        }
    }
}
