//! Template identity and provisioning strategy.
//!
//! ```text
//! SelectionRecord ──resolve──► TemplateDescriptor
//!                               ├── id: TemplateId (name@version)
//!                               └── strategy: ProvisioningStrategy
//!                                    ├── StandardTemplate { root }
//!                                    └── DelegatedGenerator { generator }
//! ```
//!
//! A `TemplateEntry` is what a catalog knows about one bundled template; the
//! resolver turns the matching entry into a descriptor.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::capabilities::GeneratorDef;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{Framework, SourceLanguage};

/// Template identifier: `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    /// # Panics
    /// Panics if `name` contains '@'. Use [`TemplateId::parse`] for untrusted input.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.contains('@'), "template name cannot contain '@': {name}");
        Self {
            name,
            version: version.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(version), None) if !name.is_empty() && !version.is_empty() => {
                Ok(Self::new(name, version))
            }
            _ => Err(DomainError::InvalidTemplateId(raw.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    StandardTemplate,
    DelegatedGenerator,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StandardTemplate => "template",
            Self::DelegatedGenerator => "generator",
        })
    }
}

/// How the base project tree is produced. Chosen once by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningStrategy {
    /// Clone the directory tree at `root`.
    StandardTemplate { root: PathBuf },
    /// Let an external tool generate the tree.
    DelegatedGenerator { generator: GeneratorDef },
}

/// The resolved template for one selection. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub strategy: ProvisioningStrategy,
}

impl TemplateDescriptor {
    pub fn kind(&self) -> TemplateKind {
        match self.strategy {
            ProvisioningStrategy::StandardTemplate { .. } => TemplateKind::StandardTemplate,
            ProvisioningStrategy::DelegatedGenerator { .. } => TemplateKind::DelegatedGenerator,
        }
    }

    /// Template root, for standard templates only.
    pub fn root(&self) -> Option<&Path> {
        match &self.strategy {
            ProvisioningStrategy::StandardTemplate { root } => Some(root),
            ProvisioningStrategy::DelegatedGenerator { .. } => None,
        }
    }

    pub fn generator(&self) -> Option<GeneratorDef> {
        match self.strategy {
            ProvisioningStrategy::DelegatedGenerator { generator } => Some(generator),
            ProvisioningStrategy::StandardTemplate { .. } => None,
        }
    }
}

/// A template a catalog can offer, keyed by `(language, framework)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub id: TemplateId,
    pub language: SourceLanguage,
    pub framework: Framework,
    pub description: String,
    pub root: PathBuf,
}

impl TemplateEntry {
    pub fn matches(&self, language: SourceLanguage, framework: Framework) -> bool {
        self.language == language && self.framework == framework
    }

    pub fn descriptor(&self) -> TemplateDescriptor {
        TemplateDescriptor {
            id: self.id.clone(),
            strategy: ProvisioningStrategy::StandardTemplate {
                root: self.root.clone(),
            },
        }
    }
}
