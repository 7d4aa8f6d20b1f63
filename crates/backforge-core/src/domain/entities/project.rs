use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// A validated project name: usable both as a directory name and as the
/// `__PROJECT_NAME__` placeholder value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "project name",
            });
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where the project will be materialized.
///
/// `exists` is sampled once before any mutation; a `true` value is a
/// precondition failure, never a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    path: PathBuf,
    exists: bool,
}

impl ProjectTarget {
    /// `parent` must be absolute; the caller resolves the working directory.
    pub fn new(parent: &Path, name: &ProjectName, exists: bool) -> Result<Self, DomainError> {
        if !parent.is_absolute() {
            return Err(DomainError::InvalidProjectName {
                name: name.to_string(),
                reason: format!("parent directory '{}' is not absolute", parent.display()),
            });
        }
        Ok(Self {
            path: parent.join(name.as_str()),
            exists,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Directory the target lives in; delegated generators run here.
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_missing() {
        assert!(matches!(
            ProjectName::parse("   "),
            Err(DomainError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn dotfile_and_separator_names_are_invalid() {
        for bad in [".hidden", "a/b", "a\\b"] {
            assert!(
                matches!(
                    ProjectName::parse(bad),
                    Err(DomainError::InvalidProjectName { .. })
                ),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(ProjectName::parse(" my-api ").unwrap().as_str(), "my-api");
    }

    #[test]
    fn target_requires_absolute_parent() {
        let name = ProjectName::parse("api").unwrap();
        assert!(ProjectTarget::new(Path::new("relative"), &name, false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn target_joins_parent_and_name() {
        let name = ProjectName::parse("api").unwrap();
        let target = ProjectTarget::new(Path::new("/work"), &name, false).unwrap();
        assert_eq!(target.path(), Path::new("/work/api"));
        assert_eq!(target.parent(), Path::new("/work"));
        assert!(!target.exists());
    }
}
