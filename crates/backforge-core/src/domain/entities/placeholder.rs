//! Placeholder tokens and the substitution engine.
//!
//! A token `NAME` appears in template text as the marker `__NAME__`.
//! Substitution is a single left-to-right pass: inserted values are never
//! rescanned, and markers outside the fixed token set are left untouched.

use std::fmt;

use super::project::ProjectName;
use super::selection::SelectionRecord;

/// The fixed set of substitutable tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ProjectName,
    DbChoice,
    Lang,
    Framework,
}

impl Placeholder {
    pub const ALL: [Self; 4] = [Self::ProjectName, Self::DbChoice, Self::Lang, Self::Framework];

    pub const fn token(self) -> &'static str {
        match self {
            Self::ProjectName => "PROJECT_NAME",
            Self::DbChoice => "DB_CHOICE",
            Self::Lang => "LANG",
            Self::Framework => "FRAMEWORK",
        }
    }

    /// The literal marker as it appears in template text.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::ProjectName => "__PROJECT_NAME__",
            Self::DbChoice => "__DB_CHOICE__",
            Self::Lang => "__LANG__",
            Self::Framework => "__FRAMEWORK__",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Token to literal value, one entry per [`Placeholder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(Placeholder, String)>,
}

impl PlaceholderMap {
    pub fn for_selection(selection: &SelectionRecord, name: &ProjectName) -> Self {
        Self {
            entries: vec![
                (Placeholder::ProjectName, name.as_str().to_string()),
                (Placeholder::DbChoice, selection.database().label().to_string()),
                (Placeholder::Lang, selection.language().label().to_string()),
                (Placeholder::Framework, selection.framework().label().to_string()),
            ],
        }
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == placeholder)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Replace every covered marker in `text`.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(idx) = rest.find("__") {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            match self
                .entries
                .iter()
                .find(|(p, _)| tail.starts_with(p.marker()))
            {
                Some((placeholder, value)) => {
                    out.push_str(value);
                    rest = &tail[placeholder.marker().len()..];
                }
                None => {
                    // Advance one byte so "___NAME__" still matches at the next offset.
                    out.push('_');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Whether `text` still contains any covered marker.
    pub fn has_markers(&self, text: &str) -> bool {
        self.entries.iter().any(|(p, _)| text.contains(p.marker()))
    }
}

/// Free-function form of [`PlaceholderMap::substitute`].
pub fn substitute(text: &str, map: &PlaceholderMap) -> String {
    map.substitute(text)
}
