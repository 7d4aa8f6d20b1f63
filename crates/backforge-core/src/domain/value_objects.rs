//! Domain value objects: SourceLanguage, Framework, Database, Extra.
//!
//! # Design
//!
//! These are pure `Copy` value types compared by value.
//! They hold NO capability logic. Install packages, start scripts and
//! provisioning strategies live in `capabilities.rs`. This file's only job is
//! to define the types, their string representations, and their `FromStr`
//! parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str`/`label` arms and the `FromStr` arm here
//! 3. Add a capability entry in `capabilities.rs`
//! 4. Done; nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── SourceLanguage ────────────────────────────────────────────────────────────

/// Source language of the generated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    TypeScript,
    JavaScript,
}

impl SourceLanguage {
    pub const ALL: [Self; 2] = [Self::TypeScript, Self::JavaScript];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }

    /// Human label, also the `__LANG__` placeholder value.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
        }
    }

    /// Suffix used by bundled template ids (`express-ts`, `hono-js`).
    pub const fn template_suffix(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            other => Err(DomainError::UnknownOption {
                option: "language",
                value: other.to_string(),
            }),
        }
    }
}

// ── Framework ─────────────────────────────────────────────────────────────────

/// Web framework the backend is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Express,
    Fastify,
    Hono,
    NestJs,
}

impl Framework {
    pub const ALL: [Self; 4] = [Self::Express, Self::Fastify, Self::Hono, Self::NestJs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::Hono => "hono",
            Self::NestJs => "nestjs",
        }
    }

    /// Human label, also the `__FRAMEWORK__` placeholder value.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Express => "Express",
            Self::Fastify => "Fastify",
            Self::Hono => "Hono",
            Self::NestJs => "NestJS",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "express" => Ok(Self::Express),
            "fastify" => Ok(Self::Fastify),
            "hono" => Ok(Self::Hono),
            "nestjs" | "nest" => Ok(Self::NestJs),
            other => Err(DomainError::UnknownOption {
                option: "framework",
                value: other.to_string(),
            }),
        }
    }
}

// ── Database ──────────────────────────────────────────────────────────────────

/// Database integration wired into the generated project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    /// PostgreSQL through the Prisma ORM.
    PostgresPrisma,
    /// MongoDB through Mongoose.
    MongoMongoose,
    #[default]
    None,
}

impl Database {
    pub const ALL: [Self; 3] = [Self::PostgresPrisma, Self::MongoMongoose, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PostgresPrisma => "postgres",
            Self::MongoMongoose => "mongodb",
            Self::None => "none",
        }
    }

    /// Human label, also the `__DB_CHOICE__` placeholder value.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PostgresPrisma => "PostgreSQL (Prisma)",
            Self::MongoMongoose => "MongoDB (Mongoose)",
            Self::None => "None",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "prisma" | "pg" => Ok(Self::PostgresPrisma),
            "mongodb" | "mongo" | "mongoose" => Ok(Self::MongoMongoose),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::UnknownOption {
                option: "database",
                value: other.to_string(),
            }),
        }
    }
}

// ── Extra ─────────────────────────────────────────────────────────────────────

/// Optional, independently toggleable feature composed onto the project.
///
/// `Ord` is derived so a `BTreeSet<Extra>` iterates in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extra {
    /// Dockerfile + docker-compose.yml.
    Container,
    /// Prettier + ESLint configuration and tooling.
    LintFormat,
}

impl Extra {
    pub const ALL: [Self; 2] = [Self::Container, Self::LintFormat];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "docker",
            Self::LintFormat => "lint",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Container => "Docker Support",
            Self::LintFormat => "Prettier + ESLint",
        }
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extra {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker" | "container" => Ok(Self::Container),
            "lint" | "eslint" | "prettier" | "lint-format" => Ok(Self::LintFormat),
            other => Err(DomainError::UnknownOption {
                option: "extra",
                value: other.to_string(),
            }),
        }
    }
}
