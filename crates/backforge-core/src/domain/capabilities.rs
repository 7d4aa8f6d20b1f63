//! Capability registry for frameworks, databases and extras.
//!
//! Every framework, database and extra is described exactly once by a static
//! definition. Plan building, artifact composition and template resolution
//! all query these tables instead of matching on variants at each call site.
//!
//! # Adding a New Framework
//!
//! 1. Add a variant to `Framework` in `value_objects.rs`
//! 2. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]
//! 3. Ship a template for each language (or mark it delegated)

use crate::domain::value_objects::{Database, Extra, Framework};

/// Package manager binary used by every install step.
pub const PACKAGE_MANAGER: &str = "npm";

// ── Framework definitions ────────────────────────────────────────────────────

/// An external tool that generates a full project tree by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorDef {
    /// npm package installed globally before the generator runs.
    pub package: &'static str,
    /// Binary the package puts on `PATH`.
    pub binary: &'static str,
}

/// How a framework's base project tree comes into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    /// A bundled template is cloned.
    Template,
    /// An external generator produces the tree.
    Delegated(GeneratorDef),
}

/// Describes everything the engine needs to know about one framework.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkDef {
    pub framework: Framework,
    pub provisioning: Provisioning,
    /// `package.json` script that starts the development server.
    pub start_script: &'static str,
    /// Packages installed by the framework-specific install step.
    /// Empty means the template manifest already declares everything.
    pub packages: &'static [&'static str],
}

/// Single source of truth for framework capabilities.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    FrameworkDef {
        framework: Framework::Express,
        provisioning: Provisioning::Template,
        start_script: "dev",
        packages: &[],
    },
    FrameworkDef {
        framework: Framework::Fastify,
        provisioning: Provisioning::Template,
        start_script: "dev",
        packages: &["fastify"],
    },
    FrameworkDef {
        framework: Framework::Hono,
        provisioning: Provisioning::Template,
        start_script: "dev",
        packages: &["hono", "@hono/node-server"],
    },
    FrameworkDef {
        framework: Framework::NestJs,
        provisioning: Provisioning::Delegated(GeneratorDef {
            package: "@nestjs/cli",
            binary: "nest",
        }),
        start_script: "start:dev",
        packages: &[],
    },
];

// ── Database definitions ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct DatabaseDef {
    pub database: Database,
    /// Runtime packages for template-based projects.
    pub packages: &'static [&'static str],
    /// Packages for delegated projects, when they differ.
    pub delegated_packages: Option<&'static [&'static str]>,
}

/// Databases with an integration. `Database::None` is deliberately absent.
pub static DATABASE_REGISTRY: &[DatabaseDef] = &[
    DatabaseDef {
        database: Database::PostgresPrisma,
        packages: &["prisma", "@prisma/client"],
        delegated_packages: None,
    },
    DatabaseDef {
        database: Database::MongoMongoose,
        packages: &["mongoose"],
        delegated_packages: Some(&["@nestjs/mongoose", "mongoose"]),
    },
];

// ── Extra definitions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ExtraDef {
    pub extra: Extra,
    /// Tooling installed as dev dependencies. Empty means no install step.
    pub dev_packages: &'static [&'static str],
}

pub static EXTRA_REGISTRY: &[ExtraDef] = &[
    ExtraDef {
        extra: Extra::Container,
        dev_packages: &[],
    },
    ExtraDef {
        extra: Extra::LintFormat,
        dev_packages: &[
            "eslint",
            "prettier",
            "eslint-config-prettier",
            "eslint-plugin-prettier",
        ],
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────

/// Find the capability definition for a framework.
///
/// Returns `None` only if the framework is not registered, a programming
/// error caught by `assert_registry_integrity`.
pub fn find_framework(framework: Framework) -> Option<&'static FrameworkDef> {
    FRAMEWORK_REGISTRY
        .iter()
        .find(|def| def.framework == framework)
}

pub fn find_database(database: Database) -> Option<&'static DatabaseDef> {
    DATABASE_REGISTRY
        .iter()
        .find(|def| def.database == database)
}

pub fn find_extra(extra: Extra) -> Option<&'static ExtraDef> {
    EXTRA_REGISTRY.iter().find(|def| def.extra == extra)
}

/// The external generator for `framework`, if it is delegated.
pub fn generator_for(framework: Framework) -> Option<GeneratorDef> {
    match find_framework(framework)?.provisioning {
        Provisioning::Delegated(generator) => Some(generator),
        Provisioning::Template => None,
    }
}

/// Shell-style command that starts the dev server, e.g. `npm run dev`.
pub fn start_command(framework: Framework) -> String {
    let script = find_framework(framework)
        .map(|def| def.start_script)
        .unwrap_or("dev");
    format!("{PACKAGE_MANAGER} run {script}")
}

/// Runtime packages a database integration needs for this framework.
pub fn database_packages(database: Database, framework: Framework) -> &'static [&'static str] {
    let Some(def) = find_database(database) else {
        return &[];
    };
    match (generator_for(framework), def.delegated_packages) {
        (Some(_), Some(packages)) => packages,
        _ => def.packages,
    }
}

/// Runtime packages installed by the framework-specific step.
pub fn framework_packages(framework: Framework) -> &'static [&'static str] {
    find_framework(framework).map_or(&[], |def| def.packages)
}

/// Dev tooling packages for an extra.
pub fn extra_dev_packages(extra: Extra) -> &'static [&'static str] {
    find_extra(extra).map_or(&[], |def| def.dev_packages)
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for framework in Framework::ALL {
        assert!(
            find_framework(framework).is_some(),
            "Framework {framework:?} is not registered"
        );
    }
    for database in Database::ALL {
        assert_eq!(
            find_database(database).is_some(),
            !database.is_none(),
            "Database {database:?}: registration must match is_none()"
        );
    }
    for extra in Extra::ALL {
        assert!(find_extra(extra).is_some(), "Extra {extra:?} is not registered");
    }
    for def in DATABASE_REGISTRY {
        assert!(
            !def.packages.is_empty(),
            "Database {:?} declares no packages",
            def.database
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn only_nestjs_is_delegated() {
        assert_eq!(
            generator_for(Framework::NestJs),
            Some(GeneratorDef {
                package: "@nestjs/cli",
                binary: "nest"
            })
        );
        for fw in [Framework::Express, Framework::Fastify, Framework::Hono] {
            assert!(generator_for(fw).is_none(), "{fw} should use a template");
        }
    }

    #[test]
    fn start_command_differs_for_delegated_framework() {
        assert_eq!(start_command(Framework::Express), "npm run dev");
        assert_eq!(start_command(Framework::NestJs), "npm run start:dev");
    }

    #[test]
    fn mongo_packages_depend_on_provisioning() {
        assert_eq!(
            database_packages(Database::MongoMongoose, Framework::Express),
            &["mongoose"]
        );
        assert_eq!(
            database_packages(Database::MongoMongoose, Framework::NestJs),
            &["@nestjs/mongoose", "mongoose"]
        );
        assert_eq!(
            database_packages(Database::PostgresPrisma, Framework::NestJs),
            &["prisma", "@prisma/client"]
        );
    }

    #[test]
    fn no_database_means_no_packages() {
        assert!(database_packages(Database::None, Framework::Express).is_empty());
    }

    #[test]
    fn express_needs_no_framework_install() {
        assert!(framework_packages(Framework::Express).is_empty());
        assert_eq!(framework_packages(Framework::Fastify), &["fastify"]);
    }

    #[test]
    fn container_has_no_tooling() {
        assert!(extra_dev_packages(Extra::Container).is_empty());
        assert_eq!(extra_dev_packages(Extra::LintFormat).len(), 4);
    }
}
