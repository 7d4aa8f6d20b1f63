//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `BACKFORGE_` prefix, `__` between sections
//!    (`BACKFORGE_INSTALL__AUTO_INSTALL=true`)
//! 3. `.backforge.toml` in the current directory
//! 4. Config file (`--config`, or the platform config directory)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable that pins the templates directory.
pub const TEMPLATES_DIR_ENV: &str = "BACKFORGE_TEMPLATES_DIR";

/// File name used by `init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".backforge.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default choices for new projects.
    pub defaults: Defaults,
    /// Dependency installation settings.
    pub install: InstallConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Values used when `new` is given no flag and no prompt is shown.
///
/// Strings are parsed with the core `FromStr` impls, so aliases such as
/// `ts` or `mongo` work here too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: Option<String>,
    pub framework: Option<String>,
    pub database: Option<String>,
    pub extras: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub auto_install: bool,
    pub command_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading explicit config file");
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                builder = builder.add_source(
                    File::from(Self::config_path())
                        .format(FileFormat::Toml)
                        .required(false),
                );
                builder = builder.add_source(
                    File::from(Path::new(LOCAL_CONFIG_FILE))
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("BACKFORGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.extras"),
            )
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.backforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "backforge", "backforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Directories that may hold the bundled templates, best first:
    /// `$BACKFORGE_TEMPLATES_DIR`, `templates.dir`, `./templates`,
    /// `<exe dir>/templates`, `<exe dir>/../templates`.
    ///
    /// Only existing directories are returned. Whether one actually holds
    /// templates is decided when the catalog is loaded.
    pub fn template_dir_candidates(&self) -> Vec<PathBuf> {
        let from_env = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let mut candidates: Vec<PathBuf> = Vec::new();
        candidates.extend(from_env);
        candidates.extend(self.templates.dir.clone());
        candidates.push(PathBuf::from("templates"));
        if let Some(dir) = exe_dir {
            candidates.push(dir.join("templates"));
            candidates.push(dir.join("..").join("templates"));
        }

        candidates.retain(|dir| dir.is_dir());
        debug!(?candidates, "Template directory candidates");
        candidates
    }
}
