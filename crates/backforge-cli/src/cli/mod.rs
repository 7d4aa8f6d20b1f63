//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use backforge_core::domain::{Database, Extra, Framework, SourceLanguage};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "backforge",
    bin_name = "backforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Node.js backend scaffolding",
    long_about = "Backforge generates ready-to-run Node.js backends \
                  (Express, Fastify, Hono, NestJS) with optional database \
                  wiring, Docker support and lint tooling.",
    after_help = "EXAMPLES:\n\
        \x20 backforge new shop-api --framework express --language ts\n\
        \x20 backforge new catalog --framework fastify --database postgres --extra docker,lint -i\n\
        \x20 backforge list --framework hono\n\
        \x20 backforge completions bash > /usr/share/bash-completion/completions/backforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new backend project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 backforge new my-api                           # interactive\n\
            \x20 backforge new my-api -f hono -l js -y          # defaults for the rest\n\
            \x20 backforge new my-api -f nestjs -d mongodb -i   # install dependencies now\n\
            \x20 backforge new my-api -f express --dry-run      # show the plan only"
    )]
    New(NewArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 backforge list\n\
            \x20 backforge list --language js\n\
            \x20 backforge list --format json"
    )]
    List(ListArgs),

    /// Initialise a backforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 backforge init           # platform config directory\n\
            \x20 backforge init --local   # .backforge.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 backforge completions bash > ~/.local/share/bash-completion/completions/backforge\n\
            \x20 backforge completions zsh  > ~/.zfunc/_backforge\n\
            \x20 backforge completions fish > ~/.config/fish/completions/backforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the backforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 backforge config get defaults.framework\n\
            \x20 backforge config list\n\
            \x20 backforge config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `backforge new`.
///
/// Every choice left unset is taken from the config file, then prompted for
/// (interactive builds on a terminal), then defaulted.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name.  The project is created in `./<NAME>`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(
        short = 'l',
        long = "language",
        value_name = "LANGUAGE",
        value_enum,
        help = "Source language"
    )]
    pub language: Option<LanguageArg>,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        value_enum,
        help = "Web framework"
    )]
    pub framework: Option<FrameworkArg>,

    #[arg(
        short = 'd',
        long = "database",
        value_name = "DATABASE",
        value_enum,
        help = "Database integration"
    )]
    pub database: Option<DatabaseArg>,

    /// Repeat the flag or separate values with commas.
    #[arg(
        short = 'e',
        long = "extra",
        value_name = "EXTRA",
        value_enum,
        value_delimiter = ',',
        help = "Optional extras (docker, lint)"
    )]
    pub extras: Vec<ExtraArg>,

    /// Run `npm install` steps now instead of printing them.
    #[arg(short = 'i', long = "install", help = "Install dependencies after generating")]
    pub install: bool,

    /// Kill any single external command that runs longer than this.
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "Per-command timeout in seconds"
    )]
    pub timeout: Option<u64>,

    /// Skip prompts; unset choices fall back to defaults.
    #[arg(short = 'y', long = "yes", help = "Accept defaults without prompting")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `backforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by language.
    #[arg(short = 'l', long = "language", value_enum, help = "Filter by language")]
    pub language: Option<LanguageArg>,

    /// Filter by framework.
    #[arg(short = 'f', long = "framework", value_enum, help = "Filter by framework")]
    pub framework: Option<FrameworkArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `backforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.backforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `backforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `backforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Source languages accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LanguageArg {
    #[value(alias = "ts")]
    TypeScript,
    #[value(alias = "js")]
    JavaScript,
}

impl From<LanguageArg> for SourceLanguage {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::TypeScript => Self::TypeScript,
            LanguageArg::JavaScript => Self::JavaScript,
        }
    }
}

/// Frameworks accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FrameworkArg {
    Express,
    Fastify,
    Hono,
    #[value(name = "nestjs", alias = "nest")]
    NestJs,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Express => Self::Express,
            FrameworkArg::Fastify => Self::Fastify,
            FrameworkArg::Hono => Self::Hono,
            FrameworkArg::NestJs => Self::NestJs,
        }
    }
}

/// Database integrations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DatabaseArg {
    /// PostgreSQL via Prisma.
    #[value(alias = "postgresql", alias = "prisma")]
    Postgres,
    /// MongoDB via Mongoose.
    #[value(alias = "mongo", alias = "mongoose")]
    Mongodb,
    None,
}

impl From<DatabaseArg> for Database {
    fn from(arg: DatabaseArg) -> Self {
        match arg {
            DatabaseArg::Postgres => Self::PostgresPrisma,
            DatabaseArg::Mongodb => Self::MongoMongoose,
            DatabaseArg::None => Self::None,
        }
    }
}

/// Extras accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExtraArg {
    /// Dockerfile and docker-compose.yml.
    #[value(alias = "container")]
    Docker,
    /// Prettier and ESLint.
    #[value(alias = "eslint", alias = "prettier")]
    Lint,
}

impl From<ExtraArg> for Extra {
    fn from(arg: ExtraArg) -> Self {
        match arg {
            ExtraArg::Docker => Self::Container,
            ExtraArg::Lint => Self::LintFormat,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
