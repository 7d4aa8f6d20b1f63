//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use clap::{ArgAction, Args};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Repeat for more detail on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Log verbosity on stderr:
    (none)  warnings and errors
    -v      stages and each npm / nest step
    -vv     resolved template, invocation plan, copied files
    -vvv    everything"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. `list --format json` and
    /// `config get` still print their data.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output. Also set by `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read this TOML file instead of the platform and `.backforge.toml`
    /// locations. It must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this config file"
    )]
    pub config: Option<PathBuf>,
}
