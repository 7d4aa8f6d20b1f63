//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use backforge_adapters::TracingEventSink;
use backforge_core::application::ports::{EventSink, ScaffoldEvent, Stage};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Command the user should type, indented and highlighted.
    pub fn command(&self, cmd: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {cmd}")
        } else {
            format!("  {}", cmd.bold())
        };
        self.term.write_line(&line)
    }

    /// Raw line written even in quiet mode; for machine-readable output.
    pub fn data(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    /// Event sink that renders engine progress on stderr.
    pub fn progress(&self) -> Arc<ProgressReporter> {
        let hidden = self.quiet || !io::stderr().is_terminal();
        Arc::new(ProgressReporter::new(hidden, self.no_color))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Spinner driven by [`ScaffoldEvent`]s. Every event is also logged.
///
/// External commands inherit the terminal, so the spinner never ticks on its
/// own; it redraws only when an event arrives.
pub struct ProgressReporter {
    bar: ProgressBar,
    no_color: bool,
    log: TracingEventSink,
}

impl ProgressReporter {
    fn new(hidden: bool, no_color: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar
        };
        Self {
            bar,
            no_color,
            log: TracingEventSink::new(),
        }
    }

    /// Clear the spinner line. Call once the run is over.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn line(&self, marker: &str, text: &str, ok: bool) {
        let line = match (self.no_color, ok) {
            (true, _) => format!("{marker} {text}"),
            (false, true) => format!("{} {text}", marker.green()),
            (false, false) => format!("{} {text}", marker.red()),
        };
        self.bar.println(line);
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: &ScaffoldEvent) {
        self.log.emit(event);
        match event {
            ScaffoldEvent::StageStarted(stage) => {
                self.bar.set_message(format!("{stage}..."));
                self.bar.tick();
            }
            ScaffoldEvent::StageFinished(stage) => {
                if matches!(stage, Stage::Clone | Stage::Compose) {
                    self.line("\u{2713}", &stage.to_string(), true);
                }
            }
            ScaffoldEvent::StepStarted {
                index,
                total,
                description,
            } => {
                self.bar
                    .set_message(format!("[{}/{}] {description}", index + 1, total));
                self.bar.tick();
            }
            ScaffoldEvent::StepFinished {
                index,
                total,
                description,
                success,
                ..
            } => {
                let text = format!("[{}/{}] {description}", index + 1, total);
                if *success {
                    self.line("\u{2713}", &text, true);
                } else {
                    self.line("\u{2717}", &text, false);
                }
            }
            ScaffoldEvent::StepDeferred { .. } => {}
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn no_color_flag_reported() {
        let no_color = make_manager(false, true);
        assert!(no_color.no_color);
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs::default();
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn hidden_reporter_accepts_every_event() {
        let reporter = ProgressReporter::new(true, true);
        reporter.emit(&ScaffoldEvent::StageStarted(Stage::Install));
        reporter.emit(&ScaffoldEvent::StepStarted {
            index: 0,
            total: 1,
            description: "Installing base dependencies".into(),
        });
        reporter.emit(&ScaffoldEvent::StepFinished {
            index: 0,
            total: 1,
            description: "Installing base dependencies".into(),
            exit_code: Some(0),
            success: true,
        });
        reporter.emit(&ScaffoldEvent::StepDeferred {
            command_line: "npm install".into(),
        });
        reporter.emit(&ScaffoldEvent::StageFinished(Stage::Install));
        reporter.finish();
        assert!(reporter.bar.is_finished());
    }
}
