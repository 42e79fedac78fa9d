//! Brewfile interpreter: turns directives into brew invocations.
//!
//! Directives run strictly in file order. The first failing command stops
//! the run; nothing already installed is rolled back.
//!
//! # Examples
//!
//! ```no_run
//! use brewstrap::interpreter::Interpreter;
//! use brewstrap::runner::SystemRunner;
//! use std::path::Path;
//!
//! fn main() -> brewstrap::Result<()> {
//!     let mut interpreter = Interpreter::new(SystemRunner, "brew");
//!     let summary = interpreter.process_file(Path::new("Brewfile"))?;
//!     println!("{} formulae installed", summary.formulae);
//!     Ok(())
//! }
//! ```

use crate::brewfile::{self, Directive, ParseError};
use crate::error::{BundleError, Result};
use crate::platform::HostOs;
use crate::runner::{CommandRunner, Invocation};
use crate::ui;
use std::path::Path;

/// Cask settings collected from `cask_args` directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaskConfig {
    /// Install root for cask applications, from the first `appdir` seen
    pub appdir: Option<String>,
}

/// What a single line did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Blank, comment, unknown, or `cask_args` off macOS
    Ignored,
    /// A `cask_args` directive was applied
    Configured,
    /// A cask was skipped because the host has no casks
    Skipped,
    /// A brew command ran and succeeded
    Ran(Invocation),
}

/// Counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub taps: usize,
    pub formulae: usize,
    pub casks: usize,
    pub skipped: usize,
}

pub struct Interpreter<R> {
    runner: R,
    brew: String,
    host: HostOs,
    cask: CaskConfig,
    summary: Summary,
}

impl<R: CommandRunner> Interpreter<R> {
    pub fn new(runner: R, brew: impl Into<String>) -> Self {
        Self {
            runner,
            brew: brew.into(),
            host: HostOs::current(),
            cask: CaskConfig::default(),
            summary: Summary::default(),
        }
    }

    /// Pretend to run on `host` instead of the current OS
    pub fn with_host(mut self, host: HostOs) -> Self {
        self.host = host;
        self
    }

    pub fn cask_config(&self) -> &CaskConfig {
        &self.cask
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Read and process a Brewfile
    pub fn process_file(&mut self, path: &Path) -> Result<Summary> {
        let content = brewfile::read_brewfile(path)?;
        self.process_source(&content)
    }

    /// Process Brewfile content line by line, stopping at the first error
    pub fn process_source(&mut self, content: &str) -> Result<Summary> {
        for line in content.lines() {
            self.process_line(line)?;
        }

        tracing::info!(
            "processed {} taps, {} formulae, {} casks ({} skipped)",
            self.summary.taps,
            self.summary.formulae,
            self.summary.casks,
            self.summary.skipped
        );
        Ok(self.summary)
    }

    /// Process one line: classify, update cask settings, or run one command
    pub fn process_line(&mut self, line: &str) -> Result<Action> {
        let line = line.trim();
        let malformed = |source: ParseError| BundleError::MalformedDirective {
            line: line.to_string(),
            source,
        };

        match brewfile::classify(line) {
            Directive::Blank | Directive::Comment => Ok(Action::Ignored),

            Directive::Unknown(_) => {
                tracing::debug!("ignoring unsupported directive: {}", line);
                Ok(Action::Ignored)
            }

            Directive::CaskArgs(payload) => {
                if !self.host.supports_casks() {
                    return Ok(Action::Ignored);
                }
                let args = brewfile::parse_cask_args(payload).map_err(malformed)?;
                for arg in args {
                    if arg.key != "appdir" {
                        tracing::debug!("ignoring cask argument {}", arg.key);
                        continue;
                    }
                    match self.cask.appdir {
                        None => self.cask.appdir = Some(arg.value.to_string()),
                        Some(ref current) => {
                            tracing::debug!("appdir already {}, ignoring {}", current, arg.value)
                        }
                    }
                }
                Ok(Action::Configured)
            }

            Directive::Cask(payload) => {
                if !self.host.supports_casks() {
                    ui::skip_notice(line, self.host);
                    self.summary.skipped += 1;
                    return Ok(Action::Skipped);
                }
                let cask = brewfile::parse_cask(payload).map_err(malformed)?;
                let invocation = self.cask_install(cask.name, &cask.options);
                self.execute(line, invocation).inspect(|_| self.summary.casks += 1)
            }

            Directive::Brew(payload) => {
                let formula = brewfile::parse_brew(payload).map_err(malformed)?;
                let invocation = self.brew_command(["install", formula]);
                self.execute(line, invocation).inspect(|_| self.summary.formulae += 1)
            }

            Directive::Tap(payload) => {
                let tap = brewfile::parse_tap(payload).map_err(malformed)?;
                let invocation = self.brew_command(["tap", tap]);
                self.execute(line, invocation).inspect(|_| self.summary.taps += 1)
            }
        }
    }

    fn brew_command<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> Invocation {
        Invocation::new(self.brew.as_str(), args)
    }

    /// `brew install --cask [--appdir=DIR] [options...] <token>`
    fn cask_install(&self, token: &str, options: &[&str]) -> Invocation {
        let mut args = vec!["install".to_string(), "--cask".to_string()];
        if let Some(appdir) = &self.cask.appdir {
            args.push(format!("--appdir={}", appdir));
        }
        args.extend(options.iter().map(|opt| opt.to_string()));
        args.push(token.to_string());
        Invocation::new(self.brew.as_str(), args)
    }

    fn execute(&mut self, line: &str, invocation: Invocation) -> Result<Action> {
        tracing::info!("running {}", invocation);

        let status = self
            .runner
            .run(&invocation)
            .map_err(|source| BundleError::LaunchFailure {
                line: line.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BundleError::CommandFailure {
                line: line.to_string(),
                status,
            });
        }

        Ok(Action::Ran(invocation))
    }
}
