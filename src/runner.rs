//! External process execution
//!
//! Every brew call goes through a [`CommandRunner`], so the interpreter can
//! be driven by a fake in tests and by [`DryRunRunner`] from the CLI.

use colored::Colorize;
use std::fmt;
use std::io;
use std::process::{Command, ExitStatus};

/// A program and its arguments, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished process
///
/// `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: CommandStatus = CommandStatus { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Runs an [`Invocation`] to completion
pub trait CommandRunner {
    /// Block until the process exits. `Err` means it could not be started.
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus> {
        (**self).run(invocation)
    }
}

/// Spawns real processes with inherited stdio
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus> {
        tracing::debug!("spawning {}", invocation);
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()?;
        Ok(status.into())
    }
}

/// Prints each command instead of running it
#[derive(Debug, Default)]
pub struct DryRunRunner {
    pub printed: usize,
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<CommandStatus> {
        println!("{} {}", "Would run:".dimmed(), invocation.to_string().cyan());
        self.printed += 1;
        Ok(CommandStatus::SUCCESS)
    }
}
