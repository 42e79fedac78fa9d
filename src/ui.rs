//! Terminal output: colour policy and the few notices printed to stdout.
//!
//! Progress goes through `tracing` on stderr. Stdout only carries what a
//! user must see: skipped casks, the Homebrew bootstrap, and fatal errors.

use crate::platform::HostOs;
use colored::{Colorize, control};

/// Colour decision from the environment, highest priority first
///
/// - `NO_COLOR` set to anything disables colour (https://no-color.org/)
/// - `CLICOLOR_FORCE` other than `0` forces colour
/// - `CLICOLOR=0` disables colour
/// - otherwise colour only when stdout is a terminal
pub fn color_enabled(var: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    if var("NO_COLOR").is_some() {
        return false;
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if var("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    is_tty
}

/// Apply the colour policy to all later output. Call early in `main`.
pub fn init_colors() {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    control::set_override(color_enabled(|k| std::env::var(k).ok(), is_tty));
}

/// Text printed when a cask line is skipped on a host without casks
pub fn skip_message(line: &str, host: HostOs) -> String {
    format!("Cask {} skipped as it is not supported on {}.", line, host)
}

pub fn skip_notice(line: &str, host: HostOs) {
    println!("{} {}", "⚠".yellow(), skip_message(line, host).bold());
}

pub fn bootstrap_notice() {
    println!("{} Homebrew not found, installing...", "→".bold());
}

pub fn failure(err: &anyhow::Error) {
    println!("{} {}", "✗".red(), err);
}
