//! Library interface for brewstrap
//!
//! Parses Brewfiles and drives an external `brew` to install the taps,
//! formulae and casks they list. The binary is a thin wrapper around
//! [`interpreter::Interpreter`] and [`bootstrap::ensure_package_manager_present`].

pub mod bootstrap;
pub mod brewfile;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod platform;
pub mod runner;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use error::{BundleError, Result};
pub use interpreter::{Interpreter, Summary};
