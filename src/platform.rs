//! Host operating system detection.
//!
//! Casks (GUI applications) only exist on macOS. Everything else Homebrew
//! does works on Linux as well, so this is the only platform question the
//! interpreter asks.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
    /// Any other OS, named as in `std::env::consts::OS`
    Other(&'static str),
}

impl HostOs {
    /// The OS this binary was compiled for
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            other => HostOs::Other(other),
        }
    }

    /// Whether `cask` and `cask_args` directives apply on this host
    pub fn supports_casks(self) -> bool {
        self == HostOs::MacOs
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::MacOs => write!(f, "macOS"),
            HostOs::Linux => write!(f, "Linux"),
            HostOs::Other(name) => write!(f, "{}", name),
        }
    }
}
