//! Run configuration
//!
//! Built by `main` from the command line and the environment. The library
//! never reads the environment itself.

use std::path::PathBuf;

/// Homebrew's official installer, piped through bash when brew is missing
pub const INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Where the Homebrew installer puts `brew` on each supported platform
const DEFAULT_PREFIXES: &[&str] = &[
    "/opt/homebrew",
    "/usr/local",
    "/home/linuxbrew/.linuxbrew",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Brewfile to process
    pub brewfile: PathBuf,
    /// Program used for every brew invocation
    pub brew: String,
    pub install_script_url: String,
    /// Print commands instead of running them
    pub dry_run: bool,
    /// Check for brew (and install it) before processing
    pub bootstrap: bool,
    /// Value of `HOMEBREW_PREFIX`, if set
    pub prefix: Option<PathBuf>,
    /// Prefixes searched for `bin/brew` after `prefix`
    pub fallback_prefixes: Vec<PathBuf>,
}

impl Config {
    pub fn new(brewfile: impl Into<PathBuf>) -> Self {
        Self {
            brewfile: brewfile.into(),
            brew: "brew".to_string(),
            install_script_url: INSTALL_SCRIPT_URL.to_string(),
            dry_run: false,
            bootstrap: true,
            prefix: None,
            fallback_prefixes: DEFAULT_PREFIXES.iter().map(|p| PathBuf::from(*p)).collect(),
        }
    }

    /// Fallback `brew` locations, probed after a fresh install
    pub fn brew_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(prefix) = &self.prefix {
            candidates.push(prefix.join("bin/brew"));
        }
        for prefix in &self.fallback_prefixes {
            let candidate = prefix.join("bin/brew");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    /// Whether the bootstrap step should run at all
    pub fn should_bootstrap(&self) -> bool {
        self.bootstrap && !self.dry_run
    }
}
