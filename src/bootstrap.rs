//! Making sure Homebrew is installed before any directive runs.

use crate::config::Config;
use crate::error::{BundleError, Result};
use crate::runner::{CommandRunner, Invocation};
use crate::ui;

/// The shell pipeline that runs Homebrew's installer unattended
///
/// The leading newline answers the installer's "Press RETURN" prompt.
pub fn install_command(url: &str) -> Invocation {
    let script = format!(
        "printf \"\\n\" | /bin/bash -c \"$(curl -fsSL {})\"",
        url
    );
    Invocation::new("/bin/bash", ["-c".to_string(), script])
}

/// Whether `brew --version` runs and exits cleanly
fn probe<R: CommandRunner>(runner: &mut R, brew: &str) -> bool {
    match runner.run(&Invocation::new(brew, ["--version"])) {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!("{} --version could not be started: {}", brew, e);
            false
        }
    }
}

/// Ensure a working brew exists, installing Homebrew if needed
///
/// Returns the program to use for later brew invocations. This is
/// `config.brew` unless it only became reachable through one of
/// [`Config::brew_candidates`] after installation.
pub fn ensure_package_manager_present<R: CommandRunner>(
    runner: &mut R,
    config: &Config,
) -> Result<String> {
    if probe(runner, &config.brew) {
        return Ok(config.brew.clone());
    }

    ui::bootstrap_notice();

    let status = runner
        .run(&install_command(&config.install_script_url))
        .map_err(|e| BundleError::BootstrapFailure(e.to_string()))?;
    if !status.success() {
        return Err(BundleError::BootstrapFailure(format!(
            "installer finished with {}",
            status
        )));
    }

    if probe(runner, &config.brew) {
        return Ok(config.brew.clone());
    }

    for candidate in config.brew_candidates() {
        if !candidate.is_file() {
            continue;
        }
        let candidate = candidate.to_string_lossy().into_owned();
        if probe(runner, &candidate) {
            tracing::warn!("{} is not on PATH, using {}", config.brew, candidate);
            return Ok(candidate);
        }
    }

    Err(BundleError::BootstrapFailure(format!(
        "{} is still not available after installation",
        config.brew
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use tempfile::TempDir;

    const URL: &str = "https://example.invalid/install.sh";

    fn config() -> Config {
        let mut config = Config::new("Brewfile");
        config.install_script_url = URL.to_string();
        config.fallback_prefixes.clear();
        config
    }

    fn installer() -> String {
        install_command(URL).to_string()
    }

    #[test]
    fn test_install_command() {
        let inv = install_command(URL);
        assert_eq!(inv.program, "/bin/bash");
        assert_eq!(inv.args[0], "-c");
        assert!(inv.args[1].starts_with("printf \"\\n\" | /bin/bash -c"));
        assert!(inv.args[1].contains("curl -fsSL https://example.invalid/install.sh"));
    }

    #[test]
    fn test_present_brew_skips_install() {
        let mut runner = RecordingRunner::default();
        let brew = ensure_package_manager_present(&mut runner, &config()).unwrap();

        assert_eq!(brew, "brew");
        assert_eq!(runner.commands(), vec!["brew --version"]);
    }

    #[test]
    fn test_failing_probe_triggers_install() {
        let mut runner = RecordingRunner::default().fail_on("brew --version", 1);

        let result = ensure_package_manager_present(&mut runner, &config());

        assert_eq!(
            runner.commands(),
            vec!["brew --version".to_string(), installer(), "brew --version".to_string()]
        );
        assert!(matches!(result, Err(BundleError::BootstrapFailure(_))));
    }

    #[test]
    fn test_missing_brew_is_installed() {
        let mut runner = RecordingRunner::default().without_program("brew");

        let _ = ensure_package_manager_present(&mut runner, &config());

        assert_eq!(runner.commands()[0], "brew --version");
        assert_eq!(runner.commands()[1], installer());
    }

    #[test]
    fn test_installer_failure_is_fatal() {
        let mut runner = RecordingRunner::default()
            .without_program("brew")
            .fail_on(&installer(), 1);

        let result = ensure_package_manager_present(&mut runner, &config());

        assert!(matches!(result, Err(BundleError::BootstrapFailure(_))));
        assert_eq!(runner.calls.len(), 2);
    }

    #[test]
    fn test_installer_spawn_error_is_fatal() {
        let mut runner = RecordingRunner::default()
            .without_program("brew")
            .without_program("/bin/bash");

        let result = ensure_package_manager_present(&mut runner, &config());

        assert!(matches!(result, Err(BundleError::BootstrapFailure(_))));
        assert_eq!(runner.calls.len(), 2);
    }

    #[test]
    fn test_falls_back_to_prefix_candidate() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("brew"), "#!/bin/sh\n").unwrap();

        let mut config = config();
        config.prefix = Some(temp.path().to_path_buf());
        let mut runner = RecordingRunner::default().without_program("brew");

        let brew = ensure_package_manager_present(&mut runner, &config).unwrap();

        let expected = bin.join("brew").to_string_lossy().into_owned();
        assert_eq!(brew, expected);
        assert_eq!(
            runner.commands().last().unwrap(),
            &format!("{} --version", expected)
        );
    }

    #[test]
    fn test_absent_candidates_are_not_probed() {
        let temp = TempDir::new().unwrap();
        let mut config = config();
        config.prefix = Some(temp.path().to_path_buf());
        let mut runner = RecordingRunner::default().without_program("brew");

        let result = ensure_package_manager_present(&mut runner, &config);

        assert!(matches!(result, Err(BundleError::BootstrapFailure(_))));
        assert_eq!(runner.calls.len(), 3);
    }
}
