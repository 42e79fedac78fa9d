use brewstrap::bootstrap;
use brewstrap::brewfile;
use brewstrap::runner::{DryRunRunner, SystemRunner};
use brewstrap::{Config, Interpreter, ui};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "brewstrap")]
#[command(author, version, about = "Install packages from a Brewfile", long_about = None)]
struct Cli {
    /// Path to the Brewfile
    #[arg(short, long)]
    file: PathBuf,

    /// brew executable to invoke
    #[arg(long, default_value = "brew")]
    brew: String,

    /// Print brew commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Do not check for Homebrew (or install it) first
    #[arg(long)]
    no_bootstrap: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(&self.file);
        config.brew = self.brew.clone();
        config.dry_run = self.dry_run;
        config.bootstrap = !self.no_bootstrap;
        config.prefix = std::env::var_os("HOMEBREW_PREFIX").map(PathBuf::from);
        config
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    // Read first so a bad path fails before Homebrew is touched
    let content = brewfile::read_brewfile(&config.brewfile)?;

    if config.dry_run {
        let mut interpreter = Interpreter::new(DryRunRunner::default(), config.brew.as_str());
        interpreter.process_source(&content)?;
        return Ok(());
    }

    let mut runner = SystemRunner;
    let brew = if config.should_bootstrap() {
        bootstrap::ensure_package_manager_present(&mut runner, config)?
    } else {
        config.brew.clone()
    };

    let mut interpreter = Interpreter::new(runner, brew);
    interpreter.process_source(&content)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    ui::init_colors();

    match run(&cli.config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::failure(&err);
            ExitCode::FAILURE
        }
    }
}
