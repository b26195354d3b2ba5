use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use publish_site::config::{CliOverrides, Config, PublishConfig};
use publish_site::{ensure_repository, publish_changes, GitCli, PublishError};

/// Exit status for bad configuration or startup failures
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "publish")]
#[command(about = "Stage, commit and push the site files to the hosting remote", long_about = None)]
struct Cli {
    /// Commit message to use
    #[arg(short, long)]
    message: Option<String>,

    /// Stage all changes instead of the configured file list
    #[arg(long)]
    all: bool,

    /// Do everything except push to the remote
    #[arg(long)]
    no_push: bool,

    /// Remote name to push to (default: origin)
    #[arg(long)]
    remote: Option<String>,

    /// Branch name to push (default: main)
    #[arg(long)]
    branch: Option<String>,

    /// Show the commit and push without running them
    #[arg(long)]
    dry_run: bool,

    /// Path to the site repository (defaults to current directory)
    #[arg(short = 'C', long = "path", value_name = "DIR")]
    path: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            message: self.message.clone(),
            stage_all: self.all,
            no_push: self.no_push,
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    match run_publish_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_failure(&err)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_publish_command(cli: &Cli) -> Result<()> {
    let workdir = match &cli.path {
        Some(p) => p.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let git = GitCli::locate(&workdir).map_err(|e| PublishError::Spawn {
        command: "git".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, e),
    })?;

    // Outside a repository nothing else matters, config errors included
    ensure_repository(&git)?;

    let file_config = Config::load(cli.config.as_deref())?;
    let config = PublishConfig::resolve(cli.overrides(), file_config)?;

    let report = publish_changes(&git, &config)?;
    tracing::debug!(?report, "publish report");

    println!("{} Done", "✓".green().bold());
    Ok(())
}

/// Print the failure and pick the exit status for it
fn report_failure(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PublishError>() {
        Some(publish_err) => {
            eprintln!("{} {}", "✗".red(), publish_err);
            if let Some(output) = publish_err.output() {
                eprintln!("{}", output);
            }
            publish_err.exit_code()
        }
        None => {
            eprintln!("{} {:#}", "✗".red(), err);
            EXIT_USAGE
        }
    }
}
