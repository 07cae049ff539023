use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use planboard::config::EngineConfig;
use planboard::replay::{self, ReplayError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Config(#[from] planboard::config::ConfigError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "planboard-replay", about = "Replay a pointer event script against the canvas engine")]
struct Cli {
    /// JSON event script.
    script: PathBuf,

    /// Paper size overriding the script's own sheet (A0-A5, Letter, Legal, Tabloid).
    #[arg(long, env = "PLANBOARD_PAPER")]
    paper: Option<String>,

    /// Print only the final scene, without the action log.
    #[arg(long)]
    scene_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, script = %cli.script.display(), "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = EngineConfig::from_env()?;
    let script = replay::load_script(&cli.script)?;
    let report = replay::run(&script, cli.paper.as_deref(), config)?;

    let out = if cli.scene_only {
        serde_json::to_string_pretty(&report.assets)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{out}");
    Ok(())
}
