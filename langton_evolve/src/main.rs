//! Command-line runner for a persistent Langton's Ant.
//!
//! Every invocation picks up where the previous one stopped, so the ant keeps
//! evolving one batch of steps at a time (typically from a scheduled job).

mod logging;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use langton_engine::config::DEFAULT_STEPS;
use langton_engine::Config;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "langton-evolve",
    version,
    about = "Advance a persistent Langton's Ant and log its progress"
)]
struct Cli {
    /// Directory holding `state.json`, `grid/`, `ant-log.md` and friends.
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    /// Print more diagnostics on stderr (repeat for more).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Simulate another batch of steps (the default).
    Run {
        /// Steps to simulate in this run.
        #[arg(short, long, default_value_t = DEFAULT_STEPS)]
        steps: u64,

        /// Simulate the steps without writing any file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Rebuild `grid/` from `state.json`, e.g. after an interrupted run.
    SyncMirror,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Run {
        steps: DEFAULT_STEPS,
        dry_run: false,
    });

    match command {
        Command::Run { steps, dry_run } => {
            cmd_run(Config::new(cli.base_dir, steps).with_dry_run(dry_run))
        }
        Command::SyncMirror => cmd_sync_mirror(Config::new(cli.base_dir, 0)),
    }
}

fn cmd_run(config: Config) -> Result<()> {
    if !config.dry_run {
        prepare_mirror_dir(&config)?;
    }

    let report = langton_engine::evolve(&config, Local::now().date_naive())
        .with_context(|| format!("evolve ant in {}", config.base_dir.display()))?;

    info!(
        steps = report.steps_this_run,
        total = report.total_steps,
        "ant evolved"
    );
    println!("{}", report.summary);
    Ok(())
}

fn cmd_sync_mirror(config: Config) -> Result<()> {
    prepare_mirror_dir(&config)?;

    let report = langton_engine::sync_mirror(&config)
        .with_context(|| format!("sync mirror in {}", config.base_dir.display()))?;

    println!(
        "created {} and deleted {} mirror files",
        report.created, report.deleted
    );
    Ok(())
}

fn prepare_mirror_dir(config: &Config) -> Result<()> {
    let dir = config.mirror_dir();
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))
}
