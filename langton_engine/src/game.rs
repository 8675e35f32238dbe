use crate::config::Config;
use crate::error::{Error, Result};
use crate::mirror::{create_cell_mirror, FileCellMirror, SyncReport};
use crate::snapshot;
use crate::status;
use crate::store::StateStore;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Outcome of a single invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunReport {
    /// Steps simulated by this invocation.
    pub steps_this_run: u64,
    /// Steps simulated since the very first run.
    pub total_steps: u64,
    pub black_cells: usize,
    pub summary: String,
}

/// Advances the simulation stored under `config.base_dir` by `config.steps`.
///
/// The order matters for anyone inspecting the files after a crash: mirror
/// files are updated step by step, the state document is written once all
/// steps are done, then the log, the summary and the README follow. An
/// interrupted run can leave the mirror ahead of the document;
/// [`sync_mirror`] repairs that.
///
/// A dry run loads the state and simulates the steps but writes nothing.
pub fn evolve(config: &Config, date: NaiveDate) -> Result<RunReport> {
    let store = StateStore::new(config.state_path());
    let mut mirror = create_cell_mirror(config.run_mirror_dir());

    let mut state = store.load()?;
    info!(
        steps = state.steps,
        x = state.ant.x,
        y = state.ant.y,
        run = config.steps,
        dry_run = config.dry_run,
        "starting run"
    );

    let steps_this_run = state.run(mirror.as_mut(), config.steps)?;
    let summary = status::summarize(steps_this_run, state.steps, state.black_cells());
    let report = RunReport {
        steps_this_run,
        total_steps: state.steps,
        black_cells: state.black_cells(),
        summary,
    };

    if config.dry_run {
        info!(steps = state.steps, "dry run finished, nothing written");
        return Ok(report);
    }

    store.save(&state)?;

    let picture = snapshot::render(&state);
    snapshot::append_log(&config.log_path(), &picture, state.steps, date)?;

    let summary_path = config.summary_path();
    fs::write(&summary_path, &report.summary).map_err(|e| Error::io(&summary_path, e))?;
    update_readme(config, &report.summary)?;

    info!(
        steps = report.total_steps,
        black_cells = report.black_cells,
        "run finished"
    );

    Ok(report)
}

/// Rebuilds the mirror directory from the state document.
pub fn sync_mirror(config: &Config) -> Result<SyncReport> {
    let state = StateStore::new(config.state_path()).load()?;
    let mut mirror = FileCellMirror::new(config.mirror_dir());

    let report = mirror.sync(&state.grid)?;
    info!(
        created = report.created,
        deleted = report.deleted,
        "mirror synchronised"
    );

    Ok(report)
}

fn update_readme(config: &Config, summary: &str) -> Result<()> {
    let path = config.readme_path();
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(&path, e)),
    };

    match status::patch_between_markers(
        &contents,
        status::STATUS_START_MARKER,
        status::STATUS_END_MARKER,
        &status::status_block(summary),
    ) {
        Some(patched) => fs::write(&path, patched).map_err(|e| Error::io(&path, e)),
        None => {
            debug!(path = %path.display(), "README has no status markers, leaving it alone");
            Ok(())
        }
    }
}
