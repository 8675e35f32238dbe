//! Human readable status text. Pure functions, no I/O.

/// Cumulative step count after which the ant is described as building its highway.
pub const HIGHWAY_THRESHOLD: u64 = 10_000;

pub const STATUS_START_MARKER: &str = "<!-- LATEST_STATUS_START -->";
pub const STATUS_END_MARKER: &str = "<!-- LATEST_STATUS_END -->";

/// Describes the latest run in a couple of sentences.
pub fn summarize(steps_this_run: u64, total_steps: u64, black_cells: usize) -> String {
    let phase = if total_steps > HIGHWAY_THRESHOLD {
        "The ant has entered the 'highway' phase, building a repeating diagonal structure that stretches into infinity."
    } else {
        "The ant is currently in its 'chaotic' phase, exploring local space and flipping tiles in a seemingly random dance."
    };

    format!(
        "The ant has completed another {} steps, reaching a total of {} steps. \
         There are currently {} black tiles on the grid. {}",
        steps_this_run, total_steps, black_cells, phase
    )
}

/// Replaces whatever sits between the first `start` marker and the first
/// `end` marker after it. Returns `None` when either marker is missing.
pub fn patch_between_markers(
    document: &str,
    start: &str,
    end: &str,
    replacement: &str,
) -> Option<String> {
    let (prefix, rest) = document.split_once(start)?;
    let (_, suffix) = rest.split_once(end)?;

    Some(format!("{}{}{}{}{}", prefix, start, replacement, end, suffix))
}

/// The block written between the README status markers.
pub fn status_block(summary: &str) -> String {
    format!("\n> {}\n", summary)
}
