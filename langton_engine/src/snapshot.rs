use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use crate::simulation::SimulationState;
use chrono::NaiveDate;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const ANT_SYMBOL: char = 'A';
pub const BLACK_SYMBOL: char = '█';
pub const WHITE_SYMBOL: char = ' ';

/// Inclusive rectangle of cells drawn in a snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    /// The extent of the black cells, or of the ant's cell when there are
    /// none, padded by one cell on every side.
    pub fn around(grid: &Grid, ant: Cell) -> Bounds {
        let mut cells = grid.cells();
        let first = cells.next().unwrap_or(ant);

        let tight = cells.fold(
            Bounds {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |bounds, cell| Bounds {
                min_x: bounds.min_x.min(cell.x),
                max_x: bounds.max_x.max(cell.x),
                min_y: bounds.min_y.min(cell.y),
                max_y: bounds.max_y.max(cell.y),
            },
        );

        Bounds {
            min_x: tight.min_x - 1,
            max_x: tight.max_x + 1,
            min_y: tight.min_y - 1,
            max_y: tight.max_y + 1,
        }
    }
}

/// Draws the grid around the ant as rows of characters, top row first.
///
/// The ant's cell is always drawn as the ant, even when it stands on a
/// black cell.
pub fn render(state: &SimulationState) -> String {
    let ant = state.ant.cell();
    let bounds = Bounds::around(&state.grid, ant);

    (bounds.min_y..=bounds.max_y)
        .rev()
        .map(|y| {
            (bounds.min_x..=bounds.max_x)
                .map(|x| {
                    let cell = Cell::new(x, y);
                    if cell == ant {
                        ANT_SYMBOL
                    } else if state.grid.is_black(cell) {
                        BLACK_SYMBOL
                    } else {
                        WHITE_SYMBOL
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats one log entry as a table row holding the step count, the date
/// and the fenced snapshot.
pub fn log_entry(snapshot: &str, steps: u64, date: NaiveDate) -> String {
    format!(
        "| {} | {} |\n```\n{}\n``` |\n",
        steps,
        date.format("%Y-%m-%d"),
        snapshot
    )
}

/// Appends an entry to the log, creating the log if needed.
pub fn append_log(path: &Path, snapshot: &str, steps: u64, date: NaiveDate) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.write_all(log_entry(snapshot, steps, date).as_bytes())
        .map_err(|e| Error::io(path, e))
}
