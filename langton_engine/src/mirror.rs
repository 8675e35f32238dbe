use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, trace};

static MIRROR_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cell_(-?\d+)_(-?\d+)\.txt$").expect("valid mirror file pattern"));

/// Content of every mirror file.
pub const MIRROR_PAYLOAD: &str = "black";

/// Hooks the engine calls whenever a cell is flipped.
///
/// `create` runs when a cell turns black and `delete` when it turns white,
/// both before the ant moves off the cell.
pub trait CellMirror {
    #[allow(unused_variables)]
    fn create(&mut self, cell: Cell) -> Result<()> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn delete(&mut self, cell: Cell) -> Result<()> {
        Ok(())
    }
}

/// Mirror that ignores every flip, for running the engine without touching the disk.
pub struct NoOpCellMirror;
impl CellMirror for NoOpCellMirror {}

/// Creates the mirror for a run: file backed when given a directory, a
/// no-op otherwise.
pub fn create_cell_mirror(dir: Option<PathBuf>) -> Box<dyn CellMirror> {
    match dir {
        None => Box::new(NoOpCellMirror),
        Some(dir) => Box::new(FileCellMirror::new(dir)),
    }
}

/// Files created and removed by [`FileCellMirror::sync`].
#[derive(Debug, Default, Eq, PartialEq)]
pub struct SyncReport {
    pub created: usize,
    pub deleted: usize,
}

/// A file in the mirror directory whose name parses as a cell.
struct MirrorEntry {
    cell: Cell,
    path: PathBuf,
    /// Whether the name is exactly the one [`FileCellMirror`] would write,
    /// e.g. `cell_7_1.txt` but not `cell_007_1.txt`.
    canonical: bool,
}

/// Keeps one `cell_{x}_{y}.txt` file per black cell in a directory.
///
/// The directory must already exist. The mirror is write-only from the
/// engine's point of view: nothing ever loads state back out of it.
pub struct FileCellMirror {
    dir: PathBuf,
}

impl FileCellMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileCellMirror { dir: dir.into() }
    }

    /// Path of the mirror file for a cell.
    pub fn path_for(&self, cell: Cell) -> PathBuf {
        self.dir.join(file_name(cell))
    }

    /// Cells that currently have a canonically named mirror file.
    pub fn mirrored_cells(&self) -> Result<BTreeSet<Cell>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.canonical)
            .map(|entry| entry.cell)
            .collect())
    }

    /// Brings the directory in line with `grid`.
    ///
    /// Creates files for black cells that lack one and removes files for
    /// white cells. Files that parse as a cell under a non-canonical name
    /// (`cell_007_1.txt`, `cell_-0_5.txt`) are always removed, since the
    /// mirror never writes them. Anything else is left in place.
    pub fn sync(&mut self, grid: &Grid) -> Result<SyncReport> {
        let entries = self.entries()?;
        let mut report = SyncReport::default();
        let mut mirrored = BTreeSet::new();

        for entry in entries {
            if !entry.canonical || !grid.is_black(entry.cell) {
                debug!(path = %entry.path.display(), "removing stale mirror file");
                remove_mirror_file(&entry.path)?;
                report.deleted += 1;
            } else {
                mirrored.insert(entry.cell);
            }
        }

        for cell in grid.cells().filter(|cell| !mirrored.contains(cell)) {
            self.create(cell)?;
            report.created += 1;
        }

        Ok(report)
    }

    fn entries(&self) -> Result<Vec<MirrorEntry>> {
        let listing = fs::read_dir(&self.dir).map_err(|e| Error::mirror(&self.dir, e))?;
        let mut entries = Vec::new();

        for entry in listing {
            let entry = entry.map_err(|e| Error::mirror(&self.dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if let Some(cell) = parse_file_name(name) {
                entries.push(MirrorEntry {
                    cell,
                    path: entry.path(),
                    canonical: file_name(cell) == name,
                });
            }
        }

        Ok(entries)
    }
}

impl CellMirror for FileCellMirror {
    fn create(&mut self, cell: Cell) -> Result<()> {
        let path = self.path_for(cell);
        trace!(%cell, path = %path.display(), "creating mirror file");
        fs::write(&path, MIRROR_PAYLOAD).map_err(|e| Error::mirror(path, e))
    }

    fn delete(&mut self, cell: Cell) -> Result<()> {
        let path = self.path_for(cell);
        trace!(%cell, path = %path.display(), "deleting mirror file");
        remove_mirror_file(&path)
    }
}

/// Removes a mirror file; a file that is already gone is not an error.
fn remove_mirror_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "mirror file already absent");
            Ok(())
        }
        Err(e) => Err(Error::mirror(path, e)),
    }
}

fn file_name(cell: Cell) -> String {
    format!("cell_{}_{}.txt", cell.x, cell.y)
}

fn parse_file_name(name: &str) -> Option<Cell> {
    let captures = MIRROR_FILE.captures(name)?;
    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = captures.get(2)?.as_str().parse().ok()?;

    Some(Cell::new(x, y))
}
