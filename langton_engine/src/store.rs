use crate::error::{Error, Result};
use crate::simulation::SimulationState;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Reads and rewrites the canonical state document.
///
/// Assumes a single writer. Two processes sharing a document will
/// overwrite each other's progress.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the state, or the initial state if no document exists yet.
    ///
    /// A document that exists but cannot be decoded is an error and is
    /// never replaced with a fresh state.
    pub fn load(&self) -> Result<SimulationState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no state document, starting a new simulation");
                return Ok(SimulationState::default());
            }
            Err(e) => return Err(Error::corrupt(&self.path, e)),
        };

        let state: SimulationState =
            serde_json::from_str(&contents).map_err(|e| Error::corrupt(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            steps = state.steps,
            black_cells = state.grid.len(),
            "state document loaded"
        );

        Ok(state)
    }

    /// Replaces the document with `state`.
    ///
    /// The new document is written next to the old one and renamed over it.
    pub fn save(&self, state: &SimulationState) -> Result<()> {
        let contents = encode(state)?;
        let temp = self.temp_path();

        fs::write(&temp, contents).map_err(|e| Error::io(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(Error::io(&self.path, e));
        }

        debug!(path = %self.path.display(), steps = state.steps, "state document saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state.json".to_string());

        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }
}

/// Pretty-prints the state with 4-space indentation.
fn encode(state: &SimulationState) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    state.serialize(&mut serializer)?;

    Ok(buffer)
}
