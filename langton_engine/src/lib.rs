//! # langton_engine
//!
//! A Langton's Ant that keeps evolving across invocations.
//!
//! Each run loads the ant and its black cells from `state.json`, takes a
//! number of steps, mirrors every black cell as a file under `grid/`, writes
//! the state back and appends an ASCII snapshot to `ant-log.md`.

pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod grid;
pub mod mirror;
pub mod simulation;
pub mod snapshot;
pub mod status;
pub mod store;

pub use config::Config;
pub use entities::{Ant, Heading};
pub use error::{Error, Result};
pub use game::{evolve, sync_mirror, RunReport};
pub use grid::{Cell, Color, Grid};
pub use mirror::{create_cell_mirror, CellMirror, FileCellMirror, NoOpCellMirror, SyncReport};
pub use simulation::SimulationState;
pub use store::StateStore;
