use std::path::PathBuf;

/// Errors raised while loading, stepping or persisting a simulation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The canonical state document exists but could not be read or decoded.
    ///
    /// Never recovered from: resetting the state would discard every step
    /// simulated so far.
    #[error("state document {path} is corrupt")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A mirror file could not be written or removed.
    #[error("could not update mirror file {path}")]
    Mirror {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure (state document, log, summary, README).
    #[error("could not write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode the state document")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn mirror(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Mirror {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::CorruptState {
            path: path.into(),
            source: source.into(),
        }
    }
}
