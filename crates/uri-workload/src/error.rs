use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the workload generator.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while validating a workload or generating a trace.
///
/// None of these are retryable: the generator is a one-shot batch tool and
/// every error ends the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad user input detected before any generation starts.
    #[error("configuration error: {0}")]
    Config(String),
    /// The html file list yielded no usable entries.
    #[error("{} was (likely) empty", .0.display())]
    EmptyFileList(PathBuf),
    /// A rank sampler was asked to draw from nothing.
    #[error("cannot draw from an empty candidate set")]
    EmptyCandidates,
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Data and I/O failures abort generation mid-way; configuration errors
    /// are caught up front.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Config(_))
    }
}
