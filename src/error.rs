use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure to extract a duration from a single file. Recovered per file.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{program} not found; install ffmpeg (e.g., apt install ffmpeg)")]
    NotFound { program: String },

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid duration value: {0:?}")]
    InvalidDuration(String),
}

/// Failure that aborts the whole scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read directory {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),
}
