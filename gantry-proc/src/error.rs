//! Process control error types.

use std::io;

/// Errors that can occur while controlling a child process.
#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    /// Spawning the child failed.
    #[error("spawn failed: {0}")]
    Spawn(#[source] io::Error),

    /// kill() failed.
    #[error("signal failed: {0}")]
    Signal(#[source] io::Error),

    /// Waiting on the child failed.
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
}
