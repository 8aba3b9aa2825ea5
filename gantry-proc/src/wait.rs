//! Process exit status handling.

use std::os::unix::process::ExitStatusExt;

/// Exit status of a terminated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Process exited normally with this code.
    Code(i32),
    /// Process was killed by a signal.
    Signaled(i32),
}

impl ExitStatus {
    /// Returns true if the process exited successfully (code 0).
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Code(0))
    }

    /// Returns the exit code if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Code(c) => Some(*c),
            ExitStatus::Signaled(_) => None,
        }
    }

    /// Returns the signal number if the process was killed by a signal.
    pub fn signal(&self) -> Option<i32> {
        match self {
            ExitStatus::Code(_) => None,
            ExitStatus::Signaled(s) => Some(*s),
        }
    }
}

/// Decode a reaped status into ExitStatus.
pub(crate) fn decode_status(status: std::process::ExitStatus) -> ExitStatus {
    if let Some(code) = status.code() {
        ExitStatus::Code(code)
    } else if let Some(sig) = status.signal() {
        ExitStatus::Signaled(sig)
    } else {
        // Stopped or continued, not reachable from wait without WUNTRACED
        ExitStatus::Code(-1)
    }
}
