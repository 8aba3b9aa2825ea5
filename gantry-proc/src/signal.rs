//! Signal delivery to child processes and process groups.

use std::io;

use crate::error::ProcError;
use crate::types::{Pid, ProcessGroupId};

/// Signals that can be sent to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt (Ctrl+C).
    Int,
    /// Terminate.
    Term,
    /// Kill (cannot be caught).
    Kill,
    /// Hangup.
    Hup,
    /// User-defined signal 1, the conventional soft-stop warning.
    Usr1,
    /// Custom signal number.
    Custom(i32),
}

impl Signal {
    /// Convert to the libc signal number.
    pub fn to_libc(self) -> libc::c_int {
        match self {
            Signal::Int => libc::SIGINT,
            Signal::Term => libc::SIGTERM,
            Signal::Kill => libc::SIGKILL,
            Signal::Hup => libc::SIGHUP,
            Signal::Usr1 => libc::SIGUSR1,
            Signal::Custom(n) => n,
        }
    }
}

/// Send a signal to a specific process.
pub fn signal_pid(pid: Pid, sig: Signal) -> Result<(), ProcError> {
    let ret = unsafe { libc::kill(pid.0, sig.to_libc()) };
    if ret != 0 {
        return Err(ProcError::Signal(io::Error::last_os_error()));
    }
    Ok(())
}

/// Send a signal to a process group.
///
/// The signal reaches every process in the group, so a job that forks
/// workers gets the soft stop as a whole rather than leader-only.
pub fn signal_pgid(pgid: ProcessGroupId, sig: Signal) -> Result<(), ProcError> {
    // Negative pid means send to process group
    let ret = unsafe { libc::kill(-pgid.0, sig.to_libc()) };
    if ret != 0 {
        return Err(ProcError::Signal(io::Error::last_os_error()));
    }
    Ok(())
}
