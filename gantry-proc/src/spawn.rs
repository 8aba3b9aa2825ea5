//! Child process spawning.

use std::collections::BTreeMap;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child as StdChild, Command};

use crate::error::ProcError;
use crate::signal::{signal_pgid, signal_pid, Signal};
use crate::types::{Pid, ProcessGroupId};
use crate::wait::{decode_status, ExitStatus};

/// Specification for spawning a child process.
pub struct SpawnSpec {
    /// Program to execute (a path, or a command name resolved via PATH).
    pub program: String,
    /// Arguments to pass (argv[1..]).
    pub args: Vec<String>,
    /// Working directory for the child.
    pub cwd: PathBuf,
    /// Environment variables layered over the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl SpawnSpec {
    /// Create a new SpawnSpec with the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: PathBuf::from("."),
            env: BTreeMap::new(),
        }
    }

    /// Set the arguments.
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Set environment variable overrides.
    pub fn env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

/// Spawn a child process in its own process group.
///
/// The child inherits stdin/stdout/stderr and the full environment of the
/// caller, with `spec.env` entries layered on top. Making the child a group
/// leader lets one kill(2) reach the whole job tree.
pub fn spawn(spec: SpawnSpec) -> Result<ProcChild, ProcError> {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).current_dir(&spec.cwd).process_group(0);
    for (key, value) in &spec.env {
        cmd.env(key, value);
    }

    let child = cmd.spawn().map_err(ProcError::Spawn)?;
    let pid = Pid::new(child.id() as i32);

    Ok(ProcChild {
        pid,
        // Group leader: pgid == pid
        pgid: ProcessGroupId::new(pid.as_raw()),
        child,
    })
}

/// A spawned child process and its process group.
pub struct ProcChild {
    pid: Pid,
    pgid: ProcessGroupId,
    child: StdChild,
}

impl ProcChild {
    /// Get the child's PID.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Get the child's process group ID.
    pub fn pgid(&self) -> ProcessGroupId {
        self.pgid
    }

    /// Non-blocking check for exit status.
    ///
    /// Returns `Ok(None)` while the child is still running.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>, ProcError> {
        match self.child.try_wait() {
            Ok(Some(status)) => Ok(Some(decode_status(status))),
            Ok(None) => Ok(None),
            Err(e) => Err(ProcError::Wait(e)),
        }
    }

    /// Blocking wait for exit status.
    pub fn wait(&mut self) -> Result<ExitStatus, ProcError> {
        self.child
            .wait()
            .map(decode_status)
            .map_err(ProcError::Wait)
    }

    /// Send a signal to the child process.
    pub fn signal(&self, sig: Signal) -> Result<(), ProcError> {
        signal_pid(self.pid, sig)
    }

    /// Send a signal to the child's process group.
    pub fn signal_group(&self, sig: Signal) -> Result<(), ProcError> {
        signal_pgid(self.pgid, sig)
    }
}
