//! Child process control for gantry.
//!
//! This crate wraps spawn, signal delivery, and exit-status collection for a
//! job child running in its own process group. The child inherits the
//! launcher's stdio; there is no terminal layer.
//!
//! # Example
//!
//! ```no_run
//! use gantry_proc::{spawn, Signal, SpawnSpec};
//!
//! // Launch a worker in its own process group
//! let spec = SpawnSpec::new("/bin/sh").args(vec!["-c".into(), "sleep 60".into()]);
//! let mut child = spawn(spec).unwrap();
//!
//! // Warn the whole job tree, then wait for it to wind down
//! child.signal_group(Signal::Usr1).unwrap();
//! let status = child.wait().unwrap();
//! println!("job finished: {:?}", status);
//! ```

mod error;
mod signal;
mod spawn;
mod types;
mod wait;

// Re-export public API
pub use error::ProcError;
pub use signal::{signal_pgid, signal_pid, Signal};
pub use spawn::{spawn, ProcChild, SpawnSpec};
pub use types::{Pid, ProcessGroupId};
pub use wait::ExitStatus;
