//! Core process types.

/// Process ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pid(pub i32);

impl Pid {
    /// Create a new Pid.
    pub fn new(pid: i32) -> Self {
        Self(pid)
    }

    /// Get the raw pid value.
    pub fn as_raw(&self) -> i32 {
        self.0
    }
}

/// Process group ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessGroupId(pub i32);

impl ProcessGroupId {
    /// Create a new ProcessGroupId.
    pub fn new(pgid: i32) -> Self {
        Self(pgid)
    }

    /// Get the raw pgid value.
    pub fn as_raw(&self) -> i32 {
        self.0
    }
}
