//! End-to-end launch tests.
//!
//! These drive the built `gantry` binary against shell trampolines that
//! record their argv and observe signal delivery through marker files.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counter for unique scratch directories.
static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Environment variables the launcher consumes. Cleared before every run so
/// the surrounding environment cannot leak into a test.
const GANTRY_VARS: [&str; 6] = [
    "GANTRY_ENV",
    "GANTRY_PROGRAM",
    "GANTRY_DATASET",
    "GANTRY_MODEL",
    "GANTRY_RUN_NAME",
    "GANTRY_TIME_LIMIT",
];

/// A per-test scratch directory, removed on drop.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let counter = SCRATCH_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "gantry-launch-test-{}-{}",
            std::process::id(),
            counter
        ));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write an executable /bin/sh script standing in for the evaluation
    /// program.
    fn trampoline(&self, body: &str) -> PathBuf {
        let path = self.path("trampoline.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// The gantry binary with a scrubbed launcher environment.
fn gantry_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gantry"));
    for var in GANTRY_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn refuses_launch_without_readiness_flag() {
    let scratch = Scratch::new();
    let marker = scratch.path("launched");
    let trampoline = scratch.trampoline(&format!("touch {}", marker.display()));

    let output = gantry_cmd()
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("environment not initialized") && stderr.contains("source env.sh"),
        "missing guidance in stderr: {stderr}"
    );
    assert!(!marker.exists(), "evaluation program must not be invoked");
}

#[test]
fn missing_required_var_fails_before_launch() {
    let scratch = Scratch::new();
    let marker = scratch.path("launched");
    let trampoline = scratch.trampoline(&format!("touch {}", marker.display()));

    let output = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GANTRY_MODEL"), "stderr: {stderr}");
    assert!(!marker.exists());
}

#[test]
fn launches_with_fixed_options_then_forwarded_args() {
    let scratch = Scratch::new();
    let argv_out = scratch.path("argv");
    let trampoline = scratch.trampoline(&format!(
        "for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > {}",
        argv_out.display()
    ));

    let output = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        .env("GANTRY_RUN_NAME", "nightly")
        .args(["--", "--epochs", "3", "extra"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));

    let argv = std::fs::read_to_string(&argv_out).unwrap();
    let got: Vec<&str> = argv.lines().collect();
    assert_eq!(
        got,
        vec![
            "--dataset-path",
            "/data/sfd",
            "--model",
            "setbert-sfd:latest",
            "--run-name",
            "nightly",
            "--epochs",
            "3",
            "extra",
        ]
    );
}

#[test]
fn propagates_child_exit_code() {
    let scratch = Scratch::new();
    let trampoline = scratch.trampoline("exit 7");

    let output = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn dry_run_prints_invocation_without_launching() {
    let scratch = Scratch::new();
    let marker = scratch.path("launched");
    let trampoline = scratch.trampoline(&format!("touch {}", marker.display()));

    let output = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        .args(["--dry-run", "--", "--seed", "7"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!(
            "{} --dataset-path /data/sfd --model setbert-sfd:latest --seed 7",
            trampoline.display()
        )
    );
    assert!(!marker.exists(), "--dry-run must not launch anything");
}

#[test]
fn soft_stop_reaches_job_before_the_limit() {
    let scratch = Scratch::new();
    let marker = scratch.path("soft-stopped");
    // Checkpoint on the soft-stop warning, fail if it never arrives
    let trampoline = scratch.trampoline(&format!(
        "trap 'touch {}; exit 0' USR1\nsleep 5\nexit 1",
        marker.display()
    ));

    let output = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        // Warning due one second after launch
        .args(["--time-limit-secs", "121", "--grace-secs", "120"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(marker.exists(), "job never saw the soft stop");
}

#[test]
fn relays_sigterm_to_job() {
    let scratch = Scratch::new();
    let trampoline = scratch.trampoline("trap 'exit 9' TERM\nsleep 10\nexit 1");

    let mut launcher = gantry_cmd()
        .env("GANTRY_ENV", "1")
        .env("GANTRY_PROGRAM", &trampoline)
        .env("GANTRY_DATASET", "/data/sfd")
        .env("GANTRY_MODEL", "setbert-sfd:latest")
        .spawn()
        .unwrap();

    // Let the launcher install its handlers and spawn the job
    std::thread::sleep(Duration::from_secs(1));
    let ret = unsafe { libc::kill(launcher.id() as i32, libc::SIGTERM) };
    assert_eq!(ret, 0);

    let status = launcher.wait().unwrap();
    assert_eq!(status.code(), Some(9), "job's graceful exit code, relayed");
}
