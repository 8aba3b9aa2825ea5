//! Main orchestration loop.

use std::time::Duration;

use anyhow::{Context, Result};
use gantry_proc::{spawn, ExitStatus, ProcChild, Signal, SpawnSpec};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::sleep;

use crate::args::Args;
use crate::command::Invocation;
use crate::config::Config;
use crate::deadline::SoftStop;

/// Launch the evaluation program and see the job through to exit.
///
/// Returns the exit code to use.
pub async fn run(args: &Args, config: &Config, invocation: Invocation) -> Result<i32> {
    // Spawn the evaluation program in its own process group
    let spec = SpawnSpec::new(invocation.program)
        .args(invocation.args)
        .cwd(args.cwd.clone())
        .env(args.parse_env().into_iter().collect());

    let mut child = spawn(spec).context("failed to launch evaluation program")?;
    tracing::info!(pid = child.pid().as_raw(), "evaluation program launched");

    // Signals delivered to the launcher are relayed to the job
    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut sigusr1 =
        signal(SignalKind::user_defined1()).context("failed to install SIGUSR1 handler")?;

    // Arm the soft stop if a wall-clock limit is known
    let soft_stop = SoftStop::arm(
        args.time_limit_secs.or(config.time_limit_secs),
        args.grace_secs,
    );
    let mut soft_stop_armed = soft_stop.is_some();
    if let Some(stop) = soft_stop {
        tracing::info!(secs = stop.delay().as_secs(), "soft stop armed");
    }
    let soft_stop_sleep = sleep(soft_stop.map_or(Duration::ZERO, |s| s.delay()));
    tokio::pin!(soft_stop_sleep);

    // Main loop: wait for child exit while relaying signals
    let exit_status = loop {
        tokio::select! {
            // Check for child exit (non-blocking)
            _ = sleep(Duration::from_millis(50)) => {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::error!("wait error: {}", e);
                        break ExitStatus::Code(1);
                    }
                }
            }

            // Scheduled soft stop, delivered at most once
            _ = &mut soft_stop_sleep, if soft_stop_armed => {
                soft_stop_armed = false;
                tracing::info!("delivering soft stop to job");
                if let Err(e) = child.signal_group(Signal::Usr1) {
                    tracing::error!("failed to deliver soft stop: {}", e);
                }
            }

            _ = sigterm.recv() => relay(&child, Signal::Term),
            _ = sigint.recv() => relay(&child, Signal::Int),
            _ = sigusr1.recv() => relay(&child, Signal::Usr1),
        }
    };

    // Map to the launcher's exit code
    Ok(match exit_status {
        ExitStatus::Code(code) => {
            tracing::info!(code, "evaluation program exited");
            code
        }
        ExitStatus::Signaled(sig) => {
            tracing::info!(signal = sig, "evaluation program killed by signal");
            128 + sig
        }
    })
}

/// Relay a signal received by the launcher to the job's process group.
fn relay(child: &ProcChild, sig: Signal) {
    tracing::info!(signal = ?sig, "relaying signal to job");
    if let Err(e) = child.signal_group(sig) {
        tracing::error!("failed to relay signal: {}", e);
    }
}
