//! Delegation to an external WSGI-compatible process manager.
//!
//! # Responsibilities
//! - Build the manager command line from the tuned worker model
//! - Spawn the child with inherited stdio and wait on it
//! - Propagate the child's exit status verbatim
//!
//! # Design Decisions
//! - One worker, two threads, and the request/graceful/keep-alive timings
//!   come from configuration; this launcher adds no serving logic of its own
//! - On shutdown the child shares our terminal signal; it gets the drain
//!   window to exit before being force-killed

use tokio::process::Command;

use crate::config::{BridgeConfig, ManagerConfig, TimeoutConfig};
use crate::launcher::LaunchError;
use crate::lifecycle::Shutdown;

/// Assemble the manager's argument list.
///
/// Produces `--bind HOST:PORT --workers N --threads N --timeout S
/// --graceful-timeout S --keep-alive S [extra args] APP_REF`.
pub fn command_args(
    manager: &ManagerConfig,
    timeouts: &TimeoutConfig,
    host: &str,
    port: u16,
) -> Vec<String> {
    let mut args = vec![
        "--bind".to_string(),
        format!("{}:{}", host, port),
        "--workers".to_string(),
        manager.workers.to_string(),
        "--threads".to_string(),
        manager.threads.to_string(),
        "--timeout".to_string(),
        timeouts.request_secs.to_string(),
        "--graceful-timeout".to_string(),
        timeouts.graceful_secs.to_string(),
        "--keep-alive".to_string(),
        timeouts.keep_alive_secs.to_string(),
    ];
    args.extend(manager.extra_args.iter().cloned());
    args.push(manager.app_ref.clone());
    args
}

/// Spawn the application server and wait for it to exit.
///
/// Returns the exit code to propagate. A child killed by a signal maps to
/// exit code 1.
pub async fn run(
    config: &BridgeConfig,
    port: u16,
    shutdown: Shutdown,
) -> Result<i32, LaunchError> {
    let args = command_args(
        &config.manager,
        &config.timeouts,
        &config.listener.host,
        port,
    );

    tracing::info!(
        program = %config.manager.program,
        app = %config.manager.app_ref,
        bind = %format!("{}:{}", config.listener.host, port),
        "Delegating to application server"
    );

    let mut child = Command::new(&config.manager.program)
        .args(&args)
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: config.manager.program.clone(),
            source,
        })?;

    let mut rx = shutdown.subscribe();
    tokio::select! {
        status = child.wait() => {
            let status = status?;
            tracing::info!(%status, "Application server exited");
            return Ok(status.code().unwrap_or(1));
        }
        _ = rx.recv() => {}
    }

    // Shutdown path. The child received the terminal signal alongside us;
    // give it the drain window before forcing.
    let drain = shutdown.drain_window();
    tracing::info!(window = ?drain, "Waiting for application server to exit");
    let status = match tokio::time::timeout(drain, child.wait()).await {
        Ok(status) => status?,
        Err(_) => {
            tracing::warn!("Application server did not exit within the drain window, killing");
            child.start_kill()?;
            child.wait().await?
        }
    };

    tracing::info!(%status, "Application server exited");
    Ok(status.code().unwrap_or(1))
}
