//! # Process interruption while the run window is open.
//!
//! The supervisor races [`wait_for_shutdown_signal`] against the run window;
//! a signal is the only thing allowed to close the window early. The
//! returned name ends up in the `RunWindowInterrupted` event.

use std::io;

/// Resolves with the name of the first termination signal received.
///
/// Unix listens for `SIGINT`, `SIGTERM` and `SIGQUIT`; elsewhere only Ctrl-C.
/// Fails if a listener cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut int = signal(SignalKind::interrupt())?;
    let mut term = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = int.recv() => "SIGINT",
        _ = term.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
    };
    Ok(name)
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}
