use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Resolve once the process is asked to stop
#[cfg(unix)]
pub async fn wait_for_signal() {
    // Handle SIGTERM (sent by container runtimes on stop)
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!("Failed to create SIGTERM signal handler: {}", e);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = wait_for_ctrl_c() => {}
    }
}

/// Resolve once the process is asked to stop
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal, initiating graceful shutdown"),
        Err(e) => {
            // Without a signal source, keep serving until killed
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
