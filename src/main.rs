//! Runs the writers and the reader against `numbers.txt` for ten seconds.
//!
//! Log verbosity follows `RUST_LOG` (default `info`). Exits non-zero when the
//! store cannot be reset or is still empty after the run.

use std::sync::Arc;

use parityvisor::{Config, LogWriter, Subscribe, Supervisor};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::default();
    info!(
        store = %cfg.store_path.display(),
        run_window = ?cfg.run_window,
        "starting run"
    );

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let sup = Supervisor::builder(cfg).with_subscribers(subs).build()?;

    match sup.run().await {
        Ok(report) => {
            info!(
                values = report.len(),
                shutdown_ms = report.shutdown_ms(),
                "run finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, label = e.as_label(), "run failed");
            Err(e.into())
        }
    }
}
