//! Shared cancellation for the sampler tasks and best-effort shutdown.

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How long shutdown waits for samplers before giving up on them.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Default)]
pub struct Lifecycle {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clone of the shared token; cancelling any clone stops everyone.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.tasks.push(handle);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait up to `grace` for tracked tasks. Returns `false` if some did not
    /// finish in time; those are left to die with the runtime.
    pub async fn shutdown(self, grace: Duration) -> bool {
        self.cancel.cancel();
        let count = self.tasks.len();
        match timeout(grace, join_all(self.tasks)).await {
            Ok(results) => {
                for res in results {
                    if let Err(e) = res {
                        warn!(error = %e, "sampler task ended abnormally");
                    }
                }
                debug!(count, "samplers stopped");
                true
            }
            Err(_) => {
                warn!(count, ?grace, "samplers still running after grace period");
                false
            }
        }
    }
}
