//! Periodic age-based session eviction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::session::SessionStore;

pub struct CleanupWorker {
    handle: JoinHandle<()>,
    shutdown_tx: broadcast::Sender<()>,
}

impl CleanupWorker {
    /// Spawns the sweep loop with the config's TTL and interval.
    pub fn spawn(store: Arc<SessionStore>, config: &EngineConfig) -> Self {
        Self::spawn_with(
            store,
            Duration::from_secs(config.session_ttl_secs),
            Duration::from_secs(config.cleanup_interval_secs.max(1)),
        )
    }

    pub fn spawn_with(store: Arc<SessionStore>, ttl: Duration, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so a fresh store
            // is not swept at startup.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("session cleanup worker shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        run_sweep(&store, ttl);
                    }
                }
            }
        });
        Self {
            handle,
            shutdown_tx,
        }
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

fn run_sweep(store: &SessionStore, ttl: Duration) {
    let start = Instant::now();
    debug!("starting session cleanup cycle");

    let expired_sessions = store.cleanup_expired(ttl);
    let duration_secs = start.elapsed().as_secs_f64();

    info!(
        expired_sessions,
        remaining = store.len(),
        duration_secs = format!("{duration_secs:.2}"),
        "session cleanup completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::DifficultyLevel;

    #[tokio::test]
    async fn sweep_evicts_idle_sessions() {
        let store = Arc::new(SessionStore::new(DifficultyLevel::default()));
        let idle = store.get_or_create("idle");
        store.get_or_create("active");
        idle.lock().last_active -= 60_000;

        run_sweep(&store, Duration::from_secs(30));
        assert_eq!(store.len(), 1);
        assert!(store.snapshot("active").is_some());
    }

    #[tokio::test]
    async fn worker_shuts_down_cleanly() {
        let store = Arc::new(SessionStore::new(DifficultyLevel::default()));
        let worker = CleanupWorker::spawn_with(
            Arc::clone(&store),
            Duration::from_secs(60),
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(30)).await;
        worker.shutdown().await;
    }
}
