//! Cache Sweeper
//!
//! Background task that periodically evicts expired entries from the
//! persistent cache store. One sweeper exists per process, owned by the
//! composition root; starting it twice is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Default interval between sweeps: six hours.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

// == Sweeper ==
/// Lifecycle handle for the background sweep loop.
#[derive(Debug)]
pub struct Sweeper {
    store: Arc<CacheStore>,
    interval: Duration,
    started: AtomicBool,
}

impl Sweeper {
    // == Constructor ==
    pub fn new(store: Arc<CacheStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            started: AtomicBool::new(false),
        }
    }

    // == Init ==
    /// Starts the sweep loop: one sweep immediately, then one per
    /// interval for the life of the process. Idempotent; returns `None`
    /// when the loop was already started.
    ///
    /// A sweep that removes nothing, or whose removals fail internally,
    /// never cancels future runs.
    pub fn init(&self) -> Option<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Sweeper already started, ignoring init");
            return None;
        }

        let store = self.store.clone();
        let interval = self.interval;

        Some(tokio::spawn(async move {
            info!("Starting cache sweeper with interval {:?}", interval);
            let mut ticker = tokio::time::interval(interval);

            loop {
                // First tick fires immediately: the initial sweep.
                ticker.tick().await;

                let removed = store.clean_expired().await;
                if removed > 0 {
                    info!("Cache sweep removed {} expired entries", removed);
                } else {
                    debug!("Cache sweep found no expired entries");
                }
            }
        }))
    }
}
