//! Time-expiring cache shared between the fetcher and a background sweep task
//!
//! Entries are inserted once (first write wins) and never refreshed. A tokio task
//! wakes once per TTL and removes every entry older than the TTL, so an entry may
//! survive for up to roughly twice the TTL before it is evicted.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Shortest sweep period; a zero-length interval cannot be scheduled
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

/// A cached payload together with the moment it was inserted
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Raw bytes exactly as handed to `add`
    payload: Vec<u8>,
    /// Insertion time, used by the sweep to compute the entry's age
    created_at: Instant,
}

type Entries = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Concurrent key/value store whose entries expire after a fixed TTL
///
/// `Cache` is a cheap handle: clones share the same entries and the same sweep
/// task. The sweep stops when [`Cache::shutdown`] is called or when the last
/// handle is dropped.
///
/// Construction spawns a tokio task, so `Cache::new` must be called from within
/// a tokio runtime.
#[derive(Debug, Clone)]
pub struct Cache {
    entries: Entries,
    ttl: Duration,
    shutdown_tx: mpsc::Sender<()>,
}

impl Cache {
    /// Creates an empty cache and starts its background sweep
    ///
    /// # Arguments
    /// * `ttl` - How long an entry stays fresh; also the sweep period
    pub fn new(ttl: Duration) -> Self {
        let entries: Entries = Arc::new(RwLock::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        spawn_sweeper(Arc::clone(&entries), ttl, shutdown_rx);
        debug!(?ttl, "Cache initialized");

        Self {
            entries,
            ttl,
            shutdown_tx,
        }
    }

    /// The TTL this cache was built with
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores `payload` under `key` unless the key is already present
    ///
    /// An existing entry is left untouched, including its creation time.
    pub fn add(&self, key: impl Into<String>, payload: Vec<u8>) {
        let key = key.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(&key) {
            debug!(%key, "Key already exists in cache");
            return;
        }

        debug!(%key, bytes = payload.len(), "Added key to cache");
        entries.insert(
            key,
            CacheEntry {
                payload,
                created_at: Instant::now(),
            },
        );
    }

    /// Returns a copy of the payload stored under `key`, if it has not been swept
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        match entries.get(key) {
            Some(entry) => {
                debug!(%key, "Retrieved key from cache");
                Some(entry.payload.clone())
            }
            None => {
                debug!(%key, "Key not found in cache");
                None
            }
        }
    }

    /// Number of entries currently held, expired-but-unswept ones included
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Signals the sweep task to stop
    ///
    /// Lookups and inserts keep working afterwards; entries are simply no longer
    /// evicted. Calling this more than once is harmless.
    pub fn shutdown(&self) {
        // Full or closed means a stop is already pending or the sweep has exited
        let _ = self.shutdown_tx.try_send(());
    }
}

/// Spawns the periodic sweep for `entries`
fn spawn_sweeper(entries: Entries, ttl: Duration, mut shutdown_rx: mpsc::Receiver<()>) {
    let period = ttl.max(MIN_SWEEP_PERIOD);

    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first tick (immediate)
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    evict_expired(&entries, ttl, Instant::now());
                }
                // Explicit shutdown, or every sender dropped with the last handle
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }

        debug!("Cache sweep stopped");
    });
}

/// Removes every entry whose age at `now` exceeds `ttl`, returning how many were removed
fn evict_expired(
    entries: &RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    now: Instant,
) -> usize {
    let mut entries = entries.write().unwrap_or_else(PoisonError::into_inner);
    let before = entries.len();

    entries.retain(|key, entry| {
        let expired = now.saturating_duration_since(entry.created_at) > ttl;
        if expired {
            debug!(%key, "Removed expired key from cache");
        }
        !expired
    });

    before - entries.len()
}
