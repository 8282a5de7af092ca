use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Process-local set of keys that have already triggered a send.
///
/// Entries expire on a timer, so the set stays bounded across long
/// uptimes. Everything here is lost on restart, which is acceptable:
/// the scheduler re-derives eligibility from wall-clock state and the
/// firing granularity is one minute.
#[derive(Clone)]
pub struct DedupLedger {
    entries: Arc<Mutex<HashSet<String>>>,
    ttl: Duration,
}

impl DedupLedger {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashSet::new())),
            ttl,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    /// Records a key, scheduling its removal after the ledger TTL.
    /// Returns false if the key was already present (nothing is
    /// re-scheduled in that case).
    pub fn insert(&self, key: String) -> bool {
        let newly_added = self.lock().insert(key.clone());
        if newly_added {
            let entries = Arc::clone(&self.entries);
            let ttl = self.ttl;
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                entries
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&key);
            });
        }
        newly_added
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // No code path panics while holding the guard, but recover
        // rather than propagate if that ever changes.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
