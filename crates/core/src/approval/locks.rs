//! Per-target mutual exclusion for approval decisions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::TargetRef;

/// Hands out one async mutex per target so that the
/// vote → recount → transition sequence never interleaves for the same
/// target within this process.
///
/// Entries nobody holds or waits on are pruned on the next acquire.
#[derive(Default)]
pub struct TargetLocks {
    inner: Mutex<HashMap<TargetRef, Arc<AsyncMutex<()>>>>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `target`.
    pub async fn acquire(&self, target: TargetRef) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(map.entry(target).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of targets currently tracked.
    pub fn tracked(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_target_is_exclusive() {
        let locks = Arc::new(TargetLocks::new());
        let guard = locks.acquire(TargetRef::quiz(1)).await;

        let locks2 = Arc::clone(&locks);
        let waiter = tokio::spawn(async move {
            let _g = locks2.acquire(TargetRef::quiz(1)).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "second acquire must wait");

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn different_targets_do_not_block() {
        let locks = TargetLocks::new();
        let _a = locks.acquire(TargetRef::quiz(1)).await;
        let _b = locks.acquire(TargetRef::keyword(1)).await;
        let _c = locks.acquire(TargetRef::report(1)).await;
        assert_eq!(locks.tracked(), 3);
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = TargetLocks::new();
        drop(locks.acquire(TargetRef::quiz(1)).await);
        drop(locks.acquire(TargetRef::quiz(2)).await);
        // Acquiring prunes both released entries before inserting quiz 3.
        let _g = locks.acquire(TargetRef::quiz(3)).await;
        assert_eq!(locks.tracked(), 1);
    }
}
