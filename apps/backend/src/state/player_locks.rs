//! Per-player async locks.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Registry = DashMap<i64, Arc<Mutex<()>>>;

/// Registry of one async mutex per player id.
///
/// A player maps to one mutex while anyone holds or waits on it, so holders
/// of the same player's guard are serialized. The entry is dropped with the
/// last guard.
#[derive(Debug, Clone, Default)]
pub struct PlayerLocks {
    inner: Arc<Registry>,
}

/// Held lock for one player; releases and prunes the registry entry on drop.
#[derive(Debug)]
pub struct PlayerGuard {
    player_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Arc<Registry>,
}

impl PlayerLocks {
    pub async fn lock(&self, player_id: i64) -> PlayerGuard {
        // Clone the Arc out so the shard guard is released before awaiting.
        let mutex = self.inner.entry(player_id).or_default().clone();
        let guard = mutex.lock_owned().await;
        PlayerGuard {
            player_id,
            guard: Some(guard),
            registry: Arc::clone(&self.inner),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Drop for PlayerGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the registry's own Arc left: nobody holds or waits on this mutex.
        // `entry` in `lock` takes the same shard lock, so a new locker cannot slip in.
        self.registry
            .remove_if(&self.player_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
