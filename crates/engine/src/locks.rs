//! Per-key mutual exclusion for balance mutations.
//!
//! Every read-modify-write on a balance runs under that entity's lock,
//! which rules out lost updates between concurrent transfers. A transfer
//! touches two entities, so both locks are taken in identifier sort
//! order; two transfers moving money in opposite directions between the
//! same pair can then never deadlock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct LockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquires the lock for a single key.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        self.entry(key).lock_owned().await
    }

    /// Acquires both keys' locks in sort order.
    ///
    /// Callers must reject `a == b` before reaching this point; locking
    /// the same key twice would self-deadlock.
    pub async fn lock_pair(&self, a: &str, b: &str) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b, "lock_pair called with identical keys");
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first_guard = self.lock(first).await;
        let second_guard = self.lock(second).await;
        (first_guard, second_guard)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn serializes_writers_on_the_same_key() {
        let registry = Arc::new(LockRegistry::new());
        let counter = Arc::new(tokio::sync::Mutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = registry.lock("acct").await;
                let mut count = counter.lock().await;
                *count += 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*counter.lock().await, 16);
    }

    #[tokio::test]
    async fn opposite_direction_pairs_do_not_deadlock() {
        let registry = Arc::new(LockRegistry::new());

        let forward = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for _ in 0..100 {
                    let _guards = registry.lock_pair("a", "b").await;
                }
            })
        };
        let backward = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for _ in 0..100 {
                    let _guards = registry.lock_pair("b", "a").await;
                }
            })
        };

        forward.await.unwrap();
        backward.await.unwrap();
    }
}
