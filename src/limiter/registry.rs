//! Per-identity limiter registry.

use std::sync::Arc;

use dashmap::DashMap;

use crate::limiter::bucket::TokenBucket;

/// Concurrent mapping from client identity to its token bucket.
///
/// The registry is the sole owner of all bucket state. Entries are created
/// lazily on first resolve and discarded wholesale by [`sweep`], which bounds
/// memory growth under ever-rotating identities (e.g. spoofed source
/// addresses).
///
/// [`sweep`]: LimiterRegistry::sweep
pub struct LimiterRegistry {
    buckets: DashMap<String, Arc<TokenBucket>>,
    requests_per_second: f64,
    burst: f64,
}

impl LimiterRegistry {
    /// Create an empty registry. Every bucket it hands out is configured
    /// with this refill rate and burst capacity.
    pub fn new(requests_per_second: f64, burst: u32) -> Self {
        Self {
            buckets: DashMap::new(),
            requests_per_second,
            burst: f64::from(burst),
        }
    }

    /// Return the bucket for `identity`, creating it if absent.
    ///
    /// Check-and-create is atomic: racing resolves of a never-before-seen
    /// identity all observe the same bucket instance, so total admissions
    /// for one identity can never exceed its burst.
    pub fn resolve(&self, identity: &str) -> Arc<TokenBucket> {
        // Fast path: shard read lock only, for identities already tracked.
        if let Some(bucket) = self.buckets.get(identity) {
            return bucket.clone();
        }

        self.buckets
            .entry(identity.to_string())
            .or_insert_with(|| Arc::new(TokenBucket::new(self.requests_per_second, self.burst)))
            .clone()
    }

    /// Discard all tracked buckets, returning how many were evicted.
    ///
    /// Clients seen again after a sweep start over with a full bucket.
    /// In-flight admission checks are unaffected: callers hold an `Arc`,
    /// so a sweep never tears down a bucket mid-decision.
    pub fn sweep(&self) -> usize {
        let evicted = self.buckets.len();
        self.buckets.clear();
        evicted
    }

    /// Number of identities currently tracked.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn resolve_returns_the_same_bucket_for_one_identity() {
        let registry = LimiterRegistry::new(1.0, 5);
        let first = registry.resolve("10.0.0.1");
        let second = registry.resolve("10.0.0.1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn identities_never_share_a_bucket() {
        let registry = LimiterRegistry::new(0.001, 2);

        let a = registry.resolve("1.2.3.4");
        assert!(a.allow());
        assert!(a.allow());
        assert!(!a.allow(), "client A exhausted");

        let b = registry.resolve("5.6.7.8");
        assert!(b.allow(), "client B must be unaffected by client A");
        assert!(b.allow());
    }

    #[test]
    fn racing_first_resolves_observe_one_bucket() {
        // 100 threads race to resolve an unseen identity and each takes one
        // token. With burst 10, exactly 10 admissions proves a single shared
        // bucket.
        let registry = Arc::new(LimiterRegistry::new(0.0, 10));
        let barrier = Arc::new(Barrier::new(100));
        let admitted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                let admitted = admitted.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    if registry.resolve("198.51.100.7").allow() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(admitted.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn sweep_resets_exhausted_identities() {
        let registry = LimiterRegistry::new(0.001, 3);

        let bucket = registry.resolve("192.0.2.1");
        for _ in 0..3 {
            assert!(bucket.allow());
        }
        assert!(!bucket.allow());

        let evicted = registry.sweep();
        assert_eq!(evicted, 1);
        assert!(registry.is_empty());

        // Post-sweep the identity gets a fresh, full bucket.
        let fresh = registry.resolve("192.0.2.1");
        for _ in 0..3 {
            assert!(fresh.allow());
        }
        assert!(!fresh.allow());
    }

    #[test]
    fn bucket_held_across_a_sweep_stays_usable() {
        let registry = LimiterRegistry::new(0.001, 2);
        let held = registry.resolve("203.0.113.9");
        assert!(held.allow());

        registry.sweep();

        // The swept entry is gone from the registry, but the held handle
        // still renders consistent decisions.
        assert!(held.allow());
        assert!(!held.allow());
        assert!(registry.is_empty());
    }
}
