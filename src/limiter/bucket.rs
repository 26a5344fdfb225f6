//! Token bucket rate limiting primitive.

use std::sync::Mutex;
use std::time::Instant;

/// A single-key token bucket limiter.
///
/// Holds up to `capacity` tokens, refills continuously at `refill_rate`
/// tokens per second, and consumes one token per admitted call. A fresh
/// bucket starts full, so a new client gets its full burst allowance.
pub struct TokenBucket {
    refill_rate: f64,
    capacity: f64,
    state: Mutex<BucketState>,
}

/// Mutable bucket state, guarded as a unit so refill-and-consume is atomic.
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a full bucket. Both parameters are fixed for its lifetime.
    pub fn new(refill_rate: f64, capacity: f64) -> Self {
        Self {
            refill_rate,
            capacity,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Render an admission decision.
    ///
    /// Refills proportionally to elapsed time since the last call (capped at
    /// capacity), then consumes one token and admits, or rejects without
    /// consuming anything. The token balance stays in `[0, capacity]` and
    /// concurrent callers never over-admit: the whole sequence runs under
    /// the bucket's lock.
    pub fn allow(&self) -> bool {
        let mut state = self.state.lock().expect("token bucket mutex poisoned");
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();

        state.tokens = (state.tokens + elapsed * self.refill_rate).min(self.capacity);
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Snapshot of the current token balance (no refill applied).
    pub fn remaining(&self) -> f64 {
        self.state.lock().expect("token bucket mutex poisoned").tokens
    }
}
