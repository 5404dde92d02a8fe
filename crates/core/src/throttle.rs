use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Token bucket shared by every clone of the handle.
///
/// Holds at most `capacity` tokens and regains one every `refill_every`.
/// A call takes one token, waiting for a refill when the bucket is empty.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    state: Arc<Mutex<BucketState>>,
    capacity: u32,
    refill_every: Duration,
}

#[derive(Debug)]
struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(capacity: u32, refill_every: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            })),
            capacity,
            refill_every: refill_every.max(Duration::from_millis(1)),
        }
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        let elapsed = now.saturating_duration_since(state.last_refill);
        let earned = elapsed.as_nanos() / self.refill_every.as_nanos();
        if earned == 0 {
            return;
        }

        let earned = u32::try_from(earned).unwrap_or(u32::MAX);
        state.tokens = state.tokens.saturating_add(earned).min(self.capacity);
        state.last_refill = if state.tokens == self.capacity {
            now
        } else {
            state.last_refill + self.refill_every * earned
        };
    }

    fn wait_for_refill(&self, last_refill: Instant, now: Instant) -> Duration {
        match last_refill.checked_add(self.refill_every) {
            Some(next) => next.saturating_duration_since(now),
            None => self.refill_every,
        }
    }
}

#[async_trait]
impl Throttle for TokenBucket {
    async fn pause(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                self.refill(&mut state, now);

                if state.tokens > 0 {
                    state.tokens -= 1;
                    return;
                }

                self.wait_for_refill(state.last_refill, now)
            };

            sleep(wait).await;
        }
    }
}
