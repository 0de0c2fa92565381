//! Process-wide throttle for calls against the logging service
//!
//! The limiter is built once per run and shared by reference with every call site.
//! [`RateLimiter::acquire`] suspends the caller until one more call may go out and
//! records that call. It never fails.

use crate::{JanitorConfig, LimiterStrategy};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Bounds calls to `requests_per_second`, evenly spaced
///
/// Both strategies keep at least `1s / requests_per_second` between two permits.
/// The sliding window additionally refuses more than `requests_per_second * window`
/// permits inside any window.
///
/// # Examples
///
/// ```
/// use logwarden_janitor::RateLimiter;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let limiter = RateLimiter::fixed_interval(100);
/// limiter.acquire().await;
/// limiter.acquire().await;
/// assert_eq!(limiter.permits_issued(), 2);
/// assert_eq!(limiter.min_interval(), Duration::from_millis(10));
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    window: Duration,
    capacity: usize,
    state: Mutex<LimiterState>,
    permits: AtomicU64,
}

#[derive(Debug)]
enum LimiterState {
    FixedInterval { last_call: Option<Instant> },
    SlidingWindow { calls: VecDeque<Instant> },
}

impl RateLimiter {
    /// Evenly spaced calls, tracking only the last one
    pub fn fixed_interval(requests_per_second: u32) -> Self {
        let rate = requests_per_second.max(1);
        Self {
            min_interval: Duration::from_secs(1) / rate,
            window: Duration::from_secs(1),
            capacity: rate as usize,
            state: Mutex::new(LimiterState::FixedInterval { last_call: None }),
            permits: AtomicU64::new(0),
        }
    }

    /// Evenly spaced calls with at most `requests_per_second * window` per window
    pub fn sliding_window(requests_per_second: u32, window: Duration) -> Self {
        let rate = requests_per_second.max(1);
        let window = window.max(Duration::from_millis(1));
        let capacity = ((rate as f64) * window.as_secs_f64()).ceil().max(1.0) as usize;
        Self {
            min_interval: Duration::from_secs(1) / rate,
            window,
            capacity,
            state: Mutex::new(LimiterState::SlidingWindow {
                calls: VecDeque::with_capacity(capacity + 1),
            }),
            permits: AtomicU64::new(0),
        }
    }

    /// Build the limiter selected by `config`
    pub fn from_config(config: &JanitorConfig) -> Self {
        match config.limiter {
            LimiterStrategy::FixedInterval => Self::fixed_interval(config.requests_per_second),
            LimiterStrategy::SlidingWindow => {
                Self::sliding_window(config.requests_per_second, config.window())
            }
        }
    }

    /// Wait until one more call is allowed, then record it
    pub async fn acquire(&self) {
        let mut state = self.state.lock().await;

        match &mut *state {
            LimiterState::FixedInterval { last_call } => {
                if let Some(last) = *last_call {
                    let elapsed = last.elapsed();
                    if elapsed < self.min_interval {
                        let wait = self.min_interval - elapsed;
                        tracing::trace!("Throttling for {:?}", wait);
                        sleep(wait).await;
                    }
                }
                *last_call = Some(Instant::now());
            }
            LimiterState::SlidingWindow { calls } => {
                let now = Instant::now();
                evict_older_than(calls, now, self.window);

                let mut wait = Duration::ZERO;
                if let Some(last) = calls.back() {
                    let gap = now.duration_since(*last);
                    if gap < self.min_interval {
                        wait = self.min_interval - gap;
                    }
                }
                if calls.len() >= self.capacity {
                    if let Some(oldest) = calls.front() {
                        let age = now.duration_since(*oldest);
                        wait = wait.max(self.window.saturating_sub(age));
                    }
                }

                if !wait.is_zero() {
                    tracing::trace!("Throttling for {:?}", wait);
                    sleep(wait).await;
                }

                let now = Instant::now();
                evict_older_than(calls, now, self.window);
                calls.push_back(now);
                tracing::trace!(
                    "Observed rate: {:.1} calls/s",
                    calls.len() as f64 / self.window.as_secs_f64()
                );
            }
        }

        self.permits.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of permits handed out so far
    pub fn permits_issued(&self) -> u64 {
        self.permits.load(Ordering::Relaxed)
    }

    /// Minimum spacing between two permits
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Calls recorded inside the current window (always 0 or 1 for the fixed interval)
    pub async fn calls_in_window(&self) -> usize {
        let state = self.state.lock().await;
        match &*state {
            LimiterState::FixedInterval { last_call } => usize::from(
                last_call.is_some_and(|last| last.elapsed() < self.min_interval),
            ),
            LimiterState::SlidingWindow { calls } => {
                let now = Instant::now();
                calls
                    .iter()
                    .filter(|t| now.duration_since(**t) < self.window)
                    .count()
            }
        }
    }
}

fn evict_older_than(calls: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while calls
        .front()
        .is_some_and(|t| now.duration_since(*t) >= window)
    {
        calls.pop_front();
    }
}
