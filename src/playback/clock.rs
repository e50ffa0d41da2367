use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError, Weak};
use std::time::{Duration, Instant};

/// Cooperative cancellation shared between a caller and a running [`Player`](crate::Player).
///
/// Cancelling wakes any sleep in progress and stops an in-flight frame write at the next line.
/// Cancellation flows down to every [`CancelToken::child_token`], never up.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    children: Mutex<Vec<Weak<CancelInner>>>,
    wake: Condvar,
}

impl CancelInner {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Weak<CancelInner>>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        let children = std::mem::take(&mut *self.lock());
        self.wake.notify_all();
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// A token that is cancelled together with `self` but can also be cancelled on its own.
    pub fn child_token(&self) -> CancelToken {
        let child = CancelToken::new();
        {
            let mut children = self.inner.lock();
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        if self.is_cancelled() {
            child.cancel();
        }
        child
    }

    /// Whether [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Block for up to `timeout`, returning early on cancellation.
    ///
    /// Returns `true` if the token is cancelled when the wait ends.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.inner.lock();
        let _ = self
            .inner
            .wake
            .wait_timeout_while(guard, timeout, |_| !self.is_cancelled())
            .unwrap_or_else(PoisonError::into_inner);
        self.is_cancelled()
    }
}

/// Time source for playback scheduling.
///
/// The scheduler sleeps toward absolute deadlines measured with [`Clock::now`], so time spent
/// between sleeps is taken out of the next wait instead of accumulating as drift.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Sleep for `duration` unless `cancel` fires first.
    ///
    /// Returns `false` when the sleep was cut short by cancellation.
    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool;
}

/// Wall clock backed by [`Instant`]; sleeps wake early on cancellation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool {
        !cancel.wait_timeout(duration)
    }
}

/// Simulated clock: sleeping advances time instantly and is recorded.
///
/// Optionally cancels a token once simulated time reaches a deadline, which stops looped
/// playback deterministically.
#[derive(Debug, Default)]
pub struct ManualClock {
    state: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    sleeps: Vec<Duration>,
    cancel_at: Option<(Duration, CancelToken)>,
}

impl ManualClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel `token` as soon as simulated time reaches `at`.
    pub fn cancel_at(self, at: Duration, token: CancelToken) -> Self {
        self.lock().cancel_at = Some((at, token));
        self
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    /// Sum of all sleeps so far.
    pub fn elapsed(&self) -> Duration {
        self.lock().now
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.lock().now
    }

    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        let mut state = self.lock();
        state.now += duration;
        state.sleeps.push(duration);
        if let Some((at, token)) = &state.cancel_at
            && state.now >= *at
        {
            token.cancel();
        }
        !cancel.is_cancelled()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
