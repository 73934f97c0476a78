use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Time source seam. Production uses the wall clock; tests pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock plus a debug offset. The offset is written by the debug
/// fast-forward action and read by the overdue sweeper; the atomic is the
/// only synchronization either side needs.
pub struct SimClock {
    inner: Arc<dyn Clock>,
    offset_ms: AtomicI64,
}

impl SimClock {
    pub fn new(inner: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            offset_ms: AtomicI64::new(0),
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Fast-forward the simulated time by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.offset_ms
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn offset(&self) -> Duration {
        Duration::milliseconds(self.offset_ms.load(Ordering::SeqCst))
    }
}

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner.now() + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn advance_shifts_simulated_now() {
        let base = Utc::now();
        let clock = SimClock::new(Arc::new(FixedClock(base)));
        assert_eq!(clock.now(), base);

        clock.advance(Duration::minutes(65));
        assert_eq!(clock.now(), base + Duration::minutes(65));

        clock.advance(Duration::minutes(65));
        assert_eq!(clock.offset(), Duration::minutes(130));
    }
}
