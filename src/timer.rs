use std::time::{Duration, Instant};

/// Fires once every `interval`, for host loops that call
/// [`Hotswap::update`](crate::Hotswap::update) at a fixed cadence.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    next: Instant,
    interval: Duration,
}

impl Timer {
    pub fn new(interval: Duration) -> Timer {
        Timer {
            next: Instant::now() + interval,
            interval,
        }
    }

    /// True once the interval elapsed, rearming the timer when it did.
    pub fn poll_interval(&mut self) -> bool {
        if self.poll() {
            self.reset();
            true
        } else {
            false
        }
    }

    pub fn poll(&self) -> bool {
        Instant::now() >= self.next
    }

    pub fn reset(&mut self) {
        self.next = Instant::now() + self.interval;
    }

    /// Time left until the next tick.
    pub fn remaining(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_interval() {
        let mut timer = Timer::new(Duration::from_millis(20));
        assert!(!timer.poll_interval());

        std::thread::sleep(Duration::from_millis(30));
        assert!(timer.poll_interval());
        assert!(!timer.poll());
    }

    #[test]
    fn zero_interval_always_fires() {
        let mut timer = Timer::new(Duration::ZERO);
        assert!(timer.poll_interval());
        assert!(timer.poll_interval());
        assert_eq!(timer.remaining(), Duration::ZERO);
    }
}
