//! Artificial scheduling noise. Sleeping a random amount before each channel operation
//! shakes out interleavings that a quiet machine would never produce.
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::trace;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Jitter {
    max: Duration,
}

impl Jitter {
    pub fn new(max: Duration) -> Jitter {
        Jitter { max }
    }

    pub fn none() -> Jitter {
        Jitter::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.max > Duration::from_micros(0)
    }

    /// Sleep for a uniformly random duration in `[0, max]`. No-op when disabled.
    pub fn pause(&self) {
        if !self.is_enabled() {
            return;
        }
        let max = self.max.as_micros() as u64;
        let delay = Duration::from_micros(rand::thread_rng().gen_range(0..=max));
        trace!("Injecting {:?} delay.", delay);
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod test {
    use super::Jitter;
    use std::time::{Duration, Instant};

    #[test]
    fn disabled_jitter_does_not_sleep() {
        let j = Jitter::none();
        assert!(!j.is_enabled());

        let start = Instant::now();
        for _ in 0..1000 {
            j.pause();
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn enabled_jitter_stays_under_bound() {
        let j = Jitter::new(Duration::from_micros(200));
        assert!(j.is_enabled());

        let start = Instant::now();
        for _ in 0..10 {
            j.pause();
        }
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
