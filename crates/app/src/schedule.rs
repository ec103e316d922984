//! Cadence — the timer dispatcher's per-task interval tracker.
//!
//! The control loop polls each cadence once per iteration with a monotonic
//! instant; a cadence fires at most once per period. Timing is driven
//! entirely by the caller, which keeps the loop testable without sleeping.

use std::time::{Duration, Instant};

/// A recurring deadline.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    every: Duration,
    next_due: Option<Instant>,
}

impl Cadence {
    /// Create a cadence that fires once per `every`.
    #[must_use]
    pub fn new(every: Duration) -> Self {
        Self {
            every,
            next_due: None,
        }
    }

    /// Check whether the cadence is due at `now`, rescheduling when it is.
    ///
    /// The first poll always fires, so startup work (initial telemetry)
    /// happens immediately rather than one period late.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.every);
                true
            }
        }
    }

    /// Make the next poll fire regardless of the schedule.
    pub fn force(&mut self) {
        self.next_due = None;
    }

    /// The configured period.
    #[must_use]
    pub fn every(&self) -> Duration {
        self.every
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fire_on_first_poll() {
        let mut cadence = Cadence::new(Duration::from_secs(2));
        assert!(cadence.poll(Instant::now()));
    }

    #[test]
    fn should_not_fire_again_within_period() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(2));
        assert!(cadence.poll(start));
        assert!(!cadence.poll(start + Duration::from_millis(500)));
        assert!(!cadence.poll(start + Duration::from_millis(1999)));
    }

    #[test]
    fn should_fire_once_period_has_elapsed() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(2));
        assert!(cadence.poll(start));
        assert!(cadence.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn should_reschedule_from_the_firing_poll() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(2));
        assert!(cadence.poll(start));
        // Fires late at t=3s; next deadline is t=5s, not t=4s.
        assert!(cadence.poll(start + Duration::from_secs(3)));
        assert!(!cadence.poll(start + Duration::from_secs(4)));
        assert!(cadence.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn should_fire_immediately_after_force() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(60));
        assert!(cadence.poll(start));
        assert!(!cadence.poll(start + Duration::from_secs(1)));
        cadence.force();
        assert!(cadence.poll(start + Duration::from_secs(1)));
        assert!(!cadence.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn should_expose_configured_period() {
        let cadence = Cadence::new(Duration::from_secs(5));
        assert_eq!(cadence.every(), Duration::from_secs(5));
    }
}
