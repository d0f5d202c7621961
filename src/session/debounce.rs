//! Coalescing of rapid changes into one regeneration.

use std::time::{Duration, Instant};

/// Quiet period before a burst of changes is acted on.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the most recent value until no new value has arrived for the
/// debounce window.
///
/// Time is passed in by the caller, so the debouncer never sleeps or reads
/// the clock itself.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a change, replacing any pending value and restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if the window has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// When the pending value becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(1, start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_latest_value_wins() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.push("a", start);
        debouncer.push("b", start + Duration::from_millis(50));
        debouncer.push("c", start + Duration::from_millis(90));

        // The window restarts on every push
        assert_eq!(debouncer.poll(start + Duration::from_millis(150)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(190))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(190)), Some("c"));
    }

    #[test]
    fn test_empty() {
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(Instant::now()), None);
        assert_eq!(debouncer.window(), DEFAULT_DEBOUNCE);
    }
}
