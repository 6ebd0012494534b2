use std::time::{Duration, Instant};

/// How the secondary (variant) row becomes visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondaryPolicy {
    /// Secondary row never shown; no countdown is ever started.
    Disabled,
    Immediate,
    /// Shown once the selection has rested on an alpha glyph for this long.
    Delayed(Duration),
}

/// Identifies one countdown request. Only the most recent handle can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownHandle {
    generation: u64,
    /// `None` when the delay runs past what `Instant` can represent; such a
    /// countdown never elapses.
    deadline: Option<Instant>,
}

impl CountdownHandle {
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecondaryReveal {
    Disabled,
    Immediate,
    /// Delayed mode with a countdown running.
    Pending(CountdownHandle),
    /// Delayed mode, idle.
    Armed,
}

/// What the caller should do with the secondary row after a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealRequest {
    Ignore,
    ShowNow,
    Scheduled(CountdownHandle),
}

/// Cancellable, restartable single-shot countdown for the secondary row.
#[derive(Clone, Debug)]
pub struct SecondaryCountdown {
    state: SecondaryReveal,
    delay: Duration,
    generation: u64,
}

impl SecondaryCountdown {
    pub fn new(policy: SecondaryPolicy) -> Self {
        let (state, delay) = match policy {
            SecondaryPolicy::Disabled => (SecondaryReveal::Disabled, Duration::ZERO),
            SecondaryPolicy::Immediate => (SecondaryReveal::Immediate, Duration::ZERO),
            SecondaryPolicy::Delayed(delay) => (SecondaryReveal::Armed, delay),
        };
        Self {
            state,
            delay,
            generation: 0,
        }
    }

    pub fn state(&self) -> SecondaryReveal {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != SecondaryReveal::Disabled
    }

    pub fn is_delayed(&self) -> bool {
        matches!(self.state, SecondaryReveal::Pending(_) | SecondaryReveal::Armed)
    }

    pub fn pending(&self) -> Option<CountdownHandle> {
        match self.state {
            SecondaryReveal::Pending(handle) => Some(handle),
            _ => None,
        }
    }

    /// Ask for the row to be revealed. In delayed mode this supersedes any
    /// countdown already running.
    pub fn request(&mut self, now: Instant) -> RevealRequest {
        match self.state {
            SecondaryReveal::Disabled => RevealRequest::Ignore,
            SecondaryReveal::Immediate => RevealRequest::ShowNow,
            SecondaryReveal::Pending(_) | SecondaryReveal::Armed => {
                self.generation += 1;
                let handle = CountdownHandle {
                    generation: self.generation,
                    deadline: now.checked_add(self.delay),
                };
                tracing::trace!(generation = handle.generation, "secondary countdown armed");
                self.state = SecondaryReveal::Pending(handle);
                RevealRequest::Scheduled(handle)
            }
        }
    }

    /// Drop any running countdown without firing it.
    pub fn cancel(&mut self) {
        if let SecondaryReveal::Pending(handle) = self.state {
            tracing::trace!(generation = handle.generation, "secondary countdown cancelled");
            self.state = SecondaryReveal::Armed;
        }
    }

    /// Fire `handle` if it is still the current request. Stale handles are ignored.
    pub fn fire(&mut self, handle: CountdownHandle) -> bool {
        match self.state {
            SecondaryReveal::Pending(current) if current == handle => {
                self.state = SecondaryReveal::Armed;
                true
            }
            _ => false,
        }
    }

    /// Fire the current countdown if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SecondaryReveal::Pending(handle) if handle.deadline.is_some_and(|d| now >= d) => {
                self.fire(handle)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1500);

    #[test]
    fn test_disabled_never_schedules() {
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Disabled);
        assert!(!cd.is_enabled());
        assert_eq!(cd.request(Instant::now()), RevealRequest::Ignore);
        assert!(cd.pending().is_none());
    }

    #[test]
    fn test_immediate_shows_now() {
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Immediate);
        assert_eq!(cd.request(Instant::now()), RevealRequest::ShowNow);
        assert!(!cd.is_delayed());
    }

    #[test]
    fn test_delayed_fires_after_deadline_once() {
        let t0 = Instant::now();
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Delayed(DELAY));
        assert!(matches!(cd.request(t0), RevealRequest::Scheduled(_)));
        assert!(!cd.poll(t0 + Duration::from_millis(1000)));
        assert!(cd.poll(t0 + DELAY));
        assert!(!cd.poll(t0 + DELAY * 2));
        assert_eq!(cd.state(), SecondaryReveal::Armed);
    }

    #[test]
    fn test_restart_invalidates_previous_handle() {
        let t0 = Instant::now();
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Delayed(DELAY));
        let RevealRequest::Scheduled(first) = cd.request(t0) else {
            panic!("expected a scheduled countdown");
        };
        let second_at = t0 + Duration::from_millis(500);
        let RevealRequest::Scheduled(second) = cd.request(second_at) else {
            panic!("expected a scheduled countdown");
        };
        assert!(!cd.fire(first));
        assert_eq!(second.deadline(), Some(second_at + DELAY));
        // First deadline passes without a reveal
        assert!(!cd.poll(t0 + DELAY));
        assert!(cd.poll(second_at + DELAY));
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let t0 = Instant::now();
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Delayed(DELAY));
        let RevealRequest::Scheduled(handle) = cd.request(t0) else {
            panic!("expected a scheduled countdown");
        };
        cd.cancel();
        assert!(!cd.fire(handle));
        assert!(!cd.poll(t0 + DELAY));
        assert!(cd.is_delayed());
    }

    #[test]
    fn test_unrepresentable_deadline_never_fires() {
        let t0 = Instant::now();
        let mut cd = SecondaryCountdown::new(SecondaryPolicy::Delayed(Duration::MAX));
        let RevealRequest::Scheduled(handle) = cd.request(t0) else {
            panic!("expected a scheduled countdown");
        };
        assert_eq!(handle.deadline(), None);
        assert!(!cd.poll(t0 + Duration::from_secs(86_400 * 365)));
        assert_eq!(cd.pending(), Some(handle));
    }
}
