//! Cooldown gate: at most one event per cooldown window.

use std::time::Duration;

use tracing::debug;

/// Cooldown for navigation key presses; short enough to allow key repeat.
pub const NAVIGATION_COOLDOWN: Duration = Duration::from_millis(10);

/// Cooldown for semantic signal gestures; one-shot delivery.
pub const SIGNAL_COOLDOWN: Duration = Duration::from_secs(1);

/// Shared by every gesture class of a mode: admitting any event restarts the
/// window for all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventGate {
    cooldown:   Duration,
    last_event: Option<Duration>,
}

impl EventGate {
    pub fn new(cooldown: Duration) -> Self {
        EventGate { cooldown, last_event: None }
    }

    pub fn last_event(&self) -> Option<Duration> { self.last_event }

    /// Would an event at `now` be admitted?
    pub fn is_open(&self, now: Duration) -> bool {
        match self.last_event {
            None       => true,
            Some(last) => now.checked_sub(last).map_or(false, |elapsed| elapsed > self.cooldown),
        }
    }

    /// Pass `candidate` through if the cooldown has strictly elapsed since the
    /// last admitted event, recording `now` as the new last event.
    ///
    /// A `now` earlier than the last event means the frame clock restarted:
    /// the candidate is rejected and `now` becomes the new reference, so the
    /// gate stays shut for one cooldown at most.
    pub fn admit<E>(&mut self, candidate: E, now: Duration) -> Option<E> {
        if let Some(last) = self.last_event {
            if now < last {
                debug!(?last, ?now, "frame clock went backwards, restarting cooldown");
                self.last_event = Some(now);
                return None;
            }
        }
        if !self.is_open(now) {
            return None;
        }
        self.last_event = Some(now);
        Some(candidate)
    }

    pub fn reset(&mut self) {
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn first_event_always_passes() {
        let mut gate = EventGate::new(SIGNAL_COOLDOWN);
        assert_eq!(gate.admit("x", ms(0)), Some("x"));
        assert_eq!(gate.last_event(), Some(ms(0)));
    }

    #[test]
    fn burst_inside_window_admits_one() {
        for n in 1..=20u64 {
            let mut gate = EventGate::new(SIGNAL_COOLDOWN);
            let admitted = (0..n)
                .filter_map(|i| gate.admit(i, ms(5_000 + i * 40)))
                .count();
            assert_eq!(admitted, 1, "burst of {}", n);
        }
    }

    #[test]
    fn spaced_events_all_pass() {
        let mut gate = EventGate::new(NAVIGATION_COOLDOWN);
        let admitted = (0..50u64).filter_map(|i| gate.admit(i, ms(i * 11))).count();
        assert_eq!(admitted, 50);
    }

    #[test]
    fn exactly_one_cooldown_is_not_enough() {
        let mut gate = EventGate::new(SIGNAL_COOLDOWN);
        gate.admit((), ms(0));
        assert_eq!(gate.admit((), ms(1_000)), None);
        assert_eq!(gate.admit((), ms(1_001)), Some(()));
    }

    #[test]
    fn rejected_events_do_not_extend_window() {
        let mut gate = EventGate::new(SIGNAL_COOLDOWN);
        gate.admit((), ms(0));
        assert!(gate.admit((), ms(900)).is_none());
        assert_eq!(gate.last_event(), Some(ms(0)));
        assert!(gate.admit((), ms(1_100)).is_some());
    }

    #[test]
    fn time_going_backwards_is_rejected() {
        let mut gate = EventGate::new(NAVIGATION_COOLDOWN);
        gate.admit((), ms(500));
        assert!(!gate.is_open(ms(100)));
        assert_eq!(gate.admit((), ms(100)), None);
    }

    #[test]
    fn clock_restart_blocks_for_one_cooldown_only() {
        let mut gate = EventGate::new(SIGNAL_COOLDOWN);
        assert!(gate.admit((), ms(3_600_000)).is_some());

        // Estimator restarted: its clock is back near zero.
        assert_eq!(gate.admit((), ms(50)), None);
        assert_eq!(gate.last_event(), Some(ms(50)));
        assert_eq!(gate.admit((), ms(900)), None);
        assert_eq!(gate.admit((), ms(1_100)), Some(()));
    }

    #[test]
    fn reset_reopens_gate() {
        let mut gate = EventGate::new(SIGNAL_COOLDOWN);
        gate.admit((), ms(0));
        gate.reset();
        assert!(gate.is_open(ms(1)));
    }
}
