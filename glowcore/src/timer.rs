//! Fixed-interval tick driver for egui hosts.
//!
//! egui repaints whenever input arrives (every pointer move over the
//! overlay), so repaints cannot double as the animation timer. `FrameTimer`
//! separates the two: the host asks [`FrameTimer::poll`] at the top of
//! `update()` whether a tick is due, advances the animation at most once if
//! so, and calls [`FrameTimer::schedule`] at the bottom to wake egui for
//! the next tick.
//!
//! Late frames never trigger catch-up bursts: a stalled window resumes at
//! the normal cadence, the same way a coalescing OS timer behaves.

use std::time::{Duration, Instant};

/// Shortest accepted interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);
/// Longest accepted interval.
pub const MAX_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct FrameTimer {
    interval: Duration,
    /// When the last tick was consumed (`None` before the first poll).
    last_tick: Option<Instant>,
    ticks: u64,
}

impl FrameTimer {
    /// A timer firing every `interval`, clamped to 10 ms..=1 s.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.clamp(MIN_INTERVAL, MAX_INTERVAL),
            last_tick: None,
            ticks: 0,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks consumed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True when a tick is due at `now`. The first poll only arms the timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                self.ticks += 1;
                true
            }
            Some(_) => false,
        }
    }

    /// Time left until the next tick at `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Ask egui to repaint when the next tick is due.
    pub fn schedule(&self, ctx: &egui::Context) {
        ctx.request_repaint_after(self.remaining(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_arms() {
        let mut timer = FrameTimer::from_millis(30);
        let t0 = Instant::now();
        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(29)));
        assert!(timer.poll(t0 + Duration::from_millis(30)));
        assert_eq!(timer.ticks(), 1);
    }

    #[test]
    fn test_no_catch_up_after_stall() {
        let mut timer = FrameTimer::from_millis(20);
        let t0 = Instant::now();
        timer.poll(t0);
        // a one-second stall yields exactly one tick
        let late = t0 + Duration::from_secs(1);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(19)));
        assert!(timer.poll(late + Duration::from_millis(20)));
        assert_eq!(timer.ticks(), 2);
    }

    #[test]
    fn test_interval_clamped() {
        assert_eq!(FrameTimer::from_millis(1).interval(), MIN_INTERVAL);
        assert_eq!(FrameTimer::from_millis(60_000).interval(), MAX_INTERVAL);
    }

    #[test]
    fn test_remaining() {
        let mut timer = FrameTimer::from_millis(50);
        let t0 = Instant::now();
        assert_eq!(timer.remaining(t0), Duration::ZERO);
        timer.poll(t0);
        assert_eq!(timer.remaining(t0 + Duration::from_millis(20)), Duration::from_millis(30));
        assert_eq!(timer.remaining(t0 + Duration::from_millis(80)), Duration::ZERO);
    }
}
