//! Core primitives for tracking progress state.
//!
//! This module defines [`ProgressState`], the plain-data heart of a progress
//! session: the expected total, the cumulative count of completed units, the
//! session timestamps, and the render-throttle bookkeeping. Everything else
//! in the crate is derived from it.
//!
//! # Derived quantities
//!
//! Percentage, elapsed time, remaining-time estimate, and throughput are all
//! computed on demand from the raw counters at call time. Nothing is cached
//! beyond what the throttle timestamps already imply, so a caller always sees
//! the state as of "now".
//!
//! A `ProgressState` is owned by exactly one [`ProgressBar`](crate::ProgressBar)
//! and is not designed for sharing across threads.

use std::time::Duration;

use thiserror::Error;
use web_time::Instant;

/// Fault raised by derived-quantity computations.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The expected total is zero, so a completion percentage is undefined.
    ///
    /// This fault is recoverable: [`ProgressBar::increment`](crate::ProgressBar::increment)
    /// absorbs it into the state's fault counter and skips the render for
    /// that call.
    #[error("total is zero, completion percentage is undefined")]
    ZeroTotal,
}

/// Raw counters and timestamps for one progress session.
///
/// The expected `total` is fixed at construction. `current` normally grows
/// monotonically through [`advance`](Self::advance), though
/// [`set_value`](Self::set_value) may move it anywhere. The fault counter
/// records recovered zero-total faults and is diagnostic only.
pub struct ProgressState {
    /// Expected unit count. May be non-positive; `-1` is the recognized
    /// unknown-total sentinel.
    total: i64,

    /// Cumulative completed units.
    current: u64,

    /// Recovered arithmetic faults (zero-total percentage requests).
    faults: u64,

    /// The instant the session started. Set on scope entry, or lazily by the
    /// first increment.
    started: Option<Instant>,

    /// The instant the session stopped. Set on scope exit.
    stopped: Option<Instant>,

    /// The instant of the most recent emitted render. Only advances forward.
    last_render: Option<Instant>,

    /// Minimum spacing between two renders.
    render_interval: Duration,

    /// Whether the elapsed-time summary is emitted when the session closes.
    print_on_exit: bool,
}

impl ProgressState {
    /// Creates a fresh state for the given expected total.
    #[must_use]
    pub fn new(total: i64, print_on_exit: bool, render_interval: Duration) -> Self {
        Self {
            total,
            current: 0,
            faults: 0,
            started: None,
            stopped: None,
            last_render: None,
            render_interval,
            print_on_exit,
        }
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// Returns the expected total.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Returns the cumulative completed-unit count.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.current
    }

    /// Sets the completed-unit count directly.
    ///
    /// Unlike [`advance`](Self::advance) this path is not required to be
    /// monotonic; the next render simply reflects the new value.
    pub fn set_value(&mut self, value: u64) {
        self.current = value;
    }

    /// Adds `amount` completed units.
    pub fn advance(&mut self, amount: u64) {
        self.current = self.current.saturating_add(amount);
    }

    /// Returns the number of recovered faults.
    #[must_use]
    pub fn faults(&self) -> u64 {
        self.faults
    }

    /// Records one recovered fault.
    pub fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// Returns whether the summary line should be emitted on session close.
    #[must_use]
    pub fn print_on_exit(&self) -> bool {
        self.print_on_exit
    }

    // ========================================================================
    // Session timestamps
    // ========================================================================

    /// Returns whether the session clock has started.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started.is_some()
    }

    /// Starts the session clock at `now`.
    ///
    /// Re-entry overwrites the previous start; one call per logical session
    /// is the supported pattern.
    pub fn mark_started(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Stops the session clock at `now`, freezing [`elapsed`](Self::elapsed).
    pub fn mark_stopped(&mut self, now: Instant) {
        self.stopped = Some(now);
    }

    // ========================================================================
    // Render throttle
    // ========================================================================

    /// Returns whether enough wall-clock time has passed since the last
    /// render for another one to be emitted.
    ///
    /// Before the first render this is always true.
    #[must_use]
    pub fn throttle_open(&self, now: Instant) -> bool {
        self.last_render
            .map_or(true, |last| now.duration_since(last) > self.render_interval)
    }

    /// Records that a render was emitted at `now`.
    pub fn mark_rendered(&mut self, now: Instant) {
        // The render timestamp never moves backwards.
        if self.last_render.map_or(true, |last| now >= last) {
            self.last_render = Some(now);
        }
    }

    // ========================================================================
    // Derived quantities
    // ========================================================================

    /// Returns the completion percentage, `current / total * 100`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::ZeroTotal`] when the expected total is zero.
    /// A negative total (the `-1` sentinel) yields a negative percentage;
    /// that input is a documented quirk, not a contract.
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Result<f64, ProgressError> {
        if self.total == 0 {
            return Err(ProgressError::ZeroTotal);
        }
        Ok(self.current as f64 / self.total as f64 * 100.0)
    }

    /// Returns the wall-clock time this session has been running.
    ///
    /// While the session is live this is measured up to "now"; once
    /// [`mark_stopped`](Self::mark_stopped) has run it is frozen at the
    /// stop instant. Returns `None` before the clock has started.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started?;

        Some(
            self.stopped
                .map_or_else(|| started.elapsed(), |stopped| stopped.duration_since(started)),
        )
    }

    /// Estimates the time remaining until `current` reaches `total`.
    ///
    /// The estimate extrapolates the observed average rate:
    /// `elapsed / current * (total - current)`. Returns `None` until at
    /// least one unit has completed, since zero completed work yields no
    /// rate. The remaining-units term saturates at zero, so an overshooting
    /// `current` produces a zero estimate rather than a negative one.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        if self.current == 0 {
            return None;
        }

        let elapsed = self.elapsed()?.as_secs_f64();
        let left = self.total.saturating_sub(self.current as i64).max(0) as f64;

        Some(Duration::from_secs_f64(elapsed / self.current as f64 * left))
    }

    /// Returns the average throughput in units per second over the session
    /// lifetime, or `0.0` before any time has elapsed.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn throughput(&self) -> f64 {
        if let Some(elapsed) = self.elapsed() {
            let secs = elapsed.as_secs_f64();
            if secs > 0.0 {
                return self.current as f64 / secs;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{ProgressError, ProgressState};

    fn state(total: i64) -> ProgressState {
        ProgressState::new(total, true, Duration::from_millis(100))
    }

    /// Percentage Math
    /// For total > 0, percent is exactly current/total*100 at every step.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_percent_exact() {
        let mut s = state(8);

        assert_eq!(s.percent().unwrap(), 0.0);

        s.advance(2);
        assert_eq!(s.percent().unwrap(), 25.0);

        s.advance(6);
        assert_eq!(s.percent().unwrap(), 100.0);
    }

    /// Zero-Total Fault
    /// A zero total makes the percentage undefined; the fault is an Err,
    /// never a panic, and the fault counter is caller-driven.
    #[test]
    fn test_zero_total_fault() {
        let mut s = state(0);
        s.advance(1);

        assert!(matches!(s.percent(), Err(ProgressError::ZeroTotal)));

        s.record_fault();
        s.record_fault();
        assert_eq!(s.faults(), 2);
    }

    /// Lazy Clock
    /// Elapsed and remaining are None before the clock starts; throughput
    /// degrades to zero instead of dividing by nothing.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_unstarted_clock() {
        let s = state(10);

        assert!(s.elapsed().is_none());
        assert!(s.remaining().is_none());
        assert_eq!(s.throughput(), 0.0);
    }

    /// Remaining Estimate
    /// No estimate at zero completed units; once work completes the estimate
    /// extrapolates the observed rate, and overshoot saturates to zero.
    #[test]
    fn test_remaining_estimate() {
        let mut s = state(4);
        s.mark_started(Instant::now());

        assert!(s.remaining().is_none(), "no rate from zero completed units");

        s.advance(2);
        assert!(s.remaining().is_some());

        s.set_value(9);
        assert_eq!(s.remaining(), Some(Duration::ZERO));
    }

    /// Frozen Elapsed
    /// Once stopped, elapsed is fixed at stop-minus-start and no longer grows.
    #[test]
    fn test_stopped_elapsed_frozen() {
        let mut s = state(1);
        let t0 = Instant::now();

        s.mark_started(t0);
        s.mark_stopped(t0 + Duration::from_secs(3));

        assert_eq!(s.elapsed(), Some(Duration::from_secs(3)));
        assert_eq!(s.elapsed(), Some(Duration::from_secs(3)));
    }

    /// Throttle Window
    /// The throttle is open before the first render, closes inside the
    /// interval, and reopens once the interval has fully passed.
    #[test]
    fn test_throttle_window() {
        let mut s = state(10);
        let t0 = Instant::now();

        assert!(s.throttle_open(t0), "first render is never throttled");

        s.mark_rendered(t0);
        assert!(!s.throttle_open(t0 + Duration::from_millis(50)));
        assert!(s.throttle_open(t0 + Duration::from_millis(150)));
    }

    /// Render Timestamp Monotonicity
    /// A stale render mark never moves the throttle clock backwards.
    #[test]
    fn test_render_mark_monotonic() {
        let mut s = state(10);
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(500);

        s.mark_rendered(later);
        s.mark_rendered(t0);

        assert!(
            !s.throttle_open(later + Duration::from_millis(50)),
            "stale mark must not reopen the window early"
        );
    }
}
