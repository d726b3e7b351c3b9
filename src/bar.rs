//! The progress bar lifecycle: increment, render, complete, close.
//!
//! A [`ProgressBar`] wraps a [`ProgressState`] and owns every rendering
//! decision. Callers advance it once per completed unit; the bar coalesces
//! bursts of increments through a wall-clock throttle and emits at most one
//! carriage-return frame per interval, so a tight loop costs one terminal
//! write per ~100 ms instead of one per unit.
//!
//! # Scoped sessions
//!
//! [`ProgressBar::open`] starts the session clock and returns a
//! [`ProgressScope`] guard. Dropping the guard (normal fall-through, early
//! return, or unwind) stops the clock, renders the full bar, and emits the
//! execution-time summary. A panic inside the scope still finalizes the bar
//! and then propagates.
//!
//! # Summary authority
//!
//! Scope exit owns the summary line. [`complete`](ProgressBar::complete)
//! prints it only when no scope is active, and a printed-once latch keeps
//! any combination of manual completion and scope exit from emitting it
//! twice.

use colored::Colorize as _;
use web_time::Instant;

use crate::{
    fmt::format_elapsed,
    sink::{RenderSink, Terminal},
    state::ProgressState,
};

/// Width of the fully-drawn bar, in `=` characters.
const BAR_WIDTH: usize = 50;

/// Width of the unknown-total placeholder interior, in spaces.
const PLACEHOLDER_WIDTH: usize = 40;

/// A terminal progress bar for a known number of work units.
///
/// Construct one with [`ProgressBar::new`] or, for non-default options,
/// through [`ProgressBarBuilder`](crate::ProgressBarBuilder).
///
/// # Example
///
/// ```no_run
/// use pipebar::ProgressBar;
///
/// # struct Job; impl Job { fn run(&self) {} }
/// # let jobs: Vec<Job> = vec![];
/// let mut bar = ProgressBar::new(jobs.len() as i64);
/// let mut scope = bar.open();
/// for job in &jobs {
///     job.run();
///     scope.increment(1);
/// }
/// // scope drop renders 100% and prints the execution time
/// ```
pub struct ProgressBar<W: RenderSink = Terminal> {
    state: ProgressState,
    sink: W,
    /// True between `open()` and `close()`.
    scope_active: bool,
    /// Latch: the summary line is emitted at most once per bar.
    summary_printed: bool,
}

impl ProgressBar<Terminal> {
    /// Creates a stdout-backed bar with default options: summary on exit,
    /// 100 ms render interval.
    ///
    /// A total of `-1` means "unknown": the constructor immediately emits an
    /// unfilled placeholder line. Other non-positive totals draw nothing and
    /// make every increment a recovered fault.
    #[must_use]
    pub fn new(total: i64) -> Self {
        crate::ProgressBarBuilder::new(total).build()
    }
}

impl<W: RenderSink> ProgressBar<W> {
    pub(crate) fn from_parts(state: ProgressState, sink: W) -> Self {
        let mut bar = Self {
            state,
            sink,
            scope_active: false,
            summary_printed: false,
        };

        // Unknown-total affordance: show an empty bar right away, since no
        // meaningful percentage will ever be rendered for this session.
        if bar.state.total() == -1 {
            bar.sink
                .write_frame(&format!("[{}] 0%", " ".repeat(PLACEHOLDER_WIDTH)));
        }

        bar
    }

    /// Starts the session clock and returns a guard that finalizes the bar
    /// when dropped.
    pub fn open(&mut self) -> ProgressScope<'_, W> {
        self.state.mark_started(Instant::now());
        self.scope_active = true;
        ProgressScope { bar: self }
    }

    /// Records `amount` completed units and renders if the throttle allows.
    ///
    /// Starts the session clock if nothing has yet (for callers that never
    /// open a scope). A zero total makes the percentage undefined; that
    /// fault is absorbed into the fault counter and the render for this call
    /// is skipped. When the throttle suppresses the frame that would have
    /// shown completion, reaching the total still triggers
    /// [`complete`](Self::complete).
    pub fn increment(&mut self, amount: u64) {
        let now = Instant::now();

        if !self.state.started() {
            self.state.mark_started(now);
        }
        self.state.advance(amount);

        let percent = match self.state.percent() {
            Ok(percent) => percent,
            Err(_) => {
                self.state.record_fault();
                return;
            }
        };

        if self.state.throttle_open(now) {
            self.state.mark_rendered(now);
            self.render(percent);
        } else if self.state.total() >= 0 && self.state.value() == self.state.total().unsigned_abs()
        {
            self.complete();
        }
    }

    /// Returns the cumulative completed-unit count.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.state.value()
    }

    /// Sets the completed-unit count directly.
    ///
    /// Does not render; the next rendered frame reflects the new value.
    pub fn set_value(&mut self, value: u64) {
        self.state.set_value(value);
    }

    /// Returns the number of recovered zero-total faults.
    #[must_use]
    pub fn faults(&self) -> u64 {
        self.state.faults()
    }

    /// Borrows the underlying state, for callers that want the raw derived
    /// quantities (percentage, ETA, throughput) without rendering.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Forces a frame showing the bar completely filled, regardless of the
    /// actual count, followed by a blank line.
    pub fn update(&mut self) {
        self.sink
            .write_frame(&format!("\r[{}] 100%", "=".repeat(BAR_WIDTH)));
        self.sink.write_frame("\n\n");
    }

    /// Completes the bar: snaps the count to the total, renders the full
    /// bar, and prints the execution-time summary when no scope is active.
    ///
    /// Safe to call at any time and idempotent in effect, which makes it the
    /// cooperative-cancellation hook: an interrupted caller can invoke it
    /// before terminating and still get the summary.
    pub fn complete(&mut self) {
        let total = self.state.total().max(0);
        self.state.set_value(total.unsigned_abs());
        self.update();

        if !self.scope_active {
            self.emit_summary();
        }
    }

    /// Ends the session: stops the clock and completes the bar. The summary
    /// line, if enabled and not yet printed, is emitted here.
    ///
    /// Called by [`ProgressScope`] on drop; harmless to call again after.
    pub fn close(&mut self) {
        self.state.mark_stopped(Instant::now());
        self.scope_active = false;
        self.complete();
    }

    /// Consumes the bar and returns its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn render(&mut self, percent: f64) {
        let elapsed = self
            .state
            .elapsed()
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        let remaining = self
            .state
            .remaining()
            .map_or(0.0, |remaining| remaining.as_secs_f64());
        let throughput = self.state.throughput();

        // f64 -> usize saturates, so negative percentages (the -1 sentinel)
        // draw an empty bar instead of panicking.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fill = (percent / 2.0) as usize;

        #[allow(clippy::cast_possible_truncation)]
        let whole_percent = percent as i64;

        self.sink.write_frame(&format!(
            "\r[{}] {}% (ETA: {:.2}s/{:.2}s) {:.2} MBits/s",
            "=".repeat(fill),
            whole_percent,
            elapsed,
            remaining,
            8.0 * throughput,
        ));
    }

    fn emit_summary(&mut self) {
        if self.summary_printed || !self.state.print_on_exit() {
            return;
        }
        self.summary_printed = true;

        let elapsed = self.state.elapsed().unwrap_or_default();
        let line = format!("Execution time: {}", format_elapsed(elapsed));
        self.sink.write_frame(&format!("\n{}\n", line.blue()));
    }
}

/// RAII guard for one progress session.
///
/// Derefs to the [`ProgressBar`] it wraps, so `scope.increment(1)` works
/// directly. Dropping the guard closes the bar on every exit path,
/// including early returns and unwinding panics; the panic itself is not
/// swallowed.
pub struct ProgressScope<'a, W: RenderSink> {
    bar: &'a mut ProgressBar<W>,
}

impl<W: RenderSink> std::ops::Deref for ProgressScope<'_, W> {
    type Target = ProgressBar<W>;

    fn deref(&self) -> &Self::Target {
        self.bar
    }
}

impl<W: RenderSink> std::ops::DerefMut for ProgressScope<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bar
    }
}

impl<W: RenderSink> Drop for ProgressScope<'_, W> {
    fn drop(&mut self) {
        self.bar.close();
    }
}
