//! Fluent construction of [`ProgressBar`] instances.
//!
//! [`ProgressBar::new`] covers the common case (stdout, summary on exit,
//! 100 ms render interval). The builder exists for everything else:
//! suppressing the summary, widening or tightening the render throttle,
//! rendering into a different [`RenderSink`] (a [`MemorySink`](crate::MemorySink)
//! in tests, a [`NullSink`](crate::NullSink) for silent timing), or
//! backdating the session start when resuming work that began earlier.

use std::time::Duration;

use web_time::Instant;

use crate::{
    bar::ProgressBar,
    sink::{RenderSink, Terminal},
    state::ProgressState,
};

/// Default minimum spacing between two rendered frames.
pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// A builder for [`ProgressBar`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pipebar::{MemorySink, ProgressBarBuilder};
///
/// let bar = ProgressBarBuilder::new(20)
///     .with_print_on_exit(false)
///     .with_render_interval(Duration::from_millis(250))
///     .with_sink(MemorySink::new())
///     .build();
/// ```
pub struct ProgressBarBuilder<W: RenderSink = Terminal> {
    total: i64,
    print_on_exit: bool,
    render_interval: Duration,
    start: Option<Instant>,
    sink: W,
}

impl ProgressBarBuilder<Terminal> {
    /// Starts building a bar for the given expected total, targeting stdout.
    #[must_use]
    pub fn new(total: i64) -> Self {
        Self {
            total,
            print_on_exit: true,
            render_interval: DEFAULT_RENDER_INTERVAL,
            start: None,
            sink: Terminal,
        }
    }
}

impl<W: RenderSink> ProgressBarBuilder<W> {
    /// Sets whether the execution-time summary is emitted when the session
    /// closes. Defaults to true.
    #[must_use]
    pub fn with_print_on_exit(mut self, print_on_exit: bool) -> Self {
        self.print_on_exit = print_on_exit;
        self
    }

    /// Sets the minimum spacing between two rendered frames. Defaults to
    /// [`DEFAULT_RENDER_INTERVAL`].
    #[must_use]
    pub fn with_render_interval(mut self, render_interval: Duration) -> Self {
        self.render_interval = render_interval;
        self
    }

    /// Sets the session start time explicitly, for resuming work that began
    /// before this bar existed or for synchronizing a batch of bars.
    #[must_use]
    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Renders into the given sink instead of the current one.
    #[must_use]
    pub fn with_sink<S: RenderSink>(self, sink: S) -> ProgressBarBuilder<S> {
        ProgressBarBuilder {
            total: self.total,
            print_on_exit: self.print_on_exit,
            render_interval: self.render_interval,
            start: self.start,
            sink,
        }
    }

    /// Consumes the builder and returns the constructed [`ProgressBar`].
    ///
    /// A `-1` total emits the unknown-total placeholder line immediately.
    #[must_use]
    pub fn build(self) -> ProgressBar<W> {
        let mut state = ProgressState::new(self.total, self.print_on_exit, self.render_interval);
        if let Some(start) = self.start {
            state.mark_started(start);
        }

        ProgressBar::from_parts(state, self.sink)
    }
}
