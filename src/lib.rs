//! # `pipebar`
//!
//! A scoped terminal progress bar with ETA and throughput estimation.
//!
//! `pipebar` tracks how many of an expected number of work units have
//! completed and renders a throttled, carriage-return-overwritten progress
//! line with completion percentage, elapsed/remaining time, and throughput.
//! Closing the session prints a colorized execution-time summary. It is
//! designed to be:
//!
//! * **Scoped**: [`ProgressBar::open`] returns a guard that finalizes the
//!   bar on every exit path, panics included.
//! * **Throttled**: bursts of increments coalesce into at most one rendered
//!   frame per interval; reaching the total always shows 100%.
//! * **Embeddable or standalone**: wrap a unit of work in code, or run the
//!   `pipebar` binary as a pipe filter that advances once per stdin line.
//!
//! ## Modules
//!
//! * [`bar`]: The [`ProgressBar`] lifecycle and the [`ProgressScope`] guard.
//! * [`builder`]: Fluent interface for constructing [`ProgressBar`] instances.
//! * [`fmt`]: Magnitude-banded elapsed-time formatting.
//! * [`iter`]: Extension trait for tracking progress on iterators.
//! * [`sink`]: The terminal write/flush boundary, as a swappable trait.
//! * [`state`]: The raw counters and derived quantities behind a bar.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bar;
pub mod builder;
pub mod fmt;
pub mod iter;
pub mod sink;
pub mod state;

pub use bar::{ProgressBar, ProgressScope};
pub use builder::{ProgressBarBuilder, DEFAULT_RENDER_INTERVAL};
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use sink::{MemorySink, NullSink, RenderSink, Terminal};
pub use state::{ProgressError, ProgressState};
