//! Iterator adapters for automatic progress tracking.
//!
//! [`ProgressIteratorExt`] attaches a bar to any [`Iterator`] with a single
//! method call: every `next()` advances the bar by one unit, and exhaustion
//! completes it, summary included.
//!
//! # Heuristics
//!
//! The adapter checks [`Iterator::size_hint`]: an exact upper bound becomes
//! the bar's total, while unknown bounds fall back to the `-1`
//! unknown-total sentinel (the bar shows its unfilled placeholder and keeps
//! counting).
//!
//! # Example
//!
//! ```no_run
//! use pipebar::ProgressIteratorExt as _;
//!
//! // vec.len() is exact, so the total is known up front
//! for item in vec![1, 2, 3].into_iter().progress() {
//!     // ...
//! }
//! ```

use crate::{
    bar::ProgressBar,
    builder::ProgressBarBuilder,
    sink::{RenderSink, Terminal},
};

/// Total used when an iterator cannot report an exact size.
const UNKNOWN_TOTAL: i64 = -1;

/// An iterator adapter that advances a [`ProgressBar`] on every item.
///
/// The bar completes when the underlying iterator is exhausted; dropping
/// the adapter early leaves the bar wherever it got to.
pub struct ProgressIter<I, W: RenderSink = Terminal> {
    iter: I,
    bar: ProgressBar<W>,
}

impl<I, W: RenderSink> ProgressIter<I, W> {
    /// Creates a new adapter around an iterator and an existing bar.
    ///
    /// Usually constructed through [`ProgressIteratorExt`] instead.
    pub fn new(iter: I, bar: ProgressBar<W>) -> Self {
        Self { iter, bar }
    }

    /// Borrows the wrapped bar.
    #[must_use]
    pub fn bar(&self) -> &ProgressBar<W> {
        &self.bar
    }

    /// Consumes the adapter and returns the wrapped bar.
    pub fn into_bar(self) -> ProgressBar<W> {
        self.bar
    }
}

impl<I: Iterator, W: RenderSink> Iterator for ProgressIter<I, W> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();

        if item.is_some() {
            self.bar.increment(1);
        } else {
            // Iterator exhausted
            self.bar.complete();
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach a progress bar to any [`Iterator`].
pub trait ProgressIteratorExt: Sized {
    /// Wraps the iterator in a stdout-backed [`ProgressBar`], taking the
    /// total from `size_hint` when it is exact.
    fn progress(self) -> ProgressIter<Self>;

    /// Wraps the iterator using an existing [`ProgressBar`].
    fn progress_with<W: RenderSink>(self, bar: ProgressBar<W>) -> ProgressIter<Self, W>;

    /// Internal helper: the bar total implied by `size_hint`.
    fn total_from_size_hint(&self) -> i64;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> ProgressIter<Self> {
        let total = self.total_from_size_hint();
        ProgressIter::new(self, ProgressBarBuilder::new(total).build())
    }

    fn progress_with<W: RenderSink>(self, bar: ProgressBar<W>) -> ProgressIter<Self, W> {
        ProgressIter::new(self, bar)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn total_from_size_hint(&self) -> i64 {
        let (lower, upper) = self.size_hint();
        // Only an exact bound gives a usable total.
        match upper {
            Some(upper) if upper == lower => upper as i64,
            _ => UNKNOWN_TOTAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressIteratorExt as _;
    use crate::{builder::ProgressBarBuilder, sink::MemorySink};

    /// Iterator Integration
    /// The adapter advances once per item and completes on exhaustion.
    #[test]
    fn test_iterator_adapter() {
        let data = [1, 2, 3, 4, 5];
        let bar = ProgressBarBuilder::new(data.len() as i64)
            .with_sink(MemorySink::new())
            .build();

        let mut iter = data.iter().progress_with(bar);
        let mut count = 0;
        while iter.next().is_some() {
            count += 1;
        }

        assert_eq!(count, 5);
        let bar = iter.into_bar();
        assert_eq!(bar.value(), 5);

        let output = bar.into_sink().output();
        assert!(output.contains("] 100%"), "exhaustion must complete the bar");
        assert_eq!(output.matches("Execution time:").count(), 1);
    }

    /// Size-Hint Heuristic
    /// Exact bounds become the total; unknown bounds map to the -1 sentinel.
    #[test]
    fn test_total_from_size_hint() {
        let exact = [1u8, 2, 3].iter();
        assert_eq!(exact.total_from_size_hint(), 3);

        let unknown = std::iter::repeat(0u8).take_while(|_| true);
        assert_eq!(unknown.total_from_size_hint(), -1);
    }
}
