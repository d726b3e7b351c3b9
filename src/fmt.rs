//! Human-readable elapsed-time formatting.
//!
//! One pure function, [`format_elapsed`], renders a duration in the unit
//! matching its magnitude: milliseconds below one second, fractional
//! seconds below a minute, `N minutes N seconds` below an hour,
//! `N hours N minutes` below a day, and fractional days beyond that.
//!
//! Band selection walks a small ordered threshold table; compound bands
//! take their sub-unit remainder from the last whole unit, so `95 s` is
//! `1 minutes 35 seconds`, not a seconds-since-start rendering.

use std::time::Duration;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * 60.0;
const DAY: f64 = 24.0 * 60.0 * 60.0;

/// The display unit chosen for a duration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Band {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// Upper bounds (exclusive, in seconds) paired with the band they select,
/// walked in ascending order. Anything past the table is days.
const BANDS: &[(f64, Band)] = &[
    (1.0, Band::Millis),
    (MINUTE, Band::Seconds),
    (HOUR, Band::Minutes),
    (DAY, Band::Hours),
];

/// Formats a duration for the execution-time summary line.
///
/// Never fails; output is always produced, in ASCII, unlocalized.
///
/// ```
/// use std::time::Duration;
/// use pipebar::fmt::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(5)), "5.00 seconds");
/// assert_eq!(format_elapsed(Duration::from_secs(95)), "1 minutes 35 seconds");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();

    let band = BANDS
        .iter()
        .find(|(limit, _)| secs < *limit)
        .map_or(Band::Days, |(_, band)| *band);

    match band {
        Band::Millis => format!("{:.0} ms", secs * 1000.0),
        Band::Seconds => format!("{secs:.2} seconds"),
        Band::Minutes => {
            let minutes = (secs / MINUTE).floor();
            let seconds = (secs % MINUTE).floor();
            format!("{minutes:.0} minutes {seconds:.0} seconds")
        }
        Band::Hours => {
            let hours = (secs / HOUR).floor();
            let minutes = ((secs % HOUR) / MINUTE).floor();
            format!("{hours:.0} hours {minutes:.0} minutes")
        }
        Band::Days => format!("{:.2} days", secs / DAY),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::format_elapsed;

    /// Band Table
    /// One representative value per magnitude band.
    #[test]
    fn test_band_representatives() {
        assert_eq!(format_elapsed(Duration::from_micros(500)), "0 ms");
        assert_eq!(format_elapsed(Duration::from_millis(42)), "42 ms");
        assert_eq!(format_elapsed(Duration::from_secs(5)), "5.00 seconds");
        assert_eq!(
            format_elapsed(Duration::from_secs(95)),
            "1 minutes 35 seconds"
        );
        assert_eq!(format_elapsed(Duration::from_secs(3700)), "1 hours 1 minutes");
        assert_eq!(format_elapsed(Duration::from_secs(90_000)), "1.04 days");
    }

    /// Band Boundaries
    /// Exact threshold values land in the higher band.
    #[test]
    fn test_band_boundaries() {
        assert_eq!(format_elapsed(Duration::from_secs(1)), "1.00 seconds");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1 minutes 0 seconds");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "1 hours 0 minutes");
        assert_eq!(format_elapsed(Duration::from_secs(86_400)), "1.00 days");
    }

    /// Degenerate Input
    /// A zero duration still renders, as zero milliseconds.
    #[test]
    fn test_zero_duration() {
        assert_eq!(format_elapsed(Duration::ZERO), "0 ms");
    }
}
