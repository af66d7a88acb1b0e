//! Timing module - activation times of hyperedges

use std::fmt::Debug;

/// A totally ordered activation time
///
/// Timings only need to be compared and subtracted. Integers, offsets stored
/// as [`std::time::Duration`] and (with the `chrono` feature) calendar
/// timestamps all qualify.
pub trait Timing: Copy + Ord + Debug {
    /// Type of the difference between two timings (the FASTEST distance)
    type Elapsed: Copy + Ord + Debug;

    /// Time elapsed from `earlier` to `self`
    ///
    /// Callers only ask for `earlier <= self`.
    fn elapsed_since(self, earlier: Self) -> Self::Elapsed;

    /// Whether this timing lies before the zero point of its type
    fn is_negative(self) -> bool {
        false
    }
}

// Spans are measured in the unsigned type of the same width, which holds the
// distance between any two values, so `i64::MIN` to `i64::MAX` is exact.
macro_rules! signed_timing {
    ($($t:ty => $elapsed:ty),*) => {
        $(
            impl Timing for $t {
                type Elapsed = $elapsed;

                fn elapsed_since(self, earlier: Self) -> Self::Elapsed {
                    if self < earlier {
                        0
                    } else {
                        self.abs_diff(earlier)
                    }
                }

                fn is_negative(self) -> bool {
                    self < 0
                }
            }
        )*
    };
}

macro_rules! unsigned_timing {
    ($($t:ty),*) => {
        $(
            impl Timing for $t {
                type Elapsed = $t;

                fn elapsed_since(self, earlier: Self) -> Self::Elapsed {
                    self.saturating_sub(earlier)
                }
            }
        )*
    };
}

signed_timing!(i32 => u32, i64 => u64);
unsigned_timing!(u32, u64);

impl Timing for std::time::Duration {
    type Elapsed = std::time::Duration;

    fn elapsed_since(self, earlier: Self) -> Self::Elapsed {
        self.saturating_sub(earlier)
    }
}

#[cfg(feature = "chrono")]
impl Timing for chrono::NaiveDateTime {
    type Elapsed = chrono::TimeDelta;

    fn elapsed_since(self, earlier: Self) -> Self::Elapsed {
        self.signed_duration_since(earlier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_integer_elapsed() {
        assert_eq!(7i64.elapsed_since(3), 4);
        assert_eq!(3i32.elapsed_since(-2), 5);
        assert_eq!(10u64.elapsed_since(10), 0);
    }

    #[test]
    fn test_unsigned_never_underflows() {
        assert_eq!(3u32.elapsed_since(5), 0);
        assert_eq!((-3i32).elapsed_since(5), 0);
    }

    #[test]
    fn test_extreme_spans_stay_distinct() {
        let widest = i64::MAX.elapsed_since(i64::MIN);
        let narrower = (i64::MAX - 1).elapsed_since(i64::MIN);
        assert_eq!(widest, u64::MAX);
        assert!(narrower < widest);
        assert_eq!(i32::MAX.elapsed_since(i32::MIN), u32::MAX);
    }

    #[test]
    fn test_negative_detection() {
        assert!((-1i64).is_negative());
        assert!(!0i64.is_negative());
        assert!(!5u64.is_negative());
        assert!(!Duration::from_secs(1).is_negative());
    }

    #[test]
    fn test_duration_elapsed() {
        let a = Duration::from_secs(90);
        let b = Duration::from_secs(30);
        assert_eq!(a.elapsed_since(b), Duration::from_secs(60));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_naive_datetime_elapsed() {
        use chrono::{NaiveDate, TimeDelta};

        let start = NaiveDate::from_ymd_opt(2020, 2, 11)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let end = start + TimeDelta::days(3);
        assert_eq!(end.elapsed_since(start), TimeDelta::days(3));
        assert!(!start.is_negative());
    }
}
