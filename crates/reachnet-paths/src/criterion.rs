//! Distance criteria as pluggable relaxation strategies
//!
//! Every engine moves the same [`Journey`] label along hyperedges. A
//! [`Criterion`] decides how a journey is scored and when one journey makes
//! another redundant. The extension rule itself is shared by all criteria.

use reachnet_model::{Distance, Timing};
use std::fmt::Debug;

/// A label describing how a vertex was reached
///
/// `departure` is the timing of the first hyperedge used and `arrival` the
/// timing of the last one. The origin label at the source has not departed
/// yet and "arrives" at the query's `min_timing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Journey<T> {
    /// Hyperedges used so far
    pub hops: usize,

    /// Timing of the first hyperedge, `None` at the origin
    pub departure: Option<T>,

    /// Timing of the last hyperedge (or `min_timing` at the origin)
    pub arrival: T,
}

impl<T: Timing> Journey<T> {
    /// The label of the source before any hyperedge is used
    pub fn origin(min_timing: T) -> Self {
        Self {
            hops: 0,
            departure: None,
            arrival: min_timing,
        }
    }

    /// Continue along a hyperedge with the given timing
    ///
    /// Returns `None` when the hyperedge fires before this journey arrived.
    /// For the origin this enforces `timing >= min_timing`.
    pub fn extend(&self, timing: T) -> Option<Self> {
        if timing < self.arrival {
            return None;
        }
        Some(Self {
            hops: self.hops + 1,
            departure: Some(self.departure.unwrap_or(timing)),
            arrival: timing,
        })
    }

    /// Time between departure and arrival (zero at the origin)
    pub fn elapsed(&self) -> T::Elapsed {
        self.arrival
            .elapsed_since(self.departure.unwrap_or(self.arrival))
    }
}

/// Scoring and dominance rules of one distance type
///
/// Requirements shared by all implementations:
/// - `value` never decreases when a journey is extended
/// - if `a` dominates `b` then `(value(a), a.arrival) <= (value(b), b.arrival)`
/// - dominance is reflexive and transitive
pub trait Criterion<T: Timing> {
    /// Scalar minimised by the query
    type Value: Copy + Ord + Debug;

    /// Score of a journey
    fn value(journey: &Journey<T>) -> Self::Value;

    /// Whether every continuation of `b` is matched or beaten by one of `a`
    fn dominates(a: &Journey<T>, b: &Journey<T>) -> bool;

    /// Convert a final score into the public distance value
    fn distance(value: Self::Value) -> Distance<T>;
}

/// Minimum hop count
#[derive(Debug, Clone, Copy)]
pub struct Shortest;

/// Minimum span between first and last hyperedge
#[derive(Debug, Clone, Copy)]
pub struct Fastest;

/// Minimum arrival time
#[derive(Debug, Clone, Copy)]
pub struct Foremost;

impl<T: Timing> Criterion<T> for Shortest {
    type Value = usize;

    fn value(journey: &Journey<T>) -> usize {
        journey.hops
    }

    fn dominates(a: &Journey<T>, b: &Journey<T>) -> bool {
        a.hops <= b.hops && a.arrival <= b.arrival
    }

    fn distance(value: usize) -> Distance<T> {
        Distance::Hops(value)
    }
}

impl<T: Timing> Criterion<T> for Fastest {
    type Value = T::Elapsed;

    fn value(journey: &Journey<T>) -> T::Elapsed {
        journey.elapsed()
    }

    fn dominates(a: &Journey<T>, b: &Journey<T>) -> bool {
        // A later departure shortens every continuation; the origin has not
        // committed to a departure and beats everything
        let departs_later = match (a.departure, b.departure) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a_dep), Some(b_dep)) => a_dep >= b_dep,
        };
        departs_later && a.arrival <= b.arrival
    }

    fn distance(value: T::Elapsed) -> Distance<T> {
        Distance::Elapsed(value)
    }
}

impl<T: Timing> Criterion<T> for Foremost {
    type Value = T;

    fn value(journey: &Journey<T>) -> T {
        journey.arrival
    }

    fn dominates(a: &Journey<T>, b: &Journey<T>) -> bool {
        a.arrival <= b.arrival
    }

    fn distance(value: T) -> Distance<T> {
        Distance::Arrival(value)
    }
}

/// Whether any journey in `bag` dominates `candidate`
pub(crate) fn is_dominated<T, C>(bag: &[Journey<T>], candidate: &Journey<T>) -> bool
where
    T: Timing,
    C: Criterion<T>,
{
    bag.iter().any(|held| C::dominates(held, candidate))
}

/// Insert `candidate` into a Pareto bag, evicting what it dominates
///
/// Returns `false` (and leaves the bag untouched) if the candidate is
/// already dominated.
pub(crate) fn insert_pareto<T, C>(bag: &mut Vec<Journey<T>>, candidate: Journey<T>) -> bool
where
    T: Timing,
    C: Criterion<T>,
{
    if is_dominated::<T, C>(bag, &candidate) {
        return false;
    }
    bag.retain(|held| !C::dominates(&candidate, held));
    bag.push(candidate);
    true
}
