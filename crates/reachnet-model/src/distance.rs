//! Distance module - optimisation criteria and distance values

use crate::{ModelError, Timing};

/// Optimisation criterion of a minimal-path query
///
/// Over all valid temporal paths reaching a vertex:
/// - Shortest: fewest hyperedges
/// - Fastest: smallest span between the first and the last hyperedge
/// - Foremost: earliest timing of the last hyperedge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceType {
    /// Minimum hop count
    Shortest,

    /// Minimum elapsed time between departure and arrival
    Fastest,

    /// Minimum arrival time
    Foremost,
}

impl DistanceType {
    /// Every distance type, in declaration order
    pub const ALL: [DistanceType; 3] = [
        DistanceType::Shortest,
        DistanceType::Fastest,
        DistanceType::Foremost,
    ];

    /// Get the distance type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceType::Shortest => "shortest",
            DistanceType::Fastest => "fastest",
            DistanceType::Foremost => "foremost",
        }
    }
}

impl std::fmt::Display for DistanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DistanceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shortest" => Ok(DistanceType::Shortest),
            "fastest" => Ok(DistanceType::Fastest),
            "foremost" => Ok(DistanceType::Foremost),
            _ => Err(ModelError::InvalidDistanceType(s.to_string())),
        }
    }
}

/// Final distance of one reachable vertex
///
/// The variant always matches the [`DistanceType`] of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance<T: Timing> {
    /// Hyperedge count (SHORTEST)
    Hops(usize),

    /// Last timing minus first timing (FASTEST)
    Elapsed(T::Elapsed),

    /// Timing of the last hyperedge (FOREMOST)
    Arrival(T),
}

impl<T: Timing> Distance<T> {
    /// The distance type this value answers
    pub fn distance_type(&self) -> DistanceType {
        match self {
            Distance::Hops(_) => DistanceType::Shortest,
            Distance::Elapsed(_) => DistanceType::Fastest,
            Distance::Arrival(_) => DistanceType::Foremost,
        }
    }

    /// Hop count, if this is a SHORTEST distance
    pub fn hops(&self) -> Option<usize> {
        match self {
            Distance::Hops(hops) => Some(*hops),
            _ => None,
        }
    }

    /// Elapsed time, if this is a FASTEST distance
    pub fn elapsed(&self) -> Option<T::Elapsed> {
        match self {
            Distance::Elapsed(elapsed) => Some(*elapsed),
            _ => None,
        }
    }

    /// Arrival time, if this is a FOREMOST distance
    pub fn arrival(&self) -> Option<T> {
        match self {
            Distance::Arrival(arrival) => Some(*arrival),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distance_type() {
        assert_eq!("shortest".parse::<DistanceType>().unwrap(), DistanceType::Shortest);
        assert_eq!("Fastest".parse::<DistanceType>().unwrap(), DistanceType::Fastest);
        assert_eq!(" FOREMOST ".parse::<DistanceType>().unwrap(), DistanceType::Foremost);
    }

    #[test]
    fn test_unknown_distance_type_is_not_entity_error() {
        let err = "quickest".parse::<DistanceType>().unwrap_err();
        assert_eq!(err, ModelError::InvalidDistanceType("quickest".to_string()));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_as_str_parses_back() {
        for distance in DistanceType::ALL {
            assert_eq!(distance.as_str().parse::<DistanceType>().unwrap(), distance);
            assert_eq!(distance.to_string(), distance.as_str());
        }
    }

    #[test]
    fn test_distance_accessors() {
        let hops: Distance<i64> = Distance::Hops(3);
        assert_eq!(hops.hops(), Some(3));
        assert_eq!(hops.elapsed(), None);
        assert_eq!(hops.distance_type(), DistanceType::Shortest);

        let elapsed: Distance<i64> = Distance::Elapsed(4);
        assert_eq!(elapsed.elapsed(), Some(4));
        assert_eq!(elapsed.distance_type(), DistanceType::Fastest);

        let arrival: Distance<i64> = Distance::Arrival(9);
        assert_eq!(arrival.arrival(), Some(9));
        assert_eq!(arrival.distance_type(), DistanceType::Foremost);
    }
}
