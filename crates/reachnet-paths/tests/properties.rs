//! Property tests: every engine agrees with exhaustive path enumeration

use proptest::prelude::*;
use reachnet_model::{CommunicationNetwork, Distance, DistanceType};
use reachnet_paths::{single_source_minimal_paths, Algorithm, MinimalPaths};
use std::collections::{BTreeMap, BTreeSet};

type Network = CommunicationNetwork<u8, u8, i64>;

fn arb_network() -> impl Strategy<Value = Network> {
    prop::collection::vec(
        (prop::collection::btree_set(0u8..8, 1..4), -3i64..6),
        0..7,
    )
    .prop_map(|hyperedges| {
        let members = hyperedges
            .iter()
            .enumerate()
            .map(|(h, (vs, _))| (h as u8, vs.clone()));
        let timings = hyperedges.iter().enumerate().map(|(h, (_, t))| (h as u8, *t));
        Network::new(members, timings).expect("generated keys match")
    })
}

/// Enumerate every valid path and keep the best value per vertex
fn oracle(
    network: &Network,
    source: u8,
    distance: DistanceType,
    min_timing: i64,
) -> MinimalPaths<u8, i64> {
    let hyperedges: Vec<(i64, &BTreeSet<u8>)> = network
        .timings()
        .iter()
        .map(|(h, t)| (*t, network.vertices_of(h).expect("known hyperedge")))
        .collect();

    let mut best: BTreeMap<u8, Distance<i64>> = BTreeMap::new();
    let mut used = vec![false; hyperedges.len()];

    #[allow(clippy::too_many_arguments)]
    fn walk(
        hyperedges: &[(i64, &BTreeSet<u8>)],
        used: &mut [bool],
        at: &BTreeSet<u8>,
        hops: usize,
        departure: Option<i64>,
        arrival: i64,
        source: u8,
        distance: DistanceType,
        best: &mut BTreeMap<u8, Distance<i64>>,
    ) {
        for (h, (timing, members)) in hyperedges.iter().enumerate() {
            if used[h] || *timing < arrival || at.is_disjoint(members) {
                continue;
            }
            let departure = departure.unwrap_or(*timing);
            let value = match distance {
                DistanceType::Shortest => Distance::Hops(hops + 1),
                DistanceType::Fastest => Distance::Elapsed(timing.abs_diff(departure)),
                DistanceType::Foremost => Distance::Arrival(*timing),
            };
            for &member in members.iter().filter(|&&v| v != source) {
                let better = match best.get(&member) {
                    None => true,
                    Some(held) => rank(&value) < rank(held),
                };
                if better {
                    best.insert(member, value);
                }
            }
            used[h] = true;
            walk(
                hyperedges,
                used,
                members,
                hops + 1,
                Some(departure),
                *timing,
                source,
                distance,
                best,
            );
            used[h] = false;
        }
    }

    let start = BTreeSet::from([source]);
    walk(
        &hyperedges,
        &mut used,
        &start,
        0,
        None,
        min_timing,
        source,
        distance,
        &mut best,
    );
    best
}

fn rank(distance: &Distance<i64>) -> i64 {
    match distance {
        Distance::Hops(hops) => *hops as i64,
        Distance::Elapsed(elapsed) => *elapsed as i64,
        Distance::Arrival(arrival) => *arrival,
    }
}

fn arb_distance() -> impl Strategy<Value = DistanceType> {
    prop::sample::select(DistanceType::ALL.to_vec())
}

proptest! {
    #[test]
    fn engines_match_exhaustive_search(
        network in arb_network(),
        source in 0u8..8,
        distance in arb_distance(),
        min_timing in -4i64..7,
    ) {
        let expected = if network.contains_vertex(&source) {
            Some(oracle(&network, source, distance, min_timing))
        } else {
            None
        };

        for algorithm in Algorithm::ALL {
            let result =
                single_source_minimal_paths(&network, &source, distance, min_timing, algorithm);
            match &expected {
                Some(expected) => {
                    prop_assert_eq!(&result.unwrap(), expected, "{}", algorithm);
                }
                None => {
                    prop_assert!(result.unwrap_err().is_not_found());
                }
            }
        }
    }

    #[test]
    fn source_never_in_result(
        network in arb_network(),
        source in 0u8..8,
        distance in arb_distance(),
    ) {
        prop_assume!(network.contains_vertex(&source));
        for algorithm in Algorithm::ALL {
            let paths = single_source_minimal_paths(&network, &source, distance, i64::MIN, algorithm)
                .unwrap();
            prop_assert!(!paths.contains_key(&source));
        }
    }

    #[test]
    fn raising_min_timing_never_helps(
        network in arb_network(),
        source in 0u8..8,
        min_timing in -4i64..6,
    ) {
        prop_assume!(network.contains_vertex(&source));
        let algorithm = Algorithm::recommended(&network);
        let early =
            single_source_minimal_paths(&network, &source, DistanceType::Foremost, min_timing, algorithm)
                .unwrap();
        let late = single_source_minimal_paths(
            &network,
            &source,
            DistanceType::Foremost,
            min_timing + 1,
            algorithm,
        )
        .unwrap();

        for (vertex, arrival) in &late {
            let earlier = early.get(vertex);
            prop_assert!(earlier.is_some());
            prop_assert!(earlier.and_then(Distance::arrival) <= arrival.arrival());
        }
    }
}
