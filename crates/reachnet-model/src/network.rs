//! Network module - the communication network as a temporal hypergraph

use crate::{ModelError, TemporalHypergraph, Timing};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// A communication network: participants joined by timed communication events
///
/// Each hyperedge (channel) connects a set of vertices (participants) and
/// carries one timing. The network is immutable once built; every lookup is
/// pure and cheap to share across threads.
///
/// # Examples
///
/// ```
/// use reachnet_model::CommunicationNetwork;
///
/// let network = CommunicationNetwork::new(
///     [("h1", vec!["v1", "v2"]), ("h2", vec!["v2", "v3"])],
///     [("h1", 1), ("h2", 2)],
/// )
/// .unwrap();
///
/// assert_eq!(network.vertex_count(), 3);
/// assert_eq!(network.timing(&"h2").unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommunicationNetwork<V, H, T> {
    name: Option<String>,
    members: BTreeMap<H, BTreeSet<V>>,
    timings: BTreeMap<H, T>,
    incidence: BTreeMap<V, BTreeSet<H>>,
}

impl<V, H, T> CommunicationNetwork<V, H, T>
where
    V: Clone + Ord + Debug,
    H: Clone + Ord + Debug,
    T: Timing,
{
    /// Create a network from hyperedge memberships and hyperedge timings
    ///
    /// Repeated vertices inside one hyperedge collapse into one membership.
    ///
    /// # Errors
    /// Returns [`ModelError::InconsistentTimings`] unless both mappings name
    /// exactly the same hyperedges.
    pub fn new<M, P, S>(members: M, timings: S) -> Result<Self, ModelError>
    where
        M: IntoIterator<Item = (H, P)>,
        P: IntoIterator<Item = V>,
        S: IntoIterator<Item = (H, T)>,
    {
        let members: BTreeMap<H, BTreeSet<V>> = members
            .into_iter()
            .map(|(hyperedge, vertices)| (hyperedge, vertices.into_iter().collect()))
            .collect();
        let timings: BTreeMap<H, T> = timings.into_iter().collect();

        if let Some(missing) = members.keys().find(|h| !timings.contains_key(*h)) {
            return Err(ModelError::InconsistentTimings(format!(
                "hyperedge {:?} has no timing",
                missing
            )));
        }
        if let Some(extra) = timings.keys().find(|h| !members.contains_key(*h)) {
            return Err(ModelError::InconsistentTimings(format!(
                "timing given for unknown hyperedge {:?}",
                extra
            )));
        }

        let mut incidence: BTreeMap<V, BTreeSet<H>> = BTreeMap::new();
        for (hyperedge, vertices) in &members {
            for vertex in vertices {
                incidence
                    .entry(vertex.clone())
                    .or_default()
                    .insert(hyperedge.clone());
            }
        }

        Ok(Self {
            name: None,
            members,
            timings,
            incidence,
        })
    }

    /// Attach a human-readable name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Network name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All vertices of the network
    pub fn vertices(&self) -> BTreeSet<&V> {
        self.incidence.keys().collect()
    }

    /// Vertices connected by one hyperedge
    ///
    /// # Errors
    /// Returns `EntityNotFound` if the hyperedge does not exist.
    pub fn vertices_of(&self, hyperedge: &H) -> Result<&BTreeSet<V>, ModelError> {
        self.members
            .get(hyperedge)
            .ok_or_else(|| ModelError::hyperedge_not_found(hyperedge))
    }

    /// All hyperedges of the network
    pub fn hyperedges(&self) -> BTreeSet<&H> {
        self.members.keys().collect()
    }

    /// Hyperedges incident to one vertex
    ///
    /// # Errors
    /// Returns `EntityNotFound` if the vertex does not exist.
    pub fn hyperedges_of(&self, vertex: &V) -> Result<&BTreeSet<H>, ModelError> {
        self.incidence
            .get(vertex)
            .ok_or_else(|| ModelError::vertex_not_found(vertex))
    }

    /// Timings of every hyperedge
    pub fn timings(&self) -> &BTreeMap<H, T> {
        &self.timings
    }

    /// Timing of one hyperedge
    ///
    /// # Errors
    /// Returns `EntityNotFound` if the hyperedge does not exist.
    pub fn timing(&self, hyperedge: &H) -> Result<T, ModelError> {
        self.timings
            .get(hyperedge)
            .copied()
            .ok_or_else(|| ModelError::hyperedge_not_found(hyperedge))
    }

    /// Participants of the network (the vertex set)
    pub fn participants(&self) -> BTreeSet<&V> {
        self.vertices()
    }

    /// Channels of the network (the hyperedge set)
    pub fn channels(&self) -> BTreeSet<&H> {
        self.hyperedges()
    }

    /// Whether the vertex belongs to at least one hyperedge
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.incidence.contains_key(vertex)
    }

    /// Whether the hyperedge exists
    pub fn contains_hyperedge(&self, hyperedge: &H) -> bool {
        self.members.contains_key(hyperedge)
    }

    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    /// Number of hyperedges
    pub fn hyperedge_count(&self) -> usize {
        self.members.len()
    }

    /// True when the network has no hyperedges
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Earliest and latest timing, or `None` for an empty network
    pub fn timing_range(&self) -> Option<(T, T)> {
        let earliest = self.timings.values().min()?;
        let latest = self.timings.values().max()?;
        Some((*earliest, *latest))
    }
}

impl<V, H, T> TemporalHypergraph for CommunicationNetwork<V, H, T>
where
    V: Clone + Ord + Debug,
    H: Clone + Ord + Debug,
    T: Timing,
{
    type Vertex = V;
    type Hyperedge = H;
    type Timing = T;

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.incidence.contains_key(vertex)
    }

    fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    fn hyperedge_count(&self) -> usize {
        self.members.len()
    }

    fn hyperedge_entries(&self) -> impl Iterator<Item = (&H, T, &BTreeSet<V>)> + '_ {
        // Both maps share one key set, so they iterate in lockstep
        self.members
            .iter()
            .zip(self.timings.values())
            .map(|((hyperedge, vertices), timing)| (hyperedge, *timing, vertices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityKind;

    type Network = CommunicationNetwork<&'static str, &'static str, i64>;

    fn chain() -> Network {
        CommunicationNetwork::new(
            [("h1", vec!["v1", "v2"]), ("h2", vec!["v2", "v3"]), ("h3", vec!["v3", "v4"])],
            [("h1", 1), ("h2", 2), ("h3", 3)],
        )
        .unwrap()
    }

    fn star() -> Network {
        CommunicationNetwork::new(
            [
                ("h1", vec!["v1", "v2", "v3", "v4", "v5", "v6"]),
                ("h2", vec!["v2", "v3"]),
                ("h3", vec!["v3", "v4"]),
            ],
            [("h1", 1), ("h2", 2), ("h3", 3)],
        )
        .unwrap()
    }

    #[test]
    fn test_vertices() {
        let network = chain();
        assert_eq!(network.vertices().len(), 4);
        assert_eq!(network.vertices(), BTreeSet::from([&"v1", &"v2", &"v3", &"v4"]));
        assert_eq!(network.vertices_of(&"h1").unwrap(), &BTreeSet::from(["v1", "v2"]));
        assert_eq!(network.vertices_of(&"h2").unwrap(), &BTreeSet::from(["v2", "v3"]));
        assert_eq!(network.vertices_of(&"h3").unwrap(), &BTreeSet::from(["v4", "v3"]));
        assert_eq!(star().vertices_of(&"h1").unwrap().len(), 6);
    }

    #[test]
    fn test_hyperedges() {
        let network = chain();
        assert_eq!(network.hyperedges().len(), 3);
        assert_eq!(network.hyperedges_of(&"v1").unwrap(), &BTreeSet::from(["h1"]));
        assert_eq!(network.hyperedges_of(&"v2").unwrap(), &BTreeSet::from(["h1", "h2"]));
        assert_eq!(network.hyperedges_of(&"v3").unwrap(), &BTreeSet::from(["h2", "h3"]));
        assert_eq!(network.hyperedges_of(&"v4").unwrap(), &BTreeSet::from(["h3"]));
    }

    #[test]
    fn test_timings() {
        let network = chain();
        assert_eq!(network.timings().len(), 3);
        assert_eq!(network.timing(&"h1").unwrap(), 1);
        assert_eq!(network.timing(&"h2").unwrap(), 2);
        assert_eq!(network.timing(&"h3").unwrap(), 3);
        assert_eq!(network.timing_range(), Some((1, 3)));
    }

    #[test]
    fn test_missing_entities() {
        let network = chain();

        let err = network.vertices_of(&"h9").unwrap_err();
        assert!(matches!(err, ModelError::EntityNotFound { kind: EntityKind::Hyperedge, .. }));

        let err = network.hyperedges_of(&"v9").unwrap_err();
        assert!(matches!(err, ModelError::EntityNotFound { kind: EntityKind::Vertex, .. }));

        assert!(network.timing(&"h9").unwrap_err().is_not_found());
    }

    #[test]
    fn test_namespaces_are_disambiguated() {
        // "h1" is a hyperedge id, never a vertex id
        let network = chain();
        assert!(network.contains_hyperedge(&"h1"));
        assert!(!network.contains_vertex(&"h1"));
        assert!(network.hyperedges_of(&"h1").is_err());
    }

    #[test]
    fn test_empty_network() {
        let network = Network::new(Vec::<(&str, Vec<&str>)>::new(), Vec::new()).unwrap();
        assert_eq!(network.vertices().len(), 0);
        assert_eq!(network.hyperedges().len(), 0);
        assert!(network.is_empty());
        assert_eq!(network.timing_range(), None);
    }

    #[test]
    fn test_isolated_vertex() {
        let network = Network::new([("h1", vec!["v1"])], [("h1", 1)]).unwrap();
        assert_eq!(network.vertices().len(), 1);
        assert_eq!(network.hyperedges().len(), 1);
    }

    #[test]
    fn test_empty_hyperedge_is_kept() {
        let network = Network::new([("h1", vec![]), ("h2", vec!["v1"])], [("h1", 1), ("h2", 2)])
            .unwrap();
        assert_eq!(network.hyperedge_count(), 2);
        assert_eq!(network.vertex_count(), 1);
        assert!(network.vertices_of(&"h1").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_members_collapse() {
        let network = Network::new([("h1", vec!["v1", "v1", "v2"])], [("h1", 1)]).unwrap();
        assert_eq!(network.vertices_of(&"h1").unwrap().len(), 2);
    }

    #[test]
    fn test_inconsistent_timings_rejected() {
        let missing = Network::new([("h1", vec!["v1"]), ("h2", vec!["v2"])], [("h1", 1)]);
        assert!(matches!(missing, Err(ModelError::InconsistentTimings(_))));

        let extra = Network::new([("h1", vec!["v1"])], [("h1", 1), ("h2", 2)]);
        assert!(matches!(extra, Err(ModelError::InconsistentTimings(_))));
    }

    #[test]
    fn test_large_network() {
        let members = (0..1000).map(|i| (i, (0..1000).collect::<Vec<u32>>()));
        let timings = (0..1000).map(|i| (i, i as i64));
        let network = CommunicationNetwork::<u32, u32, i64>::new(members, timings).unwrap();
        assert_eq!(network.vertices().len(), 1000);
        assert_eq!(network.hyperedges().len(), 1000);
    }

    #[test]
    fn test_participants_and_channels() {
        let network = chain().with_name("chain");
        assert_eq!(network.name(), Some("chain"));
        assert_eq!(network.participants(), network.vertices());
        assert_eq!(network.channels(), network.hyperedges());
    }

    #[test]
    fn test_hyperedge_entries_align_with_timings() {
        let network = chain();
        let entries: Vec<_> = network
            .hyperedge_entries()
            .map(|(h, t, members)| (*h, t, members.len()))
            .collect();
        assert_eq!(entries, vec![("h1", 1, 2), ("h2", 2, 2), ("h3", 3, 2)]);
        assert!(!network.has_negative_timings());
    }

    #[test]
    fn test_negative_timings_detected() {
        let network = Network::new([("h1", vec!["v1", "v2"])], [("h1", -4)]).unwrap();
        assert!(network.has_negative_timings());
    }
}
