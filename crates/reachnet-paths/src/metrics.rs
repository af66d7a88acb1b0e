//! Work counters collected during one path query

/// Counters describing how much work a query performed
///
/// Each engine fills the counters that apply to it; Bellman-Ford is the only
/// engine that counts rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMetrics {
    /// Labels made permanent (vertex journeys, hyperedges, or bag entries)
    pub labels_settled: usize,

    /// Labels discarded because another label dominated them
    pub labels_pruned: usize,

    /// Candidate labels produced by extending along a hyperedge
    pub relaxations: usize,

    /// Full passes over all hyperedges (Bellman-Ford only)
    pub rounds: usize,

    /// Vertices in the result mapping
    pub reached: usize,
}

impl QueryMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another query's counters to these
    pub fn absorb(&mut self, other: &QueryMetrics) {
        self.labels_settled += other.labels_settled;
        self.labels_pruned += other.labels_pruned;
        self.relaxations += other.relaxations;
        self.rounds += other.rounds;
        self.reached += other.reached;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Query Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Vertices reached: {}", self.reached),
            format!("Labels settled: {}", self.labels_settled),
            format!("Labels pruned: {}", self.labels_pruned),
            format!("Relaxations: {}", self.relaxations),
        ];
        if self.rounds > 0 {
            lines.push(format!("Rounds: {}", self.rounds));
        }
        lines.join("\n")
    }
}
