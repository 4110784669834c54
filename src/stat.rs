use tracing::info;

/// Counters for a single search run.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub costs: Option<usize>,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes number: {:?} Generated nodes number: {:?}",
            self.costs, self.time_us, self.expanded_nodes, self.generated_nodes
        );
    }
}
