use ksg_challenges::knapsack::{Limits, SynthesisConfig};
use serde::{Deserialize, Serialize};

/// Settings file accepted by `--config`. Every section is optional.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    pub limits: Limits,
    pub synthesis: SynthesisConfig,
    /// Graph solvers are skipped by `benchmark` above this many reachable states.
    pub skip_graph_above: Option<usize>,
}
