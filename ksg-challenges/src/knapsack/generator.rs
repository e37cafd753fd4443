use super::{count_graph, Challenge, Item, MAX_GRAPH_ITEMS};
use crate::{KnapsackError, Result};
use ksg_utils::seed_from_parts;
use log::{debug, info, trace};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Generation parameters for one range of target node counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SizeBracket {
    /// Exclusive upper bound on the target node count. `None` closes the table.
    pub max_target: Option<usize>,
    pub num_items: (usize, usize),
    pub weight_range: (u32, u32),
    /// Minimum acceptance tolerance for targets in this bracket.
    pub tolerance: f64,
    /// Weight of the node error relative to the edge error when scoring.
    pub node_weight: f64,
}

impl SizeBracket {
    fn new(
        max_target: Option<usize>,
        num_items: (usize, usize),
        weight_range: (u32, u32),
        tolerance: f64,
        node_weight: f64,
    ) -> Self {
        Self {
            max_target,
            num_items,
            weight_range,
            tolerance,
            node_weight,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    pub seed: u64,
    /// Ordered by `max_target`; denser graphs (more items, lighter weights) for
    /// larger targets.
    pub brackets: Vec<SizeBracket>,
    /// Fractions of the catalog's total weight tried as capacity.
    pub capacity_ratios: Vec<f64>,
    /// Node cap of each probe, as a multiple of the target.
    pub cap_factor: usize,
    /// Node cap of the fallback probe, as a multiple of the target.
    pub fallback_cap_factor: usize,
    /// Default edge target, as a multiple of the node target.
    pub edge_multiplier: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            brackets: vec![
                SizeBracket::new(Some(200), (5, 9), (1, 12), 0.10, 1.0),
                SizeBracket::new(Some(1_000), (8, 13), (1, 10), 0.10, 1.0),
                SizeBracket::new(Some(5_000), (11, 17), (1, 9), 0.15, 1.0),
                SizeBracket::new(Some(20_000), (14, 21), (1, 8), 0.20, 1.0),
                SizeBracket::new(Some(100_000), (17, 25), (1, 7), 0.25, 3.0),
                SizeBracket::new(None, (20, 30), (1, 6), 0.30, 3.0),
            ],
            capacity_ratios: vec![0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8],
            cap_factor: 4,
            fallback_cap_factor: 20,
            edge_multiplier: 3,
        }
    }
}

impl SynthesisConfig {
    pub fn bracket(&self, target_nodes: usize) -> Result<&SizeBracket> {
        self.brackets
            .iter()
            .find(|b| b.max_target.map_or(true, |max| target_nodes < max))
            .or(self.brackets.last())
            .ok_or_else(|| KnapsackError::InvalidConfig("no size brackets".to_string()))
    }

    fn validate(&self) -> Result<()> {
        for (i, b) in self.brackets.iter().enumerate() {
            if b.num_items.0 == 0 || b.num_items.0 > b.num_items.1 || b.num_items.1 > MAX_GRAPH_ITEMS
            {
                return Err(KnapsackError::InvalidConfig(format!(
                    "bad item range {:?}",
                    b.num_items
                )));
            }
            // Values are drawn up to twice the max weight
            if b.weight_range.0 == 0
                || b.weight_range.0 > b.weight_range.1
                || b.weight_range.1 > u32::MAX / 2
            {
                return Err(KnapsackError::InvalidConfig(format!(
                    "bad weight range {:?}",
                    b.weight_range
                )));
            }
            if let Some(next) = self.brackets.get(i + 1) {
                let ordered = match (b.max_target, next.max_target) {
                    (Some(max), Some(next_max)) => max < next_max,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if !ordered {
                    return Err(KnapsackError::InvalidConfig(format!(
                        "bracket {} is out of order by max_target",
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStatus {
    /// Node and edge counts are within tolerance of the targets.
    Found,
    /// Lowest-error candidate of the search, outside tolerance.
    BestEffort,
    /// Lowest-error candidate of the lenient fallback probe.
    Fallback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesizedCase {
    pub items: Vec<Item>,
    pub capacity: u64,
    pub num_items: usize,
    pub target_nodes: usize,
    pub target_edges: usize,
    pub actual_nodes: usize,
    pub actual_edges: usize,
    pub error: f64,
    pub status: SynthesisStatus,
}

impl SynthesizedCase {
    pub fn challenge(&self) -> Result<Challenge> {
        Challenge::new(&self.items, self.capacity as i64)
    }
}

pub fn default_max_attempts(target_nodes: usize) -> usize {
    if target_nodes < 10_000 {
        100
    } else {
        200
    }
}

pub fn generate_items(
    seed: &[u8; 32],
    num_items: usize,
    weight_range: (u32, u32),
    value_range: (u32, u32),
) -> Vec<Item> {
    let mut rng = SmallRng::from_seed(seed.clone());
    (0..num_items)
        .map(|i| Item {
            name: format!("Item_{}", i + 1),
            weight: rng.gen_range(weight_range.0..=weight_range.1) as i64,
            value: rng.gen_range(value_range.0..=value_range.1) as i64,
        })
        .collect()
}

/// Searches for a catalog whose state-space graph has about `target_nodes` nodes
/// and `target_edges` edges, using the default size brackets.
///
/// `tolerance` is a lower bound on the acceptance tolerance: the bracket for
/// `target_nodes` sets a floor, and the larger of the two applies.
pub fn synthesize(
    target_nodes: usize,
    target_edges: Option<usize>,
    max_attempts: usize,
    tolerance: f64,
) -> Result<SynthesizedCase> {
    synthesize_with_config(
        &SynthesisConfig::default(),
        target_nodes,
        target_edges,
        max_attempts,
        tolerance,
    )
}

pub fn synthesize_with_config(
    config: &SynthesisConfig,
    target_nodes: usize,
    target_edges: Option<usize>,
    max_attempts: usize,
    tolerance: f64,
) -> Result<SynthesizedCase> {
    if target_nodes == 0 {
        return Err(KnapsackError::InvalidTarget);
    }
    config.validate()?;
    let bracket = config.bracket(target_nodes)?;
    let mut search = Search {
        config,
        bracket,
        target_nodes,
        target_edges: target_edges.unwrap_or(target_nodes.saturating_mul(config.edge_multiplier)),
        tolerance: tolerance.max(bracket.tolerance),
        best: None,
    };
    debug!(
        "Synthesizing {} nodes / {} edges, tolerance {:.2}, bracket {:?}",
        search.target_nodes, search.target_edges, search.tolerance, bracket
    );

    let (w_min, w_max) = bracket.weight_range;
    let cap = target_nodes.saturating_mul(config.cap_factor);
    for attempt in 0..max_attempts {
        let seed = seed_from_parts(&[
            config.seed.to_string(),
            target_nodes.to_string(),
            attempt.to_string(),
        ]);
        let mut rng = SmallRng::from_seed(seed);
        let num_items = rng.gen_range(bracket.num_items.0..=bracket.num_items.1);
        // Lighter items in the second half of the search give denser graphs
        let w_max = if attempt > max_attempts / 2 {
            w_min.max(w_max.saturating_sub(3))
        } else {
            w_max
        };
        let items_seed: [u8; 32] = rng.gen();
        let items = generate_items(&items_seed, num_items, (w_min, w_max), (1, w_max * 2));

        if let Some(case) = search.probe(items, cap, SynthesisStatus::BestEffort)? {
            info!(
                "Found {} nodes / {} edges on attempt {} (error {:.3})",
                case.actual_nodes, case.actual_edges, attempt, case.error
            );
            return Ok(case);
        }
    }

    if let Some(best) = search.best.take() {
        info!(
            "Best effort {} nodes / {} edges (error {:.3})",
            best.actual_nodes, best.actual_edges, best.error
        );
        return Ok(best);
    }

    debug!("No candidate under the node cap, trying fallback");
    let w_half = w_min.max(w_max / 2);
    let seed = seed_from_parts(&[
        config.seed.to_string(),
        target_nodes.to_string(),
        "fallback".to_string(),
    ]);
    let items = generate_items(&seed, bracket.num_items.0, (w_min, w_half), (1, w_half * 2));
    let cap = target_nodes.saturating_mul(config.fallback_cap_factor);
    if let Some(case) = search.probe(items, cap, SynthesisStatus::Fallback)? {
        return Ok(case);
    }
    match search.best.take() {
        Some(best) => {
            info!(
                "Fallback {} nodes / {} edges (error {:.3})",
                best.actual_nodes, best.actual_edges, best.error
            );
            Ok(best)
        }
        None => Err(KnapsackError::SearchExhausted { target_nodes }),
    }
}

struct Search<'a> {
    config: &'a SynthesisConfig,
    bracket: &'a SizeBracket,
    target_nodes: usize,
    target_edges: usize,
    tolerance: f64,
    best: Option<SynthesizedCase>,
}

impl<'a> Search<'a> {
    /// Tries every capacity ratio on `items`. Returns a case within tolerance if
    /// one is found, otherwise records the best scoring one tagged with `status`.
    fn probe(
        &mut self,
        items: Vec<Item>,
        cap: usize,
        status: SynthesisStatus,
    ) -> Result<Option<SynthesizedCase>> {
        let total_weight: i64 = items.iter().map(|item| item.weight).sum();
        for &ratio in &self.config.capacity_ratios {
            let capacity = (total_weight as f64 * ratio) as i64;
            if capacity < 1 {
                continue;
            }
            let challenge = Challenge::new(&items, capacity)?;
            let size = count_graph(&challenge, Some(cap))?;
            if !size.exact {
                trace!("ratio {} exceeded cap of {} nodes", ratio, cap);
                continue;
            }

            let node_error = relative_error(size.nodes, self.target_nodes);
            let edge_error = relative_error(size.edges, self.target_edges);
            let w = self.bracket.node_weight;
            let error = (w * node_error + edge_error) / (w + 1.0);
            let within = node_error <= self.tolerance && edge_error <= self.tolerance;
            if !within && self.best.as_ref().map_or(false, |b| b.error <= error) {
                continue;
            }

            let case = SynthesizedCase {
                items: items.clone(),
                capacity: capacity as u64,
                num_items: items.len(),
                target_nodes: self.target_nodes,
                target_edges: self.target_edges,
                actual_nodes: size.nodes,
                actual_edges: size.edges,
                error,
                status: if within { SynthesisStatus::Found } else { status },
            };
            if within {
                return Ok(Some(case));
            }
            self.best = Some(case);
        }
        Ok(None)
    }
}

fn relative_error(actual: usize, target: usize) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (actual as f64 - target as f64).abs() / target as f64
}
