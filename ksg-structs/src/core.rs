use crate::serializable_struct_with_getters;
use ksg_challenges::{
    knapsack::{Challenge, GraphSize, Item, Solution, SynthesisStatus, SynthesizedCase},
    Result,
};
use serde::{Deserialize, Serialize};

// Test case files: {"capacity", "items", "metadata"}
serializable_struct_with_getters! {
    TestCase {
        capacity: i64,
        items: Vec<Item>,
        metadata: Option<TestCaseMetadata>,
    }
}
impl TestCase {
    pub fn challenge(&self) -> Result<Challenge> {
        Challenge::new(&self.items, self.capacity)
    }

    pub fn file_name(target_nodes: usize) -> String {
        format!("test_{}.json", target_nodes)
    }
}
impl From<SynthesizedCase> for TestCase {
    fn from(case: SynthesizedCase) -> Self {
        TestCase {
            capacity: case.capacity as i64,
            metadata: Some(TestCaseMetadata {
                target_nodes: case.target_nodes,
                target_edges: case.target_edges,
                actual_nodes: case.actual_nodes,
                actual_edges: case.actual_edges,
                num_items: case.num_items,
                error: case.error,
                status: Some(case.status),
            }),
            items: case.items,
        }
    }
}
serializable_struct_with_getters! {
    TestCaseMetadata {
        target_nodes: usize,
        target_edges: usize,
        actual_nodes: usize,
        actual_edges: usize,
        num_items: usize,
        error: f64,
        status: Option<SynthesisStatus>,
    }
}

// Runtime outputs
serializable_struct_with_getters! {
    GraphReport {
        nodes: usize,
        edges: usize,
        exact: bool,
        num_items: usize,
        capacity: u64,
        avg_weight: f64,
        avg_value: f64,
    }
}
impl GraphReport {
    pub fn new(challenge: &Challenge, size: GraphSize) -> Self {
        let n = challenge.num_items as f64;
        GraphReport {
            nodes: size.nodes,
            edges: size.edges,
            exact: size.exact,
            num_items: challenge.num_items,
            capacity: challenge.max_weight,
            avg_weight: challenge.weights.iter().sum::<u64>() as f64 / n,
            avg_value: challenge.values.iter().sum::<u64>() as f64 / n,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkStatus {
    Success,
    Error,
    Skipped,
}

serializable_struct_with_getters! {
    BenchmarkResult {
        algorithm: String,
        status: BenchmarkStatus,
        time_ms: Option<f64>,
        solution: Option<Solution>,
        error: Option<String>,
    }
}
impl BenchmarkResult {
    pub fn success(algorithm: &str, time_ms: f64, solution: Solution) -> Self {
        BenchmarkResult {
            algorithm: algorithm.to_string(),
            status: BenchmarkStatus::Success,
            time_ms: Some(time_ms),
            solution: Some(solution),
            error: None,
        }
    }

    pub fn failure(algorithm: &str, time_ms: f64, error: String) -> Self {
        BenchmarkResult {
            algorithm: algorithm.to_string(),
            status: BenchmarkStatus::Error,
            time_ms: Some(time_ms),
            solution: None,
            error: Some(error),
        }
    }

    pub fn skipped(algorithm: &str, reason: String) -> Self {
        BenchmarkResult {
            algorithm: algorithm.to_string(),
            status: BenchmarkStatus::Skipped,
            time_ms: None,
            solution: None,
            error: Some(reason),
        }
    }
}

serializable_struct_with_getters! {
    BenchmarkReport {
        num_items: usize,
        capacity: u64,
        target_nodes: Option<usize>,
        graph: Option<GraphReport>,
        results: Vec<BenchmarkResult>,
    }
}
impl BenchmarkReport {
    /// Distinct optimal values among the successful results. More than one is a bug.
    pub fn max_values(&self) -> Vec<u64> {
        let mut values: Vec<u64> = self
            .results
            .iter()
            .filter_map(|r| r.solution.as_ref().map(|s| s.max_value))
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    pub fn solvers_agree(&self) -> bool {
        self.max_values().len() <= 1
    }
}
