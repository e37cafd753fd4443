use crate::HashMap;
use ksg_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;
use std::collections::VecDeque;

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    solve_with_limits(challenge, &Limits::default())
}

/// Explicit state-space DAG. Node 0 is the empty state and nodes are numbered
/// in breadth-first discovery order.
struct Dag {
    nodes: Vec<State>,
    /// (successor, edge weight = value of the added item)
    edges: Vec<Vec<(usize, u64)>>,
    in_degree: Vec<usize>,
}

impl Dag {
    fn build(challenge: &Challenge, limits: &Limits) -> Result<Self> {
        let mut index: HashMap<State, usize> = HashMap::default();
        let mut dag = Dag {
            nodes: vec![State::EMPTY],
            edges: vec![Vec::new()],
            in_degree: vec![0],
        };
        index.insert(State::EMPTY, 0);

        let mut head = 0;
        while head < dag.nodes.len() {
            let state = dag.nodes[head];
            for (item, next) in challenge.successors(state) {
                let v = match index.get(&next) {
                    Some(&v) => v,
                    None => {
                        if dag.nodes.len() >= limits.max_states {
                            return Err(KnapsackError::ResourceExhausted {
                                resource: "states",
                                limit: limits.max_states,
                            });
                        }
                        let v = dag.nodes.len();
                        index.insert(next, v);
                        dag.nodes.push(next);
                        dag.edges.push(Vec::new());
                        dag.in_degree.push(0);
                        v
                    }
                };
                dag.edges[head].push((v, challenge.values[item]));
                dag.in_degree[v] += 1;
            }
            head += 1;
        }
        Ok(dag)
    }

    fn num_edges(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum()
    }
}

/// Single-source longest path from the empty state. Nodes are finalized in
/// topological order (in-degree exhausted); a successor is relaxed only by a
/// strictly larger value. The answer is the best node overall, first finalized
/// on ties.
pub fn solve_with_limits(challenge: &Challenge, limits: &Limits) -> Result<Solution> {
    challenge.check_graph_size()?;
    let dag = Dag::build(challenge, limits)?;

    let mut in_degree = dag.in_degree.clone();
    let mut dist: Vec<Option<u64>> = vec![None; dag.nodes.len()];
    dist[0] = Some(0);
    let mut queue = VecDeque::from([0usize]);

    let mut best_node = 0;
    let mut best_value = 0u64;
    while let Some(u) = queue.pop_front() {
        let du = dist[u].unwrap_or_default();
        if du > best_value {
            best_node = u;
            best_value = du;
        }
        for &(v, edge_value) in &dag.edges[u] {
            let candidate = du + edge_value;
            if dist[v].map_or(true, |dv| candidate > dv) {
                dist[v] = Some(candidate);
            }
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    let best_state = dag.nodes[best_node];
    debug!(
        "graph_dag: value {} at weight {} over {} nodes / {} edges",
        best_value,
        best_state.weight,
        dag.nodes.len(),
        dag.num_edges()
    );
    Ok(challenge.solution_from_indices(best_value, best_state.item_indices()))
}
