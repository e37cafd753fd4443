use crate::HashSet;
use ksg_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;
use std::collections::VecDeque;

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    solve_with_limits(challenge, &Limits::default())
}

/// Breadth-first enumeration of every reachable state, keeping the best valued
/// one. On equal values the state discovered first wins.
pub fn solve_with_limits(challenge: &Challenge, limits: &Limits) -> Result<Solution> {
    challenge.check_graph_size()?;

    let mut visited: HashSet<State> = HashSet::default();
    let mut queue: VecDeque<(State, u64)> = VecDeque::new();
    visited.insert(State::EMPTY);
    queue.push_back((State::EMPTY, 0));

    let mut best_state = State::EMPTY;
    let mut best_value = 0u64;
    while let Some((state, value)) = queue.pop_front() {
        if value > best_value {
            best_state = state;
            best_value = value;
        }
        for (item, next) in challenge.successors(state) {
            if !visited.insert(next) {
                continue;
            }
            if visited.len() > limits.max_states {
                return Err(KnapsackError::ResourceExhausted {
                    resource: "states",
                    limit: limits.max_states,
                });
            }
            queue.push_back((next, value + challenge.values[item]));
        }
    }

    debug!(
        "graph_statespace: value {} at weight {} after {} states",
        best_value,
        best_state.weight,
        visited.len()
    );
    Ok(challenge.solution_from_indices(best_value, best_state.item_indices()))
}
