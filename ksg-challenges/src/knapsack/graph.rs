use super::Challenge;
use crate::{KnapsackError, Result};
use ahash::RandomState;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

type HashSet<T> = std::collections::HashSet<T, RandomState>;

/// Width of the item bitmask carried by every `State`.
pub const MAX_GRAPH_ITEMS: usize = u128::BITS as usize;

/// A node of the state-space graph: accumulated weight plus the set of selected
/// item indices packed into a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct State {
    pub weight: u64,
    pub items: u128,
}

impl State {
    pub const EMPTY: State = State {
        weight: 0,
        items: 0,
    };

    #[inline(always)]
    pub fn contains(&self, item: usize) -> bool {
        (self.items >> item) & 1 == 1
    }

    #[inline(always)]
    pub fn num_selected(&self) -> usize {
        self.items.count_ones() as usize
    }

    #[inline(always)]
    pub fn with_item(&self, item: usize, weight: u64) -> State {
        State {
            weight: self.weight + weight,
            items: self.items | 1u128 << item,
        }
    }

    /// Selected item indices in ascending order.
    pub fn item_indices(&self) -> impl Iterator<Item = usize> {
        let mut remaining = self.items;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let i = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(i)
        })
    }
}

impl Challenge {
    pub fn check_graph_size(&self) -> Result<()> {
        if self.num_items > MAX_GRAPH_ITEMS {
            return Err(KnapsackError::TooManyItems {
                num_items: self.num_items,
                max: MAX_GRAPH_ITEMS,
            });
        }
        Ok(())
    }

    /// Legal transitions out of `state`, in catalog order. Every consumer of the
    /// state-space graph expands states through this function.
    pub fn successors(&self, state: State) -> impl Iterator<Item = (usize, State)> + '_ {
        (0..self.num_items).filter_map(move |i| {
            if state.contains(i) {
                return None;
            }
            let weight = self.weights[i];
            if state.weight + weight <= self.max_weight {
                Some((i, state.with_item(i, weight)))
            } else {
                None
            }
        })
    }

    pub fn state_value(&self, state: &State) -> u64 {
        state.item_indices().map(|i| self.values[i]).sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSize {
    pub nodes: usize,
    pub edges: usize,
    /// False when traversal stopped at the node cap; the counts are lower bounds.
    pub exact: bool,
}

/// Counts distinct reachable states and legal transitions by breadth-first search.
///
/// An edge is tallied on every legal transition, including ones into states that
/// were already discovered, so `edges` may exceed `nodes - 1`. With `max_nodes`
/// set, traversal halts as soon as that many states have been discovered.
pub fn count_graph(challenge: &Challenge, max_nodes: Option<usize>) -> Result<GraphSize> {
    challenge.check_graph_size()?;

    let mut visited: HashSet<State> = HashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(State::EMPTY);
    queue.push_back(State::EMPTY);
    let mut edges = 0usize;

    if matches!(max_nodes, Some(max) if visited.len() >= max) {
        return Ok(GraphSize {
            nodes: visited.len(),
            edges,
            exact: false,
        });
    }

    while let Some(state) = queue.pop_front() {
        for (_, next) in challenge.successors(state) {
            edges += 1;
            if visited.insert(next) {
                queue.push_back(next);
                if matches!(max_nodes, Some(max) if visited.len() >= max) {
                    trace!(
                        "count_graph stopped at {} nodes, {} edges",
                        visited.len(),
                        edges
                    );
                    return Ok(GraphSize {
                        nodes: visited.len(),
                        edges,
                        exact: false,
                    });
                }
            }
        }
    }

    Ok(GraphSize {
        nodes: visited.len(),
        edges,
        exact: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_indices_ascending() {
        let state = State::EMPTY.with_item(5, 1).with_item(0, 2).with_item(127, 3);
        assert_eq!(state.item_indices().collect::<Vec<_>>(), vec![0, 5, 127]);
        assert_eq!(state.weight, 6);
        assert_eq!(state.num_selected(), 3);
    }

    #[test]
    fn test_state_identity_ignores_insertion_order() {
        let a = State::EMPTY.with_item(1, 3).with_item(2, 4);
        let b = State::EMPTY.with_item(2, 4).with_item(1, 3);
        assert_eq!(a, b);
    }
}
