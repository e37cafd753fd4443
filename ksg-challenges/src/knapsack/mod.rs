use crate::{KnapsackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

mod generator;
pub use generator::*;
mod graph;
pub use graph::*;

/// A catalog entry as it appears in test case files. Fields are signed so that
/// malformed records reach validation instead of failing inside the parser.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub weight: i64,
    pub value: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    pub max_value: u64,
    pub selected_items: Vec<String>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resource ceilings for the solvers. Exceeding one is reported, never worked around.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Max cells of the tabulation table, or entries of the memo.
    pub max_table_cells: usize,
    /// Max distinct states the explicit graph solvers may discover.
    pub max_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_table_cells: 1 << 26,
            max_states: 1 << 24,
        }
    }
}

/// Validated, immutable knapsack instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub num_items: usize,
    pub names: Vec<String>,
    pub weights: Vec<u64>,
    pub values: Vec<u64>,
    pub max_weight: u64,
}

impl Challenge {
    pub fn new(items: &[Item], capacity: i64) -> Result<Self> {
        if items.is_empty() {
            return Err(KnapsackError::EmptyCatalog);
        }
        if capacity < 0 {
            return Err(KnapsackError::InvalidCapacity(capacity));
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if item.weight <= 0 {
                return Err(KnapsackError::InvalidWeight {
                    name: item.name.clone(),
                    weight: item.weight,
                });
            }
            if item.value < 0 {
                return Err(KnapsackError::InvalidValue {
                    name: item.name.clone(),
                    value: item.value,
                });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(KnapsackError::DuplicateName(item.name.clone()));
            }
        }
        // Solvers add weights and values without overflow checks
        let mut total_weight = 0u64;
        let mut total_value = 0u64;
        for item in items {
            total_weight = total_weight
                .checked_add(item.weight as u64)
                .ok_or(KnapsackError::TotalOverflow("weight"))?;
            total_value = total_value
                .checked_add(item.value as u64)
                .ok_or(KnapsackError::TotalOverflow("value"))?;
        }

        Ok(Challenge {
            num_items: items.len(),
            names: items.iter().map(|item| item.name.clone()).collect(),
            weights: items.iter().map(|item| item.weight as u64).collect(),
            values: items.iter().map(|item| item.value as u64).collect(),
            max_weight: capacity as u64,
        })
    }

    pub fn items(&self) -> Vec<Item> {
        (0..self.num_items)
            .map(|i| Item {
                name: self.names[i].clone(),
                weight: self.weights[i] as i64,
                value: self.values[i] as i64,
            })
            .collect()
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().sum()
    }

    /// Builds a solution from selected item indices, reported in catalog order.
    pub fn solution_from_indices<I>(&self, max_value: u64, indices: I) -> Solution
    where
        I: IntoIterator<Item = usize>,
    {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        Solution {
            max_value,
            selected_items: indices.into_iter().map(|i| self.names[i].clone()).collect(),
        }
    }

    /// Checks that a solution is feasible and that its claimed value is the value of
    /// its items. Returns that value.
    pub fn evaluate_total_value(&self, solution: &Solution) -> Result<u64> {
        let index_by_name: HashMap<&str, usize> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut selected = HashSet::with_capacity(solution.selected_items.len());
        let mut total_weight = 0u64;
        let mut total_value = 0u64;
        for name in &solution.selected_items {
            let i = *index_by_name.get(name.as_str()).ok_or_else(|| {
                KnapsackError::InvalidSolution(format!("Item '{}' is not in the catalog", name))
            })?;
            if !selected.insert(i) {
                return Err(KnapsackError::InvalidSolution(format!(
                    "Item '{}' selected more than once",
                    name
                )));
            }
            total_weight += self.weights[i];
            total_value += self.values[i];
        }

        if total_weight > self.max_weight {
            return Err(KnapsackError::InvalidSolution(format!(
                "Total weight ({}) exceeded max weight ({})",
                total_weight, self.max_weight
            )));
        }
        if total_value != solution.max_value {
            return Err(KnapsackError::InvalidSolution(format!(
                "Claimed value ({}) differs from value of selected items ({})",
                solution.max_value, total_value
            )));
        }
        Ok(total_value)
    }
}
