use crate::HashMap;
use ksg_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;

type Memo = HashMap<(usize, u64), u64>;

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    solve_with_limits(challenge, &Limits::default())
}

/// Memoized form of the tabulation recurrence, keyed by (item index, remaining
/// capacity). Only values are memoized; the selection is recovered by the same
/// backward comparison the bottom-up solver uses.
pub fn solve_with_limits(challenge: &Challenge, limits: &Limits) -> Result<Solution> {
    let n = challenge.num_items;
    let mut memo = Memo::default();
    let max_value = fill(challenge, limits, &mut memo)?;

    let mut selected = Vec::new();
    let mut w = challenge.max_weight;
    for i in (1..=n).rev() {
        // Both keys were resolved by `fill` before (i, w) itself
        if memoized(&memo, i, w) != memoized(&memo, i - 1, w) {
            selected.push(i - 1);
            w -= challenge.weights[i - 1];
        }
    }

    debug!(
        "dp_topdown: value {} from {} items, {} memo entries",
        max_value,
        selected.len(),
        memo.len()
    );
    Ok(challenge.solution_from_indices(max_value, selected))
}

fn memoized(memo: &Memo, i: usize, w: u64) -> Option<u64> {
    if i == 0 || w == 0 {
        Some(0)
    } else {
        memo.get(&(i, w)).copied()
    }
}

/// Evaluates (n, capacity) with an explicit stack in place of recursion. A key is
/// popped once both of its subproblems are memoized.
fn fill(challenge: &Challenge, limits: &Limits, memo: &mut Memo) -> Result<u64> {
    let root = (challenge.num_items, challenge.max_weight);
    let mut stack = vec![root];
    while let Some(&(i, w)) = stack.last() {
        if memoized(memo, i, w).is_some() {
            stack.pop();
            continue;
        }
        let weight = challenge.weights[i - 1];
        let skip = memoized(memo, i - 1, w);
        let take = if weight <= w {
            memoized(memo, i - 1, w - weight).map(Some)
        } else {
            Some(None)
        };

        match (skip, take) {
            (Some(skip), Some(take)) => {
                let mut best = skip;
                if let Some(take) = take {
                    let with_item = take + challenge.values[i - 1];
                    if with_item > best {
                        best = with_item;
                    }
                }
                memo.insert((i, w), best);
                if memo.len() > limits.max_table_cells {
                    return Err(KnapsackError::ResourceExhausted {
                        resource: "memo entries",
                        limit: limits.max_table_cells,
                    });
                }
                stack.pop();
            }
            (skip, take) => {
                if skip.is_none() {
                    stack.push((i - 1, w));
                }
                if take.is_none() {
                    stack.push((i - 1, w - weight));
                }
            }
        }
    }
    Ok(memoized(memo, root.0, root.1).unwrap_or_default())
}
