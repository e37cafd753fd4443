use ksg_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    solve_with_limits(challenge, &Limits::default())
}

/// Tabulates best values over (item prefix, weight budget) and walks the table
/// backwards to recover the selection. Ties keep the item out.
pub fn solve_with_limits(challenge: &Challenge, limits: &Limits) -> Result<Solution> {
    let n = challenge.num_items;
    let exhausted = || KnapsackError::ResourceExhausted {
        resource: "table cells",
        limit: limits.max_table_cells,
    };
    let capacity = usize::try_from(challenge.max_weight).map_err(|_| exhausted())?;
    let width = capacity.checked_add(1).ok_or_else(exhausted)?;
    let cells = (n + 1)
        .checked_mul(width)
        .filter(|&cells| cells <= limits.max_table_cells)
        .ok_or_else(exhausted)?;

    // Row i holds the best value using the first i items, flattened row-major
    let mut table = vec![0u64; cells];
    for i in 1..=n {
        let weight = challenge.weights[i - 1];
        let value = challenge.values[i - 1];
        let (done, rest) = table.split_at_mut(i * width);
        let prev = &done[(i - 1) * width..];
        let row = &mut rest[..width];
        for w in 0..width {
            row[w] = prev[w];
            if weight <= w as u64 {
                let with_item = prev[w - weight as usize] + value;
                if with_item > row[w] {
                    row[w] = with_item;
                }
            }
        }
    }

    let max_value = table[n * width + capacity];
    let mut selected = Vec::new();
    let mut w = capacity;
    for i in (1..=n).rev() {
        if table[i * width + w] != table[(i - 1) * width + w] {
            selected.push(i - 1);
            w -= challenge.weights[i - 1] as usize;
        }
    }

    debug!(
        "dp_bottomup: value {} from {} items over {} cells",
        max_value,
        selected.len(),
        cells
    );
    Ok(challenge.solution_from_indices(max_value, selected))
}
