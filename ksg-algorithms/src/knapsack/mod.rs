use ksg_challenges::{
    knapsack::{Challenge, Limits, Solution},
    Result,
};

pub mod dp_bottomup;
pub mod dp_topdown;
pub mod graph_dag;
pub mod graph_statespace;

pub type SolveFn = fn(&Challenge, &Limits) -> Result<Solution>;

/// Every solver, by name, in the order benchmarks report them.
pub const ALGORITHMS: [(&str, SolveFn); 4] = [
    ("dp_bottomup", dp_bottomup::solve_with_limits),
    ("dp_topdown", dp_topdown::solve_with_limits),
    ("graph_statespace", graph_statespace::solve_with_limits),
    ("graph_dag", graph_dag::solve_with_limits),
];

pub fn solver_by_name(name: &str) -> Option<SolveFn> {
    match name {
        "dp_bottomup" => Some(dp_bottomup::solve_with_limits),
        "dp_topdown" => Some(dp_topdown::solve_with_limits),
        "graph_statespace" => Some(graph_statespace::solve_with_limits),
        "graph_dag" => Some(graph_dag::solve_with_limits),
        _ => None,
    }
}

/// True for solvers whose cost follows the size of the reachable state graph.
pub fn enumerates_states(name: &str) -> bool {
    matches!(name, "graph_statespace" | "graph_dag")
}
