use anyhow::{anyhow, Result};
use clap::{arg, builder::PossibleValuesParser, Command};
use ksg_algorithms::knapsack::{enumerates_states, solver_by_name, ALGORITHMS};
use ksg_challenges::knapsack::{
    count_graph, default_max_attempts, synthesize_with_config, Challenge, GraphSize,
};
use ksg_structs::{
    config::RuntimeConfig,
    core::{BenchmarkReport, BenchmarkResult, GraphReport, TestCase},
};
use ksg_utils::{dejsonify, jsonify, jsonify_pretty, load_json_arg};
use log::{debug, info, warn};
use std::{fs, path::PathBuf, time::Instant};

fn cli() -> Command {
    let algorithm_names: Vec<&'static str> = ALGORITHMS.iter().map(|(name, _)| *name).collect();
    Command::new("ksg-runtime")
        .about("Counts, solves and synthesizes knapsack state-space graphs")
        .arg_required_else_help(true)
        .arg(
            arg!(--config [CONFIG] "Path to a runtime config json file")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("count_graph")
                .about("Counts the nodes and edges of a catalog's state-space graph")
                .arg(
                    arg!(<INPUT> "Test case json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--max_nodes [MAX_NODES] "Stop counting once this many nodes are found")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves a catalog with one algorithm")
                .arg(
                    arg!(<ALGORITHM> "Algorithm name")
                        .value_parser(PossibleValuesParser::new(algorithm_names)),
                )
                .arg(
                    arg!(<INPUT> "Test case json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Times every algorithm on a catalog and checks they agree")
                .arg(
                    arg!(<INPUT> "Test case json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--skip_graph_above [NODES] "Skip graph algorithms above this many states")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("synthesize")
                .about("Generates catalogs whose graphs approach target node counts")
                .arg(
                    arg!(<TARGET_NODES>... "Target node counts")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--target_edges [TARGET_EDGES] "Target edge count (default 3x nodes)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--max_attempts [MAX_ATTEMPTS] "Attempts per target (default 100, or 200 from 10000 nodes)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--tolerance [TOLERANCE] "Acceptable relative error")
                        .default_value("0.1")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--output_dir [OUTPUT_DIR] "If set, test cases are saved as test_<nodes>.json in this directory")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    if std::env::var("KSG_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("KSG_LOG")
            .write_style("KSG_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let matches = cli().get_matches();

    if let Err(e) = load_config(matches.get_one::<PathBuf>("config")).and_then(|config| {
        match matches.subcommand() {
            Some(("count_graph", sub_m)) => count_graph_cmd(
                sub_m.get_one::<String>("INPUT").unwrap(),
                sub_m.get_one::<usize>("max_nodes").cloned(),
            ),
            Some(("solve", sub_m)) => solve_cmd(
                &config,
                sub_m.get_one::<String>("ALGORITHM").unwrap(),
                sub_m.get_one::<String>("INPUT").unwrap(),
                sub_m.get_one::<PathBuf>("output").cloned(),
            ),
            Some(("benchmark", sub_m)) => benchmark_cmd(
                &config,
                sub_m.get_one::<String>("INPUT").unwrap(),
                sub_m
                    .get_one::<usize>("skip_graph_above")
                    .cloned()
                    .or(config.skip_graph_above),
            ),
            Some(("synthesize", sub_m)) => synthesize_cmd(
                &config,
                sub_m
                    .get_many::<usize>("TARGET_NODES")
                    .unwrap()
                    .cloned()
                    .collect(),
                sub_m.get_one::<usize>("target_edges").cloned(),
                sub_m.get_one::<usize>("max_attempts").cloned(),
                *sub_m.get_one::<f64>("tolerance").unwrap(),
                sub_m.get_one::<PathBuf>("output_dir").cloned(),
            ),
            _ => Err(anyhow!("Invalid subcommand")),
        }
    }) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
            let config = dejsonify::<RuntimeConfig>(&content)
                .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
            debug!("Loaded config {:?}", config);
            Ok(config)
        }
        None => Ok(RuntimeConfig::default()),
    }
}

fn load_challenge(input: &str) -> Result<(TestCase, Challenge)> {
    let test_case: TestCase = load_json_arg(input)?;
    let challenge = test_case.challenge()?;
    Ok((test_case, challenge))
}

fn count_graph_cmd(input: &str, max_nodes: Option<usize>) -> Result<()> {
    let (_, challenge) = load_challenge(input)?;
    let size = count_graph(&challenge, max_nodes)?;
    if !size.exact {
        warn!("Stopped at {} nodes, counts are lower bounds", size.nodes);
    }
    println!("{}", jsonify(&GraphReport::new(&challenge, size)));
    Ok(())
}

fn solve_cmd(
    config: &RuntimeConfig,
    algorithm: &str,
    input: &str,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let solve = solver_by_name(algorithm).ok_or_else(|| anyhow!("Unknown algorithm {}", algorithm))?;
    let (_, challenge) = load_challenge(input)?;

    let start = Instant::now();
    let solution = solve(&challenge, &config.limits)?;
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;
    challenge.evaluate_total_value(&solution)?;
    info!(
        "{}: value {} with {} items in {:.4} ms",
        algorithm,
        solution.max_value,
        solution.selected_items.len(),
        time_ms
    );

    if let Some(path) = output_file {
        fs::write(&path, jsonify(&solution))?;
        println!("solution written to: {:?}", path);
    } else {
        println!("{}", jsonify(&solution));
    }
    Ok(())
}

fn benchmark_cmd(
    config: &RuntimeConfig,
    input: &str,
    skip_graph_above: Option<usize>,
) -> Result<()> {
    let (test_case, challenge) = load_challenge(input)?;

    // Counting is capped so a huge graph cannot stall the benchmark before it starts
    let cap = skip_graph_above
        .map(|n| n.saturating_add(1))
        .unwrap_or(config.limits.max_states.saturating_add(1));
    let size: Option<GraphSize> = match count_graph(&challenge, Some(cap)) {
        Ok(size) => Some(size),
        Err(e) => {
            warn!("Could not count graph size: {}", e);
            None
        }
    };
    let skip_graph = match (skip_graph_above, size) {
        (Some(threshold), Some(size)) => !size.exact || size.nodes > threshold,
        _ => false,
    };

    let mut results = Vec::with_capacity(ALGORITHMS.len());
    for (name, solve) in ALGORITHMS.iter() {
        if skip_graph && enumerates_states(name) {
            info!("Skipping {} for large size", name);
            results.push(BenchmarkResult::skipped(name, "large size".to_string()));
            continue;
        }
        info!("Running {}...", name);
        let start = Instant::now();
        let outcome = solve(&challenge, &config.limits);
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;
        match outcome {
            Ok(solution) => {
                info!("  [OK] {:.2} ms, value {}", time_ms, solution.max_value);
                results.push(BenchmarkResult::success(name, time_ms, solution));
            }
            Err(e) => {
                warn!("  [FAIL] {}", e);
                results.push(BenchmarkResult::failure(name, time_ms, e.to_string()));
            }
        }
    }

    let report = BenchmarkReport {
        num_items: challenge.num_items,
        capacity: challenge.max_weight,
        target_nodes: test_case.metadata.as_ref().map(|m| m.target_nodes),
        graph: size.map(|size| GraphReport::new(&challenge, size)),
        results,
    };
    println!("{}", jsonify_pretty(&report));

    if !report.solvers_agree() {
        return Err(anyhow!(
            "Algorithms disagree on the optimal value: {:?}",
            report.max_values()
        ));
    }
    Ok(())
}

fn synthesize_cmd(
    config: &RuntimeConfig,
    target_sizes: Vec<usize>,
    target_edges: Option<usize>,
    max_attempts: Option<usize>,
    tolerance: f64,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut num_failed = 0;
    for &target_nodes in &target_sizes {
        let path = output_dir
            .as_ref()
            .map(|dir| dir.join(TestCase::file_name(target_nodes)));
        if let Some(path) = path.as_ref().filter(|p| p.exists()) {
            info!("Test case {} already exists: {:?}", target_nodes, path);
            continue;
        }

        info!("Generating test case for {} nodes...", target_nodes);
        let attempts = max_attempts.unwrap_or(default_max_attempts(target_nodes));
        let case = match synthesize_with_config(
            &config.synthesis,
            target_nodes,
            target_edges,
            attempts,
            tolerance,
        ) {
            Ok(case) => case,
            Err(e) => {
                warn!("  [FAILED] {}", e);
                num_failed += 1;
                continue;
            }
        };
        info!(
            "  [{:?}] {} nodes, {} edges, error {:.1}%",
            case.status,
            case.actual_nodes,
            case.actual_edges,
            case.error * 100.0
        );

        let test_case = TestCase::from(case);
        match path {
            Some(path) => {
                fs::write(&path, jsonify_pretty(&test_case))?;
                println!("test case written to: {:?}", path);
            }
            None => println!("{}", jsonify(&test_case)),
        }
    }

    if num_failed > 0 {
        return Err(anyhow!(
            "Failed to synthesize {} of {} test cases",
            num_failed,
            target_sizes.len()
        ));
    }
    Ok(())
}
