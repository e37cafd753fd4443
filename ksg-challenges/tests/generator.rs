use ksg_challenges::{knapsack::*, KnapsackError};

#[test]
fn test_synthesize_small_target_converges() {
    let case = synthesize(50, None, 200, 0.1).unwrap();
    assert_eq!(case.status, SynthesisStatus::Found);
    assert_eq!(case.target_nodes, 50);
    assert_eq!(case.target_edges, 150);
    let node_error = (case.actual_nodes as f64 - 50.0).abs() / 50.0;
    assert!(node_error <= 0.1, "node error {}", node_error);
    assert_eq!(case.num_items, case.items.len());
}

#[test]
fn test_synthesized_counts_match_recount() {
    let case = synthesize(50, None, 200, 0.1).unwrap();
    let size = count_graph(&case.challenge().unwrap(), None).unwrap();
    assert_eq!(size.nodes, case.actual_nodes);
    assert_eq!(size.edges, case.actual_edges);
    assert!(size.exact);
}

#[test]
fn test_synthesize_is_deterministic() {
    let a = synthesize(120, Some(300), 40, 0.1).unwrap();
    let b = synthesize(120, Some(300), 40, 0.1).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_synthesize_best_effort_when_tolerance_unreachable() {
    // One attempt cannot land on an edge count of 1 for a 400 node target
    let case = synthesize(400, Some(1), 1, 0.0).unwrap();
    assert_ne!(case.status, SynthesisStatus::Found);
    assert!(case.error > 0.0);
}

#[test]
fn test_synthesize_rejects_zero_target() {
    assert_eq!(
        synthesize(0, None, 10, 0.1),
        Err(KnapsackError::InvalidTarget)
    );
}

#[test]
fn test_synthesize_reports_exhaustion() {
    // A cap factor of zero discards every probe, including the fallback
    let config = SynthesisConfig {
        cap_factor: 0,
        fallback_cap_factor: 0,
        ..SynthesisConfig::default()
    };
    assert_eq!(
        synthesize_with_config(&config, 50, None, 5, 0.1),
        Err(KnapsackError::SearchExhausted { target_nodes: 50 })
    );
}

#[test]
fn test_synthesize_uses_fallback_when_cap_is_tight() {
    // Probes are capped at 1x the target but the fallback gets 1000x
    let config = SynthesisConfig {
        cap_factor: 1,
        fallback_cap_factor: 1000,
        capacity_ratios: vec![0.8],
        ..SynthesisConfig::default()
    };
    let case = synthesize_with_config(&config, 2, None, 3, 0.1).unwrap();
    assert_eq!(case.status, SynthesisStatus::Fallback);
}

#[test]
fn test_default_max_attempts() {
    assert_eq!(default_max_attempts(500), 100);
    assert_eq!(default_max_attempts(10_000), 200);
}

#[test]
fn test_synthesis_config_is_validated() {
    let with_bracket = |bracket: SizeBracket| SynthesisConfig {
        brackets: vec![bracket],
        ..SynthesisConfig::default()
    };
    let base = SynthesisConfig::default().brackets[0].clone();

    let too_many_items = with_bracket(SizeBracket {
        num_items: (5, MAX_GRAPH_ITEMS + 1),
        ..base.clone()
    });
    let heavy = with_bracket(SizeBracket {
        weight_range: (1, u32::MAX / 2 + 1),
        ..base.clone()
    });
    let mut unordered = SynthesisConfig::default();
    unordered.brackets.swap(0, 1);
    let mut open_first = SynthesisConfig::default();
    open_first.brackets.rotate_right(1);

    for config in [too_many_items, heavy, unordered, open_first] {
        assert!(matches!(
            synthesize_with_config(&config, 50, None, 5, 0.1),
            Err(KnapsackError::InvalidConfig(_))
        ));
    }
}
