use ksg_challenges::{knapsack::*, KnapsackError};

fn challenge(weights_values: &[(i64, i64)], capacity: i64) -> Challenge {
    let items: Vec<Item> = weights_values
        .iter()
        .enumerate()
        .map(|(i, &(weight, value))| Item {
            name: format!("Item_{}", i + 1),
            weight,
            value,
        })
        .collect();
    Challenge::new(&items, capacity).unwrap()
}

#[test]
fn test_count_graph_small_catalog() {
    // States (0,{}) (2,{A}) (3,{B}) (4,{C}) (5,{A,B}); edges {}->A {}->B {}->C A->AB B->BA
    let c = challenge(&[(2, 3), (3, 4), (4, 5)], 5);
    assert_eq!(
        count_graph(&c, None).unwrap(),
        GraphSize {
            nodes: 5,
            edges: 5,
            exact: true
        }
    );
}

#[test]
fn test_count_graph_zero_capacity() {
    let c = challenge(&[(1, 1), (2, 2)], 0);
    assert_eq!(
        count_graph(&c, None).unwrap(),
        GraphSize {
            nodes: 1,
            edges: 0,
            exact: true
        }
    );
}

#[test]
fn test_count_graph_unconstrained() {
    // Every subset of 4 items fits: 2^4 nodes, each subset T has |T| in-edges
    let c = challenge(&[(1, 1), (1, 1), (1, 1), (1, 1)], 4);
    let size = count_graph(&c, None).unwrap();
    assert_eq!(size.nodes, 16);
    assert_eq!(size.edges, 4 * 8);
    assert!(size.exact);
}

#[test]
fn test_count_graph_early_termination() {
    let c = challenge(&[(1, 1); 10], 10);
    let full = count_graph(&c, None).unwrap();
    assert_eq!(full.nodes, 1024);

    let capped = count_graph(&c, Some(100)).unwrap();
    assert!(!capped.exact);
    assert_eq!(capped.nodes, 100);
    assert!(capped.nodes < full.nodes);
    assert!(capped.edges < full.edges);

    let tiny = count_graph(&c, Some(1)).unwrap();
    assert_eq!((tiny.nodes, tiny.edges, tiny.exact), (1, 0, false));
}

#[test]
fn test_count_graph_cap_above_size_is_exact() {
    let c = challenge(&[(2, 3), (3, 4), (4, 5)], 5);
    assert_eq!(count_graph(&c, Some(1000)).unwrap(), count_graph(&c, None).unwrap());
}

#[test]
fn test_count_graph_too_many_items() {
    let c = challenge(&vec![(1, 1); MAX_GRAPH_ITEMS + 1], 1);
    assert_eq!(
        count_graph(&c, None),
        Err(KnapsackError::TooManyItems {
            num_items: MAX_GRAPH_ITEMS + 1,
            max: MAX_GRAPH_ITEMS
        })
    );
}

#[test]
fn test_successors_follow_catalog_order() {
    let c = challenge(&[(2, 3), (3, 4), (4, 5)], 5);
    let from_empty: Vec<usize> = c.successors(State::EMPTY).map(|(i, _)| i).collect();
    assert_eq!(from_empty, vec![0, 1, 2]);

    let (_, a) = c.successors(State::EMPTY).next().unwrap();
    let from_a: Vec<State> = c.successors(a).map(|(_, s)| s).collect();
    assert_eq!(from_a.len(), 1);
    assert_eq!(from_a[0].weight, 5);
    assert_eq!(c.state_value(&from_a[0]), 7);
}
