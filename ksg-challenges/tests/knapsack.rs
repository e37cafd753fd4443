use ksg_challenges::{knapsack::*, KnapsackError};

fn item(name: &str, weight: i64, value: i64) -> Item {
    Item {
        name: name.to_string(),
        weight,
        value,
    }
}

#[test]
fn test_new_challenge() {
    let challenge = Challenge::new(&[item("A", 2, 3), item("B", 3, 4)], 5).unwrap();
    assert_eq!(challenge.num_items, 2);
    assert_eq!(challenge.weights, vec![2, 3]);
    assert_eq!(challenge.values, vec![3, 4]);
    assert_eq!(challenge.max_weight, 5);
    assert_eq!(challenge.total_weight(), 5);
    assert_eq!(challenge.items(), vec![item("A", 2, 3), item("B", 3, 4)]);
}

#[test]
fn test_malformed_catalogs_are_rejected() {
    assert_eq!(Challenge::new(&[], 5), Err(KnapsackError::EmptyCatalog));
    assert_eq!(
        Challenge::new(&[item("A", 0, 3)], 5),
        Err(KnapsackError::InvalidWeight {
            name: "A".to_string(),
            weight: 0
        })
    );
    assert_eq!(
        Challenge::new(&[item("A", -2, 3)], 5),
        Err(KnapsackError::InvalidWeight {
            name: "A".to_string(),
            weight: -2
        })
    );
    assert_eq!(
        Challenge::new(&[item("A", 2, -1)], 5),
        Err(KnapsackError::InvalidValue {
            name: "A".to_string(),
            value: -1
        })
    );
    assert_eq!(
        Challenge::new(&[item("A", 2, 1)], -1),
        Err(KnapsackError::InvalidCapacity(-1))
    );
    assert_eq!(
        Challenge::new(&[item("A", 2, 1), item("A", 3, 1)], 4),
        Err(KnapsackError::DuplicateName("A".to_string()))
    );
    assert!(Challenge::new(&[], 5).unwrap_err().is_malformed_input());
}

#[test]
fn test_zero_value_items_are_valid() {
    assert!(Challenge::new(&[item("A", 1, 0)], 0).is_ok());
}

#[test]
fn test_evaluate_total_value() {
    let challenge =
        Challenge::new(&[item("A", 2, 3), item("B", 3, 4), item("C", 4, 5)], 5).unwrap();
    let solution = challenge.solution_from_indices(7, vec![1, 0]);
    assert_eq!(solution.selected_items, vec!["A", "B"]);
    assert_eq!(challenge.evaluate_total_value(&solution), Ok(7));
    assert_eq!(challenge.evaluate_total_value(&Solution::new()), Ok(0));
}

#[test]
fn test_evaluate_rejects_infeasible_solutions() {
    let challenge =
        Challenge::new(&[item("A", 2, 3), item("B", 3, 4), item("C", 4, 5)], 5).unwrap();
    let bad = [
        Solution {
            max_value: 9,
            selected_items: vec!["B".to_string(), "C".to_string()],
        },
        Solution {
            max_value: 6,
            selected_items: vec!["A".to_string(), "A".to_string()],
        },
        Solution {
            max_value: 1,
            selected_items: vec!["Z".to_string()],
        },
        Solution {
            max_value: 8,
            selected_items: vec!["A".to_string(), "B".to_string()],
        },
    ];
    for solution in bad.iter() {
        assert!(matches!(
            challenge.evaluate_total_value(solution),
            Err(KnapsackError::InvalidSolution(_))
        ));
    }
}

#[test]
fn test_catalog_totals_must_fit_u64() {
    let huge_values: Vec<Item> = (0..3)
        .map(|i| item(&format!("V{}", i), 1, i64::MAX))
        .collect();
    let err = Challenge::new(&huge_values, 3).unwrap_err();
    assert_eq!(err, KnapsackError::TotalOverflow("value"));
    assert!(err.is_malformed_input());

    let huge_weights: Vec<Item> = (0..3)
        .map(|i| item(&format!("W{}", i), i64::MAX, 1))
        .collect();
    assert_eq!(
        Challenge::new(&huge_weights, 3),
        Err(KnapsackError::TotalOverflow("weight"))
    );

    // Two maximal values still sum within u64
    let c = Challenge::new(&huge_values[..2], 2).unwrap();
    assert_eq!(c.total_weight(), 2);
}
