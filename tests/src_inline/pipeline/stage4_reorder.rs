use super::*;
use crate::model::policy::Direction;

fn table(rows: &[(&str, &str, f64)]) -> ObservationTable {
    let mut t = ObservationTable::new();
    for (s, c, v) in rows {
        t.push(s, c, *v);
    }
    t
}

fn example_table() -> ObservationTable {
    table(&[
        ("s1", "A", 70.0),
        ("s1", "B", 30.0),
        ("s2", "A", 90.0),
        ("s2", "B", 10.0),
        ("s3", "B", 60.0),
        ("s3", "A", 40.0),
    ])
}

fn names(t: &ObservationTable, ordering: &SampleOrdering) -> Vec<String> {
    ordering
        .sample_names(t)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Deterministic table with `n_samples` x `n_categories` integer percentages.
fn synthetic_table(seed: u64, n_samples: usize, n_categories: usize) -> ObservationTable {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut t = ObservationTable::new();
    for s in 0..n_samples {
        let sample = format!("sample_{s:03}");
        for c in 0..n_categories {
            let value = (next() % 50) as f64;
            t.push(&sample, &format!("K{}", n_categories - c), value);
        }
    }
    t
}

fn assert_ordering_properties(t: &ObservationTable, ordering: &SampleOrdering, dir: Direction) {
    // permutation
    let mut idx: Vec<usize> = ordering.samples.iter().map(|s| s.sample).collect();
    idx.sort_unstable();
    assert_eq!(idx, (0..t.n_samples()).collect::<Vec<_>>());

    // contiguity: each category opens at most one run
    let mut closed = Vec::new();
    for w in ordering.samples.windows(2) {
        if w[0].peak_category != w[1].peak_category {
            assert!(!closed.contains(&w[1].peak_category));
            closed.push(w[0].peak_category);
        }
    }

    // monotonic value at the block category
    for block in &ordering.blocks {
        let values: Vec<f64> = ordering
            .block_samples(block)
            .iter()
            .map(|m| t.value(m.sample, block.category).unwrap())
            .collect();
        for w in values.windows(2) {
            match dir {
                Direction::Ascending => assert!(w[0] <= w[1]),
                Direction::Descending => assert!(w[0] >= w[1]),
            }
        }
    }
}

#[test]
fn test_reorder_example_scenario() {
    let t = example_table();
    let ordering = reorder(&t, &ReorderParams::default()).unwrap();
    assert_eq!(names(&t, &ordering), vec!["s1", "s2", "s3"]);
    assert_eq!(ordering.blocks.len(), 2);
    assert_eq!(ordering.blocks[0], Block { category: 0, start: 0, len: 2 });
    assert_eq!(ordering.blocks[1], Block { category: 1, start: 2, len: 1 });
}

#[test]
fn test_reorder_descending_reverses_within_block_only() {
    let t = example_table();
    let params = ReorderParams {
        direction: Direction::Descending,
        ..ReorderParams::default()
    };
    let ordering = reorder(&t, &params).unwrap();
    assert_eq!(names(&t, &ordering), vec!["s2", "s1", "s3"]);
}

#[test]
fn test_reorder_single_sample() {
    let t = table(&[("only", "X", 100.0)]);
    let ordering = reorder(&t, &ReorderParams::default()).unwrap();
    assert_eq!(names(&t, &ordering), vec!["only"]);
    assert_eq!(ordering.samples[0].rank, 1);
}

#[test]
fn test_reorder_tied_values_are_stable() {
    let t = table(&[
        ("b", "A", 50.0),
        ("b", "B", 50.0),
        ("a", "A", 50.0),
        ("a", "B", 50.0),
        ("c", "A", 50.0),
        ("c", "B", 50.0),
    ]);
    let first = reorder(&t, &ReorderParams::default()).unwrap();
    let second = reorder(&t, &ReorderParams::default()).unwrap();
    assert_eq!(names(&t, &first), vec!["b", "a", "c"]);
    assert_eq!(first, second);
}

#[test]
fn test_group_size_policy() {
    let t = table(&[
        ("s1", "Z", 90.0),
        ("s1", "A", 10.0),
        ("s2", "Z", 80.0),
        ("s2", "A", 20.0),
        ("s3", "A", 70.0),
        ("s3", "Z", 30.0),
    ]);
    let params = ReorderParams {
        category_order: CategoryOrder::GroupSize,
        ..ReorderParams::default()
    };
    let ordering = reorder(&t, &params).unwrap();
    assert_eq!(names(&t, &ordering), vec!["s2", "s1", "s3"]);

    let alpha = reorder(&t, &ReorderParams::default()).unwrap();
    assert_eq!(names(&t, &alpha), vec!["s3", "s2", "s1"]);
}

#[test]
fn test_custom_policy() {
    let t = example_table();
    let params = ReorderParams {
        category_order: CategoryOrder::Custom(vec![
            "C".to_string(),
            "B".to_string(),
            "A".to_string(),
        ]),
        ..ReorderParams::default()
    };
    let ordering = reorder(&t, &params).unwrap();
    assert_eq!(names(&t, &ordering), vec!["s3", "s1", "s2"]);
    assert_eq!(ordering.samples[0].block, 0);
    assert_eq!(ordering.samples[1].block, 1);
}

#[test]
fn test_custom_policy_missing_peak_category() {
    let t = example_table();
    let params = ReorderParams {
        category_order: CategoryOrder::Custom(vec!["B".to_string()]),
        ..ReorderParams::default()
    };
    assert_eq!(
        reorder(&t, &params).unwrap_err(),
        ReorderError::Validation(ValidationError::CategoryNotInOrder {
            category: "A".to_string()
        })
    );
}

#[test]
fn test_block_order_skips_categories_without_samples() {
    let t = example_table();
    let peaks = compute_peak_assignment(&t).unwrap();
    let three = table(&[("s1", "A", 1.0), ("s1", "B", 0.0), ("s1", "C", 0.0)]);
    let three_peaks = compute_peak_assignment(&three).unwrap();
    assert_eq!(
        block_order(&t, &peaks, &CategoryOrder::Alphabetical).unwrap(),
        vec![0, 1]
    );
    assert_eq!(
        block_order(&three, &three_peaks, &CategoryOrder::Alphabetical).unwrap(),
        vec![0]
    );
}

#[test]
fn test_properties_on_synthetic_tables() {
    for seed in 1..=20u64 {
        let t = synthetic_table(seed * 7919, 40, 5);
        for policy in [CategoryOrder::Alphabetical, CategoryOrder::GroupSize] {
            for dir in [Direction::Ascending, Direction::Descending] {
                let params = ReorderParams {
                    category_order: policy.clone(),
                    direction: dir,
                    ..ReorderParams::default()
                };
                let ordering = reorder(&t, &params).unwrap();
                assert_ordering_properties(&t, &ordering, dir);
                assert_eq!(reorder(&t, &params).unwrap(), ordering);
            }
        }
    }
}
