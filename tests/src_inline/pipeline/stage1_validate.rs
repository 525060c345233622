use super::*;

fn table(rows: &[(&str, &str, f64)]) -> ObservationTable {
    let mut t = ObservationTable::new();
    for (s, c, v) in rows {
        t.push(s, c, *v);
    }
    t
}

fn validation_err(table: &ObservationTable, params: &ReorderParams) -> ValidationError {
    match run_stage1(table, params) {
        Err(ReorderError::Validation(e)) => e,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_accepts_complete_table() {
    let t = table(&[("s1", "A", 70.0), ("s1", "B", 30.0), ("s2", "A", 10.0), ("s2", "B", 90.0)]);
    let report = run_stage1(&t, &ReorderParams::default()).unwrap();
    assert_eq!(report.n_samples, 2);
    assert_eq!(report.n_categories, 2);
    assert_eq!(report.n_observations, 4);
    assert_eq!(report.totals, vec![100.0, 100.0]);
    assert_eq!(report.n_sparse_samples, 0);
}

#[test]
fn test_empty_input() {
    let t = ObservationTable::new();
    assert_eq!(
        run_stage1(&t, &ReorderParams::default()).unwrap_err(),
        ReorderError::EmptyInput
    );
}

#[test]
fn test_sample_without_observations() {
    let mut t = table(&[("s1", "A", 1.0)]);
    t.add_sample("s2");
    assert_eq!(
        run_stage1(&t, &ReorderParams::default()).unwrap_err(),
        ReorderError::InconsistentSample {
            sample: "s2".to_string()
        }
    );
}

#[test]
fn test_duplicate_category() {
    let t = table(&[("s1", "A", 1.0), ("s1", "A", 2.0)]);
    assert_eq!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::DuplicateCategory {
            sample: "s1".to_string(),
            category: "A".to_string()
        }
    );
}

#[test]
fn test_negative_and_non_finite_values() {
    let t = table(&[("s1", "A", -1.0)]);
    assert!(matches!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::NegativeValue { .. }
    ));

    let t = table(&[("s1", "A", f64::NAN)]);
    assert!(matches!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::NonFiniteValue { .. }
    ));
}

#[test]
fn test_empty_names() {
    let t = table(&[("", "A", 1.0)]);
    assert!(matches!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::EmptyField { field: "sample", .. }
    ));

    let t = table(&[("s1", " ", 1.0)]);
    assert!(matches!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::EmptyField {
            field: "category",
            ..
        }
    ));
}

#[test]
fn test_missing_category_strict_vs_sparse() {
    let t = table(&[("s1", "A", 60.0), ("s1", "B", 40.0), ("s2", "A", 100.0)]);
    assert_eq!(
        validation_err(&t, &ReorderParams::default()),
        ValidationError::MissingCategory {
            sample: "s2".to_string(),
            category: "B".to_string()
        }
    );

    let params = ReorderParams {
        strict: false,
        ..ReorderParams::default()
    };
    let report = run_stage1(&t, &params).unwrap();
    assert_eq!(report.n_sparse_samples, 1);
}

#[test]
fn test_custom_order_must_cover_categories() {
    let t = table(&[("s1", "A", 60.0), ("s1", "B", 40.0)]);
    let params = ReorderParams {
        category_order: CategoryOrder::Custom(vec!["A".to_string()]),
        ..ReorderParams::default()
    };
    assert_eq!(
        validation_err(&t, &params),
        ValidationError::CategoryNotInOrder {
            category: "B".to_string()
        }
    );
}

#[test]
fn test_total_deviation_counted() {
    let t = table(&[("s1", "A", 60.0), ("s1", "B", 40.0), ("s2", "A", 50.0), ("s2", "B", 40.0)]);
    let params = ReorderParams {
        expected_total: Some(100.0),
        total_tolerance: 0.5,
        ..ReorderParams::default()
    };
    let report = run_stage1(&t, &params).unwrap();
    assert_eq!(report.n_total_deviations, 1);
}
