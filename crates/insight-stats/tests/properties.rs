//! Property tests for the statistics layer.

use std::collections::HashSet;

use insight_model::{Column, Dataset, OutlierMethod, TrendOrder};
use insight_stats::{completeness, correlation_matrix, outliers, strong_correlations, trend};
use proptest::prelude::{ProptestConfig, prop, prop_assert, prop_assert_eq, proptest};

fn single(values: &[f64]) -> Dataset {
    Dataset::new(vec![Column::numeric(
        "x",
        values.iter().copied().map(Some).collect(),
    )])
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn iqr_bounds_are_ordered_and_recount_matches(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 1..60)
    ) {
        let report = outliers(&single(&values), "x", OutlierMethod::Iqr);
        let bounds = report.bounds.expect("bounds for non-empty numeric column");
        prop_assert!(bounds.lower <= bounds.q1);
        prop_assert!(bounds.q1 <= bounds.q3);
        prop_assert!(bounds.q3 <= bounds.upper);
        let recount = values
            .iter()
            .filter(|v| **v < bounds.lower || **v > bounds.upper)
            .count();
        prop_assert_eq!(report.count(), recount);
        prop_assert!(report.rows.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn zscore_on_constant_column_is_empty(value in -1.0e6f64..1.0e6, len in 1usize..50) {
        let report = outliers(&single(&vec![value; len]), "x", OutlierMethod::ZScore);
        prop_assert!(report.is_empty());
    }

    #[test]
    fn fully_populated_dataset_is_complete(rows in 0usize..25, cols in 1usize..6) {
        let columns = (0..cols)
            .map(|c| Column::numeric(format!("c{c}"), (0..rows).map(|r| Some(r as f64)).collect()))
            .collect();
        let dataset = Dataset::new(columns).unwrap();
        prop_assert_eq!(completeness(&dataset), 100.0);
    }

    #[test]
    fn monotonic_trend_sign_matches_endpoints(
        start in -100.0f64..100.0,
        steps in prop::collection::vec(0.1f64..10.0, 2..40),
        descending in proptest::bool::ANY,
    ) {
        let mut values = vec![start];
        for step in &steps {
            let last = *values.last().unwrap();
            values.push(if descending { last - step } else { last + step });
        }
        let result = trend(&single(&values), "x", &TrendOrder::RowOrder).unwrap();
        let endpoints = values[values.len() - 1] - values[0];
        prop_assert_eq!(result.slope.signum(), endpoints.signum());
    }

    #[test]
    fn correlation_matrix_is_symmetric(
        rows in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0), 3..30)
    ) {
        let dataset = Dataset::new(vec![
            Column::numeric("a", rows.iter().map(|r| Some(r.0)).collect()),
            Column::numeric("b", rows.iter().map(|r| Some(r.1)).collect()),
            Column::numeric("c", rows.iter().map(|r| Some(r.2)).collect()),
        ])
        .unwrap();
        let matrix = correlation_matrix(&dataset).unwrap();
        for i in 0..matrix.size() {
            let diagonal = matrix.get(i, i);
            prop_assert!(diagonal.is_none() || diagonal == Some(1.0));
            for j in 0..matrix.size() {
                prop_assert_eq!(matrix.get(i, j), matrix.get(j, i));
                if let Some(r) = matrix.get(i, j) {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }

        let pairs = strong_correlations(&dataset, 0.0, usize::MAX);
        let mut seen = HashSet::new();
        for pair in &pairs {
            prop_assert!(pair.var1 < pair.var2);
            prop_assert!(seen.insert((pair.var1.clone(), pair.var2.clone())));
        }
    }
}
