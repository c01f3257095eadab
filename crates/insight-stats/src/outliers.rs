//! Univariate outlier detection.
//!
//! Missing cells are skipped; reported rows are positions in the dataset.
//! Missing or categorical columns produce an empty report.

use insight_model::{Column, Dataset, OutlierBounds, OutlierMethod, OutlierReport, OutlierSummary};
use tracing::debug;

use crate::numeric::{mean, quantile, sample_std};

/// Tukey fence multiplier.
pub const IQR_FENCE: f64 = 1.5;

/// Absolute z-score above which a value is flagged.
pub const Z_THRESHOLD: f64 = 3.0;

pub fn outliers(dataset: &Dataset, column: &str, method: OutlierMethod) -> OutlierReport {
    match dataset.column(column) {
        Some(col) => column_outliers(col, method),
        None => {
            debug!(column, "outlier column not found");
            OutlierReport::empty(column, method)
        }
    }
}

pub fn column_outliers(column: &Column, method: OutlierMethod) -> OutlierReport {
    if column.as_numeric().is_none() {
        return OutlierReport::empty(column.name(), method);
    }
    let valid = column.numeric_values();
    match method {
        OutlierMethod::Iqr => iqr_outliers(column.name(), &valid),
        OutlierMethod::ZScore => zscore_outliers(column.name(), &valid),
    }
}

/// IQR fences over the given values, `None` when there are no values.
pub fn iqr_bounds(values: &[f64]) -> Option<OutlierBounds> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some(OutlierBounds {
        lower: q1 - IQR_FENCE * iqr,
        q1,
        q3,
        upper: q3 + IQR_FENCE * iqr,
    })
}

fn iqr_outliers(name: &str, valid: &[(usize, f64)]) -> OutlierReport {
    let values: Vec<f64> = valid.iter().map(|&(_, v)| v).collect();
    let Some(bounds) = iqr_bounds(&values) else {
        return OutlierReport::empty(name, OutlierMethod::Iqr);
    };
    let rows = valid
        .iter()
        .filter(|(_, v)| *v < bounds.lower || *v > bounds.upper)
        .map(|&(row, _)| row)
        .collect();
    OutlierReport {
        column: name.to_string(),
        method: OutlierMethod::Iqr,
        rows,
        bounds: Some(bounds),
    }
}

fn zscore_outliers(name: &str, valid: &[(usize, f64)]) -> OutlierReport {
    let values: Vec<f64> = valid.iter().map(|&(_, v)| v).collect();
    let (Some(mean), Some(std)) = (mean(&values), sample_std(&values)) else {
        return OutlierReport::empty(name, OutlierMethod::ZScore);
    };
    // Zero variance: every z-score is undefined, nothing is an outlier.
    if std == 0.0 || !std.is_finite() {
        return OutlierReport::empty(name, OutlierMethod::ZScore);
    }
    let rows = valid
        .iter()
        .filter(|(_, v)| ((v - mean) / std).abs() > Z_THRESHOLD)
        .map(|&(row, _)| row)
        .collect();
    OutlierReport {
        column: name.to_string(),
        method: OutlierMethod::ZScore,
        rows,
        bounds: None,
    }
}

/// Outlier counts for every numeric column with at least one flagged value.
pub fn all_outliers(dataset: &Dataset, method: OutlierMethod) -> Vec<OutlierSummary> {
    let rows = dataset.row_count();
    dataset
        .numeric_columns()
        .map(|column| column_outliers(column, method))
        .filter(|report| !report.is_empty())
        .map(|report| OutlierSummary {
            percentage: report.count() as f64 / rows as f64 * 100.0,
            count: report.count(),
            column: report.column,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(name: &str, values: Vec<Option<f64>>) -> Dataset {
        Dataset::new(vec![Column::numeric(name, values)]).unwrap()
    }

    #[test]
    fn iqr_flags_single_high_value() {
        let ds = dataset("A", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)]);
        let report = outliers(&ds, "A", OutlierMethod::Iqr);
        assert_eq!(report.rows, vec![4]);
        let bounds = report.bounds.unwrap();
        assert_eq!(bounds.q1, 2.0);
        assert_eq!(bounds.q3, 4.0);
        assert_eq!(bounds.upper, 7.0);
        assert_eq!(bounds.lower, -1.0);
    }

    #[test]
    fn rows_keep_dataset_positions_across_missing_cells() {
        let ds = dataset(
            "A",
            vec![None, Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(100.0)],
        );
        let report = outliers(&ds, "A", OutlierMethod::Iqr);
        assert_eq!(report.rows, vec![6]);
    }

    #[test]
    fn zscore_zero_variance_has_no_outliers() {
        let ds = dataset("flat", vec![Some(5.0); 20]);
        let report = outliers(&ds, "flat", OutlierMethod::ZScore);
        assert!(report.is_empty());
    }

    #[test]
    fn zscore_flags_extreme_value() {
        let mut values: Vec<Option<f64>> = (0..30).map(|i| Some(f64::from(i % 3))).collect();
        values.push(Some(50.0));
        let ds = dataset("x", values);
        let report = outliers(&ds, "x", OutlierMethod::ZScore);
        assert_eq!(report.rows, vec![30]);
        assert!(report.bounds.is_none());
    }

    #[test]
    fn categorical_and_missing_columns_are_empty() {
        let ds = Dataset::new(vec![Column::categorical(
            "country",
            vec![Some("UAE".to_string())],
        )])
        .unwrap();
        assert!(outliers(&ds, "country", OutlierMethod::Iqr).is_empty());
        assert!(outliers(&ds, "revenue", OutlierMethod::Iqr).is_empty());
    }

    #[test]
    fn all_outliers_reports_percentage_of_rows() {
        let ds = dataset(
            "A",
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
        );
        let summaries = all_outliers(&ds, OutlierMethod::Iqr);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].count, 1);
        assert!((summaries[0].percentage - 20.0).abs() < 1e-9);
    }
}
