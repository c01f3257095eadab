//! Dataset-level quality summary: completeness, duplicates, recommendations.

use std::collections::HashSet;

use insight_model::{AnalysisOptions, ColumnData, Dataset, MissingShare, QualitySummary};

use crate::outliers::column_outliers;
use crate::profile::number_key;

/// Percentage of non-missing cells. An empty table is complete.
pub fn completeness(dataset: &Dataset) -> f64 {
    let total = dataset.total_cells();
    if total == 0 {
        return 100.0;
    }
    (total - dataset.null_cells()) as f64 * 100.0 / total as f64
}

#[derive(Hash, PartialEq, Eq)]
enum CellKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

/// Rows identical to an earlier row in every cell; missing matches missing.
pub fn duplicate_rows(dataset: &Dataset) -> usize {
    let n = dataset.row_count();
    if n <= 1 || dataset.is_empty() {
        return 0;
    }
    let mut seen = HashSet::with_capacity(n);
    let mut duplicates = 0usize;
    for row in 0..n {
        let key: Vec<CellKey<'_>> = dataset
            .columns()
            .iter()
            .map(|column| match column.data() {
                ColumnData::Numeric(values) => {
                    values[row].map_or(CellKey::Missing, |v| CellKey::Number(number_key(v)))
                }
                ColumnData::Categorical(values) => {
                    values[row].as_deref().map_or(CellKey::Missing, CellKey::Text)
                }
            })
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

pub fn quality_summary(dataset: &Dataset, options: &AnalysisOptions) -> QualitySummary {
    let completeness = completeness(dataset);
    let duplicates = duplicate_rows(dataset);

    let mut recommendations = Vec::new();
    if completeness < options.completeness_cutoff {
        recommendations.push("Consider handling missing values".to_string());
    }
    if duplicates > 0 {
        recommendations.push(format!("Remove {duplicates} duplicate rows"));
    }
    let limit = dataset.row_count() as f64 * options.outlier_recommendation_share;
    for column in dataset.numeric_columns() {
        let report = column_outliers(column, options.outlier_method);
        if report.count() as f64 > limit {
            recommendations.push(format!("Investigate outliers in {}", column.name()));
        }
    }

    QualitySummary {
        completeness,
        duplicates,
        recommendations,
    }
}

/// Columns with missing cells, largest share first.
pub fn missing_by_column(dataset: &Dataset) -> Vec<MissingShare> {
    let rows = dataset.row_count();
    if rows == 0 {
        return Vec::new();
    }
    let mut shares: Vec<MissingShare> = dataset
        .columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| MissingShare {
            column: column.name().to_string(),
            percentage: column.null_count() as f64 / rows as f64 * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}
