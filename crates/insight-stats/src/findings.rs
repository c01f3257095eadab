//! Plain-language key findings and follow-up analysis suggestions.

use insight_model::{ColumnKind, Dataset};

use crate::profile::distinct_count;
use crate::quality::duplicate_rows;

/// Unique-value ratio above which a categorical column looks like an identifier.
pub const IDENTIFIER_RATIO: f64 = 0.95;
/// Unique-value ratio below which a column has very low variability.
pub const LOW_VARIABILITY_RATIO: f64 = 0.05;
/// Low variability is only reported for datasets with more rows than this.
pub const LOW_VARIABILITY_MIN_ROWS: usize = 100;

/// Missing share above which missingness is called high.
pub const HIGH_MISSING_PERCENT: f64 = 10.0;

/// Format an integer with thousands separators.
pub fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Up to `limit` findings about size, missingness, types, duplicates and cardinality.
pub fn key_findings(dataset: &Dataset, limit: usize) -> Vec<String> {
    let rows = dataset.row_count();
    let mut findings = vec![format!(
        "Dataset contains {} records with {} features",
        thousands(rows),
        dataset.column_count()
    )];

    let total = dataset.total_cells();
    let missing = if total == 0 {
        0.0
    } else {
        dataset.null_cells() as f64 / total as f64 * 100.0
    };
    if missing > HIGH_MISSING_PERCENT {
        findings.push(format!("High missing data: {missing:.1}% of values are missing"));
    } else if missing > 0.0 {
        findings.push(format!("Low missing data: {missing:.1}% of values are missing"));
    } else {
        findings.push("Complete dataset: No missing values detected".to_string());
    }

    findings.push(format!(
        "Data types: {} numeric, {} categorical columns",
        dataset.numeric_columns().count(),
        dataset.categorical_columns().count()
    ));

    let duplicates = duplicate_rows(dataset);
    if duplicates > 0 {
        findings.push(format!(
            "Found {duplicates} duplicate records ({:.1}%)",
            duplicates as f64 / rows as f64 * 100.0
        ));
    }

    if rows > 0 {
        for column in dataset.columns() {
            let ratio = distinct_count(column) as f64 / rows as f64;
            if ratio > IDENTIFIER_RATIO && column.kind() == ColumnKind::Categorical {
                findings.push(format!(
                    "{} appears to be a unique identifier (95%+ unique values)",
                    column.name()
                ));
            } else if ratio < LOW_VARIABILITY_RATIO && rows > LOW_VARIABILITY_MIN_ROWS {
                findings.push(format!(
                    "{} has very low variability (less than 5% unique values)",
                    column.name()
                ));
            }
            if findings.len() >= limit {
                break;
            }
        }
    }

    findings.truncate(limit);
    findings
}

/// Suggested next analyses based on the column mix.
pub fn suggestions(dataset: &Dataset) -> Vec<String> {
    let mut suggestions = Vec::new();
    let temporal = dataset.column_names().any(|name| {
        let lower = name.to_lowercase();
        lower.contains("date") || lower.contains("time")
    });
    if temporal {
        suggestions.push("Consider time series analysis for temporal patterns".to_string());
    }
    let numeric = dataset.numeric_columns().count();
    let categorical = dataset.categorical_columns().count();
    if numeric >= 2 {
        suggestions.push("Dataset suitable for clustering analysis".to_string());
    }
    if categorical > 0 && numeric > 0 {
        suggestions.push("Consider classification modeling with categorical targets".to_string());
    }
    if numeric >= 2 {
        suggestions.push("Multiple numeric variables suitable for regression analysis".to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::Column;

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn detects_identifier_column() {
        let ids = (0..10).map(|i| Some(format!("ORD-{i}"))).collect();
        let ds = Dataset::new(vec![Column::categorical("order_id", ids)]).unwrap();
        let findings = key_findings(&ds, 5);
        assert_eq!(
            findings,
            vec![
                "Dataset contains 10 records with 1 features",
                "Complete dataset: No missing values detected",
                "Data types: 0 numeric, 1 categorical columns",
                "order_id appears to be a unique identifier (95%+ unique values)",
            ]
        );
    }

    #[test]
    fn low_variability_needs_many_rows() {
        let flags = vec![Some(1.0); 101];
        let ds = Dataset::new(vec![Column::numeric("flag", flags)]).unwrap();
        let findings = key_findings(&ds, 5);
        assert_eq!(
            findings.last().unwrap(),
            "flag has very low variability (less than 5% unique values)"
        );

        let ds = Dataset::new(vec![Column::numeric("flag", vec![Some(1.0); 100])]).unwrap();
        let findings = key_findings(&ds, 5);
        assert_eq!(findings.len(), 4);
        assert_eq!(findings[3], "Found 99 duplicate records (99.0%)");
    }

    #[test]
    fn suggestions_follow_column_mix() {
        let ds = Dataset::new(vec![
            Column::categorical("order_date", vec![Some("2024-01-01".into())]),
            Column::numeric("revenue", vec![Some(1.0)]),
            Column::numeric("margin", vec![Some(0.4)]),
        ])
        .unwrap();
        assert_eq!(
            suggestions(&ds),
            vec![
                "Consider time series analysis for temporal patterns",
                "Dataset suitable for clustering analysis",
                "Consider classification modeling with categorical targets",
                "Multiple numeric variables suitable for regression analysis",
            ]
        );
    }
}
