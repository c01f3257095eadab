//! Distribution shape of numeric columns and dominance of categorical ones.

use std::collections::HashMap;

use insight_model::{CategoricalPattern, Column, Dataset, DistributionSummary};

use crate::numeric::{kurtosis, mean, median, sample_std, skewness};

pub fn skew_shape(skewness: f64) -> &'static str {
    if skewness.abs() < 0.5 {
        "Approximately symmetric"
    } else if skewness > 0.5 {
        "Right-skewed (positive skew)"
    } else {
        "Left-skewed (negative skew)"
    }
}

pub fn tail_shape(kurtosis: f64) -> &'static str {
    if kurtosis.abs() < 0.5 {
        "Normal tail heaviness"
    } else if kurtosis > 0.5 {
        "Heavy-tailed"
    } else {
        "Light-tailed"
    }
}

pub fn distribution(column: &Column) -> Option<DistributionSummary> {
    let values: Vec<f64> = column.numeric_values().into_iter().map(|(_, v)| v).collect();
    let mean = mean(&values)?;
    let median = median(&values)?;
    let skewness = skewness(&values);
    let kurtosis = kurtosis(&values);
    Some(DistributionSummary {
        column: column.name().to_string(),
        mean,
        median,
        std_dev: sample_std(&values),
        skewness,
        kurtosis,
        skew_shape: skewness.map(|s| skew_shape(s).to_string()),
        tail_shape: kurtosis.map(|k| tail_shape(k).to_string()),
    })
}

/// Shape summaries for numeric columns with at least one value.
pub fn distributions(dataset: &Dataset) -> Vec<DistributionSummary> {
    dataset.numeric_columns().filter_map(distribution).collect()
}

pub fn dominance(value: &str, percentage: f64) -> String {
    if percentage > 80.0 {
        format!("Heavily dominated by '{value}'")
    } else if percentage > 50.0 {
        format!("Moderately dominated by '{value}'")
    } else {
        "Well distributed across categories".to_string()
    }
}

/// Most-common-value summary; ties go to the value seen first.
pub fn categorical_pattern(column: &Column, row_count: usize) -> Option<CategoricalPattern> {
    let values = column.as_categorical()?;
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.iter().flatten().enumerate() {
        counts.entry(value.as_str()).or_insert((0, position)).0 += 1;
    }
    let (most_common, (count, _)) = counts
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))?;
    let percentage = count_share(*count, row_count);
    Some(CategoricalPattern {
        column: column.name().to_string(),
        unique_count: counts.len(),
        most_common: (*most_common).to_string(),
        most_common_count: *count,
        most_common_percentage: percentage,
        dominance: dominance(most_common, percentage),
    })
}

fn count_share(count: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        count as f64 / rows as f64 * 100.0
    }
}

pub fn categorical_patterns(dataset: &Dataset) -> Vec<CategoricalPattern> {
    dataset
        .categorical_columns()
        .filter_map(|column| categorical_pattern(column, dataset.row_count()))
        .collect()
}
