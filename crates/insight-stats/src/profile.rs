//! Column profiling: type, missingness, cardinality and sample values.

use std::collections::HashSet;

use insight_model::{Column, ColumnData, ColumnProfile, Dataset};

/// Maximum number of sample values per profile.
pub const SAMPLE_SIZE: usize = 3;

/// Profile every column of the dataset, in column order.
pub fn profile(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset.columns().iter().map(profile_column).collect()
}

pub fn profile_column(column: &Column) -> ColumnProfile {
    let total = column.len();
    let null_count = column.null_count();
    let null_percentage = if total == 0 {
        0.0
    } else {
        null_count as f64 / total as f64 * 100.0
    };
    let (distinct_count, sample_values) = distinct_and_samples(column);
    ColumnProfile {
        name: column.name().to_string(),
        kind: column.kind(),
        non_null_count: total - null_count,
        null_count,
        null_percentage,
        distinct_count,
        sample_values,
    }
}

/// Number of distinct non-null values.
pub fn distinct_count(column: &Column) -> usize {
    distinct_and_samples(column).0
}

fn distinct_and_samples(column: &Column) -> (usize, Vec<String>) {
    let mut samples = Vec::with_capacity(SAMPLE_SIZE);
    match column.data() {
        ColumnData::Numeric(values) => {
            let mut seen = HashSet::new();
            for (row, value) in values.iter().enumerate() {
                let Some(value) = value else {
                    continue;
                };
                if seen.insert(number_key(*value)) && samples.len() < SAMPLE_SIZE {
                    samples.extend(column.display_value(row));
                }
            }
            (seen.len(), samples)
        }
        ColumnData::Categorical(values) => {
            let mut seen = HashSet::new();
            for value in values.iter().flatten() {
                if seen.insert(value.as_str()) && samples.len() < SAMPLE_SIZE {
                    samples.push(value.clone());
                }
            }
            (seen.len(), samples)
        }
    }
}

/// Hashable identity of a float; `-0.0` and `0.0` compare equal.
pub(crate) fn number_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}
