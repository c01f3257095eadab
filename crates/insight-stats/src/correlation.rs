//! Pairwise Pearson correlation over numeric columns.

use std::cmp::Ordering;

use insight_model::{Column, CorrelationMatrix, CorrelationPair, Dataset};

use crate::numeric::pearson;

pub const DEFAULT_THRESHOLD: f64 = 0.7;
pub const DEFAULT_LIMIT: usize = 5;

/// Full correlation matrix; `None` with fewer than two numeric columns.
///
/// Each coefficient uses the rows where both columns have a value.
pub fn correlation_matrix(dataset: &Dataset) -> Option<CorrelationMatrix> {
    let numeric: Vec<&Column> = dataset.numeric_columns().collect();
    if numeric.len() < 2 {
        return None;
    }
    let n = numeric.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = pairwise(numeric[i], numeric[i]).map(|_| 1.0);
        for j in (i + 1)..n {
            let r = pairwise(numeric[i], numeric[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    Some(CorrelationMatrix {
        columns: numeric.iter().map(|c| c.name().to_string()).collect(),
        values,
    })
}

fn pairwise(a: &Column, b: &Column) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .as_numeric()?
        .iter()
        .zip(b.as_numeric()?)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();
    pearson(&xs, &ys)
}

/// Pairs whose |r| reaches `threshold`, strongest first, at most `limit`.
pub fn strong_correlations(dataset: &Dataset, threshold: f64, limit: usize) -> Vec<CorrelationPair> {
    let Some(matrix) = correlation_matrix(dataset) else {
        return Vec::new();
    };
    strong_pairs(&matrix, threshold, limit)
}

pub fn strong_pairs(matrix: &CorrelationMatrix, threshold: f64, limit: usize) -> Vec<CorrelationPair> {
    let n = matrix.size();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let Some(r) = matrix.get(i, j) else {
                continue;
            };
            if r.abs() >= threshold {
                pairs.push(CorrelationPair::new(&matrix.columns[i], &matrix.columns[j], r));
            }
        }
    }
    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(Ordering::Equal)
    });
    pairs.truncate(limit);
    pairs
}
