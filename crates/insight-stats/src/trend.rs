//! Linear trend estimation.
//!
//! The slope is fitted over ordinal positions after ordering the rows by
//! [`TrendOrder`]. Under [`TrendOrder::RowOrder`] the result is only
//! meaningful when the input is already sorted by time.

use std::cmp::Ordering;

use insight_model::{Column, ColumnData, Dataset, TrendDirection, TrendOrder, TrendResult};

use crate::numeric::linear_fit;

/// Minimum number of present values needed to fit a trend.
pub const MIN_TREND_VALUES: usize = 3;

/// Fit a trend with exact-zero flat classification.
pub fn trend(dataset: &Dataset, column: &str, order: &TrendOrder) -> Option<TrendResult> {
    trend_with_tolerance(dataset, column, order, 0.0)
}

/// Fit a trend; slopes within `±flat_tolerance` are classified flat.
pub fn trend_with_tolerance(
    dataset: &Dataset,
    column: &str,
    order: &TrendOrder,
    flat_tolerance: f64,
) -> Option<TrendResult> {
    let values = dataset.column(column)?.as_numeric()?;
    let rows = ordered_rows(dataset, order)?;
    let ys: Vec<f64> = rows.into_iter().filter_map(|row| values[row]).collect();
    if ys.len() < MIN_TREND_VALUES {
        return None;
    }
    let (slope, intercept) = linear_fit(&ys)?;
    let direction = classify(slope, flat_tolerance);
    Some(TrendResult {
        column: column.to_string(),
        slope,
        intercept,
        direction,
        order: order.clone(),
        description: describe(direction, slope),
    })
}

pub fn classify(slope: f64, flat_tolerance: f64) -> TrendDirection {
    let tolerance = flat_tolerance.abs();
    if slope > tolerance {
        TrendDirection::Increasing
    } else if slope < -tolerance {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Flat
    }
}

pub fn describe(direction: TrendDirection, slope: f64) -> String {
    match direction {
        TrendDirection::Increasing => format!("Increasing trend (slope: {slope:.3})"),
        TrendDirection::Decreasing => format!("Decreasing trend (slope: {slope:.3})"),
        TrendDirection::Flat => "No clear trend".to_string(),
    }
}

/// Row positions in fitting order. `None` when the ordering key is missing.
fn ordered_rows(dataset: &Dataset, order: &TrendOrder) -> Option<Vec<usize>> {
    match order {
        TrendOrder::RowOrder => Some((0..dataset.row_count()).collect()),
        TrendOrder::By(key) => dataset.column(key).map(sort_rows_by),
    }
}

fn sort_rows_by(key: &Column) -> Vec<usize> {
    match key.data() {
        ColumnData::Numeric(values) => {
            let mut rows: Vec<(usize, f64)> = values
                .iter()
                .enumerate()
                .filter_map(|(row, v)| v.map(|v| (row, v)))
                .collect();
            rows.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
            rows.into_iter().map(|(row, _)| row).collect()
        }
        ColumnData::Categorical(values) => {
            let mut rows: Vec<(usize, &str)> = values
                .iter()
                .enumerate()
                .filter_map(|(row, v)| v.as_deref().map(|v| (row, v)))
                .collect();
            rows.sort_by(|a, b| a.1.cmp(b.1));
            rows.into_iter().map(|(row, _)| row).collect()
        }
    }
}
