//! Numeric summaries over present values, computed with polars kernels.
//!
//! Callers pass only non-missing values; these helpers add the guards for
//! short or constant inputs that the kernels report as NaN.

use polars::prelude::cov::pearson_corr;
use polars::prelude::{
    ChunkAgg, ChunkQuantile, ChunkVar, Float64Chunked, IntoSeries, MomentSeries, NewChunkedArray,
    PlSmallStr, QuantileMethod,
};

fn chunked(values: &[f64]) -> Float64Chunked {
    Float64Chunked::from_slice(PlSmallStr::EMPTY, values)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(chunked(values).mean())
}

/// Sample standard deviation (n - 1 denominator). Needs two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    finite(chunked(values).std(1))
}

/// Linear-interpolated quantile: position `q * (n - 1)` over the sorted values.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    finite(chunked(values).quantile(q, QuantileMethod::Linear).ok().flatten())
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Pearson coefficient; `None` when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    finite(pearson_corr(&chunked(xs), &chunked(ys))).map(|r| r.clamp(-1.0, 1.0))
}

/// Ordinary least squares over x = 0..n-1. Returns `(slope, intercept)`.
pub fn linear_fit(ys: &[f64]) -> Option<(f64, f64)> {
    if ys.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
    let mean_x = mean(&xs)?;
    let mean_y = mean(ys)?;
    let slope = if is_constant(ys) {
        0.0
    } else {
        pearson(&xs, ys)? * sample_std(ys)? / sample_std(&xs)?
    };
    Some((slope, mean_y - slope * mean_x))
}

/// Bias-corrected sample skewness (G1). Needs three values; 0 for constant data.
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    finite(chunked(values).into_series().skew(false).ok().flatten())
}

/// Bias-corrected excess kurtosis (G2). Needs four values; 0 for constant data.
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 4 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    finite(chunked(values).into_series().kurtosis(true, false).ok().flatten())
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile(&values, 0.25).unwrap(), 1.75));
        assert!(close(quantile(&values, 0.5).unwrap(), 2.5));
        assert!(close(quantile(&values, 1.0).unwrap(), 4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(std, (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn linear_fit_recovers_line() {
        let (slope, intercept) = linear_fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!(close(slope, 2.0));
        assert!(close(intercept, 1.0));
    }

    #[test]
    fn pearson_undefined_for_constant() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap(), -1.0));
    }

    #[test]
    fn skewness_sign_follows_tail() {
        assert!(skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap() > 0.0);
        assert!(skewness(&[-10.0, 1.0, 2.0, 2.0, 2.0]).unwrap() < 0.0);
        assert!(close(skewness(&[1.0, 2.0, 3.0]).unwrap(), 0.0));
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn quantile_ignores_input_order() {
        assert!(close(quantile(&[4.0, 1.0, 3.0, 2.0], 0.25).unwrap(), 1.75));
        assert!(close(median(&[5.0, 1.0, 3.0]).unwrap(), 3.0));
    }

    #[test]
    fn moments_match_reference_values() {
        // Reference values from the bias-corrected G1 / G2 estimators.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((skewness(&values).unwrap() - 0.818_487).abs() < 1e-5);
        assert!((kurtosis(&values).unwrap() - 0.940_625).abs() < 1e-5);
        assert_eq!(skewness(&[3.0; 5]), Some(0.0));
        assert_eq!(kurtosis(&[3.0; 5]), Some(0.0));
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let (slope, intercept) = linear_fit(&[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(slope, 0.0);
        assert!(close(intercept, 2.0));
    }
}
