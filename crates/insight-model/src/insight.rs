//! Result records produced by the statistics layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnKind;

/// Per-column type, missingness, and cardinality summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    pub distinct_count: usize,
    /// Up to three distinct non-null values in encounter order.
    pub sample_values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Tukey fences at 1.5 x IQR.
    #[default]
    Iqr,
    /// Absolute z-score above 3.
    ZScore,
}

impl OutlierMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::ZScore => "zscore",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fences used by the IQR method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub lower: f64,
    pub q1: f64,
    pub q3: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub method: OutlierMethod,
    /// Row positions of flagged values, ascending.
    pub rows: Vec<usize>,
    pub bounds: Option<OutlierBounds>,
}

impl OutlierReport {
    pub fn empty(column: impl Into<String>, method: OutlierMethod) -> Self {
        Self {
            column: column.into(),
            method,
            rows: Vec::new(),
            bounds: None,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outlier count for one column, as reported by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    StrongPositive,
    StrongNegative,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        if r > 0.0 {
            CorrelationStrength::StrongPositive
        } else {
            CorrelationStrength::StrongNegative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CorrelationStrength::StrongPositive => "Strong positive",
            CorrelationStrength::StrongNegative => "Strong negative",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pair of numeric columns whose correlation passed the threshold.
///
/// `var1` sorts before `var2`, so a pair is never reported twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub var1: String,
    pub var2: String,
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

impl CorrelationPair {
    pub fn new(a: &str, b: &str, correlation: f64) -> Self {
        let (var1, var2) = if a <= b { (a, b) } else { (b, a) };
        Self {
            var1: var1.to_string(),
            var2: var2.to_string(),
            correlation,
            strength: CorrelationStrength::from_coefficient(correlation),
        }
    }
}

/// Symmetric Pearson matrix over the numeric columns, in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major; `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    pub fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|name| name == a)?;
        let j = self.columns.iter().position(|name| name == b)?;
        self.get(i, j)
    }
}

/// Row ordering used when fitting a trend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "snake_case")]
pub enum TrendOrder {
    /// Rows as stored; only meaningful when the input is already time-sorted.
    #[default]
    RowOrder,
    /// Rows sorted ascending by the named column.
    By(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub column: String,
    pub slope: f64,
    pub intercept: f64,
    pub direction: TrendDirection,
    pub order: TrendOrder,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Share of non-missing cells, 0..=100.
    pub completeness: f64,
    pub duplicates: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub column: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub skew_shape: Option<String>,
    pub tail_shape: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPattern {
    pub column: String,
    pub unique_count: usize,
    pub most_common: String,
    pub most_common_count: usize,
    pub most_common_percentage: f64,
    pub dominance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingShare {
    pub column: String,
    pub percentage: f64,
}

/// Aggregate applied to each group's value column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Mean,
    Count,
    /// Sum(value * weight) / Sum(weight), e.g. revenue-weighted margin.
    WeightedMean { weight: String },
    /// Sum(value) / Sum(denominator), e.g. voucher spend per unit of revenue.
    Ratio { denominator: String },
}

/// Order of the groups returned by a group-by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSort {
    /// Ascending key tuple.
    #[default]
    Key,
    /// Smallest value first; ties keep key order.
    ValueAscending,
    /// Largest value first; ties keep key order.
    ValueDescending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub keys: Vec<String>,
    pub rows: usize,
    pub value: f64,
}

/// Everything the report view renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub key_findings: Vec<String>,
    pub correlations: Vec<CorrelationPair>,
    pub outliers: Vec<OutlierSummary>,
    pub trends: Vec<TrendResult>,
    pub quality: QualitySummary,
    pub distributions: Vec<DistributionSummary>,
    pub categorical_patterns: Vec<CategoricalPattern>,
    pub missing_by_column: Vec<MissingShare>,
    pub suggestions: Vec<String>,
}
