//! Configuration options for insight computation.

use serde::{Deserialize, Serialize};

use crate::insight::{OutlierMethod, TrendOrder};

/// Thresholds and switches used by the statistics layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Minimum |r| for a pair to be reported.
    pub correlation_threshold: f64,

    /// Maximum number of correlation pairs in a report.
    pub correlation_limit: usize,

    /// Method used for the outlier section and outlier recommendations.
    pub outlier_method: OutlierMethod,

    /// Outlier share of rows above which a column is flagged.
    pub outlier_recommendation_share: f64,

    /// Completeness percentage below which missing values are flagged.
    pub completeness_cutoff: f64,

    /// Minimum |slope| for a trend to be reported.
    pub trend_materiality: f64,

    /// Slopes with |slope| <= this are classified flat.
    ///
    /// Zero keeps exact-equality classification.
    pub flat_tolerance: f64,

    /// Row ordering used for trend fitting.
    pub trend_order: TrendOrder,

    /// Maximum number of key findings.
    pub findings_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.7,
            correlation_limit: 5,
            outlier_method: OutlierMethod::Iqr,
            outlier_recommendation_share: 0.05,
            completeness_cutoff: 95.0,
            trend_materiality: 0.001,
            flat_tolerance: 0.0,
            trend_order: TrendOrder::RowOrder,
            findings_limit: 5,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_correlation_limit(mut self, limit: usize) -> Self {
        self.correlation_limit = limit;
        self
    }

    #[must_use]
    pub fn with_outlier_method(mut self, method: OutlierMethod) -> Self {
        self.outlier_method = method;
        self
    }

    #[must_use]
    pub fn with_trend_order(mut self, order: TrendOrder) -> Self {
        self.trend_order = order;
        self
    }

    #[must_use]
    pub fn with_flat_tolerance(mut self, tolerance: f64) -> Self {
        self.flat_tolerance = tolerance;
        self
    }
}
