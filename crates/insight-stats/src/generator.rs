//! Builds the full [`InsightReport`] for a dataset.

use std::time::Instant;

use insight_model::{AnalysisOptions, Dataset, InsightReport, TrendOrder, TrendResult};
use tracing::{debug, info, info_span, warn};

use crate::correlation::strong_correlations;
use crate::distribution::{categorical_patterns, distributions};
use crate::findings::{key_findings, suggestions};
use crate::outliers::all_outliers;
use crate::quality::{missing_by_column, quality_summary};
use crate::trend::trend_with_tolerance;

pub struct InsightGenerator<'a> {
    dataset: &'a Dataset,
    options: &'a AnalysisOptions,
}

impl<'a> InsightGenerator<'a> {
    pub fn new(dataset: &'a Dataset, options: &'a AnalysisOptions) -> Self {
        Self { dataset, options }
    }

    pub fn generate(&self) -> InsightReport {
        let span = info_span!(
            "insights",
            rows = self.dataset.row_count(),
            columns = self.dataset.column_count()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let key_findings = key_findings(self.dataset, self.options.findings_limit);
        let correlations = strong_correlations(
            self.dataset,
            self.options.correlation_threshold,
            self.options.correlation_limit,
        );
        debug!(pairs = correlations.len(), "correlations computed");
        let outliers = all_outliers(self.dataset, self.options.outlier_method);
        debug!(columns = outliers.len(), method = %self.options.outlier_method, "outliers computed");
        let trends = self.trends();
        let quality = quality_summary(self.dataset, self.options);
        let report = InsightReport {
            key_findings,
            correlations,
            outliers,
            trends,
            quality,
            distributions: distributions(self.dataset),
            categorical_patterns: categorical_patterns(self.dataset),
            missing_by_column: missing_by_column(self.dataset),
            suggestions: suggestions(self.dataset),
        };

        info!(
            findings = report.key_findings.len(),
            trends = report.trends.len(),
            completeness = report.quality.completeness,
            duration_ms = start.elapsed().as_millis(),
            "insights generated"
        );
        report
    }

    /// Material trends for every numeric column.
    pub fn trends(&self) -> Vec<TrendResult> {
        let order = &self.options.trend_order;
        match order {
            TrendOrder::RowOrder => {
                warn!("fitting trends over raw row order; pass an ordering column if rows are not time-sorted");
            }
            TrendOrder::By(key) if self.dataset.column(key).is_none() => {
                warn!(key = %key, "trend ordering column not found, skipping trends");
                return Vec::new();
            }
            TrendOrder::By(_) => {}
        }
        self.dataset
            .numeric_columns()
            .filter(|column| !matches!(order, TrendOrder::By(key) if key == column.name()))
            .filter_map(|column| {
                trend_with_tolerance(
                    self.dataset,
                    column.name(),
                    order,
                    self.options.flat_tolerance,
                )
            })
            .filter(|trend| trend.slope.abs() > self.options.trend_materiality)
            .collect()
    }
}

/// Build the report with the given options.
pub fn generate_insights(dataset: &Dataset, options: &AnalysisOptions) -> InsightReport {
    InsightGenerator::new(dataset, options).generate()
}
