//! A loaded dataset together with the options used to analyse it.
//!
//! The session owns its dataset for its whole lifetime; there is no
//! process-wide cache of loaded files.

use std::path::{Path, PathBuf};

use insight_ingest::{IngestOptions, load_dataset_with_options};
use insight_model::{
    AnalysisOptions, ColumnProfile, CorrelationMatrix, CorrelationPair, Dataset, InsightReport,
    OutlierMethod, OutlierReport, QualitySummary, TrendOrder, TrendResult,
};

use crate::correlation::{correlation_matrix, strong_correlations};
use crate::generator::InsightGenerator;
use crate::outliers::outliers;
use crate::profile::profile;
use crate::quality::quality_summary;
use crate::trend::trend_with_tolerance;

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    source: Option<PathBuf>,
    options: AnalysisOptions,
}

impl Session {
    /// Load `path` and start a session over it.
    pub fn open(path: &Path, ingest: &IngestOptions) -> insight_ingest::Result<Self> {
        let dataset = load_dataset_with_options(path, ingest)?;
        Ok(Self {
            dataset,
            source: Some(path.to_path_buf()),
            options: AnalysisOptions::default(),
        })
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset,
            source: None,
            options: AnalysisOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn profile(&self) -> Vec<ColumnProfile> {
        profile(&self.dataset)
    }

    pub fn outliers(&self, column: &str, method: OutlierMethod) -> OutlierReport {
        outliers(&self.dataset, column, method)
    }

    pub fn correlation_matrix(&self) -> Option<CorrelationMatrix> {
        correlation_matrix(&self.dataset)
    }

    /// Strong pairs using the session's threshold and limit.
    pub fn correlations(&self) -> Vec<CorrelationPair> {
        strong_correlations(
            &self.dataset,
            self.options.correlation_threshold,
            self.options.correlation_limit,
        )
    }

    pub fn trend(&self, column: &str, order: &TrendOrder) -> Option<TrendResult> {
        trend_with_tolerance(&self.dataset, column, order, self.options.flat_tolerance)
    }

    pub fn quality_summary(&self) -> QualitySummary {
        quality_summary(&self.dataset, &self.options)
    }

    pub fn insights(&self) -> InsightReport {
        InsightGenerator::new(&self.dataset, &self.options).generate()
    }
}
