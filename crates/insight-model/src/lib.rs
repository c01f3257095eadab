pub mod dataset;
pub mod error;
pub mod insight;
pub mod options;

pub use dataset::{Column, ColumnData, ColumnKind, Dataset, format_numeric};
pub use error::{ModelError, Result};
pub use insight::{
    Aggregation, CategoricalPattern, ColumnProfile, CorrelationMatrix, CorrelationPair,
    CorrelationStrength, DistributionSummary, GroupSort, GroupSummary, InsightReport, MissingShare,
    OutlierBounds, OutlierMethod, OutlierReport, OutlierSummary, QualitySummary, TrendDirection,
    TrendOrder, TrendResult,
};
pub use options::AnalysisOptions;
