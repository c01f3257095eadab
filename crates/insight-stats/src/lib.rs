//! Statistics layer: profiling, outliers, correlations, trends and quality.
//!
//! Every function here is a pure computation over a [`Dataset`] snapshot.
//! Operations that cannot be computed (missing column, wrong kind, too few
//! values) return an empty or `None` result instead of an error, so one
//! failed insight never blocks the others.
//!
//! [`Dataset`]: insight_model::Dataset

pub mod aggregate;
pub mod correlation;
pub mod distribution;
pub mod findings;
pub mod generator;
pub mod numeric;
pub mod outliers;
pub mod profile;
pub mod quality;
pub mod session;
pub mod trend;

pub use aggregate::{group_by, order_groups, ratio_of_sums, weighted_mean};
pub use correlation::{correlation_matrix, strong_correlations, strong_pairs};
pub use distribution::{categorical_pattern, categorical_patterns, distribution, distributions};
pub use findings::{key_findings, suggestions};
pub use generator::{InsightGenerator, generate_insights};
pub use outliers::{all_outliers, column_outliers, iqr_bounds, outliers};
pub use profile::{distinct_count, profile, profile_column};
pub use quality::{completeness, duplicate_rows, missing_by_column, quality_summary};
pub use session::Session;
pub use trend::{classify, trend, trend_with_tolerance};
