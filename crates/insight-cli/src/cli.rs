//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "insight",
    version,
    about = "Profile a tabular dataset and report data-quality insights",
    long_about = "Profile a CSV or TSV dataset: column summaries, outliers, strong\n\
                  correlations, linear trends, data quality and key findings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Report output format.
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: OutputArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Full insight report: findings, correlations, outliers, trends, quality.
    Report(ReportArgs),

    /// Per-column type, missingness and cardinality.
    Profile(InputArgs),

    /// Outliers in one or all numeric columns.
    Outliers(OutlierArgs),

    /// Strong pairwise correlations between numeric columns.
    Correlations(CorrelationArgs),

    /// Linear trend of one or all numeric columns.
    Trend(TrendArgs),

    /// Completeness, duplicate rows and recommendations.
    Quality(InputArgs),

    /// Aggregate a value column per group.
    Group(GroupArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Path to a CSV or TSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter (default: inferred from the file extension).
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Rows sampled for column type inference (0 scans the whole file).
    #[arg(long = "infer-schema-rows", default_value_t = 100)]
    pub infer_schema_rows: usize,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum |r| for a correlation to be reported.
    #[arg(long = "threshold", default_value_t = 0.7)]
    pub threshold: f64,

    /// Outlier detection method.
    #[arg(long = "method", value_enum, default_value = "iqr")]
    pub method: OutlierMethodArg,

    /// Column that orders rows for trend fitting (default: file order).
    #[arg(long = "order-by", value_name = "COLUMN")]
    pub order_by: Option<String>,

    /// Slopes within +/- this value are reported as flat.
    #[arg(long = "flat-tolerance", default_value_t = 0.0)]
    pub flat_tolerance: f64,
}

#[derive(Args)]
pub struct OutlierArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column to inspect (default: every numeric column).
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// Outlier detection method.
    #[arg(long = "method", value_enum, default_value = "iqr")]
    pub method: OutlierMethodArg,
}

#[derive(Args)]
pub struct CorrelationArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum |r| for a pair to be reported.
    #[arg(long = "threshold", default_value_t = 0.7)]
    pub threshold: f64,

    /// Maximum number of pairs.
    #[arg(long = "limit", default_value_t = 5)]
    pub limit: usize,

    /// Print the full correlation matrix instead of the strongest pairs.
    #[arg(long = "matrix")]
    pub matrix: bool,
}

#[derive(Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column to fit (default: every numeric column).
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// Column that orders rows before fitting (default: file order).
    #[arg(long = "order-by", value_name = "COLUMN")]
    pub order_by: Option<String>,

    /// Slopes within +/- this value are reported as flat.
    #[arg(long = "flat-tolerance", default_value_t = 0.0)]
    pub flat_tolerance: f64,
}

#[derive(Args)]
pub struct GroupArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Grouping columns, comma separated.
    #[arg(long = "by", value_name = "COLUMNS", value_delimiter = ',', required = true)]
    pub by: Vec<String>,

    /// Column to aggregate.
    #[arg(long = "value", value_name = "COLUMN")]
    pub value: String,

    /// Aggregation to apply.
    #[arg(long = "agg", value_enum, default_value = "sum")]
    pub agg: AggregationArg,

    /// Weight column for weighted-mean.
    #[arg(long = "weight", value_name = "COLUMN", required_if_eq("agg", "weighted-mean"))]
    pub weight: Option<String>,

    /// Denominator column for ratio (sum of value / sum of denominator).
    #[arg(long = "denominator", value_name = "COLUMN", required_if_eq("agg", "ratio"))]
    pub denominator: Option<String>,

    /// Group order: by key, or by aggregated value.
    #[arg(long = "sort", value_enum, default_value = "key")]
    pub sort: GroupSortArg,

    /// Keep only the first N groups after sorting.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutlierMethodArg {
    Iqr,
    Zscore,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AggregationArg {
    Sum,
    Mean,
    Count,
    WeightedMean,
    Ratio,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupSortArg {
    Key,
    Asc,
    Desc,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ratio_with_top_groups() {
        let cli = Cli::try_parse_from([
            "insight",
            "group",
            "orders.csv",
            "--by",
            "Country,Category",
            "--value",
            "Voucher",
            "--agg",
            "ratio",
            "--denominator",
            "Revenue",
            "--sort",
            "desc",
            "--top",
            "3",
        ])
        .unwrap();
        let Command::Group(args) = cli.command else {
            panic!("expected group command");
        };
        assert_eq!(args.by, vec!["Country", "Category"]);
        assert!(args.agg == AggregationArg::Ratio);
        assert_eq!(args.denominator.as_deref(), Some("Revenue"));
        assert!(args.sort == GroupSortArg::Desc);
        assert_eq!(args.top, Some(3));
    }

    #[test]
    fn ratio_requires_denominator() {
        let result = Cli::try_parse_from([
            "insight", "group", "orders.csv", "--by", "Country", "--value", "Voucher", "--agg",
            "ratio",
        ]);
        assert!(result.is_err());
    }
}
