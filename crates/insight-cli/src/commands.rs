use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use insight_ingest::IngestOptions;
use insight_model::{
    Aggregation, AnalysisOptions, GroupSort, OutlierMethod, OutlierReport, TrendOrder,
};
use insight_stats::{Session, group_by, missing_by_column, order_groups};

use insight_cli::render::{
    correlation_table, group_table, matrix_table, missing_table, outlier_table, print_json,
    print_report, profile_table, quality_table, trend_table,
};

use crate::cli::{
    AggregationArg, CorrelationArgs, GroupArgs, GroupSortArg, InputArgs, OutlierArgs,
    OutlierMethodArg, OutputArg, ReportArgs, TrendArgs,
};

pub fn run_report(args: &ReportArgs, output: OutputArg) -> Result<()> {
    let options = AnalysisOptions::default()
        .with_correlation_threshold(args.threshold)
        .with_outlier_method(outlier_method(args.method))
        .with_trend_order(trend_order(args.order_by.as_deref()))
        .with_flat_tolerance(args.flat_tolerance);
    let session = open_session(&args.input)?.with_options(options);
    let report = session.insights();
    match output {
        OutputArg::Json => print_json(&report)?,
        OutputArg::Table => print_report(&report),
    }
    Ok(())
}

pub fn run_profile(args: &InputArgs, output: OutputArg) -> Result<()> {
    let session = open_session(args)?;
    let profiles = session.profile();
    match output {
        OutputArg::Json => print_json(&profiles)?,
        OutputArg::Table => {
            println!("{}", profile_table(&profiles));
            let missing = missing_by_column(session.dataset());
            if !missing.is_empty() {
                println!("{}", missing_table(&missing));
            }
        }
    }
    Ok(())
}

pub fn run_outliers(args: &OutlierArgs, output: OutputArg) -> Result<()> {
    let session = open_session(&args.input)?;
    let method = outlier_method(args.method);
    let reports: Vec<OutlierReport> = match &args.column {
        Some(column) => {
            require_numeric(&session, column)?;
            vec![session.outliers(column, method)]
        }
        None => session
            .dataset()
            .numeric_columns()
            .map(|column| session.outliers(column.name(), method))
            .collect(),
    };
    match output {
        OutputArg::Json => print_json(&reports)?,
        OutputArg::Table => println!("{}", outlier_table(&reports)),
    }
    Ok(())
}

pub fn run_correlations(args: &CorrelationArgs, output: OutputArg) -> Result<()> {
    let options = AnalysisOptions::default()
        .with_correlation_threshold(args.threshold)
        .with_correlation_limit(args.limit);
    let session = open_session(&args.input)?.with_options(options);
    if args.matrix {
        let Some(matrix) = session.correlation_matrix() else {
            bail!("correlation needs at least two numeric columns");
        };
        match output {
            OutputArg::Json => print_json(&matrix)?,
            OutputArg::Table => println!("{}", matrix_table(&matrix)),
        }
        return Ok(());
    }
    let pairs = session.correlations();
    match output {
        OutputArg::Json => print_json(&pairs)?,
        OutputArg::Table if pairs.is_empty() => {
            println!("No pairs with |r| >= {}", args.threshold);
        }
        OutputArg::Table => println!("{}", correlation_table(&pairs)),
    }
    Ok(())
}

pub fn run_trend(args: &TrendArgs, output: OutputArg) -> Result<()> {
    let options = AnalysisOptions::default().with_flat_tolerance(args.flat_tolerance);
    let session = open_session(&args.input)?.with_options(options);
    let order = trend_order(args.order_by.as_deref());
    if let TrendOrder::By(key) = &order
        && session.dataset().column(key).is_none()
    {
        bail!("ordering column not found: {key}");
    }
    let trends = match &args.column {
        Some(column) => {
            require_numeric(&session, column)?;
            let Some(trend) = session.trend(column, &order) else {
                bail!("not enough values in {column} to fit a trend");
            };
            vec![trend]
        }
        None => session
            .dataset()
            .numeric_columns()
            .filter(|column| !matches!(&order, TrendOrder::By(key) if key == column.name()))
            .filter_map(|column| session.trend(column.name(), &order))
            .collect(),
    };
    match output {
        OutputArg::Json => print_json(&trends)?,
        OutputArg::Table => println!("{}", trend_table(&trends)),
    }
    Ok(())
}

pub fn run_quality(args: &InputArgs, output: OutputArg) -> Result<()> {
    let session = open_session(args)?;
    let quality = session.quality_summary();
    match output {
        OutputArg::Json => print_json(&quality)?,
        OutputArg::Table => println!("{}", quality_table(&quality)),
    }
    Ok(())
}

pub fn run_group(args: &GroupArgs, output: OutputArg) -> Result<()> {
    let session = open_session(&args.input)?;
    let aggregation = match args.agg {
        AggregationArg::Sum => Aggregation::Sum,
        AggregationArg::Mean => Aggregation::Mean,
        AggregationArg::Count => Aggregation::Count,
        AggregationArg::WeightedMean => Aggregation::WeightedMean {
            weight: args.weight.clone().context("--weight is required for weighted-mean")?,
        },
        AggregationArg::Ratio => Aggregation::Ratio {
            denominator: args
                .denominator
                .clone()
                .context("--denominator is required for ratio")?,
        },
    };
    let keys: Vec<&str> = args.by.iter().map(String::as_str).collect();
    let Some(mut groups) = group_by(session.dataset(), &keys, &args.value, &aggregation) else {
        bail!(
            "cannot aggregate {} by {}: check that the columns exist and are numeric",
            args.value,
            args.by.join(", ")
        );
    };
    let sort = match args.sort {
        GroupSortArg::Key => GroupSort::Key,
        GroupSortArg::Asc => GroupSort::ValueAscending,
        GroupSortArg::Desc => GroupSort::ValueDescending,
    };
    order_groups(&mut groups, sort, args.top);
    match output {
        OutputArg::Json => print_json(&groups)?,
        OutputArg::Table => {
            let label = format!("{} ({})", args.value, aggregation_label(&aggregation));
            println!("{}", group_table(&args.by, &label, &groups));
        }
    }
    Ok(())
}

fn open_session(args: &InputArgs) -> Result<Session> {
    let span = info_span!("load", path = %args.file.display());
    let _guard = span.enter();
    let start = Instant::now();
    let session = Session::open(&args.file, &ingest_options(args)?)
        .with_context(|| format!("load {}", args.file.display()))?;
    info!(
        rows = session.dataset().row_count(),
        duration_ms = start.elapsed().as_millis(),
        "session ready"
    );
    Ok(session)
}

fn ingest_options(args: &InputArgs) -> Result<IngestOptions> {
    let rows = (args.infer_schema_rows > 0).then_some(args.infer_schema_rows);
    let mut options = IngestOptions::default().with_infer_schema_rows(rows);
    if let Some(delimiter) = args.delimiter {
        if !delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {delimiter:?}");
        }
        options = options.with_delimiter(delimiter as u8);
    }
    Ok(options)
}

fn require_numeric(session: &Session, column: &str) -> Result<()> {
    match session.dataset().column(column) {
        None => bail!("column not found: {column}"),
        Some(found) if found.as_numeric().is_none() => {
            bail!("column {column} is {}, not numeric", found.kind())
        }
        Some(_) => Ok(()),
    }
}

fn outlier_method(arg: OutlierMethodArg) -> OutlierMethod {
    match arg {
        OutlierMethodArg::Iqr => OutlierMethod::Iqr,
        OutlierMethodArg::Zscore => OutlierMethod::ZScore,
    }
}

fn trend_order(order_by: Option<&str>) -> TrendOrder {
    order_by.map_or(TrendOrder::RowOrder, |key| TrendOrder::By(key.to_string()))
}

fn aggregation_label(aggregation: &Aggregation) -> String {
    match aggregation {
        Aggregation::Sum => "sum".to_string(),
        Aggregation::Mean => "mean".to_string(),
        Aggregation::Count => "count".to_string(),
        Aggregation::WeightedMean { weight } => format!("mean weighted by {weight}"),
        Aggregation::Ratio { denominator } => format!("per {denominator}"),
    }
}
