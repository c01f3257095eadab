//! Table and JSON rendering of insight results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use insight_model::{
    CategoricalPattern, ColumnProfile, CorrelationMatrix, CorrelationPair, CorrelationStrength,
    DistributionSummary, GroupSummary, InsightReport, MissingShare, OutlierReport,
    OutlierSummary, QualitySummary, TrendDirection, TrendResult,
};

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print every section of a report, skipping empty ones.
pub fn print_report(report: &InsightReport) {
    section("Key findings");
    for finding in &report.key_findings {
        println!("- {finding}");
    }

    if !report.correlations.is_empty() {
        section("Correlations");
        println!("{}", correlation_table(&report.correlations));
    }
    if !report.outliers.is_empty() {
        section("Outliers");
        println!("{}", outlier_summary_table(&report.outliers));
    }
    if !report.trends.is_empty() {
        section("Trends");
        println!("{}", trend_table(&report.trends));
    }
    section("Quality");
    println!("{}", quality_table(&report.quality));
    if !report.distributions.is_empty() {
        section("Distributions");
        println!("{}", distribution_table(&report.distributions));
    }
    if !report.categorical_patterns.is_empty() {
        section("Categorical patterns");
        println!("{}", categorical_table(&report.categorical_patterns));
    }
    if !report.missing_by_column.is_empty() {
        section("Missing values");
        println!("{}", missing_table(&report.missing_by_column));
    }
    if !report.suggestions.is_empty() {
        section("Suggested analyses");
        for suggestion in &report.suggestions {
            println!("- {suggestion}");
        }
    }
}

fn section(title: &str) {
    println!();
    println!("{title}");
}

pub fn profile_table(profiles: &[ColumnProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Non-null"),
        header_cell("Null"),
        header_cell("Null %"),
        header_cell("Distinct"),
        header_cell("Sample"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        let null_cell = if profile.null_count > 0 {
            Cell::new(profile.null_count).fg(Color::Yellow)
        } else {
            dim_cell(0)
        };
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(profile.kind),
            Cell::new(profile.non_null_count),
            null_cell,
            Cell::new(format!("{:.1}", profile.null_percentage)),
            Cell::new(profile.distinct_count),
            dim_cell(profile.sample_values.join(", ")),
        ]);
    }
    table
}

pub fn outlier_table(reports: &[OutlierReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Method"),
        header_cell("Count"),
        header_cell("Lower"),
        header_cell("Upper"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in reports {
        let (lower, upper) = match report.bounds {
            Some(bounds) => (
                Cell::new(format_number(bounds.lower)),
                Cell::new(format_number(bounds.upper)),
            ),
            None => (dim_cell("-"), dim_cell("-")),
        };
        let rows = report
            .rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&report.column).add_attribute(Attribute::Bold),
            Cell::new(report.method),
            count_cell(report.count(), Color::Yellow),
            lower,
            upper,
            dim_cell(rows),
        ]);
    }
    table
}

pub fn outlier_summary_table(summaries: &[OutlierSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Rows %"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column).add_attribute(Attribute::Bold),
            count_cell(summary.count, Color::Yellow),
            Cell::new(format!("{:.1}", summary.percentage)),
        ]);
    }
    table
}

pub fn correlation_table(pairs: &[CorrelationPair]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable 1"),
        header_cell("Variable 2"),
        header_cell("r"),
        header_cell("Strength"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for pair in pairs {
        let color = match pair.strength {
            CorrelationStrength::StrongPositive => Color::Green,
            CorrelationStrength::StrongNegative => Color::Red,
        };
        table.add_row(vec![
            Cell::new(&pair.var1),
            Cell::new(&pair.var2),
            Cell::new(format_number(pair.correlation)),
            Cell::new(pair.strength).fg(color),
        ]);
    }
    table
}

pub fn matrix_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.columns.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=matrix.size() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (i, name) in matrix.columns.iter().enumerate() {
        let mut row = vec![header_cell(name)];
        row.extend((0..matrix.size()).map(|j| match matrix.get(i, j) {
            Some(r) => Cell::new(format_number(r)),
            None => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

pub fn trend_table(trends: &[TrendResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Slope"),
        header_cell("Intercept"),
        header_cell("Direction"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for trend in trends {
        let direction = match trend.direction {
            TrendDirection::Increasing => Cell::new("increasing").fg(Color::Green),
            TrendDirection::Decreasing => Cell::new("decreasing").fg(Color::Red),
            TrendDirection::Flat => dim_cell("flat"),
        };
        table.add_row(vec![
            Cell::new(&trend.column).add_attribute(Attribute::Bold),
            Cell::new(format_number(trend.slope)),
            Cell::new(format_number(trend.intercept)),
            direction,
            Cell::new(&trend.description),
        ]);
    }
    table
}

pub fn quality_table(quality: &QualitySummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Completeness"),
        Cell::new(format!("{:.1}%", quality.completeness)),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate rows"),
        count_cell(quality.duplicates, Color::Yellow),
    ]);
    if quality.recommendations.is_empty() {
        table.add_row(vec![Cell::new("Recommendations"), dim_cell("none")]);
    }
    for recommendation in &quality.recommendations {
        table.add_row(vec![
            Cell::new("Recommendation"),
            Cell::new(recommendation).fg(Color::Yellow),
        ]);
    }
    table
}

pub fn distribution_table(summaries: &[DistributionSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Std"),
        header_cell("Skewness"),
        header_cell("Kurtosis"),
        header_cell("Shape"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        let shape: Vec<&str> = [summary.skew_shape.as_deref(), summary.tail_shape.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        table.add_row(vec![
            Cell::new(&summary.column).add_attribute(Attribute::Bold),
            Cell::new(format_number(summary.mean)),
            Cell::new(format_number(summary.median)),
            optional_cell(summary.std_dev),
            optional_cell(summary.skewness),
            optional_cell(summary.kurtosis),
            Cell::new(shape.join(", ")),
        ]);
    }
    table
}

pub fn categorical_table(patterns: &[CategoricalPattern]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Unique"),
        header_cell("Most common"),
        header_cell("Count"),
        header_cell("Share %"),
        header_cell("Dominance"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for pattern in patterns {
        table.add_row(vec![
            Cell::new(&pattern.column).add_attribute(Attribute::Bold),
            Cell::new(pattern.unique_count),
            Cell::new(&pattern.most_common),
            Cell::new(pattern.most_common_count),
            Cell::new(format!("{:.1}", pattern.most_common_percentage)),
            dim_cell(&pattern.dominance),
        ]);
    }
    table
}

pub fn missing_table(shares: &[MissingShare]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Missing %")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.column),
            Cell::new(format!("{:.1}", share.percentage)).fg(Color::Yellow),
        ]);
    }
    table
}

pub fn group_table(keys: &[String], value_label: &str, groups: &[GroupSummary]) -> Table {
    let mut table = Table::new();
    let mut header: Vec<Cell> = keys.iter().map(|key| header_cell(key)).collect();
    header.push(header_cell("Rows"));
    header.push(header_cell(value_label));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, keys.len(), CellAlignment::Right);
    align_column(&mut table, keys.len() + 1, CellAlignment::Right);
    for group in groups {
        let mut row: Vec<Cell> = group.keys.iter().map(Cell::new).collect();
        row.push(Cell::new(group.rows));
        row.push(Cell::new(format_number(group.value)));
        table.add_row(row);
    }
    table
}

/// Three decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(format_number(v)),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(0)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
