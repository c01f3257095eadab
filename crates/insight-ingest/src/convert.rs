//! Polars frame to [`Dataset`] conversion.
//!
//! This is the single place where column dtypes are inspected. Numeric
//! Polars dtypes become [`ColumnData::Numeric`](insight_model::ColumnData),
//! everything else is rendered as text.

use polars::prelude::{DataFrame, DataType};

use insight_model::{Column, Dataset};

use crate::error::Result;

/// Returns true for Polars dtypes treated as numeric.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a DataFrame into a dataset, resolving each column's kind once.
pub fn dataset_from_frame(df: &DataFrame) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = normalize_header(column.name());
        let series = column.as_materialized_series();
        if is_numeric_dtype(series.dtype()) {
            let cast = series.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = cast.f64()?.into_iter().collect();
            columns.push(Column::numeric(name, values));
        } else {
            let cast = series.cast(&DataType::String)?;
            let values: Vec<Option<String>> = cast
                .str()?
                .into_iter()
                .map(|value| value.and_then(normalize_cell))
                .collect();
            columns.push(Column::categorical(name, values));
        }
    }
    Ok(Dataset::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::ColumnKind;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_kinds_resolved_from_dtype() {
        let df = DataFrame::new(vec![
            Series::new("orders".into(), &[1i64, 2, 3]).into_column(),
            Series::new("margin".into(), &[0.1f64, 0.2, 0.3]).into_column(),
            Series::new("country".into(), &["UAE", " KSA ", ""]).into_column(),
        ])
        .unwrap();

        let dataset = dataset_from_frame(&df).unwrap();
        let kinds: Vec<ColumnKind> = dataset.columns().iter().map(Column::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Numeric,
                ColumnKind::Numeric,
                ColumnKind::Categorical
            ]
        );
        let country = dataset.column("country").unwrap().as_categorical().unwrap();
        assert_eq!(
            country,
            &[Some("UAE".to_string()), Some("KSA".to_string()), None]
        );
    }

    #[test]
    fn test_header_whitespace_collapsed() {
        assert_eq!(normalize_header("\u{feff} Gross   Margin % "), "Gross Margin %");
    }
}
