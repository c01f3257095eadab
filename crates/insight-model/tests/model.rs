//! Tests for insight-model types.

use insight_model::{
    Aggregation, AnalysisOptions, Column, ColumnKind, CorrelationPair, CorrelationStrength,
    Dataset, GroupSort, ModelError, OutlierMethod, TrendOrder,
};

fn numeric(name: &str, values: &[f64]) -> Column {
    Column::numeric(name, values.iter().copied().map(Some).collect())
}

#[test]
fn dataset_reports_shape_and_nulls() {
    let dataset = Dataset::new(vec![
        Column::numeric("revenue", vec![Some(10.0), None, Some(30.0)]),
        Column::categorical(
            "country",
            vec![Some("UAE".to_string()), Some("KSA".to_string()), None],
        ),
    ])
    .unwrap();

    assert_eq!(dataset.row_count(), 3);
    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.total_cells(), 6);
    assert_eq!(dataset.null_cells(), 2);
    assert_eq!(dataset.numeric_columns().count(), 1);
    assert_eq!(dataset.categorical_columns().count(), 1);
    assert_eq!(
        dataset.column("country").map(Column::kind),
        Some(ColumnKind::Categorical)
    );
    assert!(dataset.column("missing").is_none());
}

#[test]
fn dataset_rejects_ragged_columns() {
    let err = Dataset::new(vec![numeric("a", &[1.0, 2.0]), numeric("b", &[1.0])]).unwrap_err();
    assert_eq!(
        err,
        ModelError::RaggedColumn {
            column: "b".to_string(),
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn dataset_rejects_duplicate_names() {
    let err = Dataset::new(vec![numeric("a", &[1.0]), numeric("a", &[2.0])]).unwrap_err();
    assert_eq!(err, ModelError::DuplicateColumn("a".to_string()));
}

#[test]
fn empty_dataset_has_no_cells() {
    let dataset = Dataset::new(Vec::new()).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.total_cells(), 0);
}

#[test]
fn correlation_pair_orders_names() {
    let pair = CorrelationPair::new("revenue", "margin", -0.8);
    assert_eq!(pair.var1, "margin");
    assert_eq!(pair.var2, "revenue");
    assert_eq!(pair.strength, CorrelationStrength::StrongNegative);
    assert_eq!(pair.strength.to_string(), "Strong negative");
}

#[test]
fn display_value_formats_numbers() {
    let column = Column::numeric("x", vec![Some(3.0), Some(2.5), None]);
    assert_eq!(column.display_value(0).as_deref(), Some("3"));
    assert_eq!(column.display_value(1).as_deref(), Some("2.5"));
    assert_eq!(column.display_value(2), None);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: AnalysisOptions = serde_json::from_str(
        r#"{"correlation_threshold": 0.5, "trend_order": {"kind": "by", "column": "month"}}"#,
    )
    .expect("deserialize options");
    assert!((options.correlation_threshold - 0.5).abs() < 1e-12);
    assert_eq!(options.correlation_limit, 5);
    assert_eq!(options.outlier_method, OutlierMethod::Iqr);
    assert_eq!(options.trend_order, TrendOrder::By("month".to_string()));
}

#[test]
fn column_serializes_with_kind_tag() {
    let column = Column::categorical("c", vec![Some("x".to_string()), None]);
    let json = serde_json::to_value(&column).expect("serialize column");
    assert_eq!(json["data"]["kind"], "categorical");
    assert_eq!(json["data"]["values"][1], serde_json::Value::Null);
}

#[test]
fn ratio_aggregation_round_trips_through_json() {
    let ratio: Aggregation =
        serde_json::from_str(r#"{"kind":"ratio","denominator":"Revenue"}"#).unwrap();
    assert_eq!(
        ratio,
        Aggregation::Ratio {
            denominator: "Revenue".to_string()
        }
    );
    assert_eq!(
        serde_json::to_string(&GroupSort::ValueDescending).unwrap(),
        r#""value_descending""#
    );
    assert_eq!(GroupSort::default(), GroupSort::Key);
}
