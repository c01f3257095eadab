use std::fs;
use std::path::PathBuf;

use insight_ingest::{IngestError, IngestOptions, load_dataset, load_dataset_with_options};
use insight_model::ColumnKind;

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_mixed_columns_with_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(
        &dir,
        "orders.csv",
        "Country,Category,Revenue,Orders\nUAE,Fashion,100.5,3\nKSA,,250,\nUAE,Beauty,,7\n",
    );

    let dataset = load_dataset(&path).expect("load csv");

    assert_eq!(dataset.row_count(), 3);
    assert_eq!(
        dataset.column_names().collect::<Vec<_>>(),
        vec!["Country", "Category", "Revenue", "Orders"]
    );
    let revenue = dataset.column("Revenue").unwrap();
    assert_eq!(revenue.kind(), ColumnKind::Numeric);
    assert_eq!(revenue.as_numeric().unwrap(), &[Some(100.5), Some(250.0), None]);
    let category = dataset.column("Category").unwrap();
    assert_eq!(category.kind(), ColumnKind::Categorical);
    assert_eq!(category.null_count(), 1);
    assert_eq!(dataset.null_cells(), 3);
}

#[test]
fn loads_tab_separated_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "kpis.tsv", "month\tchurn\n1\t0.2\n2\t0.3\n");

    let dataset = load_dataset(&path).expect("load tsv");

    assert_eq!(dataset.column_count(), 2);
    assert_eq!(
        dataset.column("churn").unwrap().as_numeric().unwrap(),
        &[Some(0.2), Some(0.3)]
    );
}

#[test]
fn explicit_delimiter_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "semi.csv", "a;b\n1;x\n2;y\n");

    let options = IngestOptions::default().with_delimiter(b';');
    let dataset = load_dataset_with_options(&path, &options).expect("load");

    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.column("a").unwrap().kind(), ColumnKind::Numeric);
}

#[test]
fn rejects_spreadsheet_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(&dir, "book.xlsx", "not really a spreadsheet");

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}
