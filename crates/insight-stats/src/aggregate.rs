//! Group-by aggregation over one or more key columns.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use insight_model::{Aggregation, Column, ColumnData, Dataset, GroupSort, GroupSummary};

/// One cell of a grouping key. Numbers order numerically, text lexicographically.
#[derive(Debug, Clone)]
enum KeyCell {
    Number(f64),
    Text(String),
}

impl KeyCell {
    fn from_row(column: &Column, row: usize) -> Option<Self> {
        match column.data() {
            // -0.0 and 0.0 form one group.
            ColumnData::Numeric(values) => values[row].map(|v| KeyCell::Number(v + 0.0)),
            ColumnData::Categorical(values) => values[row].clone().map(KeyCell::Text),
        }
    }
}

impl Ord for KeyCell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyCell::Number(a), KeyCell::Number(b)) => a.total_cmp(b),
            (KeyCell::Text(a), KeyCell::Text(b)) => a.cmp(b),
            (KeyCell::Number(_), KeyCell::Text(_)) => Ordering::Less,
            (KeyCell::Text(_), KeyCell::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyCell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyCell {}

struct Accumulator {
    labels: Vec<String>,
    rows: usize,
    count: usize,
    sum: f64,
    weighted_sum: f64,
    weight_sum: f64,
    denominator_sum: f64,
}

impl Accumulator {
    fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            rows: 0,
            count: 0,
            sum: 0.0,
            weighted_sum: 0.0,
            weight_sum: 0.0,
            denominator_sum: 0.0,
        }
    }
}

/// Aggregate `value` per distinct key tuple, groups in ascending key order.
///
/// Rows with a missing key are dropped. Returns `None` if a named column is
/// absent, or if `value` (or the weight / denominator) is not numeric for
/// aggregations that need numbers. Groups without a defined mean, weight or
/// denominator are omitted.
pub fn group_by(
    dataset: &Dataset,
    keys: &[&str],
    value: &str,
    aggregation: &Aggregation,
) -> Option<Vec<GroupSummary>> {
    let key_columns: Vec<&Column> = keys
        .iter()
        .map(|key| dataset.column(key))
        .collect::<Option<_>>()?;
    let value_column = dataset.column(value)?;
    let numbers = match aggregation {
        Aggregation::Count => None,
        _ => Some(value_column.as_numeric()?),
    };
    let weights = match aggregation {
        Aggregation::WeightedMean { weight } => Some(dataset.column(weight)?.as_numeric()?),
        _ => None,
    };
    let denominators = match aggregation {
        Aggregation::Ratio { denominator } => Some(dataset.column(denominator)?.as_numeric()?),
        _ => None,
    };

    let mut groups: BTreeMap<Vec<KeyCell>, Accumulator> = BTreeMap::new();
    for row in 0..dataset.row_count() {
        let Some(key) = key_columns
            .iter()
            .map(|column| KeyCell::from_row(column, row))
            .collect::<Option<Vec<KeyCell>>>()
        else {
            continue;
        };
        let acc = groups.entry(key).or_insert_with(|| {
            Accumulator::new(
                key_columns
                    .iter()
                    .filter_map(|column| column.display_value(row))
                    .collect(),
            )
        });
        acc.rows += 1;
        // Ratio sums each side over its own present values.
        if let Some(d) = denominators.and_then(|denominators| denominators[row]) {
            acc.denominator_sum += d;
        }
        match numbers {
            None => {
                if !value_column.is_missing(row) {
                    acc.count += 1;
                }
            }
            Some(numbers) => {
                let Some(v) = numbers[row] else {
                    continue;
                };
                acc.count += 1;
                acc.sum += v;
                if let Some(w) = weights.and_then(|weights| weights[row]) {
                    acc.weighted_sum += v * w;
                    acc.weight_sum += w;
                }
            }
        }
    }

    let summaries = groups
        .into_values()
        .filter_map(|acc| {
            let value = match aggregation {
                Aggregation::Sum => Some(acc.sum),
                Aggregation::Count => Some(acc.count as f64),
                Aggregation::Mean => (acc.count > 0).then(|| acc.sum / acc.count as f64),
                Aggregation::WeightedMean { .. } => {
                    (acc.weight_sum != 0.0).then(|| acc.weighted_sum / acc.weight_sum)
                }
                Aggregation::Ratio { .. } => {
                    (acc.denominator_sum != 0.0).then(|| acc.sum / acc.denominator_sum)
                }
            }?;
            Some(GroupSummary {
                keys: acc.labels,
                rows: acc.rows,
                value,
            })
        })
        .collect();
    Some(summaries)
}

/// Reorder groups by `sort` and keep at most `top` of them.
///
/// Value sorts are stable, so ties stay in key order.
pub fn order_groups(groups: &mut Vec<GroupSummary>, sort: GroupSort, top: Option<usize>) {
    match sort {
        GroupSort::Key => {}
        GroupSort::ValueAscending => groups.sort_by(|a, b| a.value.total_cmp(&b.value)),
        GroupSort::ValueDescending => groups.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
    if let Some(top) = top {
        groups.truncate(top);
    }
}

/// Sum(value * weight) / Sum(weight) over the whole dataset.
pub fn weighted_mean(dataset: &Dataset, value: &str, weight: &str) -> Option<f64> {
    let values = dataset.column(value)?.as_numeric()?;
    let weights = dataset.column(weight)?.as_numeric()?;
    let (weighted, total) = values
        .iter()
        .zip(weights)
        .filter_map(|(v, w)| Some(((*v)?, (*w)?)))
        .fold((0.0, 0.0), |(weighted, total), (v, w)| (weighted + v * w, total + w));
    (total != 0.0).then(|| weighted / total)
}

/// Sum(numerator) / Sum(denominator) over the whole dataset, e.g. cost per order.
pub fn ratio_of_sums(dataset: &Dataset, numerator: &str, denominator: &str) -> Option<f64> {
    let numerators = dataset.column(numerator)?.as_numeric()?;
    let denominators = dataset.column(denominator)?.as_numeric()?;
    let top: f64 = numerators.iter().flatten().sum();
    let bottom: f64 = denominators.iter().flatten().sum();
    (bottom != 0.0).then(|| top / bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Dataset {
        let text = |values: &[&str]| values.iter().map(|v| Some((*v).to_string())).collect();
        Dataset::new(vec![
            Column::categorical("Country", text(&["UAE", "KSA", "UAE", "KSA", "UAE"])),
            Column::categorical(
                "Category",
                text(&["Fashion", "Fashion", "Beauty", "Beauty", "Fashion"]),
            ),
            Column::numeric(
                "Revenue",
                vec![Some(100.0), Some(50.0), Some(300.0), None, Some(100.0)],
            ),
            Column::numeric(
                "Margin",
                vec![Some(0.4), Some(0.2), Some(0.3), Some(0.5), Some(0.2)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn sums_by_single_key() {
        let groups = group_by(&orders(), &["Country"], "Revenue", &Aggregation::Sum).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].keys, vec!["KSA"]);
        assert_eq!(groups[0].value, 50.0);
        assert_eq!(groups[0].rows, 2);
        assert_eq!(groups[1].keys, vec!["UAE"]);
        assert_eq!(groups[1].value, 500.0);
    }

    #[test]
    fn means_by_two_keys() {
        let groups = group_by(
            &orders(),
            &["Country", "Category"],
            "Margin",
            &Aggregation::Mean,
        )
        .unwrap();
        let uae_fashion = groups
            .iter()
            .find(|g| g.keys == ["UAE", "Fashion"])
            .unwrap();
        assert!((uae_fashion.value - 0.3).abs() < 1e-12);
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn revenue_weighted_margin() {
        let groups = group_by(
            &orders(),
            &["Country"],
            "Margin",
            &Aggregation::WeightedMean {
                weight: "Revenue".to_string(),
            },
        )
        .unwrap();
        let uae = groups.iter().find(|g| g.keys == ["UAE"]).unwrap();
        // (100*0.4 + 300*0.3 + 100*0.2) / 500
        assert!((uae.value - 0.3).abs() < 1e-12);
        let overall = weighted_mean(&orders(), "Margin", "Revenue").unwrap();
        assert!((overall - 160.0 / 550.0).abs() < 1e-12);
    }

    #[test]
    fn count_accepts_categorical_values() {
        let groups = group_by(&orders(), &["Category"], "Country", &Aggregation::Count).unwrap();
        assert_eq!(groups[0].keys, vec!["Beauty"]);
        assert_eq!(groups[0].value, 2.0);
    }

    #[test]
    fn missing_or_non_numeric_columns() {
        let ds = orders();
        assert!(group_by(&ds, &["Region"], "Revenue", &Aggregation::Sum).is_none());
        assert!(group_by(&ds, &["Country"], "Category", &Aggregation::Sum).is_none());
        let ratio = Aggregation::Ratio {
            denominator: "Category".to_string(),
        };
        assert!(group_by(&ds, &["Country"], "Revenue", &ratio).is_none());
    }

    #[test]
    fn numeric_keys_order_numerically() {
        let ds = Dataset::new(vec![
            Column::numeric("Month", vec![Some(2.0), Some(10.0), Some(1.0), Some(9.0)]),
            Column::numeric("Revenue", vec![Some(20.0), Some(100.0), Some(10.0), Some(90.0)]),
        ])
        .unwrap();
        let groups = group_by(&ds, &["Month"], "Revenue", &Aggregation::Sum).unwrap();
        let order: Vec<&str> = groups.iter().map(|g| g.keys[0].as_str()).collect();
        assert_eq!(order, vec!["1", "2", "9", "10"]);
        assert_eq!(groups[3].value, 100.0);
    }

    #[test]
    fn ratio_divides_group_sums() {
        let ds = Dataset::new(vec![
            Column::categorical(
                "Country",
                ["UAE", "UAE", "KSA", "KSA"]
                    .iter()
                    .map(|v| Some((*v).to_string()))
                    .collect(),
            ),
            Column::numeric("Voucher", vec![Some(10.0), Some(30.0), Some(5.0), None]),
            Column::numeric("Revenue", vec![Some(100.0), Some(300.0), Some(0.0), Some(0.0)]),
        ])
        .unwrap();
        let ratio = Aggregation::Ratio {
            denominator: "Revenue".to_string(),
        };
        let groups = group_by(&ds, &["Country"], "Voucher", &ratio).unwrap();
        // KSA has zero revenue and is omitted.
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].keys, vec!["UAE"]);
        assert!((groups[0].value - 0.1).abs() < 1e-12);
        assert!((ratio_of_sums(&ds, "Voucher", "Revenue").unwrap() - 0.1125).abs() < 1e-12);
    }

    #[test]
    fn top_groups_by_value() {
        let mut groups = group_by(&orders(), &["Country"], "Revenue", &Aggregation::Sum).unwrap();
        assert_eq!(groups[0].keys, vec!["KSA"]);
        order_groups(&mut groups, GroupSort::ValueDescending, Some(1));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].keys, vec!["UAE"]);
        assert_eq!(groups[0].value, 500.0);

        let mut groups =
            group_by(&orders(), &["Category"], "Revenue", &Aggregation::Sum).unwrap();
        order_groups(&mut groups, GroupSort::ValueAscending, None);
        let order: Vec<&str> = groups.iter().map(|g| g.keys[0].as_str()).collect();
        assert_eq!(order, vec!["Fashion", "Beauty"]);
        order_groups(&mut groups, GroupSort::Key, Some(5));
        assert_eq!(groups.len(), 2);
    }
}
