use super::model::{ColumnKind, Dataset};

/// Column names split by kind, each in original column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    pub categorical: Vec<String>,
    pub numeric: Vec<String>,
}

/// Partition the dataset's columns into categorical and numeric sets.
pub fn classify(dataset: &Dataset) -> ColumnPartition {
    let mut partition = ColumnPartition::default();
    for column in dataset.columns() {
        match column.kind() {
            ColumnKind::Categorical => partition.categorical.push(column.name.clone()),
            ColumnKind::Numeric => partition.numeric.push(column.name.clone()),
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::CellValue;

    fn cell_strategy() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::Null),
            any::<i64>().prop_map(CellValue::Integer),
            (-1e6f64..1e6).prop_map(CellValue::Float),
            any::<bool>().prop_map(CellValue::Bool),
            "[a-z]{1,4}".prop_map(CellValue::String),
        ]
    }

    #[test]
    fn keeps_column_order_within_each_kind() {
        let ds = Dataset::from_rows(
            vec!["title".into(), "salary".into(), "size".into(), "year".into()],
            vec![vec![
                CellValue::String("DS".into()),
                CellValue::Integer(10),
                CellValue::String("M".into()),
                CellValue::Integer(2020),
            ]],
        );
        let partition = classify(&ds);
        assert_eq!(partition.categorical, vec!["title", "size"]);
        assert_eq!(partition.numeric, vec!["salary", "year"]);
    }

    proptest! {
        #[test]
        fn partition_covers_every_column_exactly_once(
            rows in prop::collection::vec(prop::collection::vec(cell_strategy(), 5), 0..12)
        ) {
            let headers: Vec<String> = (0..5).map(|i| format!("c{i}")).collect();
            let ds = Dataset::from_rows(headers.clone(), rows);
            let partition = classify(&ds);

            let mut all: Vec<String> = partition
                .categorical
                .iter()
                .chain(&partition.numeric)
                .cloned()
                .collect();
            all.sort();
            prop_assert_eq!(all, headers);
        }
    }
}
