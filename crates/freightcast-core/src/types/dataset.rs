//! Records and columnar datasets
//!
//! A `Dataset` is an ordered set of equally long columns. Column order is the
//! order of the source header and is preserved by every operation here, since
//! the feature partition depends on it.

use crate::error::{CoreError, Result};
use crate::types::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// One freight trip: column name to scalar value
pub type Record = HashMap<String, Value>;

/// Storage type of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every non-null cell is an integer or a float
    Numeric,
    /// At least one non-null cell is not a number
    Text,
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column dtype. An all-null column counts as numeric.
    pub fn dtype(&self) -> ColumnType {
        if self.values.iter().all(|v| v.is_null() || v.is_numeric()) {
            ColumnType::Numeric
        } else {
            ColumnType::Text
        }
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered sequence of records sharing one column set, stored column-wise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from columns of equal length with unique names
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CoreError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != n_rows {
                return Err(CoreError::ColumnLength {
                    column: column.name.clone(),
                    expected: n_rows,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Build a dataset from records using an explicit column order.
    ///
    /// Fields absent from a record become `Null`; fields not listed in
    /// `column_names` are dropped.
    pub fn from_records<S: AsRef<str>>(column_names: &[S], records: &[Record]) -> Result<Self> {
        let columns = column_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let values = records
                    .iter()
                    .map(|record| record.get(name).cloned().unwrap_or(Value::Null))
                    .collect();
                Column::new(name, values)
            })
            .collect();

        Self::new(columns)
    }

    /// Read a headed CSV document, typing every cell with [`Value::parse_cell`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut values: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() != headers.len() {
                return Err(CoreError::RaggedRow {
                    row: idx + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            for (col, cell) in row.iter().enumerate() {
                values[col].push(Value::parse_cell(cell));
            }
        }

        log::debug!(
            "Read CSV with {} columns and {} rows",
            headers.len(),
            values.first().map(Vec::len).unwrap_or(0)
        );

        Self::new(
            headers
                .into_iter()
                .zip(values)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Materialize row `index` as a record
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.n_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.values[index].clone()))
                .collect(),
        )
    }

    /// New dataset holding the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), indices.iter().map(|&i| c.values[i].clone()).collect()))
            .collect();

        Self {
            columns,
            n_rows: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
freight_description,route_variant_id,planned_departure_hour,rain_forecast_mm
Pallets of tiles,ROUTE_001,8,12.5
Fresh produce,ROUTE_002,17,
";

    #[test]
    fn test_from_csv_reader_types_cells() {
        let ds = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();

        assert_eq!(ds.n_rows(), 2);
        assert_eq!(
            ds.column_names().collect::<Vec<_>>(),
            vec![
                "freight_description",
                "route_variant_id",
                "planned_departure_hour",
                "rain_forecast_mm"
            ]
        );

        let hour = ds.column("planned_departure_hour").unwrap();
        assert_eq!(hour.values, vec![Value::Integer(8), Value::Integer(17)]);
        assert_eq!(hour.dtype(), ColumnType::Numeric);

        let rain = ds.column("rain_forecast_mm").unwrap();
        assert_eq!(rain.values, vec![Value::Float(12.5), Value::Null]);
        assert_eq!(rain.null_count(), 1);
        assert_eq!(rain.dtype(), ColumnType::Numeric);

        assert_eq!(ds.column("route_variant_id").unwrap().dtype(), ColumnType::Text);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let csv = "a,b\n1,2\n3\n";
        let err = Dataset::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::RaggedRow {
                row: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_new_rejects_unequal_columns() {
        let err = Dataset::new(vec![
            Column::new("a", vec![Value::Integer(1)]),
            Column::new("b", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::ColumnLength { .. }));

        let err = Dataset::new(vec![Column::new("a", vec![]), Column::new("a", vec![])]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn(_)));
    }

    #[test]
    fn test_from_records_and_back() {
        let mut r1 = Record::new();
        r1.insert("x".to_string(), Value::Integer(1));
        r1.insert("y".to_string(), Value::from("a"));
        let mut r2 = Record::new();
        r2.insert("x".to_string(), Value::Integer(2));

        let ds = Dataset::from_records(&["x", "y"], &[r1.clone(), r2]).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.column("y").unwrap().values[1], Value::Null);
        assert_eq!(ds.record(0).unwrap(), r1);
        assert!(ds.record(2).is_none());
    }

    #[test]
    fn test_select_rows_keeps_column_order() {
        let ds = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
        let picked = ds.select_rows(&[1]);

        assert_eq!(picked.n_rows(), 1);
        assert_eq!(
            picked.column_names().collect::<Vec<_>>(),
            ds.column_names().collect::<Vec<_>>()
        );
        assert_eq!(
            picked.column("planned_departure_hour").unwrap().values,
            vec![Value::Integer(17)]
        );
    }
}
