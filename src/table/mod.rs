pub mod schema;

pub use schema::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON object used as one row before it is placed in a table
pub type Record = Map<String, Value>;

/// Errors from reshaping a table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column `{0}` not found in table")]
    MissingColumn(String),

    #[error("column `{column}` row {row}: expected a list, found {found}")]
    NotAList {
        column: String,
        row: usize,
        found: &'static str,
    },

    #[error("column `{column}` row {row}: expected a record, found {found}")]
    NotARecord {
        column: String,
        row: usize,
        found: &'static str,
    },

    #[error("column `{column}` row {row} still holds a nested value")]
    NestedCell { column: String, row: usize },

    #[error("row {row} does not match the expected row shape: {source}")]
    Row {
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory table of JSON cells
///
/// Columns are ordered; every row has exactly one cell per column. Missing
/// values are `Value::Null`. Nested values (lists, records) may live in cells
/// until they are removed with [`Table::explode`] and [`Table::spread`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn with_columns<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from records, one row per record
    ///
    /// The header is the union of all record keys in first-seen order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records: Vec<Record> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Rows as records keyed by column name
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }

    /// Unnest a list column: one output row per list element
    ///
    /// The other columns are repeated on every produced row and the list column
    /// holds the element. Rows whose cell is null or an empty list produce no
    /// rows. If no row has the column at all, the result has no rows.
    pub fn explode(self, column: &str) -> Result<Self, TableError> {
        let Some(idx) = self.column_index(column) else {
            return Ok(Self {
                columns: self.columns,
                rows: Vec::new(),
            });
        };

        let mut rows = Vec::with_capacity(self.rows.len());
        for (row_no, mut row) in self.rows.into_iter().enumerate() {
            match row[idx].take() {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        let mut out = row.clone();
                        out[idx] = item;
                        rows.push(out);
                    }
                }
                other => {
                    return Err(TableError::NotAList {
                        column: column.to_string(),
                        row: row_no,
                        found: kind_of(&other),
                    });
                }
            }
        }

        Ok(Self {
            columns: self.columns,
            rows,
        })
    }

    /// Spread a record column into one sibling column per field
    ///
    /// New columns are named `{prefix}.{field}` when a prefix is given, else
    /// `{field}`. A field whose name matches an existing column replaces that
    /// column's values. Null cells yield nulls in every new column.
    pub fn spread(self, column: &str, prefix: Option<&str>) -> Result<Self, TableError> {
        let Some(idx) = self.column_index(column) else {
            if self.is_empty() {
                return Ok(self);
            }
            return Err(TableError::MissingColumn(column.to_string()));
        };

        let Self {
            mut columns,
            rows: source_rows,
        } = self;
        columns.remove(idx);

        let mut nested: Vec<Record> = Vec::with_capacity(source_rows.len());
        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(source_rows.len());
        for (row_no, mut row) in source_rows.into_iter().enumerate() {
            match row.remove(idx) {
                Value::Null => nested.push(Record::new()),
                Value::Object(fields) => nested.push(fields),
                other => {
                    return Err(TableError::NotARecord {
                        column: column.to_string(),
                        row: row_no,
                        found: kind_of(&other),
                    });
                }
            }
            rows.push(row);
        }

        let mut fields: Vec<String> = Vec::new();
        for record in &nested {
            for key in record.keys() {
                if !fields.contains(key) {
                    fields.push(key.clone());
                }
            }
        }

        for field in fields {
            let name = match prefix {
                Some(p) => format!("{p}.{field}"),
                None => field.clone(),
            };
            let target = match columns.iter().position(|c| *c == name) {
                Some(existing) => existing,
                None => {
                    columns.push(name);
                    for row in &mut rows {
                        row.push(Value::Null);
                    }
                    columns.len() - 1
                }
            };
            for (row, record) in rows.iter_mut().zip(nested.iter_mut()) {
                row[target] = record.remove(&field).unwrap_or(Value::Null);
            }
        }

        Ok(Self { columns, rows })
    }

    /// Rename columns; pairs naming an absent column are ignored
    pub fn rename(mut self, renames: &[(&str, &str)]) -> Self {
        for (from, to) in renames {
            if let Some(idx) = self.column_index(from) {
                self.columns[idx] = (*to).to_string();
            }
        }
        self
    }

    /// Keep exactly the named columns, in the given order
    pub fn select(self, keep: &[&str]) -> Result<Self, TableError> {
        let indices = keep
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::MissingColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .into_iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Self {
            columns: keep.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Append a column filled with nulls
    pub fn with_null_column(mut self, name: &str) -> Self {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        self
    }

    /// Convert every row into a typed value
    ///
    /// Fails with [`TableError::NestedCell`] if a list or record is still
    /// present, so only flat tables become rows.
    pub fn into_rows<R: DeserializeOwned>(self) -> Result<Vec<R>, TableError> {
        for (row_no, row) in self.rows.iter().enumerate() {
            if let Some(i) = row.iter().position(|v| v.is_array() || v.is_object()) {
                return Err(TableError::NestedCell {
                    column: self.columns[i].clone(),
                    row: row_no,
                });
            }
        }

        self.records()
            .enumerate()
            .map(|(row, record)| {
                serde_json::from_value(Value::Object(record))
                    .map_err(|source| TableError::Row { row, source })
            })
            .collect()
    }
}

/// Serialize a typed row into a record keyed by column name
pub fn record_of<R: Serialize>(row: &R) -> Result<Record, TableError> {
    match serde_json::to_value(row) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Ok(Record::new()),
        Err(source) => Err(TableError::Row { row: 0, source }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}
