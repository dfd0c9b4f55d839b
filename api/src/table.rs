use chrono::{DateTime, FixedOffset};

use crate::error::TableError;

/// Column name the export API uses for the start of each interval.
pub const FROM_COLUMN: &str = "_from";

#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Rows of `{timestamp, value_1, .., value_n}` in the order the API returned them.
///
/// An empty table has no rows and no columns, not even a timestamp column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeseriesTable {
    timestamp_column: Option<String>,
    timestamps: Vec<DateTime<FixedOffset>>,
    columns: Vec<ValueColumn>,
}

impl TimeseriesTable {
    pub fn empty() -> Self {
        TimeseriesTable::default()
    }

    pub fn new(timestamp_column: &str, timestamps: Vec<DateTime<FixedOffset>>, columns: Vec<ValueColumn>) -> Self {
        TimeseriesTable {
            timestamp_column: Some(timestamp_column.to_string()),
            timestamps,
            columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Timestamp column included.
    pub fn column_count(&self) -> usize {
        match self.timestamp_column {
            Some(_) => 1 + self.columns.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.timestamp_column
            .iter()
            .map(String::as_str)
            .chain(self.columns.iter().map(|column| column.name.as_str()))
            .collect()
    }

    pub fn timestamp_column(&self) -> Option<&str> {
        self.timestamp_column.as_deref()
    }

    pub fn timestamps(&self) -> &[DateTime<FixedOffset>] {
        &self.timestamps
    }

    pub fn column(&self, name: &str) -> Result<&[Option<f64>], TableError> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.values.as_slice())
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Renames either the timestamp column or a value column.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), TableError> {
        if let Some(timestamp_column) = self.timestamp_column.as_mut() {
            if timestamp_column == from {
                *timestamp_column = to.to_string();
                return Ok(());
            }
        }

        match self.columns.iter_mut().find(|column| column.name == from) {
            Some(column) => {
                column.name = to.to_string();
                Ok(())
            }
            None => Err(TableError::MissingColumn(from.to_string())),
        }
    }

    /// `true` wherever the value differs from zero. Missing values count as non-zero.
    pub fn non_zero_mask(&self, name: &str) -> Result<Vec<bool>, TableError> {
        Ok(non_zero_mask(self.column(name)?))
    }

    /// `(timestamp, value)` pairs of one column, nulls included.
    pub fn series(&self, name: &str) -> Result<Vec<(DateTime<FixedOffset>, Option<f64>)>, TableError> {
        let values = self.column(name)?;
        Ok(self.timestamps.iter().copied().zip(values.iter().copied()).collect())
    }
}

pub fn non_zero_mask(values: &[Option<f64>]) -> Vec<bool> {
    values.iter().map(|value| *value != Some(0.0)).collect()
}
