//! Minimal typed table used as engine input and output
//!
//! Rows are positional: a row's identity is its index in the frame. The
//! engines only need numeric views of rows, which `to_points` provides after
//! checking that every value converts to a finite real.

use serde::{Deserialize, Serialize};

use crate::errors::{RcfError, Result};

/// A point in feature space
pub type Point = Vec<f64>;

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    String,
}

/// Column name and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl ColumnValue {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValue::Integer(_) => ColumnType::Integer,
            ColumnValue::Long(_) => ColumnType::Long,
            ColumnValue::Float(_) => ColumnType::Float,
            ColumnValue::Double(_) => ColumnType::Double,
            ColumnValue::Boolean(_) => ColumnType::Boolean,
            ColumnValue::String(_) => ColumnType::String,
        }
    }

    /// Numeric view of the value, `None` for booleans and strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Integer(v) => Some(f64::from(*v)),
            ColumnValue::Long(v) => Some(*v as f64),
            ColumnValue::Float(v) => Some(f64::from(*v)),
            ColumnValue::Double(v) => Some(*v),
            ColumnValue::Boolean(_) | ColumnValue::String(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ColumnValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

/// An ordered row of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<ColumnValue>,
}

impl Row {
    pub fn new(values: Vec<ColumnValue>) -> Self {
        Self { values }
    }

    pub fn get_value(&self, column: usize) -> Option<&ColumnValue> {
        self.values.get(column)
    }

    pub fn values(&self) -> &[ColumnValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A table with a declared schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<ColumnMeta>,
    rows: Vec<Row>,
}

impl DataFrame {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a frame of `Double` columns named `f0..fn` from raw points
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let width = points.first().map(Vec::len).unwrap_or(0);
        let columns = (0..width)
            .map(|i| ColumnMeta::new(format!("f{i}"), ColumnType::Double))
            .collect();
        let mut frame = DataFrame::new(columns);
        for point in points {
            frame.append_row(point.iter().copied().map(ColumnValue::Double).collect())?;
        }
        Ok(frame)
    }

    /// Append a row, checking its width and value types against the schema
    pub fn append_row(&mut self, values: Vec<ColumnValue>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(RcfError::invalid_argument(format!(
                "Row {} has {} values, expected {}",
                self.rows.len(),
                values.len(),
                self.columns.len()
            )));
        }
        for (meta, value) in self.columns.iter().zip(&values) {
            if value.column_type() != meta.column_type {
                return Err(RcfError::invalid_argument(format!(
                    "Row {} column '{}' expects {:?}, got {:?}",
                    self.rows.len(),
                    meta.name,
                    meta.column_type,
                    value.column_type()
                )));
            }
        }
        self.rows.push(Row::new(values));
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert every row to a point of finite reals
    pub fn to_points(&self) -> Result<Vec<Point>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row.values()
                    .iter()
                    .enumerate()
                    .map(|(col_idx, value)| match value.as_f64() {
                        Some(v) if v.is_finite() => Ok(v),
                        _ => Err(RcfError::invalid_argument(format!(
                            "Row {row_idx} column {col_idx} is not a finite number"
                        ))),
                    })
                    .collect::<Result<Point>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read() {
        let mut frame = DataFrame::new(vec![
            ColumnMeta::new("a", ColumnType::Integer),
            ColumnMeta::new("b", ColumnType::Double),
        ]);
        frame
            .append_row(vec![ColumnValue::Integer(3), ColumnValue::Double(1.5)])
            .unwrap();

        assert_eq!(frame.size(), 1);
        assert_eq!(frame.row(0).unwrap().get_value(0), Some(&ColumnValue::Integer(3)));
        assert_eq!(frame.to_points().unwrap(), vec![vec![3.0, 1.5]]);
    }

    #[test]
    fn test_append_rejects_wrong_width() {
        let mut frame = DataFrame::new(vec![ColumnMeta::new("a", ColumnType::Double)]);
        let err = frame
            .append_row(vec![ColumnValue::Double(1.0), ColumnValue::Double(2.0)])
            .unwrap_err();
        assert!(matches!(err, RcfError::InvalidArgument(_)));
    }

    #[test]
    fn test_append_rejects_wrong_type() {
        let mut frame = DataFrame::new(vec![ColumnMeta::new("a", ColumnType::Double)]);
        assert!(frame.append_row(vec![ColumnValue::Integer(1)]).is_err());
    }

    #[test]
    fn test_to_points_rejects_non_numeric() {
        let mut frame = DataFrame::new(vec![ColumnMeta::new("s", ColumnType::String)]);
        frame
            .append_row(vec![ColumnValue::String("x".into())])
            .unwrap();
        assert!(frame.to_points().is_err());
    }

    #[test]
    fn test_to_points_rejects_nan() {
        let frame = DataFrame::from_points(&[vec![f64::NAN]]).unwrap();
        assert!(frame.to_points().is_err());
    }
}
