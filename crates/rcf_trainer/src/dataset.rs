//! CSV dataset loading and prediction output
//!
//! Input files carry a header row followed by numeric columns. Lines starting
//! with `#` are skipped. Every cell must parse as a finite number.

use anyhow::{bail, Context, Result};
use rcf_core::{ColumnMeta, ColumnType, ColumnValue, DataFrame, Point};
use std::io::{Read, Write};
use std::path::Path;

/// Numeric dataset with named columns
#[derive(Clone, Debug)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Point>,
}

/// Min and max of one column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
}

impl Dataset {
    /// Load a dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open {}", path.as_ref().display()))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() {
            bail!("CSV header has no columns");
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // header is line 1
            let line = idx + 2;
            let record = record.with_context(|| format!("Line {line}: malformed record"))?;
            if record.len() != headers.len() {
                bail!(
                    "Line {line}: expected {} columns, got {}",
                    headers.len(),
                    record.len()
                );
            }
            let row = record
                .iter()
                .enumerate()
                .map(|(col, field)| match field.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => bail!("Line {line}, column '{}': invalid number '{field}'", headers[col]),
                })
                .collect::<Result<Point>>()?;
            rows.push(row);
        }

        if rows.is_empty() {
            bail!("Dataset is empty");
        }
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.headers.len()
    }

    /// Per-column min and max
    pub fn feature_stats(&self) -> Vec<FeatureStats> {
        (0..self.feature_count())
            .map(|col| {
                self.rows.iter().fold(
                    FeatureStats {
                        min: f64::INFINITY,
                        max: f64::NEG_INFINITY,
                    },
                    |s, row| FeatureStats {
                        min: s.min.min(row[col]),
                        max: s.max.max(row[col]),
                    },
                )
            })
            .collect()
    }

    /// `Double` frame with one column per header
    pub fn to_frame(&self) -> rcf_core::Result<DataFrame> {
        let columns = self
            .headers
            .iter()
            .map(|h| ColumnMeta::new(h.as_str(), ColumnType::Double))
            .collect();
        let mut frame = DataFrame::new(columns);
        for row in &self.rows {
            frame.append_row(row.iter().copied().map(ColumnValue::Double).collect())?;
        }
        Ok(frame)
    }
}

fn render(value: &ColumnValue) -> String {
    match value {
        ColumnValue::Integer(v) => v.to_string(),
        ColumnValue::Long(v) => v.to_string(),
        ColumnValue::Float(v) => v.to_string(),
        ColumnValue::Double(v) => v.to_string(),
        ColumnValue::Boolean(v) => v.to_string(),
        ColumnValue::String(v) => v.clone(),
    }
}

/// Write a frame as CSV with a header row
pub fn write_frame<W: Write>(writer: W, frame: &DataFrame) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(frame.columns().iter().map(|c| c.name.as_str()))?;
    for row in frame.rows() {
        out.write_record(row.values().iter().map(render))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_frame_to_path<P: AsRef<Path>>(path: P, frame: &DataFrame) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    write_frame(file, frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_header_and_rows() {
        let input = "x, y\n# comment\n1, 2.5\n3,-4\n";
        let ds = Dataset::from_reader(input.as_bytes()).unwrap();
        assert_eq!(ds.headers, vec!["x", "y"]);
        assert_eq!(ds.rows, vec![vec![1.0, 2.5], vec![3.0, -4.0]]);
        assert_eq!(
            ds.feature_stats()[1],
            FeatureStats {
                min: -4.0,
                max: 2.5
            }
        );
    }

    #[test]
    fn test_rejects_non_numeric_cell() {
        let err = Dataset::from_reader("x\n1\nabc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid number"));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        assert!(Dataset::from_reader("x,y\n1,2\n3\n".as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_empty_dataset() {
        assert!(Dataset::from_reader("x,y\n".as_bytes()).is_err());
    }

    #[test]
    fn test_frame_uses_headers() {
        let ds = Dataset::from_reader("a,b\n1,2\n".as_bytes()).unwrap();
        let frame = ds.to_frame().unwrap();
        assert_eq!(frame.columns()[0].name, "a");
        assert_eq!(frame.to_points().unwrap(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_write_frame() {
        let mut frame = DataFrame::new(vec![
            ColumnMeta::new("score", ColumnType::Double),
            ColumnMeta::new("anomalous", ColumnType::Boolean),
        ]);
        frame
            .append_row(vec![ColumnValue::Double(1.5), ColumnValue::Boolean(true)])
            .unwrap();
        let mut buf = Vec::new();
        write_frame(&mut buf, &frame).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "score,anomalous\n1.5,true\n");
    }
}
