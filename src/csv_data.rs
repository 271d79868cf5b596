//! Numeric CSV input, transposed for per-column plotting

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// A numeric CSV file in column-major order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvData {
    pub header: Option<Vec<String>>,
    /// `columns[c][r]` is the value in data row `r`, column `c`
    pub columns: Vec<Vec<f64>>,
}

impl CsvData {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Column by header label
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let index = self.header.as_ref()?.iter().position(|h| h == name)?;
        self.columns.get(index).map(Vec::as_slice)
    }
}

/// Read a CSV file of numbers, optionally taking the first row as labels
pub fn read_csv(path: impl AsRef<Path>, has_header: bool) -> Result<CsvData> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let data = parse_csv(file, has_header)?;
    tracing::debug!(
        path = %path.display(),
        columns = data.columns.len(),
        rows = data.row_count(),
        "read CSV"
    );
    Ok(data)
}

/// Parse CSV text from any reader
pub fn parse_csv<R: Read>(reader: R, has_header: bool) -> Result<CsvData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut data = CsvData::default();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if has_header && line == 0 {
            data.header = Some(record.iter().map(|h| h.trim().to_string()).collect());
            continue;
        }
        if data.columns.is_empty() {
            data.columns = vec![Vec::new(); record.len()];
        }
        for (column, cell) in record.iter().enumerate() {
            let value: f64 = cell.trim().parse().map_err(|_| Error::CsvValue {
                row: line + 1,
                column: column + 1,
                value: cell.to_string(),
            })?;
            data.columns[column].push(value);
        }
    }
    Ok(data)
}
