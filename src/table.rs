//! Flat CSV-backed table type.
//!
//! Every artifact table in the Part-5/Part-6 output is a small, schema-light
//! CSV snapshot. `DataTable` keeps the cells as strings and leaves numeric
//! interpretation to the point of use, mirroring how the upstream pipeline
//! treats these files: no relationships, no enforced invariants beyond the
//! column names a given chart happens to need.

use std::cmp::Ordering;

/// A parsed CSV table: one header row plus zero or more data rows.
///
/// Immutable once parsed. Cells are raw strings; use [`DataTable::numeric`]
/// for per-cell numeric access.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Parse a table from CSV text. The first record is the header row.
    ///
    /// Zero data rows is not an error at this layer; the emptiness policy
    /// belongs to the artifact loader.
    pub fn from_csv_str(text: &str) -> Result<DataTable, csv::Error> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(DataTable { headers, rows })
    }

    /// Number of data rows (the header row is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the named column. First occurrence wins on duplicate headers.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// True when every named column is present.
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has_column(n))
    }

    /// Cell by row index and column index. `None` past a short row.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cell by row index and column name.
    pub fn value(&self, row: usize, col_name: &str) -> Option<&str> {
        self.cell(row, self.column_index(col_name)?)
    }

    /// Cell parsed as `f64`, whitespace-trimmed. `None` when the cell is
    /// missing or does not parse as a finite number; `inf` and `NaN` cells
    /// count as unusable.
    pub fn numeric(&self, row: usize, col_name: &str) -> Option<f64> {
        self.value(row, col_name)?
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
    }

    /// Row indices ordered by descending numeric value of the named column.
    ///
    /// Rows without a finite numeric value sort after all numeric rows; ties
    /// keep first-seen order. This is the display ordering for bar charts.
    pub fn sorted_desc_by(&self, col_name: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        indices.sort_by(|&a, &b| {
            match (self.numeric(a, col_name), self.numeric(b, col_name)) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        indices
    }

    /// Re-serialize the table as CSV text (header row plus data rows).
    ///
    /// Used for the summary CSV download, which hands back exactly what was
    /// loaded rather than a reformatted copy.
    pub fn to_csv_string(&self) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.headers)
            .expect("write csv header to memory");
        for row in &self.rows {
            wtr.write_record(row).expect("write csv row to memory");
        }
        let bytes = wtr.into_inner().expect("flush csv to memory");
        String::from_utf8(bytes).expect("csv output is utf-8")
    }
}
