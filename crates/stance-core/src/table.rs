//! Row-oriented table with nullable string cells.
//!
//! Empty CSV cells load as `None` and `None` cells write back as empty
//! fields, so a table survives a read/write cycle unchanged. Every row holds
//! exactly one cell per column.

use std::io::{Read, Write};

use crate::error::TableError;

pub type Cell = Option<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
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

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Required columns absent from this table, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| (*name).to_string())
            .collect()
    }

    /// Append `name` with a null cell in every row unless it already exists.
    /// Returns the column's index either way.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    /// Append a row, padding missing trailing cells with nulls. A row with
    /// more cells than columns is rejected and the table is left unchanged.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) -> Result<(), TableError> {
        let expected = self.columns.len();
        if cells.len() > expected {
            return Err(TableError::TooManyFields {
                record: self.rows.len() + 1,
                found: cells.len(),
                expected,
            });
        }
        cells.resize(expected, None);
        self.rows.push(cells);
        Ok(())
    }

    pub fn row(&self, idx: usize) -> Option<&[Cell]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell value, with null cells and unknown columns both yielding `None`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Set a cell. Returns false when the row or column does not exist.
    pub fn set(&mut self, row: usize, column: &str, value: Cell) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Parse CSV with a header row. Short records load with null trailing
    /// cells; a record longer than the header fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = rdr.headers()?.iter().map(str::to_string).collect();
        let mut table = Self::new(columns);
        for record in rdr.records() {
            let record = record?;
            let cells = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect();
            table.push_row(cells)?;
        }
        Ok(table)
    }

    /// Serialize as CSV with a header row. Null cells become empty fields.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
