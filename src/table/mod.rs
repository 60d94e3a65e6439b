//! Rectangular string grid used for every intermediate and output table.
//!
//! Each row keeps its own index value, written as the leading column of
//! the CSV output. Tables built from a page number their rows from 0;
//! [`Table::concat`] keeps the source indices, so the index restarts for
//! every appended table.

use crate::{ScraperError, ScraperResult};
use std::collections::{HashMap, HashSet};

pub type Cell = Option<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> ScraperResult<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ScraperError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self {
            columns,
            index: Vec::new(),
            rows: Vec::new(),
        })
    }

    /// Renames repeated column names by appending `.1`, `.2`, ... to the
    /// second and later occurrences. Scraped headers often repeat blank
    /// cells.
    pub fn unique_columns(columns: Vec<String>) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut taken: HashSet<String> = columns.iter().cloned().collect();
        let mut result = Vec::with_capacity(columns.len());
        let mut first = HashSet::new();

        for column in columns {
            if first.insert(column.clone()) {
                result.push(column);
                continue;
            }
            let count = seen.entry(column.clone()).or_insert(0);
            let renamed = loop {
                *count += 1;
                let candidate = format!("{}.{}", column, count);
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(renamed.clone());
            result.push(renamed);
        }

        result
    }

    /// Builds a table from fully populated rows, rejecting any row whose
    /// width differs from the header.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> ScraperResult<Self> {
        let mut table = Self::with_capacity(columns, rows.len())?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn with_capacity(columns: Vec<String>, capacity: usize) -> ScraperResult<Self> {
        let mut table = Self::new(columns)?;
        table.index.reserve(capacity);
        table.rows.reserve(capacity);
        Ok(table)
    }

    /// Appends a row, indexed after the current last row.
    pub fn push_row(&mut self, row: Vec<String>) -> ScraperResult<()> {
        if row.len() != self.columns.len() {
            return Err(ScraperError::RowWidthMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.index.push(self.rows.len());
        self.rows.push(row.into_iter().map(Some).collect());
        Ok(())
    }

    /// Appends null rows until the table holds `len` rows.
    pub fn pad_to(&mut self, len: usize) {
        while self.rows.len() < len {
            self.index.push(self.rows.len());
            self.rows.push(vec![None; self.columns.len()]);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let position = self.column_position(column)?;
        self.rows.get(row)?.get(position)?.as_deref()
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, column: &str) -> ScraperResult<Vec<Option<&str>>> {
        let position = self
            .column_position(column)
            .ok_or_else(|| ScraperError::MissingColumn(column.to_string()))?;
        Ok(self.rows.iter().map(|row| row[position].as_deref()).collect())
    }

    /// Adds a column holding `value` in every row.
    pub fn with_constant_column(mut self, name: &str, value: &str) -> ScraperResult<Self> {
        if self.column_position(name).is_some() {
            return Err(ScraperError::DuplicateColumn(name.to_string()));
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Some(value.to_string()));
        }
        Ok(self)
    }

    /// Inner join on `key`. Output rows follow the left table's order,
    /// each left row repeated once per matching right row. The key column
    /// appears once; other names present on both sides get `_x` / `_y`
    /// suffixes. Null keys never match.
    pub fn inner_join(&self, other: &Table, key: &str) -> ScraperResult<Table> {
        let left_key = self
            .column_position(key)
            .ok_or_else(|| ScraperError::MissingColumn(key.to_string()))?;
        let right_key = other
            .column_position(key)
            .ok_or_else(|| ScraperError::MissingColumn(key.to_string()))?;

        let right_names: HashSet<&str> = other
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != right_key)
            .map(|(_, c)| c.as_str())
            .collect();
        let left_names: HashSet<&str> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != left_key)
            .map(|(_, c)| c.as_str())
            .collect();

        let mut columns = Vec::with_capacity(self.columns.len() + other.columns.len() - 1);
        for (i, column) in self.columns.iter().enumerate() {
            if i != left_key && right_names.contains(column.as_str()) {
                columns.push(format!("{}_x", column));
            } else {
                columns.push(column.clone());
            }
        }
        for (i, column) in other.columns.iter().enumerate() {
            if i == right_key {
                continue;
            }
            if left_names.contains(column.as_str()) {
                columns.push(format!("{}_y", column));
            } else {
                columns.push(column.clone());
            }
        }

        let mut right_rows: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, row) in other.rows.iter().enumerate() {
            if let Some(value) = row[right_key].as_deref() {
                right_rows.entry(value).or_default().push(i);
            }
        }

        let mut joined = Table::new(columns)?;
        for left in &self.rows {
            let Some(value) = left[left_key].as_deref() else {
                continue;
            };
            for &i in right_rows.get(value).into_iter().flatten() {
                let right = &other.rows[i];
                let mut row = left.clone();
                row.extend(
                    right
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != right_key)
                        .map(|(_, cell)| cell.clone()),
                );
                joined.index.push(joined.rows.len());
                joined.rows.push(row);
            }
        }

        Ok(joined)
    }

    /// Row-wise append. The result's columns are the union of all input
    /// columns in first-seen order; cells a source table lacks are null.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for table in &tables {
            for column in &table.columns {
                if !positions.contains_key(column) {
                    positions.insert(column.clone(), columns.len());
                    columns.push(column.clone());
                }
            }
        }

        let total = tables.iter().map(Table::len).sum();
        let mut result = Table {
            columns,
            index: Vec::with_capacity(total),
            rows: Vec::with_capacity(total),
        };

        for table in tables {
            let mapping: Vec<usize> = table.columns.iter().map(|c| positions[c]).collect();
            for (index, row) in table.index.into_iter().zip(table.rows) {
                let mut merged = vec![None; result.columns.len()];
                for (cell, &target) in row.into_iter().zip(&mapping) {
                    merged[target] = cell;
                }
                result.index.push(index);
                result.rows.push(merged);
            }
        }

        result
    }
}
