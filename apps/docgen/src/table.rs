//! Table — an ordered, typed row store with predicate selection and projection.
//!
//! Rows keep their insertion order; selection is stable, never re-sorted.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::DocgenError;

#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// All rows matching `predicate`, in original order.
    pub fn select<P>(&self, predicate: P) -> Vec<&R>
    where
        P: Fn(&R) -> bool,
    {
        self.rows.iter().filter(|row| predicate(row)).collect()
    }

    /// Projects one field out of every row matching `predicate`.
    pub fn project<'a, T, P, F>(&'a self, predicate: P, field: F) -> Vec<T>
    where
        P: Fn(&R) -> bool,
        F: Fn(&'a R) -> T,
    {
        self.rows
            .iter()
            .filter(|row| predicate(row))
            .map(field)
            .collect()
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R: DeserializeOwned> Table<R> {
    /// Reads a headed CSV file. Empty cells deserialize as `None` for optional columns.
    pub fn from_csv_path(path: &Path) -> Result<Self, DocgenError> {
        let mut reader = csv::Reader::from_path(path)?;
        let table = Self::from_csv_reader(&mut reader)?;
        debug!("Loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_csv_reader<T: std::io::Read>(
        reader: &mut csv::Reader<T>,
    ) -> Result<Self, DocgenError> {
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<R>, csv::Error>>()?;
        Ok(Self::new(rows))
    }
}
