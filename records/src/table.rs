//! Ordered in-memory record table.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use uuid::Uuid;

use crate::RecordError;
use crate::query::Record;

/// Records in display order, addressed by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Record> Table<T> {
    #[must_use]
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Newly created records go to the top of the table.
    pub fn insert(&mut self, row: T) {
        self.rows.insert(0, row);
    }

    /// Insert several records at the top, keeping their given order.
    pub fn insert_many(&mut self, rows: Vec<T>) {
        self.rows.splice(0..0, rows);
    }

    /// Mutate one record in place.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] when no record has `id`, or whatever
    /// error `f` returns.
    pub fn update<R>(&mut self, id: Uuid, f: impl FnOnce(&mut T) -> Result<R, RecordError>) -> Result<R, RecordError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(RecordError::NotFound(id))?;
        f(row)
    }

    /// Remove exactly the record with `id`, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] when no record has `id`.
    pub fn remove(&mut self, id: Uuid) -> Result<T, RecordError> {
        let index = self
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or(RecordError::NotFound(id))?;
        Ok(self.rows.remove(index))
    }

    pub fn replace_all(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }
}
