//! Storage traits and error types

use crate::storage::{FacultyPatch, FacultyRow};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// A row with the same slug is already present
    #[error("Duplicate faculty slug: {0}")]
    Duplicate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Operations the importers need from the target datastore
pub trait FacultyStore {
    /// Inserts a new row
    ///
    /// Returns `StorageError::Duplicate` when the slug is already taken; the
    /// existing row is left untouched.
    fn insert_faculty(&mut self, row: &FacultyRow) -> StorageResult<i64>;

    /// Applies a patch to every row with the given full name
    ///
    /// Returns the number of rows changed. An empty patch changes nothing.
    fn update_by_full_name(&mut self, full_name: &str, patch: &FacultyPatch)
        -> StorageResult<usize>;

    /// Looks up a row by slug
    fn get_by_slug(&self, slug: &str) -> StorageResult<Option<FacultyRow>>;

    /// Number of rows in the table
    fn count_faculties(&self) -> StorageResult<usize>;
}
