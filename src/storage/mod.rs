//! Storage module for the target datastore
//!
//! This module handles:
//! - SQLite schema management for the `faculties` table
//! - Inserting transformed faculty rows with unique slugs
//! - Patching existing rows matched by full name

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteFacultyStore;
pub use traits::{FacultyStore, StorageError, StorageResult};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opens (and initializes if needed) the faculty store at `path`
pub fn open_store(path: &Path) -> Result<SqliteFacultyStore> {
    SqliteFacultyStore::new(path)
}

/// One row of the `faculties` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRow {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub slug: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub office: Option<String>,
    pub bio: String,
    pub short_bio: String,
    pub research_interests: Vec<String>,
    pub active: bool,
    pub department: String,
    pub photo_url: Option<String>,
}

/// Column updates applied to an existing row
///
/// `None` leaves the column as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyPatch {
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
    pub research_interests: Option<Vec<String>>,
}

impl FacultyPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.office.is_none()
            && self.research_interests.is_none()
    }
}
