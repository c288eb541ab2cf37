//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the FacultyStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{FacultyStore, StorageError, StorageResult};
use crate::storage::{FacultyPatch, FacultyRow};
use crate::Result;
use chrono::Utc;
use rusqlite::{ffi, params, params_from_iter, Connection, ErrorCode, OptionalExtension};
use std::path::Path;

/// SQLite faculty store
pub struct SqliteFacultyStore {
    conn: Connection,
}

impl SqliteFacultyStore {
    /// Opens or creates the database file and ensures the schema exists
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn encode_interests(interests: &[String]) -> StorageResult<String> {
    serde_json::to_string(interests).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// True only for UNIQUE and PRIMARY KEY failures; NOT NULL and CHECK stay errors
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && matches!(
                    e.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
    )
}

impl FacultyStore for SqliteFacultyStore {
    fn insert_faculty(&mut self, row: &FacultyRow) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        let interests = encode_interests(&row.research_interests)?;

        let result = self.conn.execute(
            "INSERT INTO faculties (
                first_name, last_name, full_name, slug, title,
                email, phone, office, bio, short_bio,
                research_interests, active, department, photo_url,
                created_at, updated_at, published_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15, ?15)",
            params![
                row.first_name,
                row.last_name,
                row.full_name,
                row.slug,
                row.title,
                row.email,
                row.phone,
                row.office,
                row.bio,
                row.short_bio,
                interests,
                row.active,
                row.department,
                row.photo_url,
                now,
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::Duplicate(row.slug.clone())),
            Err(e) => Err(e.into()),
        }
    }

    fn update_by_full_name(
        &mut self,
        full_name: &str,
        patch: &FacultyPatch,
    ) -> StorageResult<usize> {
        if patch.is_empty() {
            return Ok(0);
        }

        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        for (column, value) in [
            ("title", &patch.title),
            ("email", &patch.email),
            ("phone", &patch.phone),
            ("office", &patch.office),
        ] {
            if let Some(value) = value {
                columns.push(column);
                values.push(value.clone());
            }
        }
        if let Some(interests) = &patch.research_interests {
            columns.push("research_interests");
            values.push(encode_interests(interests)?);
        }
        columns.push("updated_at");
        values.push(Utc::now().to_rfc3339());

        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE faculties SET {} WHERE full_name = ?{}",
            assignments.join(", "),
            values.len() + 1
        );
        values.push(full_name.to_string());

        let changed = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(changed)
    }

    fn get_by_slug(&self, slug: &str) -> StorageResult<Option<FacultyRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT first_name, last_name, full_name, slug, title, email, phone, office,
                    bio, short_bio, research_interests, active, department, photo_url
             FROM faculties WHERE slug = ?1",
        )?;

        let found = stmt
            .query_row(params![slug], |row| {
                let interests: String = row.get(10)?;
                Ok((
                    FacultyRow {
                        first_name: row.get(0)?,
                        last_name: row.get(1)?,
                        full_name: row.get(2)?,
                        slug: row.get(3)?,
                        title: row.get(4)?,
                        email: row.get(5)?,
                        phone: row.get(6)?,
                        office: row.get(7)?,
                        bio: row.get(8)?,
                        short_bio: row.get(9)?,
                        research_interests: Vec::new(),
                        active: row.get(11)?,
                        department: row.get(12)?,
                        photo_url: row.get(13)?,
                    },
                    interests,
                ))
            })
            .optional()?;

        match found {
            Some((mut row, interests)) => {
                row.research_interests = serde_json::from_str(&interests)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn count_faculties(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM faculties", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
