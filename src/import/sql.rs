//! SQL text export for loading rows with the `sqlite3` shell
//!
//! Direct imports go through parameter binding in `storage`. This module
//! only exists for the offline statements file, so every value passes
//! through [`quote`].

use crate::records::PersonRecord;
use crate::storage::{FacultyPatch, FacultyRow};
use crate::Result;
use std::path::Path;

/// Placeholder the directory shows instead of a real extension
const PHONE_PLACEHOLDER: &str = "805.893.xxxxx";

/// Single-quoted SQL string literal with embedded quotes doubled
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn quote_opt(value: Option<&str>) -> String {
    value.map(quote).unwrap_or_else(|| "NULL".to_string())
}

/// `INSERT` statement for one row
pub fn insert_statement(row: &FacultyRow) -> Result<String> {
    let interests = serde_json::to_string(&row.research_interests)?;

    Ok(format!(
        "INSERT INTO faculties (first_name, last_name, full_name, slug, title, email, phone, office, \
         bio, short_bio, research_interests, active, department, photo_url, created_at, updated_at, \
         published_at) VALUES ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, \
         datetime('now'), datetime('now'), datetime('now'));",
        quote(&row.first_name),
        quote(&row.last_name),
        quote(&row.full_name),
        quote(&row.slug),
        quote(&row.title),
        quote(&row.email),
        quote_opt(row.phone.as_deref()),
        quote_opt(row.office.as_deref()),
        quote(&row.bio),
        quote(&row.short_bio),
        quote(&interests),
        if row.active { 1 } else { 0 },
        quote(&row.department),
        quote_opt(row.photo_url.as_deref()),
    ))
}

/// Contact details a directory entry can contribute to an existing row
pub fn contact_patch(person: &PersonRecord) -> FacultyPatch {
    let present = |value: &str| Some(value.trim().to_string()).filter(|v| !v.is_empty());

    FacultyPatch {
        email: present(&person.email),
        office: present(&person.office),
        phone: present(&person.phone).filter(|phone| phone != PHONE_PLACEHOLDER),
        ..FacultyPatch::default()
    }
}

/// `UPDATE ... WHERE full_name = ...` statement, or None for an empty patch
pub fn update_statement(full_name: &str, patch: &FacultyPatch) -> Result<Option<String>> {
    let mut assignments = Vec::new();

    for (column, value) in [
        ("title", &patch.title),
        ("email", &patch.email),
        ("phone", &patch.phone),
        ("office", &patch.office),
    ] {
        if let Some(value) = value {
            assignments.push(format!("{} = {}", column, quote(value)));
        }
    }
    if let Some(interests) = &patch.research_interests {
        assignments.push(format!(
            "research_interests = {}",
            quote(&serde_json::to_string(interests)?)
        ));
    }

    if assignments.is_empty() {
        return Ok(None);
    }

    Ok(Some(format!(
        "UPDATE faculties SET {}, updated_at = datetime('now') WHERE full_name = {};",
        assignments.join(", "),
        quote(full_name)
    )))
}

/// Renders the statements file: inserts for `rows`, then contact updates
/// from `people`
///
/// Returns the script and the number of statements in it.
pub fn render_script(rows: &[FacultyRow], people: &[PersonRecord]) -> Result<(String, usize)> {
    let mut lines = vec![
        "-- Faculty import".to_string(),
        format!("-- {} rows, {} directory entries", rows.len(), people.len()),
        String::new(),
    ];
    let mut statements = 0;

    for row in rows {
        lines.push(insert_statement(row)?);
        statements += 1;
    }

    let mut updates = Vec::new();
    for person in people {
        let name = person.name.trim();
        if name.is_empty() {
            continue;
        }
        if let Some(statement) = update_statement(name, &contact_patch(person))? {
            updates.push(statement);
        }
    }

    if !updates.is_empty() {
        lines.push(String::new());
        lines.push("-- Contact updates".to_string());
        statements += updates.len();
        lines.extend(updates);
    }

    let mut script = lines.join("\n");
    script.push('\n');
    Ok((script, statements))
}

/// Writes the statements file and returns the statement count
pub fn write_script(path: &Path, rows: &[FacultyRow], people: &[PersonRecord]) -> Result<usize> {
    let (script, statements) = render_script(rows, people)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, script)?;
    Ok(statements)
}
