//! Direct import of scraped faculty into the datastore

use crate::import::transform::FacultyTransform;
use crate::records::PersonRecord;
use crate::storage::{FacultyRow, FacultyStore, StorageError, StorageResult};

/// Counts reported after an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    /// Rows whose slug already existed
    pub skipped: usize,
    /// Records that are not individual faculty profiles
    pub filtered: usize,
    pub failed: usize,
    pub total_in_store: usize,
}

/// Transforms every record, dropping the ones that are not faculty profiles
pub fn transform_all(transform: &FacultyTransform, people: &[PersonRecord]) -> Vec<FacultyRow> {
    people.iter().filter_map(|p| transform.transform(p)).collect()
}

/// Inserts scraped faculty into the store
///
/// Duplicate slugs are skipped and other insert failures are counted; only
/// a failure to count the final rows aborts the import.
pub fn import_people<S: FacultyStore>(
    store: &mut S,
    transform: &FacultyTransform,
    people: &[PersonRecord],
) -> StorageResult<ImportSummary> {
    let rows = transform_all(transform, people);
    let mut summary = ImportSummary {
        filtered: people.len() - rows.len(),
        ..ImportSummary::default()
    };

    tracing::info!(
        "Extracted {} faculty rows from {} records",
        rows.len(),
        people.len()
    );

    for row in &rows {
        match store.insert_faculty(row) {
            Ok(_) => {
                tracing::debug!("Inserted: {}", row.full_name);
                summary.inserted += 1;
            }
            Err(StorageError::Duplicate(slug)) => {
                tracing::info!("Skipping {} - slug {} already exists", row.full_name, slug);
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to insert {}: {}", row.full_name, e);
                summary.failed += 1;
            }
        }
    }

    summary.total_in_store = store.count_faculties()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteFacultyStore;

    fn person(slug: &str) -> PersonRecord {
        PersonRecord::new(&format!("https://example.com/people/faculty/{}", slug))
    }

    #[test]
    fn test_import_counts() {
        let mut store = SqliteFacultyStore::new_in_memory().unwrap();
        let transform = FacultyTransform::with_domain("EEMB", "ucsb.edu").unwrap();

        let people = vec![
            person("jane-doe"),
            person("john-roe"),
            person("jane-doe"),
            PersonRecord::new("https://example.com/people/staff/ben-cole"),
        ];

        let summary = import_people(&mut store, &transform, &people).unwrap();
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.filtered, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total_in_store, 2);

        let again = import_people(&mut store, &transform, &people[..2]).unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(again.skipped, 2);
    }
}
