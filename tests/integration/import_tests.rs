//! Integration tests for the faculty import path
//!
//! Scraped records go through the JSON artifact, the transform and a
//! file-backed SQLite store, the same way the CLI drives them.

use site_harvester::import::{apply_roster, import_people, sql, FacultyTransform, SAMPLE_ROSTER};
use site_harvester::output::{DataDir, FACULTY_SCRAPED};
use site_harvester::storage::{open_store, FacultyStore};
use site_harvester::PersonRecord;
use tempfile::TempDir;

fn scraped(slug: &str, name: &str) -> PersonRecord {
    let mut person = PersonRecord::new(&format!("https://example.com/people/faculty/{}", slug));
    person.name = name.to_string();
    person.page_title = format!("{} | Ecology", name);
    person.title = "Assistant Professor".to_string();
    person.email = format!("{}@lifesci.ucsb.edu", slug);
    person.phone = "805.893.4000".to_string();
    person.office = "Office: 4007 Bren Hall".to_string();
    person.bio = "Toggle navigation Menu Apply Studies seafood sustainability.".to_string();
    person.research_interests = vec!["Aquaculture".to_string(), "Climate change".to_string()];
    person
}

#[test]
fn test_person_json_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = DataDir::new(temp_dir.path());

    let people = vec![
        scraped("halley-froehlich", "Halley Froehlich"),
        PersonRecord::new("https://example.com/people/staff/ben-cole"),
    ];
    data_dir.save_people(FACULTY_SCRAPED, &people).unwrap();

    assert_eq!(data_dir.load_people(FACULTY_SCRAPED).unwrap(), people);
}

#[test]
fn test_import_into_sqlite_counts_duplicates_as_skips() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data.db");
    let transform = FacultyTransform::with_domain("EEMB", "ucsb.edu").unwrap();

    let people = vec![
        scraped("halley-froehlich", "Halley Froehlich"),
        scraped("cherie-briggs", "Cherie Briggs"),
        PersonRecord::new("https://example.com/people/staff/ben-cole"),
    ];

    let mut store = open_store(&db_path).unwrap();
    let summary = import_people(&mut store, &transform, &people).unwrap();
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.filtered, 1);
    assert_eq!(summary.skipped, 0);
    drop(store);

    // A second run against the same file only finds duplicates
    let mut store = open_store(&db_path).unwrap();
    let summary = import_people(&mut store, &transform, &people).unwrap();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.total_in_store, 2);

    let row = store.get_by_slug("halley-froehlich").unwrap().unwrap();
    assert_eq!(row.full_name, "Halley Froehlich");
    assert_eq!(row.first_name, "Halley");
    assert_eq!(row.last_name, "Froehlich");
    assert_eq!(row.title, "Assistant Professor");
    assert_eq!(row.email, "halley-froehlich@lifesci.ucsb.edu");
    assert_eq!(row.phone.as_deref(), Some("(805) 893-4000"));
    assert_eq!(row.office.as_deref(), Some("4007 Bren Hall"));
    assert_eq!(row.bio, "Studies seafood sustainability.");
    assert_eq!(row.research_interests, vec!["Aquaculture", "Climate change"]);
}

#[test]
fn test_roster_updates_imported_rows() {
    let temp_dir = TempDir::new().unwrap();
    let transform = FacultyTransform::with_domain("EEMB", "ucsb.edu").unwrap();
    let mut store = open_store(&temp_dir.path().join("data.db")).unwrap();

    import_people(
        &mut store,
        &transform,
        &[scraped("cherie-briggs", "Cherie Briggs")],
    )
    .unwrap();

    let outcome = apply_roster(&mut store, SAMPLE_ROSTER).unwrap();
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.missing.len(), SAMPLE_ROSTER.len() - 1);

    let row = store.get_by_slug("cherie-briggs").unwrap().unwrap();
    assert_eq!(row.title, "Professor");
    assert_eq!(row.office.as_deref(), Some("2112 Noble Hall"));
    assert_eq!(row.research_interests.len(), 3);
}

#[test]
fn test_exported_script_matches_direct_import() {
    let temp_dir = TempDir::new().unwrap();
    let transform = FacultyTransform::with_domain("EEMB", "ucsb.edu").unwrap();

    let mut quoted = scraped("carla-dantonio", "Carla");
    quoted.page_title = String::new();
    quoted.bio = "Plants' responses; 'quoted' text".to_string();
    let rows = site_harvester::import::transform_all(&transform, &[quoted]);
    assert_eq!(rows.len(), 1);

    let script_path = temp_dir.path().join("sql/import.sql");
    let statements = sql::write_script(&script_path, &rows, &[]).unwrap();
    assert_eq!(statements, 1);

    let script = std::fs::read_to_string(&script_path).unwrap();
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    site_harvester::storage::initialize_schema(&conn).unwrap();
    conn.execute_batch(&script).unwrap();

    let bio: String = conn
        .query_row("SELECT bio FROM faculties WHERE slug = 'carla-dantonio'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(bio, "Plants' responses; 'quoted' text");
}
