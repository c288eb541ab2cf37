//! Import of scraped personnel into the target datastore
//!
//! This module handles:
//! - Reshaping person records into `faculties` rows
//! - Inserting rows directly, or exporting them as a SQL statements file
//! - Applying roster corrections by full name

mod importer;
pub mod roster;
pub mod sql;
pub mod transform;

pub use importer::{import_people, transform_all, ImportSummary};
pub use roster::{apply_roster, RosterEntry, RosterOutcome, SAMPLE_ROSTER};
pub use transform::FacultyTransform;
