//! Hand-maintained roster corrections
//!
//! The roster is sample fixture data: a few entries whose title, office and
//! research areas override what the scrape produced. Entries are matched by
//! full name.

use crate::storage::{FacultyPatch, FacultyStore, StorageResult};

/// One corrected roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: &'static str,
    pub title: &'static str,
    /// Empty when the office is unknown
    pub office: &'static str,
    pub research: &'static [&'static str],
}

impl RosterEntry {
    /// Patch with title and research always set, office only when known
    pub fn patch(&self) -> FacultyPatch {
        FacultyPatch {
            title: Some(self.title.to_string()),
            office: Some(self.office.to_string()).filter(|o| !o.is_empty()),
            research_interests: Some(self.research.iter().map(|r| r.to_string()).collect()),
            ..FacultyPatch::default()
        }
    }
}

pub const SAMPLE_ROSTER: &[RosterEntry] = &[
    RosterEntry {
        name: "Cherie Briggs",
        title: "Professor",
        office: "2112 Noble Hall",
        research: &["Disease Ecology", "Ecology", "Population and Community Ecology"],
    },
    RosterEntry {
        name: "Deron Burkepile",
        title: "Professor",
        office: "4312 Marine Science Institute",
        research: &["Marine ecology", "community ecology", "trophic interactions", "coral reefs"],
    },
    RosterEntry {
        name: "Halley Froehlich",
        title: "Assistant Professor",
        office: "4007 Bren Hall",
        research: &["sustainability of seafood and marine ecosystems under climate change"],
    },
    RosterEntry {
        name: "Gretchen Hofmann",
        title: "Professor",
        office: "4310 Marine Science Institute",
        research: &["Global change biology", "marine physiology"],
    },
    RosterEntry {
        name: "Leander Anderegg",
        title: "Assistant Professor",
        office: "",
        research: &[
            "Plant ecophysiology",
            "community ecology and biogeography",
            "Ecological responses to climate change",
        ],
    },
];

/// Outcome of applying a roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterOutcome {
    /// Rows changed
    pub updated: usize,
    /// Roster names with no matching row
    pub missing: Vec<String>,
}

/// Applies every roster entry to the store, collecting names it has no row for
pub fn apply_roster<S: FacultyStore>(store: &mut S, roster: &[RosterEntry]) -> StorageResult<RosterOutcome> {
    let mut outcome = RosterOutcome::default();

    for entry in roster {
        let changed = store.update_by_full_name(entry.name, &entry.patch())?;
        if changed == 0 {
            tracing::warn!("Roster name not found in datastore: {}", entry.name);
            outcome.missing.push(entry.name.to_string());
        } else {
            tracing::debug!("Updated {} from roster", entry.name);
            outcome.updated += changed;
        }
    }

    Ok(outcome)
}
