//! Named artifacts in the data directory
//!
//! Every stage reads and writes its JSON/CSV files through [`DataDir`], so
//! file names live in one place.

use crate::output::catalog::{read_json, write_csv, write_json};
use crate::records::{LinkCheckRecord, MediaRecord, PageRecord, PersonRecord};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SITE_MAP: &str = "site-map";
pub const IMAGES_CATALOG: &str = "images-catalog";
pub const DOCUMENTS_CATALOG: &str = "documents-catalog";
pub const LINK_VALIDATION: &str = "link-validation";
pub const BROKEN_LINKS: &str = "broken-links";
pub const FACULTY_SCRAPED: &str = "faculty-scraped";
pub const ALL_PEOPLE_SCRAPED: &str = "all-people-scraped";

/// The directory holding all JSON/CSV artifacts of a run
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn json_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{}.json", stem))
    }

    pub fn csv_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{}.csv", stem))
    }

    pub fn save_site_map(&self, pages: &[PageRecord]) -> Result<()> {
        write_json(&self.json_path(SITE_MAP), pages)?;
        write_csv(&self.csv_path(SITE_MAP), pages)
    }

    pub fn load_site_map(&self) -> Result<Vec<PageRecord>> {
        read_json(&self.json_path(SITE_MAP))
    }

    /// Writes the image and document catalogs; empty catalogs are skipped
    pub fn save_media_catalogs(&self, images: &[MediaRecord], documents: &[MediaRecord]) -> Result<()> {
        for (stem, records) in [(IMAGES_CATALOG, images), (DOCUMENTS_CATALOG, documents)] {
            if records.is_empty() {
                continue;
            }
            write_json(&self.json_path(stem), records)?;
            write_csv(&self.csv_path(stem), records)?;
        }
        Ok(())
    }

    /// Writes all results plus the broken-links report
    ///
    /// The broken-links file is only written when there is something broken.
    pub fn save_link_validation(&self, records: &[LinkCheckRecord]) -> Result<()> {
        write_json(&self.json_path(LINK_VALIDATION), records)?;
        write_csv(&self.csv_path(LINK_VALIDATION), records)?;

        let broken: Vec<&LinkCheckRecord> = records
            .iter()
            .filter(|r| r.status_bucket.is_broken())
            .collect();
        if !broken.is_empty() {
            write_csv(&self.csv_path(BROKEN_LINKS), &broken)?;
        }
        Ok(())
    }

    pub fn load_link_validation(&self) -> Result<Vec<LinkCheckRecord>> {
        read_json(&self.json_path(LINK_VALIDATION))
    }

    /// Writes a person catalog as JSON plus a flattened CSV
    pub fn save_people(&self, stem: &str, people: &[PersonRecord]) -> Result<()> {
        write_json(&self.json_path(stem), people)?;
        let rows: Vec<PersonCsvRow<'_>> = people.iter().map(PersonCsvRow::from).collect();
        write_csv(&self.csv_path(stem), &rows)
    }

    pub fn load_people(&self, stem: &str) -> Result<Vec<PersonRecord>> {
        read_json(&self.json_path(stem))
    }
}

/// CSV shape of a person: list fields joined, social links inlined
#[derive(Debug, Serialize)]
struct PersonCsvRow<'a> {
    name: &'a str,
    title: &'a str,
    category: &'a str,
    email: &'a str,
    phone: &'a str,
    office: &'a str,
    bio: &'a str,
    research: &'a str,
    research_interests: String,
    photo_url: &'a str,
    profile_url: &'a str,
    lab_url: &'a str,
    google_scholar: &'a str,
    orcid: &'a str,
    twitter: &'a str,
    linkedin: &'a str,
    personal_website: &'a str,
    page_title: &'a str,
    scraped_at: DateTime<Utc>,
    error: &'a str,
}

impl<'a> From<&'a PersonRecord> for PersonCsvRow<'a> {
    fn from(person: &'a PersonRecord) -> Self {
        Self {
            name: &person.name,
            title: &person.title,
            category: person.category.as_deref().unwrap_or(""),
            email: &person.email,
            phone: &person.phone,
            office: &person.office,
            bio: &person.bio,
            research: &person.research,
            research_interests: person.research_interests.join(", "),
            photo_url: &person.photo_url,
            profile_url: &person.profile_url,
            lab_url: &person.lab_url,
            google_scholar: &person.social.google_scholar,
            orcid: &person.social.orcid,
            twitter: &person.social.twitter,
            linkedin: &person.social.linkedin,
            personal_website: &person.social.personal_website,
            page_title: &person.page_title,
            scraped_at: person.scraped_at,
            error: person.error.as_deref().unwrap_or(""),
        }
    }
}
