//! Reshaping scraped person records into `faculties` rows

use crate::config::ImportConfig;
use crate::records::PersonRecord;
use crate::storage::FacultyRow;
use crate::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

const FACULTY_PATH: &str = "/people/faculty/";
const NAME_PLACEHOLDER: &str = "People";
const BIO_LIMIT: usize = 5000;
const SHORT_BIO_LIMIT: usize = 500;
const INTEREST_LIMIT: usize = 5;

static RE_LEADING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)").unwrap());

static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?805\)?[\s.\-]*893[.\-](\d{4})").unwrap());

static RE_OFFICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\s+(?:Noble Hall|Life Sciences|Marine|Bio|Bren)[\w\s]*)").unwrap()
});

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"((?:Assistant |Associate |Research |Distinguished )?Professor(?:\s+Emeritus)?|Lecturer|Teaching Professor)",
    )
    .unwrap()
});

static RE_BOILERPLATE: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?s)Toggle navigation.*?Apply").unwrap(),
        Regex::new(r"(?s)People Primary tabs.*?Apply").unwrap(),
    ]
});

/// Splits a full name at the first space
///
/// Everything after the first word is the last name, so middle names end up
/// there.
pub fn split_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}

/// URL slug for a person's name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        match c {
            'á' | 'à' | 'ä' | 'â' => slug.push('a'),
            'é' | 'è' | 'ë' | 'ê' => slug.push('e'),
            'í' | 'ï' => slug.push('i'),
            'ó' | 'ö' | 'ô' => slug.push('o'),
            'ú' | 'ü' => slug.push('u'),
            'ñ' => slug.push('n'),
            c if c.is_whitespace() => slug.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' => slug.push(c),
            _ => {}
        }
    }
    slug
}

/// Slug of an individual faculty profile URL (`.../people/faculty/<slug>`)
///
/// Query and fragment are dropped and the path segment is folded through
/// [`slugify`], so `/people/faculty/Jane-Doe/?tab=bio` yields `jane-doe`.
pub fn faculty_slug(profile_url: &str) -> Option<String> {
    let (_, tail) = profile_url.rsplit_once(FACULTY_PATH)?;
    let segment = tail.split(['?', '#']).next().unwrap_or_default();
    let slug = slugify(segment.trim_matches('/'));
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Best display name for a scraped record
///
/// Tries a capitalized name at the start of the page title, then the profile
/// URL slug, then the scraped name unless it is the directory placeholder.
pub fn clean_name(person: &PersonRecord) -> Option<String> {
    if let Some(caps) = RE_LEADING_NAME.captures(&person.page_title) {
        return Some(caps[1].trim().to_string());
    }

    if let Some(slug) = faculty_slug(&person.profile_url) {
        let name: Vec<String> = slug.split('-').map(capitalize).collect();
        return Some(name.join(" "));
    }

    let name = person.name.trim();
    if !name.is_empty() && name != NAME_PLACEHOLDER {
        return Some(name.to_string());
    }

    None
}

/// Normalizes a phone number to `(805) 893-XXXX`, or None if it has another shape
pub fn normalize_phone(raw: &str) -> Option<String> {
    RE_PHONE
        .captures(raw)
        .map(|caps| format!("(805) 893-{}", &caps[1]))
}

/// Room number and building, when the text names a known building
pub fn extract_office(raw: &str) -> Option<String> {
    RE_OFFICE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
}

/// Maps free text to one of the backend's title values
///
/// Text without a recognizable title yields "Professor".
pub fn normalize_title(text: &str) -> &'static str {
    let Some(found) = RE_TITLE.find(text) else {
        return "Professor";
    };
    let raw = found.as_str();

    if raw.contains("Distinguished") {
        "Distinguished Professor"
    } else if raw.contains("Emeritus") {
        "Professor Emeritus"
    } else if raw.contains("Assistant") {
        "Assistant Professor"
    } else if raw.contains("Associate") {
        "Associate Professor"
    } else if raw.contains("Research") {
        "Research Professor"
    } else if raw.contains("Teaching") {
        "Teaching Professor"
    } else if raw.contains("Lecturer") {
        "Lecturer"
    } else {
        "Professor"
    }
}

/// Removes navigation boilerplate captured along with the bio
pub fn clean_bio(bio: &str) -> String {
    let mut cleaned = bio.to_string();
    for pattern in RE_BOILERPLATE.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Turns scraped person records into faculty rows
pub struct FacultyTransform {
    department: String,
    email_domain: String,
    email: Regex,
}

impl FacultyTransform {
    pub fn new(config: &ImportConfig) -> Result<Self, ConfigError> {
        Self::with_domain(&config.department, &config.email_domain)
    }

    /// Accepts addresses on `email_domain` and any of its subdomains
    pub fn with_domain(department: &str, email_domain: &str) -> Result<Self, ConfigError> {
        let pattern = format!(
            r"([\w.\-]+@(?:[\w\-]+\.)*{})(?:$|[^\w.\-])",
            regex::escape(email_domain)
        );
        let email = Regex::new(&pattern)
            .map_err(|e| ConfigError::Validation(format!("Invalid email domain: {}", e)))?;

        Ok(Self {
            department: department.to_string(),
            email_domain: email_domain.to_string(),
            email,
        })
    }

    fn email_for(&self, raw: &str, first_name: &str, last_name: &str, slug: &str) -> String {
        if let Some(caps) = self.email.captures(raw) {
            return caps[1].to_string();
        }

        match first_name.chars().next() {
            Some(initial) if !last_name.is_empty() => format!(
                "{}{}@{}",
                initial.to_lowercase(),
                last_name.to_lowercase().replace(' ', ""),
                self.email_domain
            ),
            _ => format!("{}@{}", slug, self.email_domain),
        }
    }

    /// Builds a row for an individual faculty profile
    ///
    /// Records whose profile URL is not under `/people/faculty/<slug>`, or
    /// that yield no usable name, are filtered out.
    pub fn transform(&self, person: &PersonRecord) -> Option<FacultyRow> {
        let slug = faculty_slug(&person.profile_url)?;
        let full_name = clean_name(person)?;
        let (first_name, last_name) = split_name(&full_name);

        let email = self.email_for(&person.email, &first_name, &last_name, &slug);

        let title_source = if RE_TITLE.is_match(&person.title) {
            &person.title
        } else {
            &person.bio
        };

        let bio = clean_bio(&person.bio);

        Some(FacultyRow {
            last_name: if last_name.is_empty() {
                first_name.clone()
            } else {
                last_name
            },
            first_name,
            full_name,
            slug,
            title: normalize_title(title_source).to_string(),
            email,
            phone: normalize_phone(&person.phone),
            office: extract_office(&person.office),
            short_bio: truncate(&bio, SHORT_BIO_LIMIT),
            bio: truncate(&bio, BIO_LIMIT),
            research_interests: person
                .research_interests
                .iter()
                .take(INTEREST_LIMIT)
                .cloned()
                .collect(),
            active: true,
            department: self.department.clone(),
            photo_url: Some(person.photo_url.clone()).filter(|url| !url.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> FacultyTransform {
        FacultyTransform::with_domain("EEMB", "ucsb.edu").unwrap()
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Jane Doe"), ("Jane".to_string(), "Doe".to_string()));
        assert_eq!(
            split_name("Ana Maria de la Cruz"),
            ("Ana".to_string(), "Maria de la Cruz".to_string())
        );
        assert_eq!(split_name("Cher"), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Débora Iglesias-Rodriguez"), "debora-iglesias-rodriguez");
        assert_eq!(slugify("Carla D'Antonio"), "carla-dantonio");
        assert_eq!(slugify("J. R. Smith"), "j-r-smith");
    }

    #[test]
    fn test_faculty_slug() {
        assert_eq!(
            faculty_slug("https://example.com/people/faculty/jane-doe/").as_deref(),
            Some("jane-doe")
        );
        assert_eq!(
            faculty_slug("https://example.com/people/faculty/Jane-Doe/?tab=bio#top").as_deref(),
            Some("jane-doe")
        );
        assert_eq!(faculty_slug("https://example.com/people/faculty/"), None);
        assert_eq!(faculty_slug("https://example.com/people/faculty/?page=2"), None);
        assert_eq!(faculty_slug("https://example.com/people/staff/x"), None);
    }

    #[test]
    fn test_clean_name_sources() {
        let mut person = PersonRecord::new("https://example.com/people/faculty/iglesias-rodriguez");
        person.page_title = "Jane Doe | Department".to_string();
        assert_eq!(clean_name(&person).as_deref(), Some("Jane Doe"));

        person.page_title = "people".to_string();
        assert_eq!(clean_name(&person).as_deref(), Some("Iglesias Rodriguez"));

        let mut listing = PersonRecord::new("https://example.com/people");
        listing.name = NAME_PLACEHOLDER.to_string();
        assert_eq!(clean_name(&listing), None);
        listing.name = "Ben Cole".to_string();
        assert_eq!(clean_name(&listing).as_deref(), Some("Ben Cole"));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("805.893.1234").as_deref(), Some("(805) 893-1234"));
        assert_eq!(normalize_phone("Tel: 805-893-4321").as_deref(), Some("(805) 893-4321"));
        assert_eq!(normalize_phone("(805) 893-1111").as_deref(), Some("(805) 893-1111"));
        assert_eq!(normalize_phone("805.893.xxxxx"), None);
        assert_eq!(normalize_phone(""), None);
    }

    #[test]
    fn test_extract_office() {
        assert_eq!(extract_office("Office: 2112 Noble Hall").as_deref(), Some("2112 Noble Hall"));
        assert_eq!(
            extract_office("4105 Life Sciences Building ").as_deref(),
            Some("4105 Life Sciences Building")
        );
        assert_eq!(extract_office("Room 12, Elsewhere"), None);
    }

    #[test]
    fn test_normalize_title_closed_set() {
        assert_eq!(normalize_title("She is a Distinguished Professor of"), "Distinguished Professor");
        assert_eq!(normalize_title("Professor Emeritus"), "Professor Emeritus");
        assert_eq!(normalize_title("Assistant Professor"), "Assistant Professor");
        assert_eq!(normalize_title("Associate Professor"), "Associate Professor");
        assert_eq!(normalize_title("Research Professor"), "Research Professor");
        assert_eq!(normalize_title("Senior Lecturer"), "Lecturer");
        assert_eq!(normalize_title("Professor"), "Professor");
        assert_eq!(normalize_title("Lab manager"), "Professor");
    }

    #[test]
    fn test_clean_bio_strips_navigation() {
        let bio = "Toggle navigation Home About Apply Jane studies kelp. People Primary tabs View Apply";
        assert_eq!(clean_bio(bio), "Jane studies kelp.");
    }

    #[test]
    fn test_transform_full_record() {
        let mut person = PersonRecord::new("https://example.com/people/faculty/jane-doe");
        person.name = "Jane Doe".to_string();
        person.title = "Associate Professor".to_string();
        person.email = "Email: jdoe@lifesci.ucsb.edu".to_string();
        person.phone = "805.893.2222".to_string();
        person.office = "2112 Noble Hall".to_string();
        person.bio = "x".repeat(6000);
        person.research_interests = (1..=7).map(|i| format!("Topic {}", i)).collect();
        person.photo_url = "https://example.com/files/jane.jpg".to_string();

        let row = transform().transform(&person).unwrap();
        assert_eq!(row.full_name, "Jane Doe");
        assert_eq!(row.first_name, "Jane");
        assert_eq!(row.last_name, "Doe");
        assert_eq!(row.slug, "jane-doe");
        assert_eq!(row.title, "Associate Professor");
        assert_eq!(row.email, "jdoe@lifesci.ucsb.edu");
        assert_eq!(row.phone.as_deref(), Some("(805) 893-2222"));
        assert_eq!(row.office.as_deref(), Some("2112 Noble Hall"));
        assert_eq!(row.bio.chars().count(), 5000);
        assert_eq!(row.short_bio.chars().count(), 500);
        assert_eq!(row.research_interests.len(), 5);
        assert_eq!(row.department, "EEMB");
        assert!(row.active);
        assert!(row.photo_url.is_some());
    }

    #[test]
    fn test_transform_synthesizes_email() {
        let mut person = PersonRecord::new("https://example.com/people/faculty/ana-de-la-cruz");
        person.email = "ana@gmail.com".to_string();
        let row = transform().transform(&person).unwrap();
        assert_eq!(row.full_name, "Ana De La Cruz");
        assert_eq!(row.email, "adelacruz@ucsb.edu");

        let single = PersonRecord::new("https://example.com/people/faculty/cher");
        let row = transform().transform(&single).unwrap();
        assert_eq!(row.email, "cher@ucsb.edu");
        assert_eq!(row.last_name, "Cher");
    }

    #[test]
    fn test_email_must_end_at_the_domain() {
        let transform = transform();
        let mut person = PersonRecord::new("https://example.com/people/faculty/jane-doe");

        // Lookalike domains fall through to the synthesized address
        person.email = "janed@ucsb.edu.evil.com".to_string();
        assert_eq!(transform.transform(&person).unwrap().email, "jdoe@ucsb.edu");

        person.email = "Contact: janed@ucsb.education".to_string();
        assert_eq!(transform.transform(&person).unwrap().email, "jdoe@ucsb.edu");

        person.email = "Email jdoe@eemb.lifesci.ucsb.edu, office 2112".to_string();
        assert_eq!(
            transform.transform(&person).unwrap().email,
            "jdoe@eemb.lifesci.ucsb.edu"
        );

        person.email = "<jdoe@ucsb.edu>".to_string();
        assert_eq!(transform.transform(&person).unwrap().email, "jdoe@ucsb.edu");
    }

    #[test]
    fn test_transform_filters_non_faculty() {
        let person = PersonRecord::new("https://example.com/people/staff/ben-cole");
        assert!(transform().transform(&person).is_none());
    }
}
