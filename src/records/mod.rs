//! Record types produced by each harvesting stage
//!
//! Every record is created once by the stage that owns it and handed
//! downstream as an immutable value. All of them serialize to the JSON
//! catalogs in `output`.

mod link;
mod media;
mod page;
mod person;

pub use link::{LinkCheckRecord, StatusBucket};
pub use media::{MediaKind, MediaRecord};
pub use page::PageRecord;
pub use person::{PersonRecord, SocialLinks};
