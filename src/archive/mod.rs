//! Archive record resolution
//!
//! Identifier normalization, `_files.xml` metadata parsing, and the HTTP
//! fetcher used to retrieve record metadata and photos.

pub mod fetch;
pub mod identifier;
pub mod metadata;

pub use fetch::{HttpFetcher, RecordFetcher};
pub use identifier::normalize_identifier;
pub use metadata::{files_xml_url, image_url, resolve_record};
