//! EiP Catalogue - Parse the Euclid-in-Print bibliographic catalogue.
//!
//! This crate reads the catalogue of printed editions of Euclid's
//! *Elements* from a Word document, splits it into entries, extracts the
//! bibliographic fields of every entry, classifies its language and writes
//! one CSV row per entry.
//!
//! # Example
//!
//! ```
//! use eip_catalogue::extract::FieldExtractor;
//! use eip_catalogue::types::{paragraphs_from, EntryBlock};
//!
//! let block = EntryBlock {
//!     paragraphs: paragraphs_from([
//!         "London 1570",
//!         "The elements of geometrie",
//!         "folio. 15 books. John Dee ed",
//!     ]),
//! };
//! let entry = FieldExtractor::default().extract(&block).unwrap();
//! assert_eq!(entry.city, "London");
//! assert_eq!(entry.format, "folio");
//! assert_eq!(entry.author, "John Dee");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Vocabularies, region markers, classifier settings
//! - [`types`]: Paragraphs, entry blocks and catalogue entries
//! - [`error`]: Error types and Result alias
//! - [`source`]: Paragraph sources for `.docx` and `.txt` input
//! - [`segment`]: Splitting the catalogue region into entry blocks
//! - [`extract`]: Field extraction for one entry block
//! - [`language`]: Language detection and disambiguation
//! - [`catalogue`]: The parsing pipeline
//! - [`table`]: CSV output
//! - [`cli`]: Command-line interface

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod language;
pub mod segment;
pub mod source;
pub mod table;
pub mod types;

// Re-export main functions
pub use catalogue::{parse_catalogue, CatalogueParser};

// Re-export commonly used items
pub use config::CatalogueConfig;
pub use error::{CatalogueError, ParseError, Result};
pub use types::{CatalogueEntry, CatalogueRun, EntryBlock, Paragraph};
