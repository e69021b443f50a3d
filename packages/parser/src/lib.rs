//! Qanun Parser - Structure de-shaped Arabic legislation text.
//!
//! This crate turns the cleaned line stream of a typeset law (already
//! reshaped, bidi-corrected and Unicode-normalized upstream) into a
//! [`Document`]: registration metadata, table of contents, preamble,
//! chapters with their articles, and articles outside any chapter.
//!
//! # Example
//!
//! ```
//! use qanun_parser::DocumentParser;
//!
//! let parser = DocumentParser::default();
//! let document = parser.parse_text(
//!     "الفصل الأول\nأحكام عامة\nالمادة 1\nيعمل بهذا القانون.\nالمادة 2\nينشر في الجريدة الرسمية.",
//! );
//!
//! assert_eq!(document.sections.len(), 1);
//! assert_eq!(document.sections[0].title, "الفصل الأول - أحكام عامة");
//! assert_eq!(document.article_count(), 2);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Default keyword tables and tunable limits
//! - [`grammar`]: The heading grammar, versioned as data
//! - [`classifier`]: Pure per-line predicates and the [`LineKind`] classification
//! - [`metadata`]: Key/value extraction for the metadata card
//! - [`assembler`]: The single-pass state machine that builds the [`Document`]
//! - [`types`]: Document, Section and Article
//! - [`error`]: Error types and Result alias

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod error;
pub mod grammar;
pub mod metadata;
pub mod types;

use std::sync::LazyLock;

pub use assembler::{Assembler, AssemblyStats, DocumentParser};
pub use classifier::{Line, LineClassifier, LineKind, Phase};
pub use error::{ParserError, Result};
pub use grammar::Grammar;
pub use metadata::MetadataExtractor;
pub use types::{Article, Document, Metadata, Section};

/// Parser for the built-in Arabic legislative grammar.
static DEFAULT_PARSER: LazyLock<DocumentParser> = LazyLock::new(DocumentParser::default);

/// Parse a cleaned text blob with the default grammar.
///
/// Convenience wrapper around [`DocumentParser::parse_text`].
#[must_use]
pub fn parse_document(text: &str) -> Document {
    DEFAULT_PARSER.parse_text(text)
}
