//! Qanun Exporter - Clean, structure and export Arabic legislation.
//!
//! This crate takes the text extracted from typeset law PDFs, cleans it,
//! structures it with [`qanun_parser`], and exports each law as an
//! enriched JSON document, a Neo4j graph with its Cypher load script, and
//! flat article records for embedding.
//!
//! # Example
//!
//! ```
//! use qanun_exporter::cleaning::clean_text;
//! use qanun_exporter::enrichment::enrich;
//! use qanun_parser::parse_document;
//!
//! let text = clean_text("الرقم: 4\nالمادة ١\nيحظر التدخين.");
//! let law = enrich(&parse_document(&text), "output4");
//!
//! assert_eq!(law.law_id, "law_4_unknown");
//! assert_eq!(law.articles[0].article_number, "1");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Keyword tables, output names and validation
//! - [`cleaning`]: Unicode normalization and page furniture removal
//! - [`enrichment`]: Law IDs, dates, keywords and cross-law references
//! - [`export`]: Graph, Cypher, article records and file writers
//! - [`pipeline`]: Per-file and batch export service
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cleaning;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod pipeline;

// Re-export main functions
pub use pipeline::{export_batch, export_law, parse_file};

// Re-export commonly used items
pub use error::{ExportError, Result};
pub use export::OutputFormat;
