//! Export of enriched laws.
//!
//! - [`graph`]: Law, chapter and article nodes with their relationships
//! - [`cypher`]: Parameterized Cypher statements that load a graph
//! - [`records`]: Flat article records for embedding pipelines
//! - [`writer`]: JSON, YAML and JSON Lines files

pub mod cypher;
pub mod graph;
pub mod records;
pub mod writer;

pub use cypher::{cypher_statements, schema_statements, CypherStatement};
pub use graph::{build_graph, Edge, EdgeKind, GraphExport, Label, Node};
pub use records::{article_records, ArticleRecord};
pub use writer::{output_path, render, write_document, write_jsonl, OutputFormat};
