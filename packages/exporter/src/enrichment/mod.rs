//! Enrichment of parsed laws for graph and embedding export.
//!
//! A [`Document`](qanun_parser::Document) carries structure only. This
//! module derives what downstream stores need: a stable law ID and title,
//! the kind of act, the laws it cites, and per-article numbers, keywords
//! and embedding text.

mod enricher;
mod references;
mod types;

pub use enricher::{
    article_number, build_law_id, enrich, extract_keywords, infer_law_type, parse_law_date,
};
pub use references::extract_references;
pub use types::{EnrichedArticle, EnrichedChapter, EnrichedLaw, LawType, References};
