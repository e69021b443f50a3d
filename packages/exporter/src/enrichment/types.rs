//! Types for enriched laws.

use chrono::NaiveDate;
use qanun_parser::Metadata;
use serde::{Deserialize, Serialize};

/// Kind of legislative act, inferred from its title and preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LawType {
    /// A new law.
    #[default]
    Original,
    /// A law amending another.
    Amendment,
    /// A law promulgating another instrument.
    Promulgation,
    /// A law repealing another.
    Repeal,
}

impl LawType {
    /// Get the string representation used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Amendment => "amendment",
            Self::Promulgation => "promulgation",
            Self::Repeal => "repeal",
        }
    }
}

/// Other laws cited by a law, as law IDs in first-citation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    /// Every cited law.
    pub references: Vec<String>,

    /// Cited laws this law amends.
    pub amends: Vec<String>,

    /// Cited laws this law repeals.
    pub repeals: Vec<String>,
}

impl References {
    /// True if no other law is cited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// A chapter of an enriched law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedChapter {
    /// 1-based chapter index.
    pub index: usize,

    /// Chapter title with continuation lines.
    pub title: String,

    /// Number of articles in the chapter.
    pub article_count: usize,
}

/// An article with the fields needed for graph and embedding export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    /// Law the article belongs to.
    pub law_id: String,

    /// Title of the enclosing chapter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,

    /// Index of the enclosing chapter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_index: Option<usize>,

    /// Article number as written ("5", "الأولى").
    pub article_number: String,

    /// Heading line as written.
    pub heading: String,

    /// Body lines joined with single spaces.
    pub full_text: String,

    /// Legal keywords found in the text.
    pub keywords: Vec<String>,

    /// Length of `full_text` in characters.
    pub char_count: usize,

    /// Labelled text block handed to the embedding model.
    pub embedding_text: String,
}

/// A parsed law with identity, classification and per-article enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedLaw {
    /// Stable identifier (`law_{number}_{year}`).
    pub law_id: String,

    /// Canonical title, empty when number or year is unknown.
    pub title: String,

    /// Inferred kind of act.
    pub law_type: LawType,

    /// Law number from the metadata card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// In-force status from the metadata card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Publication reference from the metadata card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    /// Issue date, when the card date parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,

    /// Full metadata card.
    pub metadata: Metadata,

    /// Table-of-contents entries.
    pub table_of_contents: Vec<String>,

    /// Preamble lines.
    pub preamble: Vec<String>,

    /// Chapters in document order.
    pub chapters: Vec<EnrichedChapter>,

    /// Articles: chapter articles first, then articles outside any chapter.
    pub articles: Vec<EnrichedArticle>,

    /// Laws cited in the preamble and body.
    pub references: References,
}

impl EnrichedLaw {
    /// Preamble joined with single spaces.
    #[must_use]
    pub fn preamble_text(&self) -> String {
        self.preamble.join(" ")
    }
}
