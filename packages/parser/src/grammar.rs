//! Heading grammar for a document family.
//!
//! Legislative numbering and heading styles differ between publishers and
//! between revisions of the same publisher's layout. Rather than forking
//! the classifier for each variant, every keyword set and limit it uses
//! lives in [`Grammar`], which can be deserialized from a file. Fields that
//! are absent fall back to the Arabic defaults in [`crate::config`].

use serde::{Deserialize, Serialize};

use crate::classifier::LineClassifier;
use crate::config;
use crate::error::{ParserError, Result};

/// Keyword tables and limits consulted by the line classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grammar {
    /// Keywords that open a section heading.
    pub section_keywords: Vec<String>,

    /// Ordinal words; a section heading must contain one.
    pub ordinals: Vec<String>,

    /// Decoration character removed before section matching.
    pub elongation_char: char,

    /// Lead keyword of an article heading.
    pub article_keyword: String,

    /// Prefix of a word-form article ordinal.
    pub ordinal_prefix: String,

    /// Maximum tokens in a word-form article ordinal.
    pub ordinal_max_tokens: usize,

    /// Ordinal words that open a word-form article heading with trailing text.
    pub article_ordinals: Vec<String>,

    /// Marker glyph in front of table-of-contents entries.
    pub toc_marker: char,

    /// Keyword of the indented "issuance articles" TOC entry.
    pub issuance_keyword: String,

    /// Phrase that opens the preamble.
    pub preamble_start: String,

    /// Phrase that closes the preamble.
    pub ratification_phrase: String,

    /// Running title phrase repeated at page breaks.
    pub title_phrase: String,

    /// Phrases that keep a preamble line despite containing the title phrase.
    pub preamble_citation_markers: Vec<String>,

    /// Regex matching the metadata card label.
    pub card_label_pattern: String,

    /// Bullet glyphs stripped from line edges.
    pub bullet_chars: Vec<char>,

    /// Longest line accepted as a section-title continuation.
    pub continuation_max_chars: usize,

    /// Separator between a section title and its continuation.
    pub continuation_separator: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            section_keywords: to_strings(config::SECTION_KEYWORDS),
            ordinals: to_strings(config::ORDINALS),
            elongation_char: config::ELONGATION_CHAR,
            article_keyword: config::ARTICLE_KEYWORD.to_string(),
            ordinal_prefix: config::ORDINAL_PREFIX.to_string(),
            ordinal_max_tokens: config::ORDINAL_MAX_TOKENS,
            article_ordinals: to_strings(config::ARTICLE_ORDINALS),
            toc_marker: config::TOC_MARKER,
            issuance_keyword: config::ISSUANCE_KEYWORD.to_string(),
            preamble_start: config::PREAMBLE_START.to_string(),
            ratification_phrase: config::RATIFICATION_PHRASE.to_string(),
            title_phrase: config::TITLE_PHRASE.to_string(),
            preamble_citation_markers: to_strings(config::PREAMBLE_CITATION_MARKERS),
            card_label_pattern: config::CARD_LABEL_PATTERN.to_string(),
            bullet_chars: config::BULLET_CHARS.to_vec(),
            continuation_max_chars: config::CONTINUATION_MAX_CHARS,
            continuation_separator: config::CONTINUATION_SEPARATOR.to_string(),
        }
    }
}

impl Grammar {
    /// Check that the grammar can drive a classifier.
    ///
    /// Keyword sets the classifier cannot work without must be non-empty
    /// and the word-ordinal token limit must be at least one. Regex fields
    /// are checked when the classifier compiles them.
    ///
    /// # Errors
    /// Returns [`ParserError::EmptyKeywordSet`] or [`ParserError::InvalidLimit`].
    pub fn validate(&self) -> Result<()> {
        if self.section_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ParserError::EmptyKeywordSet("section_keywords"));
        }
        if self.ordinals.iter().all(|o| o.trim().is_empty()) {
            return Err(ParserError::EmptyKeywordSet("ordinals"));
        }
        if self.article_keyword.trim().is_empty() {
            return Err(ParserError::EmptyKeywordSet("article_keyword"));
        }
        if self.preamble_start.trim().is_empty() {
            return Err(ParserError::EmptyKeywordSet("preamble_start"));
        }
        if self.ratification_phrase.trim().is_empty() {
            return Err(ParserError::EmptyKeywordSet("ratification_phrase"));
        }
        if self.ordinal_max_tokens == 0 {
            return Err(ParserError::InvalidLimit {
                field: "ordinal_max_tokens",
                value: self.ordinal_max_tokens,
            });
        }
        Ok(())
    }

    /// Validate the grammar and compile it into a classifier.
    ///
    /// # Errors
    /// Returns an error if validation fails or a pattern does not compile.
    pub fn compile(self) -> Result<LineClassifier> {
        LineClassifier::new(self)
    }
}

fn to_strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
