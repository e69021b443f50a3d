//! Metadata card extraction.
//!
//! The registration card of a law is typeset as one or more lines of
//! `key: value` runs, several runs often sharing a line:
//!
//! ```text
//! بطاقة التشريع العنوان: قانون المرور الرقم: 13
//! ```
//!
//! Keys are runs of Arabic-script words. A value runs until the next key
//! (a single Arabic word directly followed by a colon) or the end of the
//! line.

use regex::Regex;

use crate::error::{ParserError, Result};
use crate::grammar::Grammar;
use crate::types::Metadata;

/// Splits metadata card lines into key/value pairs.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    card_label: Regex,
    title_phrase: String,
}

impl MetadataExtractor {
    /// Build an extractor from the grammar's card label and title phrase.
    ///
    /// # Errors
    /// Returns [`ParserError::InvalidPattern`] if the card label pattern
    /// does not compile.
    pub fn new(grammar: &Grammar) -> Result<Self> {
        let card_label =
            Regex::new(&grammar.card_label_pattern).map_err(|source| ParserError::InvalidPattern {
                field: "card_label_pattern",
                source,
            })?;
        Ok(Self {
            card_label,
            title_phrase: grammar.title_phrase.clone(),
        })
    }

    /// Extract the key/value pairs of one line, in order.
    ///
    /// Running-title lines yield nothing. When no `key: value` run is
    /// found, a line with a colon is split once at its first colon.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<(String, String)> {
        if !self.title_phrase.is_empty() && text.contains(self.title_phrase.as_str()) {
            return Vec::new();
        }

        let text = self.card_label.replace_all(text, "");
        let text = text.trim();

        let pairs = extract_pairs(text);
        if !pairs.is_empty() {
            return pairs;
        }

        match text.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                vec![(key.trim().to_string(), value.trim().to_string())]
            }
            _ => Vec::new(),
        }
    }

    /// Extract a line into a metadata map. Later keys overwrite earlier ones.
    ///
    /// Returns the number of entries written.
    pub fn extract_into(&self, text: &str, metadata: &mut Metadata) -> usize {
        let pairs = self.extract(text);
        let count = pairs.len();
        for (key, value) in pairs {
            if let Some(previous) = metadata.insert(key, value) {
                tracing::trace!(previous = %previous, "Metadata key overwritten");
            }
        }
        count
    }
}

fn is_script_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_key_char(c: char) -> bool {
    is_script_char(c) || c.is_whitespace()
}

/// Find every `key: value` run in a line.
///
/// A key is the run of Arabic-script characters and spaces directly before
/// a colon. A value ends where the next key starts (whitespace, then a
/// single Arabic word, then a colon) or at the end of the line. A colon
/// that cannot close a key or end a value does not produce a pair.
#[must_use]
pub fn extract_pairs(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut pos = 0;

    while let Some(colon) = text[pos..].find(':').map(|i| pos + i) {
        let key_start = text[pos..colon]
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_key_char(*c))
            .last()
            .map_or(colon, |(i, _)| pos + i);
        let key = text[key_start..colon].trim();

        if key.is_empty() {
            pos = colon + 1;
            continue;
        }

        match value_end(text, colon + 1) {
            Some(end) => {
                let value = text[colon + 1..end].trim();
                pairs.push((key.to_string(), value.to_string()));
                pos = end;
            }
            None => pos = colon + 1,
        }
    }

    pairs
}

/// Find where a value starting at `start` ends.
fn value_end(text: &str, start: usize) -> Option<usize> {
    let rest = &text[start..];

    let Some(next_colon) = rest.find(':') else {
        return (!rest.trim().is_empty()).then_some(text.len());
    };

    let before = &rest[..next_colon];
    let word_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_script_char(*c))
        .last()
        .map(|(i, _)| i)?;
    let gap_start = before[..word_start]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map(|(i, _)| i)?;

    if before[..gap_start].trim().is_empty() {
        // One space is only a separator; two or more leave an empty value
        let gap = before[..word_start]
            .chars()
            .filter(|c| c.is_whitespace())
            .count();
        return (gap >= 2).then_some(start);
    }
    Some(start + gap_start)
}
