//! Core data types for parsed legislation.
//!
//! The wire form uses camelCase keys (`tableOfContents`, `bodyLines`, ...)
//! so downstream collaborators written in other languages can consume the
//! JSON directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata card entries. Keys are unique; the last write wins.
pub type Metadata = BTreeMap<String, String>;

/// A single numbered legal unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Raw heading line, numbering style preserved.
    pub heading: String,

    /// Source lines belonging to the article, in document order.
    pub body_lines: Vec<String>,
}

impl Article {
    /// Create an article with an empty body.
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body_lines: Vec::new(),
        }
    }

    /// Body lines joined with newlines.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body_lines.join("\n")
    }
}

/// A chapter or part heading grouping articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Heading line plus any short continuation lines.
    pub title: String,

    /// 1-based position in the document, assigned when the section closes.
    pub index: usize,

    /// Articles in document order.
    pub articles: Vec<Article>,
}

impl Section {
    /// Create an open section. The index is assigned when it is closed.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            index: 0,
            articles: Vec::new(),
        }
    }
}

/// A structured law.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Registration facts from the metadata card.
    pub metadata: Metadata,

    /// Table-of-contents entries in source order.
    pub table_of_contents: Vec<String>,

    /// Declaratory lines preceding the operative body.
    pub preamble: Vec<String>,

    /// Sections in document order.
    pub sections: Vec<Section>,

    /// Articles that appeared with no enclosing section.
    pub top_level_articles: Vec<Article>,
}

impl Document {
    /// Total number of articles, inside and outside sections.
    #[must_use]
    pub fn article_count(&self) -> usize {
        self.sections.iter().map(|s| s.articles.len()).sum::<usize>()
            + self.top_level_articles.len()
    }

    /// All articles: section articles first, then top-level articles.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.sections
            .iter()
            .flat_map(|s| s.articles.iter())
            .chain(self.top_level_articles.iter())
    }

    /// True if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
            && self.table_of_contents.is_empty()
            && self.preamble.is_empty()
            && self.sections.is_empty()
            && self.top_level_articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut section = Section::new("الفصل الأول");
        section.index = 1;
        section.articles.push(Article::new("المادة 1"));
        section.articles.push(Article::new("المادة 2"));

        Document {
            sections: vec![section],
            top_level_articles: vec![Article::new("المادة 3")],
            ..Document::default()
        }
    }

    #[test]
    fn test_default_document_is_empty() {
        assert!(Document::default().is_empty());
        assert_eq!(Document::default().article_count(), 0);
    }

    #[test]
    fn test_article_count_includes_top_level() {
        assert_eq!(sample().article_count(), 3);
    }

    #[test]
    fn test_articles_iterates_sections_first() {
        let doc = sample();
        let headings: Vec<_> = doc.articles().map(|a| a.heading.as_str()).collect();
        assert_eq!(headings, vec!["المادة 1", "المادة 2", "المادة 3"]);
    }

    #[test]
    fn test_body_text_joins_lines() {
        let mut article = Article::new("المادة 1");
        article.body_lines = vec!["أ".to_string(), "ب".to_string()];
        assert_eq!(article.body_text(), "أ\nب");
    }

    #[test]
    fn test_camel_case_wire_form() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("tableOfContents").is_some());
        assert!(json.get("topLevelArticles").is_some());
        assert!(json["sections"][0]["articles"][0].get("bodyLines").is_some());
    }
}
