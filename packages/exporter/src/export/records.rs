//! Flat per-article records for embedding and search indexing.

use serde::{Deserialize, Serialize};

use crate::enrichment::EnrichedLaw;

/// One article, denormalized with its law and chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub law_id: String,
    pub law_title: String,
    /// Chapter title, empty for articles outside any chapter.
    pub chapter: String,
    pub article_number: String,
    pub article_title: String,
    pub full_text: String,
    pub embedding_text: String,
    pub keywords: Vec<String>,
}

/// Build one record per article, in the law's article order.
#[must_use]
pub fn article_records(law: &EnrichedLaw) -> Vec<ArticleRecord> {
    law.articles
        .iter()
        .map(|article| ArticleRecord {
            law_id: law.law_id.clone(),
            law_title: law.title.clone(),
            chapter: article.chapter_title.clone().unwrap_or_default(),
            article_number: article.article_number.clone(),
            article_title: article.heading.clone(),
            full_text: article.full_text.clone(),
            embedding_text: article.embedding_text.clone(),
            keywords: article.keywords.clone(),
        })
        .collect()
}
