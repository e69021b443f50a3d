//! Law identity, classification and per-article enrichment.

use std::sync::LazyLock;

use chrono::NaiveDate;
use qanun_parser::config::ARTICLE_ORDINALS;
use qanun_parser::{Article, Document, Metadata};
use regex::Regex;

use super::references::extract_references;
use super::types::{EnrichedArticle, EnrichedChapter, EnrichedLaw, LawType};
use crate::config::{
    DATE_FORMATS, DATE_KEYS, LEGAL_KEYWORDS, NUMBER_KEYS, PUBLICATION_KEY, STATUS_KEY,
    UNKNOWN_YEAR,
};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("valid regex"));

/// Phrase after the article keyword, optional dash removed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"المادة\s+[-–]?\s*(.+)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract the article number from a heading.
///
/// The first digit run wins; otherwise the ordinal phrase after the
/// article keyword; otherwise the heading itself.
///
/// # Examples
/// ```
/// use qanun_exporter::enrichment::article_number;
///
/// assert_eq!(article_number("المادة -3- شروط الترخيص"), "3");
/// assert_eq!(article_number("المادة الأولى"), "الأولى");
/// assert_eq!(article_number("المادة الثانية - نطاق التطبيق"), "الثانية");
/// ```
#[must_use]
pub fn article_number(heading: &str) -> String {
    if let Some(m) = DIGITS.find(heading) {
        return m.as_str().to_string();
    }
    if let Some(phrase) = ARTICLE_PHRASE.captures(heading).and_then(|c| c.get(1)) {
        return ordinal_phrase(phrase.as_str());
    }
    heading.to_string()
}

/// Words that continue a compound ordinal ("عشرة", "والعشرون", "مكرر").
fn continues_ordinal(token: &str) -> bool {
    matches!(token, "عشرة" | "عشر" | "مكرر") || token.starts_with("وال")
}

/// Cut a word-form number off its label or inline text.
fn ordinal_phrase(phrase: &str) -> String {
    let phrase = phrase
        .split([':', '-', '–'])
        .next()
        .unwrap_or(phrase)
        .trim();

    let mut tokens = phrase.split_whitespace();
    match tokens.next() {
        Some(first) if ARTICLE_ORDINALS.contains(&first) => {
            let count = 1 + tokens.take_while(|t| continues_ordinal(t)).count();
            phrase
                .split_whitespace()
                .take(count)
                .collect::<Vec<_>>()
                .join(" ")
        }
        _ => phrase.to_string(),
    }
}

/// Find the legal keywords present in a text, in keyword-table order.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    LEGAL_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| (*kw).to_string())
        .collect()
}

/// Infer the kind of act from its title and preamble text.
///
/// Amendment wins over promulgation, which wins over repeal.
#[must_use]
pub fn infer_law_type(text: &str) -> LawType {
    if text.contains("تعديل") {
        LawType::Amendment
    } else if text.contains("إصدار") {
        LawType::Promulgation
    } else if text.contains("إلغاء") {
        LawType::Repeal
    } else {
        LawType::Original
    }
}

fn first_value<'m>(metadata: &'m Metadata, keys: &[&str]) -> Option<&'m str> {
    keys.iter()
        .find_map(|k| metadata.get(*k))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn law_number(metadata: &Metadata) -> Option<&str> {
    first_value(metadata, &NUMBER_KEYS)
}

fn law_year(metadata: &Metadata) -> Option<&str> {
    first_value(metadata, &DATE_KEYS).and_then(|d| YEAR.find(d).map(|m| m.as_str()))
}

/// Build the law ID `law_{number}_{year}`.
///
/// The number comes from the metadata card, else the first digit run of
/// the source file stem, else the stem itself. The year is the first
/// four-digit run of the card date, else `unknown`.
///
/// # Examples
/// ```
/// use qanun_exporter::enrichment::build_law_id;
/// use qanun_parser::Metadata;
///
/// let mut metadata = Metadata::new();
/// metadata.insert("رقم".to_string(), "13".to_string());
/// metadata.insert("التاريخ".to_string(), "12/05/2024".to_string());
///
/// assert_eq!(build_law_id("output7", &metadata), "law_13_2024");
/// assert_eq!(build_law_id("output7", &Metadata::new()), "law_7_unknown");
/// ```
#[must_use]
pub fn build_law_id(stem: &str, metadata: &Metadata) -> String {
    let number = law_number(metadata)
        .map(str::to_string)
        .or_else(|| DIGITS.find(stem).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| stem.to_string());
    let year = law_year(metadata).unwrap_or(UNKNOWN_YEAR);
    format!("law_{number}_{year}")
}

/// Parse the card date in any of the supported formats.
#[must_use]
pub fn parse_law_date(metadata: &Metadata) -> Option<NaiveDate> {
    let raw = first_value(metadata, &DATE_KEYS)?;
    let date = raw.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

/// Collapse whitespace runs to single spaces.
fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn embedding_text(title: &str, chapter: Option<&str>, heading: &str, full_text: &str) -> String {
    let mut text = format!("قانون: {title}\n");
    if let Some(chapter) = chapter.filter(|c| !c.is_empty()) {
        text.push_str(&format!("الفصل: {chapter}\n"));
    }
    text.push_str(&format!("المادة: {heading}\n"));
    text.push_str(&format!("النص: {full_text}"));
    text
}

struct ArticleContext<'a> {
    law_id: &'a str,
    title: &'a str,
    chapter_title: Option<&'a str>,
    chapter_index: Option<usize>,
}

fn enrich_article(article: &Article, ctx: &ArticleContext<'_>) -> EnrichedArticle {
    let full_text = normalize_whitespace(&article.body_text());
    EnrichedArticle {
        law_id: ctx.law_id.to_string(),
        chapter_title: ctx.chapter_title.map(str::to_string),
        chapter_index: ctx.chapter_index,
        article_number: article_number(&article.heading),
        heading: article.heading.clone(),
        keywords: extract_keywords(&full_text),
        char_count: full_text.chars().count(),
        embedding_text: embedding_text(
            ctx.title,
            ctx.chapter_title,
            &article.heading,
            &full_text,
        ),
        full_text,
    }
}

/// Enrich a parsed document.
///
/// `stem` is the source file stem, used when the metadata card carries no
/// law number.
#[must_use]
pub fn enrich(document: &Document, stem: &str) -> EnrichedLaw {
    let metadata = &document.metadata;
    let law_id = build_law_id(stem, metadata);

    let number = law_number(metadata).map(str::to_string);
    let title = match (number.as_deref(), law_year(metadata)) {
        (Some(n), Some(y)) => format!("قانون رقم ({n}) لسنة {y}"),
        _ => String::new(),
    };
    let law_type = infer_law_type(&format!("{title}{}", document.preamble.join(" ")));

    let mut chapters = Vec::with_capacity(document.sections.len());
    let mut articles = Vec::with_capacity(document.article_count());

    for section in &document.sections {
        chapters.push(EnrichedChapter {
            index: section.index,
            title: section.title.clone(),
            article_count: section.articles.len(),
        });
        let ctx = ArticleContext {
            law_id: &law_id,
            title: &title,
            chapter_title: Some(section.title.as_str()),
            chapter_index: Some(section.index),
        };
        articles.extend(section.articles.iter().map(|a| enrich_article(a, &ctx)));
    }

    let ctx = ArticleContext {
        law_id: &law_id,
        title: &title,
        chapter_title: None,
        chapter_index: None,
    };
    articles.extend(
        document
            .top_level_articles
            .iter()
            .map(|a| enrich_article(a, &ctx)),
    );

    let body: Vec<&str> = articles.iter().map(|a| a.full_text.as_str()).collect();
    let references = extract_references(&document.preamble, &body.join(" "), &law_id);

    tracing::debug!(
        law_id = %law_id,
        law_type = law_type.as_str(),
        articles = articles.len(),
        references = references.references.len(),
        "Law enriched"
    );

    EnrichedLaw {
        law_id,
        title,
        law_type,
        number,
        status: metadata.get(STATUS_KEY).cloned(),
        publication: metadata.get(PUBLICATION_KEY).cloned(),
        issued_on: parse_law_date(metadata),
        metadata: metadata.clone(),
        table_of_contents: document.table_of_contents.clone(),
        preamble: document.preamble.clone(),
        chapters,
        articles,
        references,
    }
}
