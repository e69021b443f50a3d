//! Graph records: laws, chapters, articles and the edges between them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enrichment::{EnrichedArticle, EnrichedLaw};

/// Node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Law,
    Chapter,
    Article,
}

/// Relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    HasChapter,
    HasArticle,
    Amends,
    Repeals,
}

impl EdgeKind {
    /// Get the relationship type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HasChapter => "HAS_CHAPTER",
            Self::HasArticle => "HAS_ARTICLE",
            Self::Amends => "AMENDS",
            Self::Repeals => "REPEALS",
        }
    }
}

/// Properties of a law node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawNode {
    pub law_id: String,
    pub title: String,
    pub law_type: String,
    pub status: String,
    pub pub_date: String,
    pub number: String,
    pub preamble: String,
}

/// Properties of a chapter node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNode {
    pub uid: String,
    pub title: String,
    pub chapter_index: usize,
    pub law_id: String,
}

/// Properties of an article node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleNode {
    pub uid: String,
    pub title: String,
    pub article_number: String,
    pub full_text: String,
    pub embedding_text: String,
    pub chapter_title: String,
    pub keywords: Vec<String>,
    pub char_count: usize,
    pub law_id: String,
}

/// A labelled node. Serializes with its label under `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "label")]
pub enum Node {
    Law(LawNode),
    Chapter(ChapterNode),
    Article(ArticleNode),
}

impl Node {
    /// Get the node label.
    #[must_use]
    pub fn label(&self) -> Label {
        match self {
            Self::Law(_) => Label::Law,
            Self::Chapter(_) => Label::Chapter,
            Self::Article(_) => Label::Article,
        }
    }

    /// Get the identifying key (`law_id` for laws, `uid` otherwise).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Law(n) => &n.law_id,
            Self::Chapter(n) => &n.uid,
            Self::Article(n) => &n.uid,
        }
    }
}

/// A directed relationship between two node keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub source_label: Label,
    pub source: String,
    pub target_label: Label,
    pub target: String,
}

impl Edge {
    /// Create an edge from `(label, key)` pairs.
    #[must_use]
    pub fn new(kind: EdgeKind, source: (Label, &str), target: (Label, &str)) -> Self {
        Self {
            kind,
            source_label: source.0,
            source: source.1.to_string(),
            target_label: target.0,
            target: target.1.to_string(),
        }
    }
}

/// Nodes and edges for one law.
///
/// Cited laws appear only as edge targets; the store creates them on
/// first reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphExport {
    /// Count nodes with the given label.
    #[must_use]
    pub fn count(&self, label: Label) -> usize {
        self.nodes.iter().filter(|n| n.label() == label).count()
    }
}

/// Chapter UID: `{law_id}_ch_{index}`.
#[must_use]
pub fn chapter_uid(law_id: &str, index: usize) -> String {
    format!("{law_id}_ch_{index}")
}

/// Article UID: `{law_id}_art_{number}`.
#[must_use]
pub fn article_uid(law_id: &str, number: &str) -> String {
    format!("{law_id}_art_{number}")
}

/// Hands out article UIDs, suffixing repeats (`_art_5`, `_art_5_2`).
///
/// Headings such as "المادة 5 مكرر" share the number of the article they
/// follow.
#[derive(Default)]
struct ArticleUids {
    seen: HashMap<String, usize>,
}

impl ArticleUids {
    fn next(&mut self, law_id: &str, number: &str) -> String {
        let uid = article_uid(law_id, number);
        let count = self.seen.entry(uid.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            uid
        } else {
            tracing::warn!(uid = %uid, occurrence = *count, "Duplicate article number");
            format!("{uid}_{count}")
        }
    }
}

fn article_node(article: &EnrichedArticle, uid: String) -> ArticleNode {
    ArticleNode {
        uid,
        title: article.heading.clone(),
        article_number: article.article_number.clone(),
        full_text: article.full_text.clone(),
        embedding_text: article.embedding_text.clone(),
        chapter_title: article.chapter_title.clone().unwrap_or_default(),
        keywords: article.keywords.clone(),
        char_count: article.char_count,
        law_id: article.law_id.clone(),
    }
}

/// Build the graph records of an enriched law.
///
/// Node order: the law, then each chapter followed by its articles, then
/// articles outside any chapter. Citation edges come last.
#[must_use]
pub fn build_graph(law: &EnrichedLaw) -> GraphExport {
    let law_id = law.law_id.as_str();
    let mut graph = GraphExport::default();
    let mut uids = ArticleUids::default();

    graph.nodes.push(Node::Law(LawNode {
        law_id: law_id.to_string(),
        title: law.title.clone(),
        law_type: law.law_type.as_str().to_string(),
        status: law.status.clone().unwrap_or_default(),
        pub_date: law.publication.clone().unwrap_or_default(),
        number: law.number.clone().unwrap_or_default(),
        preamble: law.preamble_text(),
    }));

    for chapter in &law.chapters {
        let ch_uid = chapter_uid(law_id, chapter.index);
        graph.nodes.push(Node::Chapter(ChapterNode {
            uid: ch_uid.clone(),
            title: chapter.title.clone(),
            chapter_index: chapter.index,
            law_id: law_id.to_string(),
        }));
        graph.edges.push(Edge::new(
            EdgeKind::HasChapter,
            (Label::Law, law_id),
            (Label::Chapter, ch_uid.as_str()),
        ));

        for article in law
            .articles
            .iter()
            .filter(|a| a.chapter_index == Some(chapter.index))
        {
            let uid = uids.next(law_id, &article.article_number);
            graph.edges.push(Edge::new(
                EdgeKind::HasArticle,
                (Label::Chapter, ch_uid.as_str()),
                (Label::Article, uid.as_str()),
            ));
            graph.nodes.push(Node::Article(article_node(article, uid)));
        }
    }

    for article in law.articles.iter().filter(|a| a.chapter_index.is_none()) {
        let uid = uids.next(law_id, &article.article_number);
        graph.edges.push(Edge::new(
            EdgeKind::HasArticle,
            (Label::Law, law_id),
            (Label::Article, uid.as_str()),
        ));
        graph.nodes.push(Node::Article(article_node(article, uid)));
    }

    for target in &law.references.amends {
        graph.edges.push(Edge::new(
            EdgeKind::Amends,
            (Label::Law, law_id),
            (Label::Law, target.as_str()),
        ));
    }
    for target in &law.references.repeals {
        graph.edges.push(Edge::new(
            EdgeKind::Repeals,
            (Label::Law, law_id),
            (Label::Law, target.as_str()),
        ));
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::enrich;
    use pretty_assertions::assert_eq;
    use qanun_parser::parse_document;

    fn sample_law() -> EnrichedLaw {
        let document = parse_document(
            "رقم: 13\nالتاريخ: 12/05/2024\nالحالة: ساري\n\
             نحن أمير دولة قطر،\n\
             وعلى القانون رقم (19) لسنة 2007 بشأن المرور،\n\
             قررنا المصادقة على القانون الآتي:\n\
             المادة 1\nيستبدل بنص المادة (2) من القانون المشار إليه النص الآتي\n\
             الفصل الأول\nأحكام عامة\n\
             المادة 2\nنص\n\
             المادة 2 مكرر\nنص مكرر",
        );
        enrich(&document, "output1")
    }

    #[test]
    fn test_node_counts() {
        let graph = build_graph(&sample_law());

        assert_eq!(graph.count(Label::Law), 1);
        assert_eq!(graph.count(Label::Chapter), 1);
        assert_eq!(graph.count(Label::Article), 3);
    }

    #[test]
    fn test_uids() {
        let graph = build_graph(&sample_law());
        let keys: Vec<&str> = graph.nodes.iter().map(Node::key).collect();

        assert_eq!(
            keys,
            vec![
                "law_13_2024",
                "law_13_2024_ch_1",
                "law_13_2024_art_2",
                "law_13_2024_art_2_2",
                "law_13_2024_art_1",
            ]
        );
    }

    #[test]
    fn test_edges() {
        let graph = build_graph(&sample_law());
        let edges: Vec<(EdgeKind, &str, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.kind, e.source.as_str(), e.target.as_str()))
            .collect();

        assert_eq!(
            edges,
            vec![
                (EdgeKind::HasChapter, "law_13_2024", "law_13_2024_ch_1"),
                (EdgeKind::HasArticle, "law_13_2024_ch_1", "law_13_2024_art_2"),
                (EdgeKind::HasArticle, "law_13_2024_ch_1", "law_13_2024_art_2_2"),
                (EdgeKind::HasArticle, "law_13_2024", "law_13_2024_art_1"),
                (EdgeKind::Amends, "law_13_2024", "law_19_2007"),
            ]
        );
    }

    #[test]
    fn test_node_serializes_with_label() {
        let graph = build_graph(&sample_law());
        let json = serde_json::to_value(&graph.nodes[0]).unwrap();

        assert_eq!(json["label"], "Law");
        assert_eq!(json["law_id"], "law_13_2024");
        assert_eq!(json["status"], "ساري");

        let edge = serde_json::to_value(&graph.edges[0]).unwrap();
        assert_eq!(edge["type"], "HAS_CHAPTER");
    }
}
