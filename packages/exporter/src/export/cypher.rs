//! Cypher statements for loading graph records into Neo4j.
//!
//! Query text is constant. Every value extracted from a document travels
//! in the parameter map, so article text never has to be escaped into a
//! query string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::graph::{Edge, EdgeKind, GraphExport, Label, Node};
use crate::error::Result;

/// Uniqueness constraints, run once before any data statement.
pub const SCHEMA_QUERIES: [&str; 3] = [
    "CREATE CONSTRAINT law_id IF NOT EXISTS FOR (l:Law) REQUIRE l.law_id IS UNIQUE",
    "CREATE CONSTRAINT article_uid IF NOT EXISTS FOR (a:Article) REQUIRE a.uid IS UNIQUE",
    "CREATE CONSTRAINT chapter_uid IF NOT EXISTS FOR (c:Chapter) REQUIRE c.uid IS UNIQUE",
];

const MERGE_LAW: &str = "MERGE (l:Law {law_id: $law_id}) \
SET l.title = $title, l.law_type = $law_type, l.status = $status, \
l.pub_date = $pub_date, l.number = $number, l.preamble = $preamble, \
l.updated_at = datetime()";

const MERGE_CHAPTER: &str = "MERGE (ch:Chapter {uid: $uid}) \
SET ch.title = $title, ch.chapter_index = $chapter_index, ch.law_id = $law_id";

const MERGE_ARTICLE: &str = "MERGE (a:Article {uid: $uid}) \
SET a.title = $title, a.article_number = $article_number, a.full_text = $full_text, \
a.embedding_text = $embedding_text, a.chapter_title = $chapter_title, \
a.keywords = $keywords, a.char_count = $char_count, a.law_id = $law_id";

const LINK_LAW_CHAPTER: &str = "MATCH (l:Law {law_id: $source}), (ch:Chapter {uid: $target}) \
MERGE (l)-[:HAS_CHAPTER]->(ch)";

const LINK_CHAPTER_ARTICLE: &str = "MATCH (ch:Chapter {uid: $source}), (a:Article {uid: $target}) \
MERGE (ch)-[:HAS_ARTICLE]->(a)";

const LINK_LAW_ARTICLE: &str = "MATCH (l:Law {law_id: $source}), (a:Article {uid: $target}) \
MERGE (l)-[:HAS_ARTICLE]->(a)";

const LINK_AMENDS: &str = "MATCH (l:Law {law_id: $source}) \
MERGE (r:Law {law_id: $target}) MERGE (l)-[:AMENDS]->(r)";

const LINK_REPEALS: &str = "MATCH (l:Law {law_id: $source}) \
MERGE (r:Law {law_id: $target}) MERGE (l)-[:REPEALS]->(r)";

/// A parameterized Cypher statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// Query text with `$name` placeholders.
    pub query: String,

    /// Values bound to the placeholders.
    pub params: Map<String, Value>,
}

impl CypherStatement {
    fn new(query: &str, params: Map<String, Value>) -> Self {
        Self {
            query: query.to_string(),
            params,
        }
    }
}

/// Schema statements, without parameters.
#[must_use]
pub fn schema_statements() -> Vec<CypherStatement> {
    SCHEMA_QUERIES
        .iter()
        .map(|q| CypherStatement::new(q, Map::new()))
        .collect()
}

/// Serialize a node's properties into a parameter map.
fn node_params(node: &Node) -> Result<Map<String, Value>> {
    let value = match node {
        Node::Law(n) => serde_json::to_value(n)?,
        Node::Chapter(n) => serde_json::to_value(n)?,
        Node::Article(n) => serde_json::to_value(n)?,
    };
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

fn node_query(node: &Node) -> &'static str {
    match node {
        Node::Law(_) => MERGE_LAW,
        Node::Chapter(_) => MERGE_CHAPTER,
        Node::Article(_) => MERGE_ARTICLE,
    }
}

/// Pick the query for an edge, or `None` for a combination the graph
/// never produces.
fn edge_query(edge: &Edge) -> Option<&'static str> {
    match (edge.kind, edge.source_label, edge.target_label) {
        (EdgeKind::HasChapter, Label::Law, Label::Chapter) => Some(LINK_LAW_CHAPTER),
        (EdgeKind::HasArticle, Label::Chapter, Label::Article) => Some(LINK_CHAPTER_ARTICLE),
        (EdgeKind::HasArticle, Label::Law, Label::Article) => Some(LINK_LAW_ARTICLE),
        (EdgeKind::Amends, Label::Law, Label::Law) => Some(LINK_AMENDS),
        (EdgeKind::Repeals, Label::Law, Label::Law) => Some(LINK_REPEALS),
        _ => None,
    }
}

/// Render the statements that load a graph: nodes first, then edges.
///
/// Schema statements are not included; see [`schema_statements`].
///
/// # Errors
/// Returns an error if a node cannot be serialized.
pub fn cypher_statements(graph: &GraphExport) -> Result<Vec<CypherStatement>> {
    let mut statements = Vec::with_capacity(graph.nodes.len() + graph.edges.len());

    for node in &graph.nodes {
        statements.push(CypherStatement::new(node_query(node), node_params(node)?));
    }

    for edge in &graph.edges {
        let Some(query) = edge_query(edge) else {
            tracing::warn!(
                kind = edge.kind.as_str(),
                source = %edge.source,
                target = %edge.target,
                "No query for edge"
            );
            continue;
        };
        let mut params = Map::new();
        params.insert("source".to_string(), Value::String(edge.source.clone()));
        params.insert("target".to_string(), Value::String(edge.target.clone()));
        statements.push(CypherStatement::new(query, params));
    }

    Ok(statements)
}
