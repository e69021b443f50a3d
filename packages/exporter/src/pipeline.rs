//! Pipeline service that ties cleaning, parsing, enrichment and export together.

use std::fs;
use std::path::{Path, PathBuf};

use qanun_parser::{Document, DocumentParser};

use crate::cleaning::clean_text;
use crate::config::{
    validate_input, validate_output_dir, CYPHER_ALL_FILE, CYPHER_PREFIX, EMBEDDING_FILE,
    ENHANCED_PREFIX, GRAPH_PREFIX,
};
use crate::enrichment::{enrich, EnrichedLaw};
use crate::error::{ExportError, Result};
use crate::export::{
    article_records, build_graph, cypher_statements, output_path, schema_statements,
    write_document, write_jsonl, ArticleRecord, CypherStatement, OutputFormat,
};

/// Result of exporting one law.
#[derive(Debug, Clone)]
pub struct LawExport {
    /// Source file stem.
    pub stem: String,

    /// The enriched law.
    pub law: EnrichedLaw,

    /// Number of graph nodes written.
    pub nodes: usize,

    /// Number of Cypher statements written, schema included.
    pub statements: usize,

    /// Node and edge statements, without the schema.
    pub cypher: Vec<CypherStatement>,

    /// Files written for this law.
    pub files: Vec<PathBuf>,
}

/// Result of exporting several laws.
#[derive(Debug, Clone)]
pub struct BatchExport {
    /// Per-law results in input order.
    pub laws: Vec<LawExport>,

    /// Combined article record file.
    pub records_file: PathBuf,

    /// Number of article records written.
    pub records: usize,

    /// Combined Cypher file for every law.
    pub cypher_file: PathBuf,

    /// Number of statements in the combined Cypher file.
    pub cypher_statements: usize,
}

/// Get the file stem used in output names and law ID fallbacks.
#[must_use]
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "law".to_string())
}

/// Read an input file, cleaning it unless `raw` is set.
///
/// # Errors
/// Returns an error if the file is missing or unreadable.
pub fn load_text(path: &Path, raw: bool) -> Result<String> {
    validate_input(path)?;
    let text = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(if raw { text } else { clean_text(&text) })
}

/// Read and parse one input file.
///
/// # Arguments
/// * `parser` - Parser compiled from the active grammar
/// * `path` - Extracted law text
/// * `raw` - Skip cleaning when the text is already clean
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn parse_file(parser: &DocumentParser, path: &Path, raw: bool) -> Result<Document> {
    let text = load_text(path, raw)?;
    let document = parser.parse_text(&text);

    if document.article_count() == 0 {
        tracing::warn!(path = %path.display(), "No articles found");
    }
    Ok(document)
}

/// Parse, enrich and export one law.
///
/// Writes `enhanced_<stem>.json`, `graph_<stem>.json` and
/// `cypher_<stem>.jsonl` into `out_dir`.
///
/// # Errors
/// Returns an error if reading, serialization or writing fails.
pub fn export_law(
    parser: &DocumentParser,
    path: &Path,
    out_dir: &Path,
    raw: bool,
) -> Result<LawExport> {
    let stem = file_stem(path);
    let document = parse_file(parser, path, raw)?;
    let law = enrich(&document, &stem);
    let graph = build_graph(&law);

    let cypher = cypher_statements(&graph)?;
    let schema = schema_statements();

    let enhanced_path = output_path(out_dir, ENHANCED_PREFIX, &stem, "json");
    write_document(&law, &enhanced_path, OutputFormat::Json)?;

    let graph_path = output_path(out_dir, GRAPH_PREFIX, &stem, "json");
    write_document(&graph, &graph_path, OutputFormat::Json)?;

    let cypher_path = output_path(out_dir, CYPHER_PREFIX, &stem, "jsonl");
    let statement_count = write_jsonl(schema.iter().chain(&cypher), &cypher_path)?;

    tracing::info!(
        law_id = %law.law_id,
        articles = law.articles.len(),
        statements = statement_count,
        "Law exported"
    );

    Ok(LawExport {
        stem,
        nodes: graph.nodes.len(),
        law,
        statements: statement_count,
        cypher,
        files: vec![enhanced_path, graph_path, cypher_path],
    })
}

/// Export several laws, a combined article record file and a combined
/// Cypher file.
///
/// The combined Cypher file runs the schema statements once, then every
/// law's statements in input order. The output directory must already
/// exist. Inputs are processed in order; the first failure stops the batch.
///
/// # Errors
/// Returns an error if the output directory is invalid or any law fails.
pub fn export_batch(
    parser: &DocumentParser,
    inputs: &[PathBuf],
    out_dir: &Path,
    raw: bool,
) -> Result<BatchExport> {
    validate_output_dir(out_dir)?;

    let laws = inputs
        .iter()
        .map(|path| export_law(parser, path, out_dir, raw))
        .collect::<Result<Vec<_>>>()?;

    let records: Vec<ArticleRecord> = laws
        .iter()
        .flat_map(|export| article_records(&export.law))
        .collect();
    let records_file = out_dir.join(EMBEDDING_FILE);
    let count = write_jsonl(&records, &records_file)?;

    let schema = schema_statements();
    let cypher_file = out_dir.join(CYPHER_ALL_FILE);
    let cypher_count = write_jsonl(
        schema
            .iter()
            .chain(laws.iter().flat_map(|export| &export.cypher)),
        &cypher_file,
    )?;

    tracing::info!(
        laws = laws.len(),
        records = count,
        statements = cypher_count,
        "Batch exported"
    );

    Ok(BatchExport {
        laws,
        records_file,
        records: count,
        cypher_file,
        cypher_statements: cypher_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const LAW: &str = "رقم: 13\nالتاريخ: 12/05/2024\n\
                       الفصل الأول\nالمادة 1\nنص\nالمادة ٢\nنص آخر";

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("dir/output3.txt")), "output3");
    }

    #[test]
    fn test_load_text_cleans_unless_raw() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("law.txt");
        fs::write(&path, "المادة ٣\r\n").unwrap();

        assert_eq!(load_text(&path, false).unwrap(), "المادة 3");
        assert_eq!(load_text(&path, true).unwrap(), "المادة ٣\r\n");
    }

    #[test]
    fn test_load_text_missing_file() {
        assert!(matches!(
            load_text(Path::new("/nonexistent/law.txt"), false),
            Err(ExportError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_export_law_writes_three_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("output1.txt");
        fs::write(&input, LAW).unwrap();

        let export = export_law(&DocumentParser::default(), &input, dir.path(), false).unwrap();

        assert_eq!(export.law.law_id, "law_13_2024");
        assert_eq!(export.nodes, 4);
        assert_eq!(export.statements, 3 + 4 + 3);
        for file in &export.files {
            assert!(file.exists(), "missing {}", file.display());
        }
        assert!(dir.path().join("enhanced_output1.json").exists());
        assert!(dir.path().join("graph_output1.json").exists());
        assert!(dir.path().join("cypher_output1.jsonl").exists());
    }

    #[test]
    fn test_export_batch_combines_records() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("output1.txt");
        let second = dir.path().join("output2.txt");
        fs::write(&first, LAW).unwrap();
        fs::write(&second, "المادة 1\nنص").unwrap();

        let batch = export_batch(
            &DocumentParser::default(),
            &[first, second],
            dir.path(),
            false,
        )
        .unwrap();

        assert_eq!(batch.laws.len(), 2);
        assert_eq!(batch.records, 3);
        let content = fs::read_to_string(&batch.records_file).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("law_2_unknown"));

        // Schema once, then 7 statements for the first law and 3 for the second
        assert_eq!(batch.cypher_file, dir.path().join("cypher_all.jsonl"));
        assert_eq!(batch.cypher_statements, 3 + 7 + 3);
        let cypher = fs::read_to_string(&batch.cypher_file).unwrap();
        let constraints = cypher
            .lines()
            .filter(|l| l.contains("CREATE CONSTRAINT"))
            .count();
        assert_eq!(constraints, 3);
    }

    #[test]
    fn test_export_batch_requires_out_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("out");

        assert!(matches!(
            export_batch(&DocumentParser::default(), &[], &missing, false),
            Err(ExportError::OutputDirMissing(_))
        ));
    }
}
