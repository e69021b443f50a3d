//! Configuration constants and validation functions for the exporter.

use std::fs;
use std::path::Path;

use qanun_parser::Grammar;

use crate::error::{ExportError, Result};

/// Legal keywords tagged on articles, in reporting order.
pub const LEGAL_KEYWORDS: [&str; 49] = [
    "عقوبة",
    "غرامة",
    "حبس",
    "سجن",
    "مصادرة",
    "تعويض",
    "ترخيص",
    "تصريح",
    "تعريف",
    "حظر",
    "يحظر",
    "يجوز",
    "يلتزم",
    "يُعاقب",
    "مادة",
    "إلغاء",
    "تعديل",
    "إضافة",
    "حقوق",
    "واجبات",
    "التزام",
    "جريمة",
    "محكمة",
    "قاضي",
    "نيابة",
    "استئناف",
    "حكم",
    "قرار",
    "وزير",
    "رئيس",
    "تسجيل",
    "شهادة",
    "رهن",
    "ضمان",
    "إشهار",
    "أولوية",
    "استيراد",
    "تصدير",
    "عبور",
    "شحنة",
    "صناعي",
    "تبريد",
    "مرخص له",
    "مشترك",
    "مستهلك",
    "كهربائية",
    "مائية",
    "منشآت",
    "حماية",
];

/// Metadata keys holding the law number, most specific first.
pub const NUMBER_KEYS: [&str; 2] = ["رقم", "الرقم"];

/// Metadata keys holding the law date, in both yeh spellings.
pub const DATE_KEYS: [&str; 2] = ["التاريخ", "التاریخ"];

/// Metadata key holding the in-force status.
pub const STATUS_KEY: &str = "الحالة";

/// Metadata key holding the gazette publication reference.
pub const PUBLICATION_KEY: &str = "النشر";

/// Year placeholder used in law IDs when no date is known.
pub const UNKNOWN_YEAR: &str = "unknown";

/// Markers that make a law's citations amendments.
pub const AMEND_MARKERS: [&str; 2] = ["يستبدل", "بتعديل"];

/// Markers that make a law's citations repeals.
pub const REPEAL_MARKERS: [&str; 2] = ["يُلغى", "يلغى"];

/// Date formats tried when reading the metadata date.
pub const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y/%m/%d", "%Y-%m-%d", "%d-%m-%Y"];

/// File name prefix of the enriched law JSON.
pub const ENHANCED_PREFIX: &str = "enhanced_";

/// File name prefix of the graph record JSON.
pub const GRAPH_PREFIX: &str = "graph_";

/// File name prefix of the Cypher statement stream.
pub const CYPHER_PREFIX: &str = "cypher_";

/// Combined embedding record stream written by a batch export.
pub const EMBEDDING_FILE: &str = "articles_for_embedding.jsonl";

/// Combined Cypher load script written by a batch export.
pub const CYPHER_ALL_FILE: &str = "cypher_all.jsonl";

/// Load a grammar, or the built-in Arabic grammar when no file is given.
///
/// Fields missing from the file keep their default values.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid grammar.
pub fn load_grammar(path: Option<&Path>) -> Result<Grammar> {
    let Some(path) = path else {
        return Ok(Grammar::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grammar: Grammar =
        serde_yaml_ng::from_str(&content).map_err(|source| ExportError::GrammarFile {
            path: path.to_path_buf(),
            source,
        })?;
    grammar.validate()?;

    tracing::debug!(path = %path.display(), "Loaded grammar file");
    Ok(grammar)
}

/// Validate that an input file exists.
///
/// # Errors
/// Returns [`ExportError::InputNotFound`] if it does not.
pub fn validate_input(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ExportError::InputNotFound(path.to_path_buf()))
    }
}

/// Validate that an output directory exists and is a directory.
///
/// # Errors
/// Returns [`ExportError::OutputDirMissing`] or [`ExportError::NotADirectory`].
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ExportError::OutputDirMissing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ExportError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
