//! Citations of other laws.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::References;
use crate::config::{AMEND_MARKERS, REPEAL_MARKERS};

/// Law citation: "قانون رقم (N) لسنة YYYY".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAW_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"قانون\s+رقم\s*\((\d+)\)\s*لسنة\s*(\d{4})").expect("valid regex")
});

/// Find laws cited in a law's preamble and body.
///
/// Citations become law IDs (`law_{number}_{year}`), de-duplicated in order
/// of first appearance. Citations of `own_id` are left out. All citations
/// count as amended when the text uses an amendment marker and as repealed
/// when it uses a repeal marker.
///
/// # Examples
/// ```
/// use qanun_exporter::enrichment::extract_references;
///
/// let preamble = vec!["وعلى القانون رقم (19) لسنة 2007 بشأن المرور،".to_string()];
/// let refs = extract_references(&preamble, "يلغى القانون رقم (19) لسنة 2007.", "law_13_2024");
///
/// assert_eq!(refs.references, vec!["law_19_2007"]);
/// assert_eq!(refs.repeals, vec!["law_19_2007"]);
/// assert!(refs.amends.is_empty());
/// ```
#[must_use]
pub fn extract_references(preamble: &[String], body: &str, own_id: &str) -> References {
    let text = format!("{} {body}", preamble.join(" "));

    let mut seen = HashSet::new();
    let references: Vec<String> = LAW_CITATION
        .captures_iter(&text)
        .filter_map(|caps| {
            let (Some(number), Some(year)) = (caps.get(1), caps.get(2)) else {
                return None;
            };
            Some(format!("law_{}_{}", number.as_str(), year.as_str()))
        })
        .filter(|id| id != own_id)
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let amends = if AMEND_MARKERS.iter().any(|m| text.contains(m)) {
        references.clone()
    } else {
        Vec::new()
    };
    let repeals = if REPEAL_MARKERS.iter().any(|m| text.contains(m)) {
        references.clone()
    } else {
        Vec::new()
    };

    References {
        references,
        amends,
        repeals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_citations_deduplicated_in_order() {
        let preamble = lines(&[
            "وعلى القانون رقم (19) لسنة 2007،",
            "وعلى القانون رقم (4) لسنة 2010،",
        ]);
        let refs = extract_references(&preamble, "وفقاً للقانون رقم (19) لسنة 2007", "law_13_2024");

        assert_eq!(refs.references, vec!["law_19_2007", "law_4_2010"]);
        assert!(refs.amends.is_empty());
        assert!(refs.repeals.is_empty());
    }

    #[test]
    fn test_self_citation_excluded() {
        let refs = extract_references(&[], "يعمل بأحكام القانون رقم (13) لسنة 2024", "law_13_2024");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_amendment_marker() {
        let refs = extract_references(
            &[],
            "يستبدل بنص المادة (5) من القانون رقم (19) لسنة 2007 النص الآتي",
            "law_13_2024",
        );
        assert_eq!(refs.amends, vec!["law_19_2007"]);
        assert!(refs.repeals.is_empty());
    }

    #[test]
    fn test_repeal_marker_with_damma() {
        let refs = extract_references(&[], "يُلغى القانون رقم (19) لسنة 2007", "law_13_2024");
        assert_eq!(refs.repeals, vec!["law_19_2007"]);
    }

    #[test]
    fn test_flexible_spacing() {
        let refs = extract_references(&[], "قانون  رقم(7)لسنة  1999", "law_1_2000");
        assert_eq!(refs.references, vec!["law_7_1999"]);
    }
}
