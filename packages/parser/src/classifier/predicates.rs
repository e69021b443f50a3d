//! Predicates deciding what a single line is.

use regex::Regex;

use super::types::{Line, LineKind, Phase};
use crate::error::{ParserError, Result};
use crate::grammar::Grammar;

/// Stateless classifier compiled from a [`Grammar`].
///
/// Every method is a pure function of its input line; the only state is
/// the grammar and the patterns compiled from it.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    grammar: Grammar,
    article_pattern: Regex,
    preamble_start_pattern: Regex,
    issuance_pattern: Regex,
}

impl LineClassifier {
    /// Compile a classifier from a grammar.
    ///
    /// # Errors
    /// Returns an error if the grammar is incomplete or a derived pattern
    /// does not compile.
    pub fn new(grammar: Grammar) -> Result<Self> {
        grammar.validate()?;

        let article_pattern = compile(
            "article_keyword",
            &article_pattern_source(&grammar),
        )?;
        let preamble_start_pattern = compile(
            "preamble_start",
            &format!(r"^{}\s", regex::escape(grammar.preamble_start.trim())),
        )?;
        let issuance_pattern = compile(
            "issuance_keyword",
            &format!(r"^{}\s", regex::escape(grammar.issuance_keyword.trim())),
        )?;

        Ok(Self {
            grammar,
            article_pattern,
            preamble_start_pattern,
            issuance_pattern,
        })
    }

    /// Get the grammar this classifier was built from.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn is_bullet(&self, c: char) -> bool {
        self.grammar.bullet_chars.contains(&c)
    }

    /// Strip a raw line down to its content.
    ///
    /// Returns `None` for noise: lines that are empty, whitespace, or only
    /// bullet glyphs.
    #[must_use]
    pub fn prepare<'a>(&self, raw: &'a str) -> Option<Line<'a>> {
        let raw = raw.trim_end_matches(|c: char| c == '\r' || c == '\n');
        let clean = raw
            .trim_start_matches(|c: char| c.is_whitespace() || self.is_bullet(c))
            .trim_end_matches(|c: char| c.is_whitespace() || self.is_bullet(c));

        if clean.is_empty() {
            None
        } else {
            Some(Line { raw, clean })
        }
    }

    /// Check for a chapter or part heading.
    ///
    /// After removing elongation, the text must start with a section
    /// keyword and contain an ordinal word. Prose that merely mentions a
    /// chapter fails the ordinal test.
    #[must_use]
    pub fn is_section_heading(&self, text: &str) -> bool {
        let stripped: String = text
            .chars()
            .filter(|c| *c != self.grammar.elongation_char)
            .collect();
        let stripped = stripped.trim();

        self.grammar
            .section_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| stripped.starts_with(k.as_str()))
            && self
                .grammar
                .ordinals
                .iter()
                .filter(|o| !o.is_empty())
                .any(|o| stripped.contains(o.as_str()))
    }

    /// Check for an article heading in any supported numbering style.
    #[must_use]
    pub fn is_article_heading(&self, text: &str) -> bool {
        self.article_pattern.is_match(text.trim())
    }

    /// Check for a table-of-contents entry.
    ///
    /// Either the line starts with the TOC marker, or it is indented and
    /// its content is a section heading or the issuance-articles entry.
    #[must_use]
    pub fn is_toc_line(&self, raw: &str) -> bool {
        let line = raw.trim_end();
        if line.starts_with(self.grammar.toc_marker) {
            return true;
        }
        if line.starts_with(char::is_whitespace) {
            let inner = line.trim();
            return self.is_section_heading(inner) || self.issuance_pattern.is_match(inner);
        }
        false
    }

    /// Remove the TOC marker and surrounding whitespace.
    #[must_use]
    pub fn toc_text<'a>(&self, raw: &'a str) -> &'a str {
        let marker = self.grammar.toc_marker;
        raw.trim_start_matches(|c: char| c == marker || c.is_whitespace())
            .trim()
    }

    /// Check for the opening phrase of the preamble.
    #[must_use]
    pub fn is_preamble_start(&self, text: &str) -> bool {
        self.preamble_start_pattern.is_match(text)
    }

    /// Check for the ratification clause.
    #[must_use]
    pub fn is_preamble_end(&self, text: &str) -> bool {
        text.contains(self.grammar.ratification_phrase.as_str())
    }

    /// Check for the running title phrase.
    #[must_use]
    pub fn is_title_repetition(&self, text: &str) -> bool {
        !self.grammar.title_phrase.is_empty() && text.contains(self.grammar.title_phrase.as_str())
    }

    /// Check for a running title repeated inside the preamble.
    ///
    /// Preamble lines that cite other laws also contain the title phrase;
    /// those carry a citation marker and are kept.
    #[must_use]
    pub fn is_preamble_boilerplate(&self, text: &str) -> bool {
        self.is_title_repetition(text)
            && !self
                .grammar
                .preamble_citation_markers
                .iter()
                .filter(|m| !m.is_empty())
                .any(|m| text.contains(m.as_str()))
    }

    /// Check for a running title repeated inside the body.
    #[must_use]
    pub fn is_body_boilerplate(&self, text: &str) -> bool {
        self.is_title_repetition(text)
            && !self.is_section_heading(text)
            && !self.is_article_heading(text)
    }

    /// Check for a running title the given phase discards.
    ///
    /// Front matter discards every title repetition; the preamble and the
    /// body apply their own exemptions.
    #[must_use]
    pub fn is_boilerplate(&self, text: &str, phase: Phase) -> bool {
        match phase {
            Phase::Metadata | Phase::Toc => self.is_title_repetition(text),
            Phase::Preamble => self.is_preamble_boilerplate(text),
            Phase::Body => self.is_body_boilerplate(text),
        }
    }

    /// Classify a prepared line for the given phase.
    ///
    /// Section headings are always tested before article headings.
    #[must_use]
    pub fn classify(&self, line: &Line<'_>, phase: Phase) -> LineKind {
        let text = line.clean;
        match phase {
            Phase::Metadata | Phase::Toc => {
                if self.is_toc_line(line.raw) {
                    LineKind::Toc(self.toc_text(line.raw).to_string())
                } else if self.is_preamble_start(text) {
                    LineKind::PreambleStart
                } else if self.is_section_heading(text) {
                    LineKind::SectionHeading
                } else if self.is_article_heading(text) {
                    LineKind::ArticleHeading
                } else if phase == Phase::Toc {
                    LineKind::Plain
                } else if self.is_title_repetition(text) {
                    LineKind::Boilerplate
                } else {
                    LineKind::Metadata
                }
            }
            Phase::Preamble => {
                if self.is_preamble_boilerplate(text) {
                    LineKind::Boilerplate
                } else if self.is_preamble_end(text) {
                    LineKind::PreambleEnd
                } else if self.is_section_heading(text) {
                    LineKind::SectionHeading
                } else {
                    LineKind::Plain
                }
            }
            Phase::Body => {
                if self.is_section_heading(text) {
                    LineKind::SectionHeading
                } else if self.is_article_heading(text) {
                    LineKind::ArticleHeading
                } else if self.is_title_repetition(text) {
                    LineKind::Boilerplate
                } else {
                    LineKind::Plain
                }
            }
        }
    }

    /// Prepare and classify a raw line in one step.
    #[must_use]
    pub fn classify_raw(&self, raw: &str, phase: Phase) -> LineKind {
        self.prepare(raw)
            .map_or(LineKind::Noise, |line| self.classify(&line, phase))
    }
}

/// Build the article heading pattern.
///
/// Alternatives: dash then digits, digits alone (Western or Arabic-Indic),
/// a known article ordinal followed by anything (a label or inline text),
/// or any word-form ordinal of up to `ordinal_max_tokens` tokens that ends
/// the line.
fn article_pattern_source(grammar: &Grammar) -> String {
    let keyword = regex::escape(grammar.article_keyword.trim());
    let prefix = regex::escape(&grammar.ordinal_prefix);
    let extra_tokens = grammar.ordinal_max_tokens.saturating_sub(1);

    let ordinals: Vec<String> = grammar
        .article_ordinals
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(regex::escape)
        .collect();
    // An empty group would match every line
    let labelled = if ordinals.is_empty() {
        String::new()
    } else {
        format!(r"|(?:{})(?:[\s\-–:،.]|$)", ordinals.join("|"))
    };

    format!(
        r"^{keyword}\s*(?:-\s*[0-9٠-٩۰-۹]+|[0-9٠-٩۰-۹]+{labelled}|{prefix}\S+(?:\s+\S+){{0,{extra_tokens}}}\s*$)"
    )
}

fn compile(field: &'static str, source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|source| ParserError::InvalidPattern { field, source })
}
