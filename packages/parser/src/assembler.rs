//! Single-pass document assembly.
//!
//! The [`Assembler`] walks the line stream once, asks the
//! [`LineClassifier`] what each line is for the current [`Phase`], and
//! builds the [`Document`]. At most one section and one article are open
//! at any time; closing them appends them exactly once to their owner.
//!
//! Nothing here fails. A line that matches no rule for the current phase
//! is dropped and counted in [`AssemblyStats`].

use crate::classifier::{Line, LineClassifier, LineKind, Phase};
use crate::error::Result;
use crate::grammar::Grammar;
use crate::metadata::MetadataExtractor;
use crate::types::{Article, Document, Section};

/// Counters collected while assembling a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Lines fed to the assembler.
    pub lines: usize,
    /// Empty or bullet-only lines.
    pub noise: usize,
    /// Running-title repetitions discarded.
    pub boilerplate: usize,
    /// Lines that matched no rule in their phase.
    pub dropped: usize,
}

/// Stateful builder for one document.
///
/// Feed lines in source order with [`Assembler::feed`] and call
/// [`Assembler::finish`] at end of input.
#[derive(Debug)]
pub struct Assembler<'p> {
    classifier: &'p LineClassifier,
    extractor: &'p MetadataExtractor,
    phase: Phase,
    document: Document,
    open_section: Option<Section>,
    open_article: Option<Article>,
    stats: AssemblyStats,
}

impl<'p> Assembler<'p> {
    /// Create an assembler in the metadata phase.
    #[must_use]
    pub fn new(classifier: &'p LineClassifier, extractor: &'p MetadataExtractor) -> Self {
        Self {
            classifier,
            extractor,
            phase: Phase::Metadata,
            document: Document::default(),
            open_section: None,
            open_article: None,
            stats: AssemblyStats::default(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> &AssemblyStats {
        &self.stats
    }

    /// Process one source line.
    pub fn feed(&mut self, raw: &str) {
        self.stats.lines += 1;

        let Some(line) = self.classifier.prepare(raw) else {
            self.stats.noise += 1;
            return;
        };

        let kind = self.classifier.classify(&line, self.phase);
        if self.phase.is_front_matter() {
            self.on_front_matter(line, kind);
        } else if self.phase == Phase::Preamble {
            self.on_preamble(line, kind);
        } else {
            self.on_body(line, kind);
        }
    }

    /// Close whatever is still open and return the document.
    #[must_use]
    pub fn finish(mut self) -> Document {
        self.close_section();

        tracing::debug!(
            lines = self.stats.lines,
            noise = self.stats.noise,
            boilerplate = self.stats.boilerplate,
            dropped = self.stats.dropped,
            sections = self.document.sections.len(),
            articles = self.document.article_count(),
            "Document assembled"
        );

        self.document
    }

    fn enter(&mut self, phase: Phase) {
        debug_assert!(phase >= self.phase, "phases only move forward");
        if phase != self.phase {
            tracing::debug!(from = %self.phase, to = %phase, "Phase transition");
            self.phase = phase;
        }
    }

    fn drop_line(&mut self, line: &Line<'_>, reason: &'static str) {
        self.stats.dropped += 1;
        tracing::trace!(phase = %self.phase, reason, line = line.clean, "Line dropped");
    }

    fn skip_boilerplate(&mut self, line: &Line<'_>) {
        self.stats.boilerplate += 1;
        tracing::trace!(phase = %self.phase, line = line.clean, "Running title skipped");
    }

    fn on_front_matter(&mut self, line: Line<'_>, kind: LineKind) {
        match kind {
            LineKind::Toc(text) => {
                if !text.is_empty() {
                    self.document.table_of_contents.push(text);
                }
                self.enter(Phase::Toc);
            }
            LineKind::PreambleStart => {
                self.enter(Phase::Preamble);
                self.document.preamble.push(line.clean.to_string());
            }
            kind if kind.is_heading() => {
                self.enter(Phase::Body);
                self.on_body(line, kind);
            }
            LineKind::Metadata => {
                if self
                    .extractor
                    .extract_into(line.clean, &mut self.document.metadata)
                    == 0
                {
                    self.drop_line(&line, "no metadata pair");
                }
            }
            LineKind::Boilerplate => self.skip_boilerplate(&line),
            _ => self.drop_line(&line, "unexpected line before body"),
        }
    }

    fn on_preamble(&mut self, line: Line<'_>, kind: LineKind) {
        match kind {
            LineKind::Boilerplate => self.skip_boilerplate(&line),
            LineKind::PreambleEnd => {
                self.document.preamble.push(line.clean.to_string());
                self.enter(Phase::Body);
            }
            LineKind::SectionHeading => {
                // Ratification clause lost at a page break.
                tracing::debug!(line = line.clean, "Preamble closed by section heading");
                self.enter(Phase::Body);
                self.on_body(line, kind);
            }
            _ => self.document.preamble.push(line.clean.to_string()),
        }
    }

    fn on_body(&mut self, line: Line<'_>, kind: LineKind) {
        match kind {
            LineKind::SectionHeading => {
                self.close_section();
                self.open_section = Some(Section::new(line.clean));
            }
            LineKind::ArticleHeading => {
                self.close_article();
                self.open_article = Some(Article::new(line.clean));
            }
            LineKind::Boilerplate => self.skip_boilerplate(&line),
            _ => self.on_body_text(line),
        }
    }

    fn on_body_text(&mut self, line: Line<'_>) {
        if let Some(article) = self.open_article.as_mut() {
            article.body_lines.push(line.clean.to_string());
            return;
        }

        let classifier = self.classifier;
        let grammar = classifier.grammar();
        let Some(section) = self.open_section.as_mut() else {
            self.drop_line(&line, "no open section or article");
            return;
        };

        if line.clean.chars().count() <= grammar.continuation_max_chars {
            section.title.push_str(&grammar.continuation_separator);
            section.title.push_str(line.clean);
        } else {
            self.drop_line(&line, "too long for a section title");
        }
    }

    fn close_article(&mut self) {
        let Some(article) = self.open_article.take() else {
            return;
        };
        match self.open_section.as_mut() {
            Some(section) => section.articles.push(article),
            None => self.document.top_level_articles.push(article),
        }
    }

    fn close_section(&mut self) {
        self.close_article();
        if let Some(mut section) = self.open_section.take() {
            section.index = self.document.sections.len() + 1;
            self.document.sections.push(section);
        }
    }
}

/// Compiled grammar ready to parse documents.
///
/// Holds no per-document state; one parser can serve any number of
/// assemblers, including from several threads at once.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    classifier: LineClassifier,
    extractor: MetadataExtractor,
}

impl DocumentParser {
    /// Compile a parser from a grammar.
    ///
    /// # Errors
    /// Returns an error if the grammar is invalid.
    pub fn new(grammar: Grammar) -> Result<Self> {
        let extractor = MetadataExtractor::new(&grammar)?;
        let classifier = LineClassifier::new(grammar)?;
        Ok(Self {
            classifier,
            extractor,
        })
    }

    /// Get the line classifier.
    #[must_use]
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Get the metadata extractor.
    #[must_use]
    pub fn extractor(&self) -> &MetadataExtractor {
        &self.extractor
    }

    /// Start assembling a new document.
    #[must_use]
    pub fn assembler(&self) -> Assembler<'_> {
        Assembler::new(&self.classifier, &self.extractor)
    }

    /// Parse an ordered sequence of lines.
    pub fn parse_lines<I, S>(&self, lines: I) -> Document
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assembler = self.assembler();
        for line in lines {
            assembler.feed(line.as_ref());
        }
        assembler.finish()
    }

    /// Parse a text blob, one line per `\n`.
    #[must_use]
    pub fn parse_text(&self, text: &str) -> Document {
        self.parse_lines(text.lines())
    }
}

impl Default for DocumentParser {
    #[allow(clippy::expect_used)] // The built-in grammar is covered by tests
    fn default() -> Self {
        Self::new(Grammar::default()).expect("default grammar is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Document {
        DocumentParser::default().parse_lines(lines)
    }

    #[test]
    fn test_empty_input() {
        let doc = parse(&[]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_noise_only_input() {
        let doc = parse(&["", "  ", "• •"]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_flat_document() {
        let doc = parse(&["المادة 1", "نص أول", "المادة 2", "نص ثان", "تتمة"]);

        assert!(doc.sections.is_empty());
        assert_eq!(doc.top_level_articles.len(), 2);
        assert_eq!(doc.top_level_articles[0].body_lines, vec!["نص أول"]);
        assert_eq!(doc.top_level_articles[1].body_lines, vec!["نص ثان", "تتمة"]);
    }

    #[test]
    fn test_sections_are_indexed_in_order() {
        let doc = parse(&[
            "الفصل الأول",
            "المادة 1",
            "نص",
            "الفصل الثاني",
            "المادة 2",
            "الفصل الثالث",
        ]);

        let indexes: Vec<_> = doc.sections.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(doc.sections[0].articles.len(), 1);
        assert_eq!(doc.sections[1].articles.len(), 1);
        assert!(doc.sections[2].articles.is_empty());
    }

    #[test]
    fn test_section_title_continuation() {
        let long = "ن".repeat(61);
        let doc = parse(&["الفصل الأول", "التعاريف", &long, "المادة 1"]);

        assert_eq!(doc.sections[0].title, "الفصل الأول - التعاريف");
        assert_eq!(doc.sections[0].articles.len(), 1);
    }

    #[test]
    fn test_continuation_at_limit_is_kept() {
        let exact = "ن".repeat(60);
        let doc = parse(&["الفصل الأول", &exact]);
        assert_eq!(doc.sections[0].title, format!("الفصل الأول - {exact}"));
    }

    #[test]
    fn test_word_form_headings_with_text_open_articles() {
        let doc = parse(&[
            "الفصل الأول",
            "المادة الأولى",
            "نص أول",
            "المادة الثانية - نطاق التطبيق والأحكام العامة",
            "نص ثان",
            "المادة الثالثة يعمل بهذا القانون من تاريخ نشره",
        ]);

        let articles = &doc.sections[0].articles;
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].body_lines, vec!["نص أول"]);
        assert_eq!(
            articles[1].heading,
            "المادة الثانية - نطاق التطبيق والأحكام العامة"
        );
        assert_eq!(articles[1].body_lines, vec!["نص ثان"]);
        assert_eq!(
            articles[2].heading,
            "المادة الثالثة يعمل بهذا القانون من تاريخ نشره"
        );
        assert!(articles[2].body_lines.is_empty());
    }

    #[test]
    fn test_article_before_first_section_stays_top_level() {
        let doc = parse(&["المادة 1", "نص", "الفصل الأول", "المادة 2"]);

        assert_eq!(doc.top_level_articles.len(), 1);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].articles[0].heading, "المادة 2");
    }

    #[test]
    fn test_metadata_then_preamble_then_body() {
        let doc = parse(&[
            "بطاقة التشريع",
            "العنوان: قانون المرور الرقم: 13",
            "نحن أمير دولة قطر،",
            "بعد الاطلاع على الدستور،",
            "قررنا المصادقة على القانون الآتي:",
            "المادة 1",
            "يعمل بهذا القانون.",
        ]);

        assert_eq!(doc.metadata.len(), 2);
        assert_eq!(doc.preamble.len(), 3);
        assert_eq!(doc.top_level_articles.len(), 1);
    }

    #[test]
    fn test_preamble_closed_by_section_heading() {
        let doc = parse(&[
            "نحن أمير دولة قطر،",
            "وعلى اقتراح الوزير،",
            "الفصل الأول",
            "المادة 1",
        ]);

        assert_eq!(doc.preamble.len(), 2);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "الفصل الأول");
    }

    #[test]
    fn test_article_heading_in_preamble_is_preamble_text() {
        let doc = parse(&["نحن أمير دولة قطر،", "المادة 1", "قررنا المصادقة على القانون الآتي:"]);

        assert_eq!(doc.preamble.len(), 3);
        assert_eq!(doc.article_count(), 0);
    }

    #[test]
    fn test_body_boilerplate_dropped() {
        let parser = DocumentParser::default();
        let mut assembler = parser.assembler();
        for line in ["المادة 1", "نص", "قانون رقم (13) لسنة 2024 بشأن المرور", "تتمة"] {
            assembler.feed(line);
        }
        assert_eq!(assembler.stats().boilerplate, 1);

        let doc = assembler.finish();
        assert_eq!(doc.top_level_articles[0].body_lines, vec!["نص", "تتمة"]);
    }

    #[test]
    fn test_toc_lines_only_before_body() {
        let doc = parse(&[
            "\u{F0DA} الفصل الأول",
            "   الفصل الثاني",
            "الفصل الأول",
            "   الفصل الثاني",
        ]);

        assert_eq!(doc.table_of_contents, vec!["الفصل الأول", "الفصل الثاني"]);
        assert_eq!(doc.sections.len(), 2);
    }

    #[test]
    fn test_plain_line_after_toc_is_dropped() {
        let parser = DocumentParser::default();
        let mut assembler = parser.assembler();
        assembler.feed("\u{F0DA} الفصل الأول");
        assembler.feed("الرقم: 13");
        assert_eq!(assembler.phase(), Phase::Toc);
        assert_eq!(assembler.stats().dropped, 1);

        assert!(assembler.finish().metadata.is_empty());
    }

    #[test]
    fn test_stats_count_lines() {
        let parser = DocumentParser::default();
        let mut assembler = parser.assembler();
        for line in ["", "المادة 1", "نص"] {
            assembler.feed(line);
        }
        assert_eq!(
            *assembler.stats(),
            AssemblyStats {
                lines: 3,
                noise: 1,
                boilerplate: 0,
                dropped: 0,
            }
        );
    }
}
