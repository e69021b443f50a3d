//! Types for the line classifier.

use std::fmt;

/// Assembler phase.
///
/// Phases only move forward. `Metadata` and `Toc` form one combined front
/// matter phase that may jump straight to `Preamble` or `Body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Metadata card lines before anything else.
    Metadata,
    /// Table-of-contents entries.
    Toc,
    /// Declaratory introduction.
    Preamble,
    /// Operative sections and articles.
    Body,
}

impl Phase {
    /// True while TOC detection and metadata extraction are still possible.
    #[must_use]
    pub fn is_front_matter(self) -> bool {
        matches!(self, Self::Metadata | Self::Toc)
    }

    /// Get the lowercase name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Toc => "toc",
            Self::Preamble => "preamble",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-noise source line.
///
/// Keeps the raw form (leading indentation matters for TOC detection)
/// next to the trimmed, bullet-stripped form every other rule works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line as received, without the trailing newline.
    pub raw: &'a str,

    /// Trimmed line with bullets stripped from both ends.
    pub clean: &'a str,
}

/// Semantic category of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or bullet-only line.
    Noise,
    /// Table-of-contents entry, with the marker removed.
    Toc(String),
    /// Chapter or part heading.
    SectionHeading,
    /// Article heading.
    ArticleHeading,
    /// First line of the preamble.
    PreambleStart,
    /// Ratification clause closing the preamble.
    PreambleEnd,
    /// Metadata card line.
    Metadata,
    /// Repeated running title.
    Boilerplate,
    /// Anything else.
    Plain,
}

impl LineKind {
    /// True for section and article headings.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::SectionHeading | Self::ArticleHeading)
    }
}
