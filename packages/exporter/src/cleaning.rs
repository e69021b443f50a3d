//! Text cleaning before line classification.
//!
//! Extracted legislation text arrives with presentation-form glyphs,
//! Arabic-Indic digits and the publisher's page furniture (URLs with page
//! counters, running headers stamped with the print date, disclaimer
//! footers). This module normalizes the text and removes that furniture so
//! the parser sees one clean line stream.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Publisher URL followed by a page counter ("https://... 1/7").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static URL_PAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+[ \t]*\d+/\d+").expect("valid regex"));

/// Running header: a law citation on a line that also carries a print date or time.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RUNNING_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^.*قانون\s*رقم\s*\(\d+\)\s*لسنة\s*\d{4}.*?(?:\d{2}[:/]\d{2}[:/]\d{4}|\d{1,2}:\d{2}).*$",
    )
    .expect("valid regex")
});

/// Standalone print stamp ("10/02/2026 10:41").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}[ \t]*\d{1,2}:\d{2}").expect("valid regex"));

/// Disclaimer footer ("please do not consider this text official").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*الرجاء\s+عدم\s+اعتبار.*$").expect("valid regex"));

/// Copyright notice to end of line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COPYRIGHT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)©.*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Map an Arabic-Indic or Extended Arabic-Indic digit to ASCII.
fn fold_digit(c: char) -> char {
    match c {
        '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
        '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
        _ => c,
    }
}

/// Apply NFKC normalization and fold Arabic-Indic digits to ASCII.
///
/// NFKC maps presentation-form glyphs (U+FB50..U+FEFF) back to their base
/// letters, so later patterns only need the base spelling.
///
/// # Examples
/// ```
/// use qanun_exporter::cleaning::normalize_text;
///
/// assert_eq!(normalize_text("المادة ١٢"), "المادة 12");
/// assert_eq!(normalize_text("ﻗﺎﻧﻮﻥ"), "قانون");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.nfkc().map(fold_digit).collect()
}

/// Remove publisher page furniture and tidy whitespace.
///
/// Line structure is kept: matched furniture leaves an empty line, runs of
/// spaces and tabs shrink to one space (so indentation survives as a
/// single leading space), and three or more newlines shrink to two.
#[must_use]
pub fn strip_boilerplate(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = URL_PAGE_PATTERN.replace_all(&text, "");
    let text = RUNNING_HEADER_PATTERN.replace_all(&text, "");
    let text = DATE_TIME_PATTERN.replace_all(&text, "");
    let text = FOOTER_PATTERN.replace_all(&text, "");
    let text = COPYRIGHT_PATTERN.replace_all(&text, "");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Normalize, then strip boilerplate.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let cleaned = strip_boilerplate(&normalize_text(text));
    tracing::debug!(
        before = text.chars().count(),
        after = cleaned.chars().count(),
        "Text cleaned"
    );
    cleaned
}
