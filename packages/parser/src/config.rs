//! Default keyword tables and limits for Arabic legislation.
//!
//! These constants seed [`Grammar::default`](crate::grammar::Grammar).
//! A deployment that needs a different document family overrides them
//! through a grammar file instead of editing code.

/// Keywords that open a section heading ("chapter" and "part").
pub const SECTION_KEYWORDS: [&str; 2] = ["الفصل", "الباب"];

/// Ordinal words, first through tenth.
///
/// A section heading must contain one of these in addition to starting
/// with a section keyword.
pub const ORDINALS: [&str; 10] = [
    "الأول",
    "الثاني",
    "الثالث",
    "الرابع",
    "الخامس",
    "السادس",
    "السابع",
    "الثامن",
    "التاسع",
    "العاشر",
];

/// Kashida (tatweel) used to stretch headings in typeset text.
pub const ELONGATION_CHAR: char = '\u{0640}';

/// Lead keyword of an article heading.
pub const ARTICLE_KEYWORD: &str = "المادة";

/// Definite-article prefix that opens a word-form ordinal ("الأولى").
pub const ORDINAL_PREFIX: &str = "ال";

/// Maximum tokens in a word-form article ordinal that fills its line
/// ("الحادية عشرة مكرر").
pub const ORDINAL_MAX_TOKENS: usize = 4;

/// Feminine ordinals that open a word-form article number.
///
/// A heading whose first word after the lead keyword is one of these may
/// carry a label or inline text after the ordinal. Compound ordinals
/// ("الحادية عشرة", "الحادية والعشرون") start with one of these words.
pub const ARTICLE_ORDINALS: [&str; 20] = [
    "الأولى",
    "الثانية",
    "الثالثة",
    "الرابعة",
    "الخامسة",
    "السادسة",
    "السابعة",
    "الثامنة",
    "التاسعة",
    "العاشرة",
    "الحادية",
    "العشرون",
    "الثلاثون",
    "الأربعون",
    "الخمسون",
    "الستون",
    "السبعون",
    "الثمانون",
    "التسعون",
    "المائة",
];

/// Private-use glyph the publisher prints in front of TOC entries.
pub const TOC_MARKER: char = '\u{F0DA}';

/// Keyword of the "issuance articles" TOC entry.
pub const ISSUANCE_KEYWORD: &str = "مواد";

/// First-person plural opening of the preamble ("We, ...").
pub const PREAMBLE_START: &str = "نحن";

/// Ratification clause that closes the preamble.
pub const RATIFICATION_PHRASE: &str = "قررنا المصادقة على القانون";

/// Running title phrase repeated on every page ("Law No.").
pub const TITLE_PHRASE: &str = "قانون رقم";

/// Preamble lines citing other laws start with one of these and are kept
/// even though they contain [`TITLE_PHRASE`].
pub const PREAMBLE_CITATION_MARKERS: [&str; 2] = ["نحن", "وعلى"];

/// Label of the metadata card, in both yeh spellings.
pub const CARD_LABEL_PATTERN: &str = "بطاقة التشر[یي]ع";

/// Bullet glyphs stripped from both ends of a line.
pub const BULLET_CHARS: [char; 1] = ['•'];

/// Longest line (in characters) accepted as a section-title continuation.
pub const CONTINUATION_MAX_CHARS: usize = 60;

/// Separator placed between a section title and its continuation lines.
pub const CONTINUATION_SEPARATOR: &str = " - ";
