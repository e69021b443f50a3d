//! Line classification for de-shaped legislation text.
//!
//! The classifier is a set of pure predicates over a single line. The
//! assembler asks it for a [`LineKind`] given the current [`Phase`], so the
//! same surface text can mean different things before and after the body
//! begins (an indented chapter heading is a TOC entry up front and a real
//! heading later).

mod predicates;
mod types;

pub use predicates::LineClassifier;
pub use types::{Line, LineKind, Phase};
