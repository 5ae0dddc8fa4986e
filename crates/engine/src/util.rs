//! Helpers for name normalization and identifier derivation.
//!
//! Persons and transactions are keyed by the slug of their display name, so
//! every path that accepts a name goes through these functions.

use deunicode::deunicode_char;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Turns a free-form name into an identifier.
///
/// The text is decomposed (NFKD) and stripped of combining marks, what is
/// left outside ASCII is transliterated, letters are lowercased and every run
/// of other characters collapses into a single `-`. Leading and trailing
/// hyphens are dropped.
///
/// ```rust
/// use engine::slugify;
///
/// assert_eq!(slugify("C'est déjà l'été."), "c-est-deja-l-ete");
/// assert_eq!(slugify("影師嗎"), "ying-shi-ma");
/// assert_eq!(slugify("   "), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    let mut push = |ch: char| {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    };
    for ch in text.nfkd().filter(|ch| !is_combining_mark(*ch)) {
        if ch.is_ascii() {
            push(ch);
        } else {
            // Unknown characters act as separators.
            deunicode_char(ch).unwrap_or(" ").chars().for_each(&mut push);
        }
    }
    out
}

/// Collapses inner whitespace of a display name and derives its slug.
///
/// Returns `(display, id)`; fails when nothing identifying is left.
pub(crate) fn normalize_name(value: &str, label: &str) -> ResultEngine<(String, String)> {
    let display = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if display.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    let id = slugify(&display);
    if id.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name \"{display}\" has no usable characters"
        )));
    }
    Ok((display, id))
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
