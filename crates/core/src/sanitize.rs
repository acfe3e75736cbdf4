//! Broadcast-payload sanitization
//!
//! Translated text is stripped of everything that is not a word character or
//! whitespace before fan-out: letters, digits, underscore, and whitespace
//! survive; punctuation, symbols, and emoji are removed.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Remove every non-word, non-whitespace character.
///
/// Pure and deterministic; `clean(clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}
