//! Small English composition helpers.

use crate::constants::composer::PRIVATE_MARKER;
use crate::decl::is_exported;

/// Indefinite article for a word, by a case-insensitive first-letter vowel test
pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// `word` preceded by its indefinite article
pub fn with_article(word: &str) -> String {
    format!("{} {}", indefinite_article(word), word)
}

/// `private ` for unexported identifiers, empty otherwise
pub fn private_marker(identifier: &str) -> &'static str {
    if is_exported(identifier) {
        ""
    } else {
        PRIVATE_MARKER
    }
}
