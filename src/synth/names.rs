//! Name Explanation
//!
//! Turns an identifier into a short English clause using casing segmentation and a
//! fixed table of verb prefixes.

use crate::constants::composer::MIN_EXPLAINED_WORDS;

/// Role of the identifier being explained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// Functions and methods
    Function,
    /// Constants and variables
    Value,
}

/// Split an identifier into lowercase words at camel/Pascal case and
/// non-alphanumeric boundaries. Acronyms stay together: `HTTPServer` is `http server`.
pub fn segment(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();

    for part in identifier.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = part.chars().collect();
        let mut current = String::new();

        for (idx, &ch) in chars.iter().enumerate() {
            if idx > 0 && ch.is_uppercase() {
                let prev = chars[idx - 1];
                let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
                if (!prev.is_uppercase() || next_is_lower) && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.extend(ch.to_lowercase());
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

/// Explain an identifier as a clause such as `that retrieve the user by id`.
///
/// Returns an empty string when the identifier segments into fewer than two words.
pub fn explain(identifier: &str, role: NameRole) -> String {
    let words = segment(identifier);
    if words.len() < MIN_EXPLAINED_WORDS {
        return String::new();
    }

    let phrase = words.join(" ");

    if role == NameRole::Value && phrase.contains("url") {
        let rest = phrase
            .replace("url", " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if rest.is_empty() {
            return String::new();
        }
        return format!("that indicates the endpoint URL for accessing to {}", rest);
    }

    let remainder = words[1..].join(" ");
    match words[0].as_str() {
        "get" => format!("that retrieve the {}", remainder),
        "set" => format!("which update the {}", remainder),
        "init" => format!("to initializes the {}", remainder),
        "is" | "has" => format!("to check the {}", remainder),
        // TODO: give delete/create/update/handle/process/run/load/save/shutdown their own clauses
        _ => format!("which execute {}", phrase),
    }
}
