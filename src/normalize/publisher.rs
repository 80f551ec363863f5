// Publisher rule.
//
// Splits on ',' or ';' keeping at most the first two entries, strips
// parenthetical edition/location notes, title-cases each token (all-caps
// tokens such as acronyms stay as-is), and falls back to
// "Editorial no identificada" for empty or unclear input.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Sentinel for publishers that cannot be determined.
pub const UNKNOWN_PUBLISHER: &str = "Editorial no identificada";

fn parenthetical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)").expect("static regex"))
}

/// Normalize a publisher field into up to two entries.
///
/// The second string is empty when the field names a single publisher.
pub fn normalize_publisher(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "##" || trimmed == UNKNOWN_PUBLISHER {
        return (UNKNOWN_PUBLISHER.to_string(), String::new());
    }

    let value = parenthetical_re().replace_all(trimmed, "").into_owned();
    let value = value.replace(",;", ";").replace(',', ";");

    let mut entries: Vec<String> = value
        .split(';')
        .map(|e| e.trim().trim_matches('.'))
        .filter(|e| !e.is_empty())
        .take(2)
        .map(title_case)
        .collect();

    match entries.len() {
        0 => (UNKNOWN_PUBLISHER.to_string(), String::new()),
        1 => (entries.remove(0), String::new()),
        _ => {
            let second = entries.remove(1);
            (entries.remove(0), second)
        }
    }
}

/// Capitalize each word, leaving fully uppercase words (acronyms) alone.
fn title_case(entry: &str) -> String {
    entry
        .split_whitespace()
        .map(|word| {
            if is_all_caps(word) {
                word.to_string()
            } else {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_publisher_title_cased() {
        assert_eq!(
            normalize_publisher("planeta"),
            ("Planeta".into(), "".into())
        );
        assert_eq!(
            normalize_publisher("fondo de cultura económica"),
            ("Fondo De Cultura Económica".into(), "".into())
        );
    }

    #[test]
    fn acronyms_preserved() {
        assert_eq!(
            normalize_publisher("UNAM"),
            ("UNAM".into(), "".into())
        );
        assert_eq!(
            normalize_publisher("ediciones SM"),
            ("Ediciones SM".into(), "".into())
        );
    }

    #[test]
    fn keeps_first_two_entries() {
        assert_eq!(
            normalize_publisher("Planeta; Norma; Alfaguara"),
            ("Planeta".into(), "Norma".into())
        );
        assert_eq!(
            normalize_publisher("Planeta, Norma"),
            ("Planeta".into(), "Norma".into())
        );
    }

    #[test]
    fn comma_semicolon_is_one_separator() {
        assert_eq!(
            normalize_publisher("Planeta,; Norma"),
            ("Planeta".into(), "Norma".into())
        );
    }

    #[test]
    fn parentheticals_stripped() {
        assert_eq!(
            normalize_publisher("Alfaguara (Madrid)"),
            ("Alfaguara".into(), "".into())
        );
        assert_eq!(
            normalize_publisher("Norma (2a ed.)"),
            ("Norma".into(), "".into())
        );
    }

    #[test]
    fn unknown_markers() {
        assert_eq!(
            normalize_publisher(""),
            (UNKNOWN_PUBLISHER.into(), "".into())
        );
        assert_eq!(
            normalize_publisher("##"),
            (UNKNOWN_PUBLISHER.into(), "".into())
        );
        assert_eq!(
            normalize_publisher(" ;; "),
            (UNKNOWN_PUBLISHER.into(), "".into())
        );
    }

    #[test]
    fn idempotent() {
        for raw in ["Planeta", "Ediciones SM", UNKNOWN_PUBLISHER] {
            let (once, _) = normalize_publisher(raw);
            assert_eq!(once, raw);
        }
    }
}
