// Author-name rule.
//
// Rule table:
//   1. split multi-author fields on ';' (",;" counts as one separator)
//   2. strip academic titles (Dr., PhD., Ph.D., Mr., Mrs., Ms.)
//   3. keep "Surname, Name" order when already present
//   4. capitalize every space/hyphen token, except nobiliary particles
//      (von, van, de, ...) which stay lowercase in any position
//   5. rejoin multiple authors with "; "
//   6. empty/unknown input yields "Desconocido"

use super::collapse_whitespace;

/// Sentinel for missing author names.
pub const UNKNOWN_AUTHOR: &str = "Desconocido";

const ACADEMIC_TITLES: [&str; 6] = ["Dr.", "PhD.", "Ph.D.", "Mr.", "Mrs.", "Ms."];

/// Lowercase nobiliary particles, never capitalized.
const PARTICLES: [&str; 7] = ["von", "van", "de", "del", "la", "las", "los"];

/// Normalize one author field, possibly containing several names.
pub fn normalize_author(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches(['.', ',']);
    if trimmed.is_empty() {
        return UNKNOWN_AUTHOR.to_string();
    }

    if trimmed.contains(';') {
        return trimmed
            .split(';')
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(normalize_single)
            .collect::<Vec<_>>()
            .join("; ");
    }

    normalize_single(trimmed)
}

fn normalize_single(author: &str) -> String {
    let mut value = author.trim().trim_end_matches(['.', ',']).to_string();
    for title in ACADEMIC_TITLES {
        value = value.replace(title, "");
    }

    let parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let cased = match parts.as_slice() {
        [] => return UNKNOWN_AUTHOR.to_string(),
        [surname] => capitalize_name(surname),
        [surname, name, ..] => format!("{}, {}", capitalize_name(surname), capitalize_name(name)),
    };

    collapse_whitespace(&cased)
}

/// Capitalize every whitespace-separated token, honoring hyphenated
/// compounds and lowercase particles.
fn capitalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_token(token: &str) -> String {
    if token.contains('-') {
        return token
            .split('-')
            .map(capitalize_token)
            .collect::<Vec<_>>()
            .join("-");
    }

    let lower = token.to_lowercase();
    if PARTICLES.contains(&lower.as_str()) {
        return lower;
    }

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
