// Publication-place rule.
//
// Rule table:
//   1. strip parenthetical content and its delimiters
//   2. apply the ordered replacement table of known variants
//   3. split on commas, keep at most the first two cities
//   4. strip digits and residual symbols, collapse whitespace
//   5. empty input or an unclear marker ("##", leading '#') yields the
//      "Lugar no identificado" sentinel
//
// Names not in the table are preserved as-is, accents included.

use regex_lite::Regex;
use std::sync::OnceLock;

use super::collapse_whitespace;

/// Sentinel for places that cannot be determined.
pub const UNKNOWN_PLACE: &str = "Lugar no identificado";

/// Known spelling/formatting variants, applied in order. The final entry
/// undoes the double expansion the México rule produces on input that is
/// already canonical, which keeps the rule a fixed point.
const CITY_REPLACEMENTS: [(&str, &str); 10] = [
    ("Santafé de Bogotá", "Bogotá"),
    ("Bogota", "Bogotá"),
    ("Cartagena de Indias", "Cartagena"),
    ("México", "Ciudad de México"),
    ("Mexico", "Ciudad de México"),
    ("Köln", "Colonia"),
    ("Koln", "Colonia"),
    ("Salmanca", "Salamanca"),
    ("New York", "Nueva York"),
    ("Ciudad de Ciudad de México", "Ciudad de México"),
];

fn parenthetical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)").expect("static regex"))
}

/// Normalize a publication place into up to two cities.
///
/// The second string is empty when the field names a single city.
pub fn normalize_place(raw: &str) -> (String, String) {
    if raw.trim().is_empty() {
        return (UNKNOWN_PLACE.to_string(), String::new());
    }

    let mut value = raw
        .trim()
        .replace(';', ",")
        .replace([':', '[', ']', '©'], "");
    value = parenthetical_re().replace_all(&value, "").into_owned();
    value = collapse_whitespace(&value);

    let mut cities: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .take(2)
        .map(normalize_city)
        .collect();

    match cities.len() {
        0 => (UNKNOWN_PLACE.to_string(), String::new()),
        1 => (cities.remove(0), String::new()),
        _ => {
            let second = cities.remove(1);
            (cities.remove(0), second)
        }
    }
}

fn normalize_city(city: &str) -> String {
    let mut value = city.to_string();
    for (variant, canonical) in CITY_REPLACEMENTS {
        if value.contains(variant) {
            value = value.replace(variant, canonical);
        }
    }

    // Digits in a place cell are stray dates or collation noise.
    value = value.chars().filter(|c| !c.is_ascii_digit()).collect();
    value = collapse_whitespace(&value);

    let lower = value.to_lowercase();
    if value.is_empty()
        || lower.contains("no identificado")
        || lower.contains("##")
        || value.starts_with('#')
    {
        return UNKNOWN_PLACE.to_string();
    }

    value
}
