// Title rule.
//
// Rule table:
//   1. trim leading digits/semicolons and trailing '/', ':', ',' runs
//   2. remove the symbol blacklist #%&*{}[]^~ (acronyms like "C++"
//      survive — '+' is never blacklisted)
//   3. normalize spacing around remaining punctuation
//   4. collapse internal whitespace
//   5. empty result yields "Sin título"

use regex_lite::Regex;
use std::sync::OnceLock;

use super::collapse_whitespace;

/// Sentinel for missing titles.
pub const UNKNOWN_TITLE: &str = "Sin título";

fn leading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d;]+").expect("static regex"))
}

fn trailing_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/,:\s]+$").expect("static regex"))
}

fn blacklist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#%&\*\{\}\[\]\^~]").expect("static regex"))
}

fn space_before_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([/,:;.])").expect("static regex"))
}

fn punct_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([/,:;.])\s+").expect("static regex"))
}

/// Normalize a main title (with optional subtitle markers).
pub fn normalize_title(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNKNOWN_TITLE.to_string();
    }

    let mut value = raw.trim().to_string();
    value = leading_re().replace(&value, "").into_owned();
    value = trailing_re().replace(&value, "").into_owned();
    value = blacklist_re().replace_all(&value, "").into_owned();
    value = space_before_punct_re()
        .replace_all(&value, "$1")
        .into_owned();
    value = punct_space_re().replace_all(&value, "$1 ").into_owned();
    value = collapse_whitespace(&value);

    if value.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        value
    }
}
