// Publication-date rule.
//
// Extracts every run of exactly four digits after clearing copyright
// marks, circa/aprox tokens, brackets and question marks, then keeps the
// numerically largest (a range like "2019-2020" resolves to its most
// recent year). No year found means no data — None, never "" or 0.

use regex_lite::Regex;
use std::sync::OnceLock;

fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[;#©\\\[\]\?]"#).expect("static regex"))
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)circa|aprox\.?|c\.").expect("static regex"))
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4}\b").expect("static regex"))
}

/// Extract the most recent four-digit year, or None when the field holds
/// no usable date.
pub fn normalize_date(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let cleaned = noise_re().replace_all(raw, "").into_owned();
    let cleaned = token_re().replace_all(&cleaned, "").into_owned();
    let cleaned = cleaned.trim_end_matches('.');

    year_re()
        .find_iter(cleaned)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .max()
        .map(|y| y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_year() {
        assert_eq!(normalize_date("2020"), Some("2020".to_string()));
    }

    #[test]
    fn range_picks_largest() {
        assert_eq!(normalize_date("2019-2020"), Some("2020".to_string()));
        assert_eq!(normalize_date("1999, 2005, 2001"), Some("2005".to_string()));
    }

    #[test]
    fn copyright_and_circa() {
        assert_eq!(normalize_date("©2021"), Some("2021".to_string()));
        assert_eq!(normalize_date("c.2018"), Some("2018".to_string()));
        assert_eq!(normalize_date("circa 1995"), Some("1995".to_string()));
        assert_eq!(normalize_date("aprox. 1987"), Some("1987".to_string()));
    }

    #[test]
    fn brackets_and_question_marks() {
        assert_eq!(normalize_date("[2003?]"), Some("2003".to_string()));
    }

    #[test]
    fn no_year_is_none() {
        assert_eq!(normalize_date("sin fecha"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("s.f."), None);
    }

    #[test]
    fn only_exact_four_digit_runs() {
        // Five digits is not a year; three digits is not a year.
        assert_eq!(normalize_date("12345"), None);
        assert_eq!(normalize_date("999"), None);
        assert_eq!(normalize_date("19999 y 2010"), Some("2010".to_string()));
    }

    #[test]
    fn idempotent() {
        let once = normalize_date("2019-2020").unwrap();
        assert_eq!(normalize_date(&once), Some(once.clone()));
    }
}
