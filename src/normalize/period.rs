// Chronological-period rule.
//
// Recognizes "Siglo <value>" (case-insensitive, arbitrary spacing) with a
// roman or arabic century, and ranges of centuries or literal years, and
// normalizes to an uppercase roman numeral. Literal years take
// precedence: the most recent year maps to its century (1830-1990 → XX).
// Otherwise the largest roman century introduced by "siglo(s)" or a range
// dash wins. Nothing recognizable yields None — the no-data value,
// distinct from an empty string.

use regex_lite::Regex;
use std::sync::OnceLock;

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").expect("static regex"))
}

fn arabic_century_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"siglos?\s*(\d{1,2})\b").expect("static regex"))
}

fn roman_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Longest alternatives first so "xxi" never matches as "xx".
    RE.get_or_init(|| {
        Regex::new(
            r"(?:siglos?\s*|-)(xxi|xx|xix|xviii|xvii|xvi|xv|xiv|xiii|xii|xi|x|ix|viii|vii|vi|v|iv|iii|ii|i)",
        )
        .expect("static regex")
    })
}

/// Normalize a chronological period to a century in roman numerals.
pub fn normalize_period(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let value = raw.to_lowercase();
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");

    // Literal years first: a range resolves to its most recent endpoint.
    // "0000" is a placeholder, not year zero — there is no century for it.
    let latest_year = year_re()
        .find_iter(&value)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|&year| year > 0)
        .max();
    if let Some(year) = latest_year {
        return Some(to_roman(century_of(year)));
    }

    // "Siglo 20" style arabic centuries and roman centuries compete on
    // numeric value; the most recent wins.
    let arabic = arabic_century_re()
        .captures_iter(&value)
        .filter_map(|c| c.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
        .max();
    let roman = roman_re()
        .captures_iter(&value)
        .filter_map(|c| c.get(1).map(|m| roman_value(m.as_str())))
        .max();

    match arabic.max(roman) {
        Some(century) if century > 0 => Some(to_roman(century)),
        _ => None,
    }
}

/// Century a year belongs to (1901-2000 → 20). Callers filter out year
/// zero before mapping.
fn century_of(year: u32) -> u32 {
    year.saturating_sub(1) / 100 + 1
}

/// Lowercase or uppercase roman numeral to its numeric value.
fn roman_value(roman: &str) -> u32 {
    let digit = |c: char| match c.to_ascii_uppercase() {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => 0,
    };

    let mut total = 0i64;
    let mut prev = 0i64;
    for c in roman.chars().rev() {
        let cur = i64::from(digit(c));
        if cur >= prev {
            total += cur;
        } else {
            total -= cur;
        }
        prev = cur;
    }
    total.max(0) as u32
}

/// Numeric value to an uppercase roman numeral.
fn to_roman(mut value: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (step, numeral) in TABLE {
        while value >= step {
            out.push_str(numeral);
            value -= step;
        }
    }
    out
}
