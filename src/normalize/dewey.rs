// Dewey class-number rule.
//
// Drops every non-digit character (non-numeric prefixes, ';' '/' '-' '.'
// separators, quotes, spaces) and keeps the first three digits. Fewer
// than three digits means there is no usable classification: the result
// is the empty string, deliberately not a sentinel word, so "no
// classification" stays distinguishable from a text fallback.

/// Normalize a Dewey classification number to its first three digits.
pub fn normalize_dewey(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(3).collect();
    if digits.len() < 3 {
        String::new()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_three_digits() {
        assert_eq!(normalize_dewey("155.25"), "155");
        assert_eq!(normalize_dewey("123.456"), "123");
        assert_eq!(normalize_dewey("70904062"), "709");
        assert_eq!(normalize_dewey("70.904.062"), "709");
    }

    #[test]
    fn separators_and_prefixes_stripped() {
        assert_eq!(normalize_dewey("Co 867.6"), "867");
        assert_eq!(normalize_dewey("338.9/86106"), "338");
        assert_eq!(normalize_dewey(" 650.213 "), "650");
        assert_eq!(normalize_dewey("AB123CD456"), "123");
    }

    #[test]
    fn exactly_three_digits() {
        assert_eq!(normalize_dewey("523"), "523");
        assert_eq!(normalize_dewey("920"), "920");
    }

    #[test]
    fn too_few_digits_is_empty() {
        assert_eq!(normalize_dewey("5"), "");
        assert_eq!(normalize_dewey("88"), "");
        assert_eq!(normalize_dewey("ab"), "");
        assert_eq!(normalize_dewey(""), "");
    }

    #[test]
    fn idempotent() {
        assert_eq!(normalize_dewey("155"), "155");
        assert_eq!(normalize_dewey(""), "");
    }
}
