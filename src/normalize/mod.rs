// Per-field canonicalization rules.
//
// Each rule is a pure function from one field's raw string to either a
// canonical value or a documented fallback sentinel. Rules never look at
// other fields and never fail a record — the only record-wide rule
// (library presence) lives in records::router. The explicit FieldKind
// dispatch keeps the rule set statically enumerable and each rule
// independently testable.

pub mod author;
pub mod date;
pub mod dewey;
pub mod period;
pub mod place;
pub mod publisher;
pub mod title;

pub use author::normalize_author;
pub use date::normalize_date;
pub use dewey::normalize_dewey;
pub use period::normalize_period;
pub use place::normalize_place;
pub use publisher::normalize_publisher;
pub use title::normalize_title;

/// The normalizable field kinds. Subject headings are not listed here —
/// they go through the classifier, not a canonicalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Author,
    Title,
    Place,
    Date,
    Dewey,
    Period,
    Publisher,
}

impl FieldKind {
    /// Stable enumeration order; output columns follow it.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Author,
        FieldKind::Title,
        FieldKind::Place,
        FieldKind::Date,
        FieldKind::Dewey,
        FieldKind::Period,
        FieldKind::Publisher,
    ];
}

/// Result of one rule application.
///
/// `Pair` carries rules that keep up to two values (place, publisher).
/// `Maybe` carries rules whose "no data" outcome is null rather than a
/// sentinel string (date, period) — distinct from a legitimately empty
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    One(String),
    Pair(String, String),
    Maybe(Option<String>),
}

impl Normalized {
    /// Cell values to write for this result, in output-column order.
    /// A null "no data" value serializes as an empty cell.
    pub fn into_cells(self) -> Vec<String> {
        match self {
            Normalized::One(v) => vec![v],
            Normalized::Pair(a, b) => vec![a, b],
            Normalized::Maybe(v) => vec![v.unwrap_or_default()],
        }
    }
}

/// The strategy table: apply the rule for `kind` to one raw cell.
pub fn apply(kind: FieldKind, raw: &str) -> Normalized {
    match kind {
        FieldKind::Author => Normalized::One(normalize_author(raw)),
        FieldKind::Title => Normalized::One(normalize_title(raw)),
        FieldKind::Place => {
            let (a, b) = normalize_place(raw);
            Normalized::Pair(a, b)
        }
        FieldKind::Date => Normalized::Maybe(normalize_date(raw)),
        FieldKind::Dewey => Normalized::One(normalize_dewey(raw)),
        FieldKind::Period => Normalized::Maybe(normalize_period(raw)),
        FieldKind::Publisher => {
            let (a, b) = normalize_publisher(raw);
            Normalized::Pair(a, b)
        }
    }
}

/// Collapse runs of whitespace to single spaces and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
