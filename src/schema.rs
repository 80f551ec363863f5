// Recognized-column schema for KOHA catalogue exports.
//
// Column names correspond to MARC21 subfields as they appear in the
// tabular export. Detection is by exact header match; columns the schema
// doesn't recognize pass through the pipeline untouched.

use crate::normalize::FieldKind;

/// Library-holding columns. A record is only valid when at least one of
/// these is non-empty (see records::router).
pub const LIBRARY_COLUMNS: [&str; 7] = [
    "Biblioteca_1",
    "Biblioteca_2",
    "Biblioteca_3",
    "Biblioteca_4",
    "Biblioteca_5",
    "Biblioteca_6",
    "Biblioteca_7",
];

/// Column holding the free-text subject headings fed to the classifier.
pub const SUBJECT_COLUMN: &str = "Tema principal";

/// Output column for the matched controlled term.
pub const TOPIC_COLUMN: &str = "tema general";
/// Output column for the match's cosine similarity score.
pub const TOPIC_SCORE_COLUMN: &str = "puntaje tema general";

/// Output column carrying the machine-readable discard reason.
pub const DISCARD_REASON_COLUMN: &str = "motivo de descarte";

/// The expected header for each normalizable field kind.
pub fn expected_column(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Author => "Nombre principal (autor)",
        FieldKind::Title => "Título principal",
        FieldKind::Place => "Lugar de publicación",
        FieldKind::Date => "Fecha de publicación",
        FieldKind::Dewey => "Número de clasificación Dewey",
        FieldKind::Period => "Periodo cronológico",
        FieldKind::Publisher => "Editorial",
    }
}

/// Names of the normalized output columns derived from a source column.
///
/// Most rules add one ` normalizado` column; place and publisher keep up
/// to two values and add two.
pub fn output_columns(kind: FieldKind, source: &str) -> Vec<String> {
    match kind {
        FieldKind::Place => vec![
            format!("{source} ciudad 1 normalizado"),
            format!("{source} ciudad 2 normalizado"),
        ],
        FieldKind::Publisher => vec![
            format!("{source} 1 normalizado"),
            format!("{source} 2 normalizado"),
        ],
        _ => vec![format!("{source} normalizado")],
    }
}

/// The subset of the expected schema actually present in a loaded table.
///
/// Field order follows FieldKind::ALL, so output columns land in a stable
/// order regardless of the source column order.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Indices of the library columns found in the header row.
    pub library_columns: Vec<usize>,
    /// (field kind, column index) for each recognized normalizable column.
    pub fields: Vec<(FieldKind, usize)>,
    /// Index of the subject-heading column, when present.
    pub subject_column: Option<usize>,
}

impl TableSchema {
    /// Match a header row against the expected schema.
    pub fn detect(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let library_columns = LIBRARY_COLUMNS
            .iter()
            .filter_map(|name| find(name))
            .collect();

        let fields = FieldKind::ALL
            .iter()
            .filter_map(|&kind| find(expected_column(kind)).map(|idx| (kind, idx)))
            .collect();

        Self {
            library_columns,
            fields,
            subject_column: find(SUBJECT_COLUMN),
        }
    }
}
