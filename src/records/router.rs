// Discard routing.
//
// The library-presence rule runs before any per-field normalization:
// records failing it are moved to the discard set and receive no further
// work. Every other rule recovers locally with a sentinel and never
// discards.

use tracing::{info, warn};

use super::{DiscardReason, DiscardedRecord, Partition, Record};
use crate::schema::TableSchema;

/// Split a batch into kept and discarded records.
///
/// A record is kept when at least one library column is non-empty. A
/// table with no library columns at all keeps everything — there is
/// nothing to route on.
pub fn partition(records: Vec<Record>, schema: &TableSchema) -> Partition {
    if schema.library_columns.is_empty() {
        warn!("No library columns found in the table; keeping every record");
        return Partition {
            kept: records,
            discarded: Vec::new(),
        };
    }

    let mut result = Partition::default();
    for record in records {
        if has_library(&record, schema) {
            result.kept.push(record);
        } else {
            result.discarded.push(DiscardedRecord {
                record,
                reason: DiscardReason::MissingLibrary,
            });
        }
    }

    info!(
        kept = result.kept.len(),
        discarded = result.discarded.len(),
        "Routed records by library presence"
    );
    result
}

fn has_library(record: &Record, schema: &TableSchema) -> bool {
    schema
        .library_columns
        .iter()
        .any(|&col| !record.cell(col).trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, values: &[&str]) -> Record {
        Record {
            index,
            values: values.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn schema_with_libraries(columns: Vec<usize>) -> TableSchema {
        TableSchema {
            library_columns: columns,
            fields: Vec::new(),
            subject_column: None,
        }
    }

    #[test]
    fn records_without_any_library_are_discarded() {
        let schema = schema_with_libraries(vec![0, 1]);
        let records = vec![
            record(0, &["Lib1", "", "x"]),
            record(1, &["", "", "y"]),
            record(2, &["", "Lib2", "z"]),
        ];

        let partition = partition(records, &schema);
        assert_eq!(partition.kept.len(), 2);
        assert_eq!(partition.discarded.len(), 1);
        assert_eq!(partition.discarded[0].record.index, 1);
        assert_eq!(partition.discarded[0].reason, DiscardReason::MissingLibrary);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let schema = schema_with_libraries(vec![0]);
        let partition = partition(vec![record(0, &["   "])], &schema);
        assert!(partition.kept.is_empty());
        assert_eq!(partition.discarded.len(), 1);
    }

    #[test]
    fn discard_regardless_of_other_fields() {
        // Rich record content never rescues a record with no library.
        let schema = schema_with_libraries(vec![0]);
        let partition = partition(
            vec![record(0, &["", "García Márquez, Gabriel", "2020", "Bogotá"])],
            &schema,
        );
        assert!(partition.kept.is_empty());
        assert_eq!(partition.discarded.len(), 1);
    }

    #[test]
    fn no_library_columns_keeps_everything() {
        let schema = schema_with_libraries(Vec::new());
        let partition = partition(vec![record(0, &[""]), record(1, &[""])], &schema);
        assert_eq!(partition.kept.len(), 2);
        assert!(partition.discarded.is_empty());
    }

    #[test]
    fn sets_are_disjoint_and_complete() {
        let schema = schema_with_libraries(vec![0]);
        let records: Vec<Record> = (0..10)
            .map(|i| record(i, if i % 3 == 0 { &[""] } else { &["Lib"] }))
            .collect();
        let partition = partition(records, &schema);
        assert_eq!(partition.kept.len() + partition.discarded.len(), 10);
    }
}
