// Record models for one batch run.
//
// A Record is one source row, identified by its position in the batch.
// After routing, every record belongs to exactly one of two disjoint
// sets: kept (goes on to normalization) or discarded (carries a
// machine-readable reason and receives no further work).

pub mod router;

/// One source row: raw cell values aligned to the table headers.
/// Missing cells are empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row position in the source batch (0-based, after the header row).
    pub index: usize,
    pub values: Vec<String>,
}

impl Record {
    /// Cell at a column index; empty string when the row is short.
    pub fn cell(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Why a record was routed to the discard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// No library-holding column carries a value.
    MissingLibrary,
}

impl DiscardReason {
    /// Machine-readable code written to the discard output.
    pub fn code(&self) -> &'static str {
        match self {
            DiscardReason::MissingLibrary => "missing-library",
        }
    }
}

/// A discarded record with its reason. Disjoint from the kept set.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardedRecord {
    pub record: Record,
    pub reason: DiscardReason,
}

/// Result of routing one batch.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub kept: Vec<Record>,
    pub discarded: Vec<DiscardedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_out_of_range_is_empty() {
        let record = Record {
            index: 0,
            values: vec!["a".into()],
        };
        assert_eq!(record.cell(0), "a");
        assert_eq!(record.cell(5), "");
    }

    #[test]
    fn reason_codes() {
        assert_eq!(DiscardReason::MissingLibrary.code(), "missing-library");
    }
}
