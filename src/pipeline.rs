// Batch cleaning pipeline.
//
// One run over a loaded table: detect the schema, route records through
// the library-presence filter, apply every recognized field rule, and
// optionally classify subject headings. Source columns are never
// modified; every rule writes to new columns appended after the
// originals, so a diff against the source stays trivial.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{info, warn};

use crate::classify::TopicClassifier;
use crate::normalize::{self, FieldKind};
use crate::records::{router, Record};
use crate::schema::{self, TableSchema};
use crate::tables::Table;

/// Counts for one cleaning run, for the end-of-run report.
#[derive(Debug, Clone, Default)]
pub struct CleanSummary {
    pub total: usize,
    pub kept: usize,
    pub discarded: usize,
    /// Discard counts keyed by machine-readable reason code.
    pub discard_reasons: BTreeMap<String, usize>,
    /// Field kinds actually normalized in this run.
    pub normalized_fields: Vec<FieldKind>,
    /// Subject cells that received a controlled term, when
    /// classification ran.
    pub classified: Option<usize>,
}

/// Everything a cleaning run produces.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub processed: Table,
    pub discarded: Table,
    pub summary: CleanSummary,
}

/// Run the cleaning pipeline over a loaded table.
///
/// Pass a classifier to also assign controlled vocabulary terms to the
/// subject column; without one, classification is skipped entirely.
pub fn clean_table(table: &Table, classifier: Option<&TopicClassifier>) -> Result<CleanOutcome> {
    let table_schema = TableSchema::detect(&table.headers);

    if table_schema.fields.is_empty() {
        warn!("No recognized normalizable columns in header row; rows pass through unchanged");
    }

    let records: Vec<Record> = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, values)| Record {
            index,
            values: values.clone(),
        })
        .collect();
    let total = records.len();

    let partition = router::partition(records, &table_schema);

    let mut summary = CleanSummary {
        total,
        kept: partition.kept.len(),
        discarded: partition.discarded.len(),
        normalized_fields: table_schema.fields.iter().map(|&(k, _)| k).collect(),
        ..CleanSummary::default()
    };
    for discarded in &partition.discarded {
        *summary
            .discard_reasons
            .entry(discarded.reason.code().to_string())
            .or_default() += 1;
    }

    let mut processed = normalize_records(table, &table_schema, &partition.kept);

    if let Some(classifier) = classifier {
        match table_schema.subject_column {
            Some(column) => {
                let matched = classify_column(&mut processed, &partition.kept, column, classifier)?;
                summary.classified = Some(matched);
            }
            None => warn!(
                column = schema::SUBJECT_COLUMN,
                "Classification requested but the subject column is missing; skipping"
            ),
        }
    }

    let discarded = discarded_table(table, &partition.discarded);

    info!(
        total = summary.total,
        kept = summary.kept,
        discarded = summary.discarded,
        "Cleaning run complete"
    );

    Ok(CleanOutcome {
        processed,
        discarded,
        summary,
    })
}

/// Apply every recognized field rule, appending output columns in
/// FieldKind::ALL order.
fn normalize_records(table: &Table, table_schema: &TableSchema, kept: &[Record]) -> Table {
    let mut headers = table.headers.clone();
    for &(kind, column) in &table_schema.fields {
        headers.extend(schema::output_columns(kind, &table.headers[column]));
    }

    let width = table.headers.len();
    let rows = kept
        .iter()
        .map(|record| {
            let mut row = record.values.clone();
            row.resize(width, String::new());
            for &(kind, column) in &table_schema.fields {
                row.extend(normalize::apply(kind, record.cell(column)).into_cells());
            }
            row
        })
        .collect();

    Table { headers, rows }
}

/// Classify the subject column of every kept record, appending the
/// topic and score columns. Returns the number of cells that matched.
fn classify_column(
    processed: &mut Table,
    kept: &[Record],
    column: usize,
    classifier: &TopicClassifier,
) -> Result<usize> {
    processed.headers.push(schema::TOPIC_COLUMN.to_string());
    processed.headers.push(schema::TOPIC_SCORE_COLUMN.to_string());

    let subjects: Vec<String> = kept.iter().map(|r| r.cell(column).to_string()).collect();
    let assignments = classifier.assign_batch(&subjects)?;

    let mut matched = 0;
    for (row, assignment) in processed.rows.iter_mut().zip(assignments) {
        match (assignment.term, assignment.score) {
            (Some(term), Some(score)) => {
                matched += 1;
                row.push(term);
                row.push(format!("{score:.4}"));
            }
            _ => {
                row.push(String::new());
                row.push(String::new());
            }
        }
    }

    info!(matched, total = processed.rows.len(), "Classified subject headings");
    Ok(matched)
}

/// The discard output: source columns plus the reason code.
fn discarded_table(table: &Table, discarded: &[crate::records::DiscardedRecord]) -> Table {
    let mut headers = table.headers.clone();
    headers.push(schema::DISCARD_REASON_COLUMN.to_string());

    let width = table.headers.len();
    let rows = discarded
        .iter()
        .map(|d| {
            let mut row = d.record.values.clone();
            row.resize(width, String::new());
            row.push(d.reason.code().to_string());
            row
        })
        .collect();

    Table { headers, rows }
}
