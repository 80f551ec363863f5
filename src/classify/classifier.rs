// Embedding-based topic classifier.
//
// Maps free-text subject headings onto the controlled vocabulary's
// level-3 terms by cosine similarity. Term embeddings are computed once
// at construction and cached read-only for the run; classifying a
// heading costs one embedding call plus a scan over the cache.
//
// Ties on the maximum similarity break by earliest vocabulary position
// (strict > argmax), so classification is deterministic for a fixed
// model and vocabulary.

use anyhow::Result;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::embedding::{cosine_similarity, Embedder};
use crate::vocabulary::Term;

/// One classification outcome for a subject cell. Produced once, never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicAssignment {
    /// The raw subject text as it appeared in the record.
    pub original: String,
    /// The matched controlled term's label, or None when the cell held
    /// nothing classifiable.
    pub term: Option<String>,
    /// Cosine similarity of the match, in [-1, 1]; None iff `term` is None.
    pub score: Option<f64>,
}

impl TopicAssignment {
    fn empty(original: &str) -> Self {
        Self {
            original: original.to_string(),
            term: None,
            score: None,
        }
    }
}

/// Boilerplate phrases removed from subject headings before embedding.
const BOILERPLATE_PHRASES: [&str; 1] = ["en la literatura"];

/// Preprocess one subject heading before embedding: strip accents,
/// lowercase, remove parenthetical spans and boilerplate phrases, trim.
pub fn preprocess_topic(text: &str) -> String {
    // NFD then drop combining marks — "Psicología" and "Psicologia"
    // embed identically.
    let unaccented: String = text
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect();

    let mut value = unaccented.to_lowercase();

    // Remove parenthetical spans without regex backtracking concerns.
    let mut cleaned = String::with_capacity(value.len());
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => cleaned.push(c),
            _ => {}
        }
    }
    value = cleaned;

    for phrase in BOILERPLATE_PHRASES {
        value = value.replace(phrase, "");
    }

    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classifier over a fixed vocabulary snapshot.
///
/// Holds the embedder for the whole run (acquire once, drop at run end)
/// and the cached term embeddings.
pub struct TopicClassifier {
    embedder: Box<dyn Embedder>,
    labels: Vec<String>,
    term_embeddings: Vec<Vec<f64>>,
}

impl TopicClassifier {
    /// Build a classifier from the vocabulary's classification-target
    /// terms. Embeds every term label once, up front.
    ///
    /// An empty term list is a fatal initialization error — there is
    /// nothing to classify against.
    pub fn new(embedder: Box<dyn Embedder>, terms: &[&Term]) -> Result<Self> {
        if terms.is_empty() {
            anyhow::bail!("Controlled vocabulary has no classification-target terms");
        }

        let labels: Vec<String> = terms.iter().map(|t| t.label.clone()).collect();
        let term_embeddings = embedder.embed_batch(&labels)?;

        info!(terms = labels.len(), "Cached controlled-term embeddings");

        Ok(Self {
            embedder,
            labels,
            term_embeddings,
        })
    }

    /// Term labels in vocabulary order (the tie-break order).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Classify one subject cell.
    ///
    /// A cell may hold several ';'-separated headings: each is
    /// classified independently and the highest-scoring one represents
    /// the cell. An empty (or empty-after-preprocessing) cell yields no
    /// match and a null score — never an arbitrary term.
    pub fn assign(&self, raw: &str) -> Result<TopicAssignment> {
        let headings: Vec<String> = split_headings(raw);
        if headings.is_empty() {
            return Ok(TopicAssignment::empty(raw));
        }

        let embeddings = self.embedder.embed_batch(&headings)?;

        let mut best: Option<(usize, f64)> = None;
        for embedding in &embeddings {
            let (idx, score) = self.nearest_term(embedding);
            // Strict > keeps the earliest heading on score ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }

        Ok(match best {
            Some((idx, score)) => TopicAssignment {
                original: raw.to_string(),
                term: Some(self.labels[idx].clone()),
                score: Some(score),
            },
            None => TopicAssignment::empty(raw),
        })
    }

    /// Classify a batch of subject cells.
    ///
    /// Embeddings are computed in one batch for throughput; the outcome
    /// per cell is identical to calling `assign` one cell at a time.
    pub fn assign_batch(&self, raws: &[String]) -> Result<Vec<TopicAssignment>> {
        // (cell index, preprocessed heading) for every classifiable heading.
        let mut flat: Vec<(usize, String)> = Vec::new();
        for (i, raw) in raws.iter().enumerate() {
            for heading in split_headings(raw) {
                flat.push((i, heading));
            }
        }

        let texts: Vec<String> = flat.iter().map(|(_, h)| h.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;

        let mut results: Vec<TopicAssignment> =
            raws.iter().map(|raw| TopicAssignment::empty(raw)).collect();

        for ((cell, _), embedding) in flat.iter().zip(embeddings.iter()) {
            let (idx, score) = self.nearest_term(embedding);
            let current = &mut results[*cell];
            if current.score.map_or(true, |s| score > s) {
                current.term = Some(self.labels[idx].clone());
                current.score = Some(score);
            }
        }

        Ok(results)
    }

    /// Index and similarity of the nearest controlled term.
    fn nearest_term(&self, embedding: &[f64]) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, term_embedding) in self.term_embeddings.iter().enumerate() {
            let score = cosine_similarity(embedding, term_embedding);
            if score > best_score {
                best_idx = idx;
                best_score = score;
            }
        }
        (best_idx, best_score)
    }
}

/// Split a subject cell into preprocessed, non-empty headings.
fn split_headings(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(preprocess_topic)
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_strips_accents_and_case() {
        assert_eq!(preprocess_topic("Psicología"), "psicologia");
        assert_eq!(preprocess_topic("EDUCACIÓN"), "educacion");
    }

    #[test]
    fn preprocess_removes_parentheticals() {
        assert_eq!(
            preprocess_topic("Autorrealización (Psicología)"),
            "autorrealizacion"
        );
    }

    #[test]
    fn preprocess_removes_boilerplate() {
        assert_eq!(
            preprocess_topic("Derechos humanos en la literatura"),
            "derechos humanos"
        );
    }

    #[test]
    fn preprocess_collapses_whitespace() {
        assert_eq!(preprocess_topic("  Historia   del  arte "), "historia del arte");
    }

    #[test]
    fn split_headings_drops_empties() {
        assert_eq!(
            split_headings("Autoestima; ;Tristeza"),
            vec!["autoestima".to_string(), "tristeza".to_string()]
        );
        assert!(split_headings("").is_empty());
        assert!(split_headings("(solo parentesis)").is_empty());
    }
}
