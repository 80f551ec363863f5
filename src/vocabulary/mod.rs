// Controlled-vocabulary tree built from a jsTree HTML export.

pub mod extractor;

use serde::Serialize;

/// Hierarchy level whose terms are the classification targets.
pub const CLASSIFICATION_LEVEL: u32 = 3;

/// One term in the vocabulary hierarchy.
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    pub notation: String,
    pub label: String,
    pub uri: String,
    pub level: u32,
    pub children: Vec<Term>,
}

/// Flatten the tree to the terms at one hierarchy level, in document
/// order. Level 3 is the classification-target level: level 1-2 terms
/// are too general and deeper sub-distinctions over-fragment the
/// assignment.
pub fn level_terms(roots: &[Term], level: u32) -> Vec<&Term> {
    let mut out = Vec::new();
    collect_level(roots, level, &mut out);
    out
}

fn collect_level<'a>(terms: &'a [Term], level: u32, out: &mut Vec<&'a Term>) {
    for term in terms {
        if term.level == level {
            out.push(term);
        } else if term.level < level {
            collect_level(&term.children, level, out);
        }
    }
}

/// Pretty-print the hierarchy, one indented line per term.
pub fn print_hierarchy(term: &Term, indent: usize) {
    println!("{}{} - {}", "  ".repeat(indent), term.notation, term.label);
    for child in &term.children {
        print_hierarchy(child, indent + 1);
    }
}
