// Vocabulary extraction from a jsTree HTML export.
//
// The source document is the thesaurus browser page: nested <li> nodes,
// each with an <a class="jstree-anchor"> carrying the aria-level and
// data-uri attributes and a <span class="tree-notation"> holding the
// term's notation. Malformed nodes are skipped with a warning; a
// document with no root terms at all is a fatal parse error.

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::Term;

/// Parse the vocabulary hierarchy out of an HTML document.
pub fn parse_vocabulary(html: &str) -> Result<Vec<Term>> {
    let document = Html::parse_document(html);

    let root_selector = Selector::parse(r#"li[role="presentation"][aria-level="1"]"#)
        .expect("static selector must parse");

    let roots: Vec<Term> = document
        .select(&root_selector)
        .filter_map(|li| extract_term(li, None))
        .collect();

    if roots.is_empty() {
        anyhow::bail!("No root terms found in the vocabulary document");
    }

    debug!(roots = roots.len(), "Parsed vocabulary hierarchy");
    Ok(roots)
}

/// Read the vocabulary from a file on disk.
pub fn load_vocabulary(path: &std::path::Path) -> Result<Vec<Term>> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
    parse_vocabulary(&html).with_context(|| format!("Unparsable vocabulary: {}", path.display()))
}

/// Extract one term and its subtree from an <li> node.
/// Returns None (and warns) when the node is missing its anchor or
/// notation — a skipped node, not a fatal error.
fn extract_term(li: ElementRef, parent_notation: Option<&str>) -> Option<Term> {
    let anchor_selector = Selector::parse("a.jstree-anchor").expect("static selector must parse");
    let notation_selector =
        Selector::parse("span.tree-notation").expect("static selector must parse");

    // The anchor belonging to this node is its first direct child anchor;
    // a descendant search would find children's anchors first in nested
    // markup, so restrict to direct children.
    let anchor = li
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| anchor_selector.matches(el))?;

    let full_text = collapse(&anchor.text().collect::<String>());
    let level: u32 = anchor
        .value()
        .attr("aria-level")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let uri = anchor.value().attr("data-uri").unwrap_or("").to_string();

    // Level-3 nodes carry no notation span of their own: they extend the
    // parent's notation and use the whole anchor text as the label.
    let (notation, label) = if level == 3 {
        let parent = parent_notation?;
        (format!("{parent}extended"), full_text)
    } else {
        let notation_el = anchor.select(&notation_selector).next().or_else(|| {
            warn!(text = %full_text, "Skipping vocabulary node without a notation span");
            None
        })?;
        let notation = collapse(&notation_el.text().collect::<String>());
        let label = full_text
            .find(notation.as_str())
            .map(|pos| collapse(&full_text[pos + notation.len()..]))
            .unwrap_or(full_text);
        (notation, label)
    };

    let mut term = Term {
        notation,
        label,
        uri,
        level,
        children: Vec::new(),
    };

    // Children live in a direct <ul class="jstree-children"> child.
    let children_ul = li
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "ul" && has_class(el, "jstree-children"));

    if let Some(ul) = children_ul {
        for child_li in ul
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
        {
            if let Some(child) = extract_term(child_li, Some(&term.notation)) {
                term.children.push(child);
            }
        }
    }

    Some(term)
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::level_terms;

    fn anchor(level: u32, notation: &str, label: &str) -> String {
        format!(
            r#"<a class="jstree-anchor" aria-level="{level}" data-uri="urn:{notation}">
                 <span class="tree-notation">{notation}</span> {label}</a>"#
        )
    }

    fn sample_document() -> String {
        format!(
            r#"<html><body><ul>
              <li role="presentation" aria-level="1">
                {root}
                <ul class="jstree-children">
                  <li role="presentation" aria-level="2">
                    {branch}
                    <ul class="jstree-children">
                      <li role="presentation" aria-level="3">
                        <a class="jstree-anchor" aria-level="3" data-uri="urn:leaf1">Derechos humanos</a>
                      </li>
                      <li role="presentation" aria-level="3">
                        <a class="jstree-anchor" aria-level="3" data-uri="urn:leaf2">Derecho penal</a>
                      </li>
                    </ul>
                  </li>
                </ul>
              </li>
            </ul></body></html>"#,
            root = anchor(1, "300", "Ciencias sociales"),
            branch = anchor(2, "340", "Derecho"),
        )
    }

    #[test]
    fn parses_hierarchy() {
        let roots = parse_vocabulary(&sample_document()).unwrap();
        assert_eq!(roots.len(), 1);

        let root = &roots[0];
        assert_eq!(root.notation, "300");
        assert_eq!(root.label, "Ciencias sociales");
        assert_eq!(root.level, 1);
        assert_eq!(root.children.len(), 1);

        let branch = &root.children[0];
        assert_eq!(branch.notation, "340");
        assert_eq!(branch.label, "Derecho");
        assert_eq!(branch.children.len(), 2);
    }

    #[test]
    fn level_three_extends_parent_notation() {
        let roots = parse_vocabulary(&sample_document()).unwrap();
        let leaves = level_terms(&roots, 3);
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].notation, "340extended");
        assert_eq!(leaves[0].label, "Derechos humanos");
        assert_eq!(leaves[1].label, "Derecho penal");
        assert_eq!(leaves[1].uri, "urn:leaf2");
    }

    #[test]
    fn malformed_node_is_skipped_not_fatal() {
        let html = format!(
            r#"<ul>
              <li role="presentation" aria-level="1">
                {ok}
                <ul class="jstree-children">
                  <li role="presentation" aria-level="2"><em>no anchor here</em></li>
                  <li role="presentation" aria-level="2">{branch}</li>
                </ul>
              </li>
            </ul>"#,
            ok = anchor(1, "300", "Ciencias sociales"),
            branch = anchor(2, "340", "Derecho"),
        );
        let roots = parse_vocabulary(&html).unwrap();
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].notation, "340");
    }

    #[test]
    fn empty_document_is_fatal() {
        assert!(parse_vocabulary("<html><body></body></html>").is_err());
        assert!(parse_vocabulary("").is_err());
    }

    #[test]
    fn whitespace_in_labels_collapsed() {
        let html = r#"<li role="presentation" aria-level="1">
            <a class="jstree-anchor" aria-level="1">
              <span class="tree-notation">100</span>
              Filosofía   y
              psicología
            </a></li>"#;
        let roots = parse_vocabulary(html).unwrap();
        assert_eq!(roots[0].label, "Filosofía y psicología");
    }
}
