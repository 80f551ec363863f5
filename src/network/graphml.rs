// GraphML export.
//
// Writes the similarity graph in GraphML so it opens directly in Gephi
// or Cytoscape. Node labels go in a `label` data key, edge similarities
// in a `weight` data key.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::info;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// Write `graph` to `path` as GraphML.
pub fn write_graphml(graph: &UnGraph<String, f64>, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GraphML file: {}", path.display()))?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    writer.write_event(Event::Start(root))?;

    write_key(&mut writer, "label", "node", "string")?;
    write_key(&mut writer, "weight", "edge", "double")?;

    let mut graph_el = BytesStart::new("graph");
    graph_el.push_attribute(("id", "G"));
    graph_el.push_attribute(("edgedefault", "undirected"));
    writer.write_event(Event::Start(graph_el))?;

    for node in graph.node_indices() {
        let mut node_el = BytesStart::new("node");
        node_el.push_attribute(("id", format!("n{}", node.index()).as_str()));
        writer.write_event(Event::Start(node_el))?;

        let mut data_el = BytesStart::new("data");
        data_el.push_attribute(("key", "label"));
        writer.write_event(Event::Start(data_el))?;
        writer.write_event(Event::Text(BytesText::new(&graph[node])))?;
        writer.write_event(Event::End(BytesEnd::new("data")))?;

        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for edge in graph.edge_references() {
        let mut edge_el = BytesStart::new("edge");
        edge_el.push_attribute(("source", format!("n{}", edge.source().index()).as_str()));
        edge_el.push_attribute(("target", format!("n{}", edge.target().index()).as_str()));
        writer.write_event(Event::Start(edge_el))?;

        let mut data_el = BytesStart::new("data");
        data_el.push_attribute(("key", "weight"));
        writer.write_event(Event::Start(data_el))?;
        writer.write_event(Event::Text(BytesText::new(&format!("{:.6}", edge.weight()))))?;
        writer.write_event(Event::End(BytesEnd::new("data")))?;

        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        path = %path.display(),
        "Wrote GraphML network"
    );

    Ok(())
}

fn write_key<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: &str,
    domain: &str,
    attr_type: &str,
) -> Result<()> {
    let mut key = BytesStart::new("key");
    key.push_attribute(("id", id));
    key.push_attribute(("for", domain));
    key.push_attribute(("attr.name", id));
    key.push_attribute(("attr.type", attr_type));
    writer.write_event(Event::Empty(key))?;
    Ok(())
}
