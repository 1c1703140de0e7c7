//! Writer für SVG-Dokumente.

use super::path_data;
use crate::core::{Document, Node, NodeKind, Rect, VectorNetwork};
use anyhow::{anyhow, Result};

/// Schreibt alle zeichenbaren Nodes in Szenen-Reihenfolge als `<path>`.
///
/// Vector-Nodes werden direkt übernommen, Rechtecke und Ellipsen mit fester
/// Größe als Pfad umgewandelt. Text-Nodes werden übersprungen.
pub fn write_svg(document: &Document) -> Result<String> {
    let mut paths: Vec<(&Node, VectorNetwork)> = Vec::new();
    for id in &document.scene {
        let node = document
            .node(id)
            .ok_or_else(|| anyhow!("Inkonsistentes Dokument: Node {} fehlt beim SVG-Export", id))?;
        match node_network(node) {
            Some(network) => paths.push((node, network)),
            None => log::debug!("SVG-Export: Node {} übersprungen", node.id),
        }
    }

    let bounds = paths
        .iter()
        .map(|(node, network)| {
            let bbox = network.bbox();
            Rect::new(node.left + bbox.x, node.top + bbox.y, bbox.width, bbox.height)
        })
        .reduce(|acc, r| acc.union(&r))
        .unwrap_or_default();

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">\n",
        format_float(bounds.width),
        format_float(bounds.height),
        format_float(bounds.x),
        format_float(bounds.y),
        format_float(bounds.width),
        format_float(bounds.height)
    ));
    for (node, network) in &paths {
        output.push_str(&format!(
            "  <path id=\"{}\" d=\"{}\"/>\n",
            escape_xml(&node.id),
            path_data::encode(network, node.origin())
        ));
    }
    output.push_str("</svg>\n");

    log::info!("SVG-Export: {} Pfade", paths.len());
    Ok(output)
}

/// Netz eines Nodes in lokalen Koordinaten, falls als Pfad darstellbar.
fn node_network(node: &Node) -> Option<VectorNetwork> {
    let local = || {
        let rect = node.declared_rect()?;
        Some(Rect::new(0.0, 0.0, rect.width, rect.height))
    };
    match &node.kind {
        NodeKind::Vector { vector_network } => Some(vector_network.clone()),
        NodeKind::Rectangle => local().map(VectorNetwork::from_rect),
        NodeKind::Ellipse => local().map(VectorNetwork::from_ellipse),
        NodeKind::Text { .. } => None,
    }
}

fn format_float(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
