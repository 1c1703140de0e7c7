//! Use-Cases für den Node-Graphen: einfügen, entfernen, verschieben, umwandeln.

use super::vector::normalize_vector_node;
use crate::app::state::Gesture;
use crate::app::AppState;
use crate::core::{Node, NodeKind, Rect, VectorNetwork};
use glam::DVec2;

/// Fügt einen Node ein. Vector-Nodes werden dabei renormalisiert.
pub fn insert_node(state: &mut AppState, mut node: Node) -> anyhow::Result<()> {
    if state.document().contains(&node.id) {
        log::warn!("insert_node: Node {} existiert bereits", node.id);
        return Ok(());
    }
    if let Some(network) = node.vector_network() {
        network.validate()?;
    }
    normalize_vector_node(&mut node);
    let node_id = node.id.clone();

    state.apply_transition("insert_node", |s| {
        s.document.insert_node(node);
    })?;
    log::info!("Node {} eingefügt", node_id);
    Ok(())
}

/// Entfernt einen Node samt aller Auswahl- und Hover-Verweise.
pub fn remove_node(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    if !state.document().contains(node_id) {
        log::warn!("remove_node: Node {} nicht gefunden", node_id);
        return Ok(());
    }
    state.apply_transition("remove_node", |s| {
        s.document.remove_node(node_id);
        s.selection.forget_node(node_id);
        if s.hovered_node.as_deref() == Some(node_id) {
            s.hovered_node = None;
            s.hovered_vertex = None;
        }
        let gesture_on_node = match &s.gesture {
            Some(Gesture::BendSegment { node_id: id, .. })
            | Some(Gesture::Draw { node_id: id, .. }) => id == node_id,
            None => false,
        };
        if gesture_on_node {
            s.gesture = None;
        }
    })?;
    log::info!("Node {} entfernt", node_id);
    Ok(())
}

/// Verschiebt einen Node (nur `left/top`, das Netz bleibt unverändert).
pub fn translate_node(state: &mut AppState, node_id: &str, delta: DVec2) -> anyhow::Result<()> {
    if !state.document().contains(node_id) {
        log::warn!("translate_node: Node {} nicht gefunden", node_id);
        return Ok(());
    }
    state.apply_transition("translate_node", |s| {
        if let Some(node) = s.document.node_mut(node_id) {
            node.left += delta.x;
            node.top += delta.y;
        }
    })?;
    Ok(())
}

/// Wandelt Rechteck oder Ellipse in einen Vector-Node gleicher Lage um.
///
/// Die Größe stammt aus der deklarierten Box oder, bei `auto`, aus dem
/// Geometrie-Kollaborateur.
pub fn convert_to_vector(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    let Some(node) = state.document().node(node_id) else {
        log::warn!("convert_to_vector: Node {} nicht gefunden", node_id);
        return Ok(());
    };
    let size = node
        .declared_rect()
        .or_else(|| state.geometry.absolute_bounding_rect(state.document(), node_id))
        .map(|r| r.size());
    let network = match (&node.kind, size) {
        (NodeKind::Vector { .. }, _) => {
            log::debug!("convert_to_vector: {} ist bereits ein Vector-Node", node_id);
            return Ok(());
        }
        (NodeKind::Rectangle, Some(size)) => {
            VectorNetwork::from_rect(Rect::new(0.0, 0.0, size.x, size.y))
        }
        (NodeKind::Ellipse, Some(size)) => {
            VectorNetwork::from_ellipse(Rect::new(0.0, 0.0, size.x, size.y))
        }
        (NodeKind::Text { .. }, _) => {
            log::warn!("convert_to_vector: Text-Nodes werden nicht umgewandelt ({})", node_id);
            return Ok(());
        }
        (_, None) => {
            log::warn!("convert_to_vector: Größe von {} nicht auflösbar", node_id);
            return Ok(());
        }
    };

    state.apply_transition("convert_to_vector", |s| {
        if let Some(node) = s.document.node_mut(node_id) {
            node.kind = NodeKind::Vector {
                vector_network: network,
            };
            normalize_vector_node(node);
        }
    })?;
    log::info!("Node {} in Vector-Node umgewandelt", node_id);
    Ok(())
}
