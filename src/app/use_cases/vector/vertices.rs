//! Use-Cases: Vertices anlegen, löschen und verschieben.

use super::{edit_vector_network, require_vector_node, transition_network};
use crate::app::AppState;
use crate::core::NetworkSelection;
use glam::DVec2;

/// Hängt einen Vertex an (Canvas-Position), optional verbunden mit `from_vertex`.
///
/// Im Content-Edit des Nodes wird der neue Vertex anschließend selektiert.
pub fn add_vertex(
    state: &mut AppState,
    node_id: &str,
    position: DVec2,
    from_vertex: Option<usize>,
    outgoing_tangent: Option<DVec2>,
) -> anyhow::Result<()> {
    if !require_vector_node(state, "add_vertex", node_id) {
        return Ok(());
    }
    state.apply_transition("add_vertex", |s| {
        let added = edit_vector_network(&mut s.document, node_id, |editor, origin| {
            editor.add_vertex(position - origin, from_vertex, outgoing_tangent)
        });
        if let (Some(vertex), Some(selection)) = (added, s.selection.vector.as_mut()) {
            if selection.node_id == node_id {
                selection.items = NetworkSelection {
                    vertices: vec![vertex],
                    ..NetworkSelection::default()
                };
            }
        }
    })?;
    log::debug!("Vertex zu {} hinzugefügt", node_id);
    Ok(())
}

/// Löscht einen Vertex samt anliegender Segmente.
pub fn delete_vertex(state: &mut AppState, node_id: &str, vertex: usize) -> anyhow::Result<()> {
    transition_network(state, "delete_vertex", node_id, true, |editor, _| {
        editor.delete_vertex(vertex)
    })?;
    log::info!("Vertex {} aus {} gelöscht", vertex, node_id);
    Ok(())
}

/// Verschiebt einen Vertex um `delta`.
pub fn translate_vertex(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    delta: DVec2,
) -> anyhow::Result<()> {
    transition_network(state, "translate_vertex", node_id, false, |editor, _| {
        editor.translate_vertex(vertex, delta)
    })
}
