//! Use-Cases auf der Netz-Auswahl im Content-Edit-Modus.

use super::{edit_vector_network, normalize_vector_node};
use crate::app::state::VectorSelection;
use crate::app::AppState;
use crate::core::{Node, NetworkSelection, VectorNetworkEditor};
use glam::DVec2;

/// Aktuelle Netz-Auswahl, falls vorhanden und nicht leer.
fn active_selection(state: &AppState, action_type: &str) -> Option<VectorSelection> {
    match &state.editor.selection.vector {
        Some(selection) if !selection.items.is_empty() => Some(selection.clone()),
        Some(_) => {
            log::debug!("{}: Netz-Auswahl ist leer", action_type);
            None
        }
        None => {
            log::debug!("{}: kein Content-Edit aktiv", action_type);
            None
        }
    }
}

/// Verschiebt die selektierten Vertices, Segmente und Tangenten.
pub fn translate_vector_selection(state: &mut AppState, delta: DVec2) -> anyhow::Result<()> {
    let Some(VectorSelection { node_id, items }) =
        active_selection(state, "translate_vector_selection")
    else {
        return Ok(());
    };
    state.apply_transition("translate_vector_selection", |s| {
        edit_vector_network(&mut s.document, &node_id, |editor, _| {
            editor.translate_selection(&items, delta)
        });
    })?;
    Ok(())
}

/// Löscht die Auswahl: Tangenten werden genullt, dann Segmente und
/// Vertices (absteigend, damit Indizes gültig bleiben) entfernt.
pub fn delete_vector_selection(state: &mut AppState) -> anyhow::Result<()> {
    let Some(VectorSelection { node_id, items }) =
        active_selection(state, "delete_vector_selection")
    else {
        return Ok(());
    };
    state.apply_transition("delete_vector_selection", |s| {
        edit_vector_network(&mut s.document, &node_id, |editor, _| {
            delete_items(editor, &items)
        });
        s.selection.reset_items_of(&node_id);
    })?;
    log::info!(
        "Auswahl in {} gelöscht: {} Vertices, {} Segmente, {} Tangenten",
        node_id,
        items.vertices.len(),
        items.segments.len(),
        items.tangents.len()
    );
    Ok(())
}

fn delete_items(editor: &mut VectorNetworkEditor, items: &NetworkSelection) {
    for &(segment, control) in &items.tangents {
        editor.delete_tangent(segment, control);
    }

    let mut segments = items.segments.clone();
    segments.sort_unstable();
    segments.dedup();
    for &segment in segments.iter().rev() {
        editor.delete_segment(segment);
    }

    let mut vertices = items.vertices.clone();
    vertices.sort_unstable();
    vertices.dedup();
    for &vertex in vertices.iter().rev() {
        editor.delete_vertex(vertex);
    }
}

/// Kopiert die Auswahl als neuen Vector-Node an dieselbe Canvas-Position.
///
/// Der neue Node wird selektiert, der Content-Edit-Modus verlassen.
pub fn duplicate_vector_selection(state: &mut AppState) -> anyhow::Result<()> {
    let Some(VectorSelection { node_id, items }) =
        active_selection(state, "duplicate_vector_selection")
    else {
        return Ok(());
    };
    let Some(source) = state.document().node(&node_id) else {
        return Ok(());
    };
    let Some(network) = source.vector_network() else {
        return Ok(());
    };
    let copied = VectorNetworkEditor::new(network.clone()).copy(&items);
    let origin = source.origin();
    let new_id = state.document().next_id("vector");

    let mut node = Node::vector(new_id.clone(), copied);
    node.name = format!("{} (Kopie)", source.name);
    node.left = origin.x;
    node.top = origin.y;
    normalize_vector_node(&mut node);

    state.apply_transition("duplicate_vector_selection", |s| {
        s.document.insert_node(node);
        s.selection.nodes = vec![new_id.clone()];
        s.selection.vector = None;
    })?;
    log::info!("Auswahl aus {} als {} kopiert", node_id, new_id);
    Ok(())
}
