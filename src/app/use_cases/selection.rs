//! Use-Cases für Auswahl, Content-Edit-Modus und Hover.
//!
//! Auswahländerungen sind Teil des undofähigen Zustands; Hover ist transient
//! und wird von der History gefiltert.

use crate::app::state::VectorSelection;
use crate::app::AppState;
use crate::core::{NetworkSelection, NodeId};

/// Selektiert Nodes; unbekannte IDs werden mit Warnung ignoriert.
pub fn select_nodes(state: &mut AppState, node_ids: &[NodeId], additive: bool) -> anyhow::Result<()> {
    let known: Vec<NodeId> = node_ids
        .iter()
        .filter(|id| {
            let exists = state.document().contains(id);
            if !exists {
                log::warn!("select_nodes: Node {} nicht gefunden", id);
            }
            exists
        })
        .cloned()
        .collect();

    state.apply_transition("select_nodes", |s| {
        if !additive {
            s.selection.nodes.clear();
        }
        for id in known {
            if !s.selection.nodes.contains(&id) {
                s.selection.nodes.push(id);
            }
        }
        let keep_content_edit = s
            .selection
            .vector
            .as_ref()
            .is_some_and(|v| s.selection.nodes.contains(&v.node_id));
        if !keep_content_edit {
            s.selection.vector = None;
        }
    })?;
    Ok(())
}

/// Hebt die gesamte Auswahl auf (inkl. Content-Edit).
pub fn clear_selection(state: &mut AppState) -> anyhow::Result<()> {
    state.apply_transition("clear_selection", |s| {
        s.selection.nodes.clear();
        s.selection.vector = None;
    })?;
    Ok(())
}

/// Betritt den Content-Edit-Modus eines Vector-Nodes.
pub fn enter_content_edit(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    match state.document().node(node_id) {
        Some(node) if node.is_vector() => {}
        Some(_) => {
            log::warn!("enter_content_edit: {} ist kein Vector-Node", node_id);
            return Ok(());
        }
        None => {
            log::warn!("enter_content_edit: Node {} nicht gefunden", node_id);
            return Ok(());
        }
    }
    if state.editor.selection.is_content_edit(node_id) {
        log::debug!("enter_content_edit: {} ist bereits aktiv", node_id);
        return Ok(());
    }
    state.apply_transition("enter_content_edit", |s| {
        s.selection.nodes = vec![node_id.to_string()];
        s.selection.vector = Some(VectorSelection {
            node_id: node_id.to_string(),
            items: NetworkSelection::default(),
        });
    })?;
    log::info!("Content-Edit für {} aktiv", node_id);
    Ok(())
}

pub fn exit_content_edit(state: &mut AppState) -> anyhow::Result<()> {
    state.apply_transition("exit_content_edit", |s| {
        s.selection.vector = None;
        s.hovered_vertex = None;
    })?;
    Ok(())
}

/// Selektiert Vertices, Segmente und Tangenten im aktiven Content-Edit.
///
/// Indizes außerhalb des Netzes sind ein Programmierfehler.
pub fn select_vector_items(
    state: &mut AppState,
    items: NetworkSelection,
    additive: bool,
) -> anyhow::Result<()> {
    let Some(node_id) = state
        .editor
        .selection
        .vector
        .as_ref()
        .map(|v| v.node_id.clone())
    else {
        log::warn!("select_vector_items: kein Content-Edit aktiv");
        return Ok(());
    };
    if let Some(network) = state.document().node(&node_id).and_then(|n| n.vector_network()) {
        let vertex_count = network.vertices.len();
        let segment_count = network.segments.len();
        assert!(
            items.vertices.iter().all(|&v| v < vertex_count),
            "Ungültiger Vertex-Index in Auswahl ({} Vertices)",
            vertex_count
        );
        assert!(
            items
                .segments
                .iter()
                .chain(items.tangents.iter().map(|(s, _)| s))
                .all(|&s| s < segment_count),
            "Ungültiger Segment-Index in Auswahl ({} Segmente)",
            segment_count
        );
    }

    state.apply_transition("select_vector_items", |s| {
        let Some(selection) = s.selection.vector.as_mut() else {
            return;
        };
        if !additive {
            selection.items = items;
            return;
        }
        let current = &mut selection.items;
        merge_unique(&mut current.vertices, items.vertices);
        merge_unique(&mut current.segments, items.segments);
        merge_unique(&mut current.tangents, items.tangents);
    })?;
    Ok(())
}

fn merge_unique<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Setzt den Hover-Node (transient, kein History-Eintrag).
pub fn hover(state: &mut AppState, node_id: Option<NodeId>) -> anyhow::Result<()> {
    state.apply_transition("hover", |s| s.hovered_node = node_id)?;
    Ok(())
}

/// Setzt den Hover-Vertex (transient, kein History-Eintrag).
pub fn hover_vertex(state: &mut AppState, vertex: Option<usize>) -> anyhow::Result<()> {
    state.apply_transition("hover_vertex", |s| s.hovered_vertex = vertex)?;
    Ok(())
}
