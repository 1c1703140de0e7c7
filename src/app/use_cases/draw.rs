//! Use-Cases für Zeichengesten (Bleistift, Linie) und das Gestenende.

use super::vector::edit_vector_network;
use crate::app::state::{DrawTool, Gesture};
use crate::app::AppState;
use crate::core::{Node, VectorNetwork};
use glam::DVec2;

/// Legt an `position` einen neuen Vector-Node mit einem Vertex an und
/// startet die Zeichengeste.
pub fn begin_draw(state: &mut AppState, tool: DrawTool, position: DVec2) -> anyhow::Result<()> {
    let node_id = state.document().next_id("vector");
    let mut node = Node::vector(node_id.clone(), VectorNetwork::new(vec![DVec2::ZERO], vec![]));
    node.left = position.x;
    node.top = position.y;

    state.apply_transition("begin_draw", |s| {
        s.document.insert_node(node);
        s.selection.nodes = vec![node_id.clone()];
        s.selection.vector = None;
        s.gesture = Some(Gesture::Draw {
            node_id: node_id.clone(),
            tool,
        });
    })?;
    log::info!("Zeichnen ({:?}) in {} gestartet", tool, node_id);
    Ok(())
}

/// Ein Tick der Zeichengeste.
pub fn draw_to(state: &mut AppState, position: DVec2) -> anyhow::Result<()> {
    let Some(Gesture::Draw { node_id, tool }) = state.editor.gesture.clone() else {
        log::warn!("draw_to: keine laufende Zeichengeste");
        return Ok(());
    };
    if state.document().node(&node_id).is_none() {
        log::warn!("draw_to: Node {} existiert nicht mehr", node_id);
        return Ok(());
    }
    state.apply_transition("draw_to", |s| {
        edit_vector_network(&mut s.document, &node_id, |editor, origin| match tool {
            DrawTool::Pencil => editor.extend_polyline(position - origin),
            DrawTool::Line => editor.extend_line(position - origin),
        });
    })?;
    Ok(())
}

/// Zeiger losgelassen: beendet die laufende Geste ohne Rollback.
pub fn end_gesture(state: &mut AppState) -> anyhow::Result<()> {
    if state.editor.gesture.is_none() {
        log::debug!("end_gesture: keine laufende Geste");
        return Ok(());
    }
    state.apply_transition("end_gesture", |s| s.gesture = None)?;
    Ok(())
}
