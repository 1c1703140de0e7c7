//! Use-Cases: Segmente löschen, teilen, verschieben und biegen.

use super::{edit_vector_network, require_vector_node, transition_network};
use crate::app::state::Gesture;
use crate::app::AppState;
use crate::core::{FrozenSegment, NetworkSelection, PointOnSegment};
use glam::DVec2;

/// Entfernt ein Segment; seine Vertices bleiben erhalten.
pub fn delete_segment(state: &mut AppState, node_id: &str, segment: usize) -> anyhow::Result<()> {
    transition_network(state, "delete_segment", node_id, true, |editor, _| {
        editor.delete_segment(segment)
    })?;
    log::info!("Segment {} aus {} gelöscht", segment, node_id);
    Ok(())
}

/// Teilt ein Segment; der neue Vertex wird im Content-Edit selektiert.
pub fn split_segment(
    state: &mut AppState,
    node_id: &str,
    point: PointOnSegment,
) -> anyhow::Result<()> {
    if !require_vector_node(state, "split_segment", node_id) {
        return Ok(());
    }
    let options = state.options.split_options();
    state.apply_transition("split_segment", |s| {
        let vertex = edit_vector_network(&mut s.document, node_id, |editor, _| {
            editor.split_segment(point, options)
        });
        s.selection.reset_items_of(node_id);
        if let (Some(vertex), Some(selection)) = (vertex, s.selection.vector.as_mut()) {
            if selection.node_id == node_id {
                selection.items = NetworkSelection {
                    vertices: vec![vertex],
                    ..NetworkSelection::default()
                };
            }
        }
    })?;
    log::info!(
        "Segment {} von {} bei t={:.3} geteilt",
        point.segment,
        node_id,
        point.t
    );
    Ok(())
}

/// Verschiebt beide Endpunkte eines Segments.
pub fn translate_segment(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    delta: DVec2,
) -> anyhow::Result<()> {
    transition_network(state, "translate_segment", node_id, false, |editor, _| {
        editor.translate_segment(segment, delta)
    })
}

/// Startet eine Biege-Geste: friert Endpunkte und Tangenten des Segments ein.
pub fn begin_bend_segment(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
) -> anyhow::Result<()> {
    if !require_vector_node(state, "begin_bend_segment", node_id) {
        return Ok(());
    }
    let Some(network) = state.document().node(node_id).and_then(|n| n.vector_network()) else {
        return Ok(());
    };
    assert!(
        segment < network.segments.len(),
        "Ungültiger Segment-Index: {} ({} Segmente)",
        segment,
        network.segments.len()
    );
    let seg = network.segments[segment];
    let frozen = FrozenSegment {
        a: network.vertices[seg.a],
        b: network.vertices[seg.b],
        ta: seg.ta,
        tb: seg.tb,
    };

    state.apply_transition("begin_bend_segment", |s| {
        s.gesture = Some(Gesture::BendSegment {
            node_id: node_id.to_string(),
            segment,
            frozen,
        });
    })?;
    log::debug!("Biege-Geste auf {}[{}] gestartet", node_id, segment);
    Ok(())
}

/// Ein Tick der Biege-Geste: Kurve bei `t` durch `target` (Canvas) legen.
pub fn bend_segment(state: &mut AppState, t: f64, target: DVec2) -> anyhow::Result<()> {
    let Some(Gesture::BendSegment {
        node_id,
        segment,
        frozen,
    }) = state.editor.gesture.clone()
    else {
        log::warn!("bend_segment: keine laufende Biege-Geste");
        return Ok(());
    };
    let segment_count = state
        .document()
        .node(&node_id)
        .and_then(|n| n.vector_network())
        .map(|network| network.segments.len());
    if !matches!(segment_count, Some(count) if segment < count) {
        log::warn!(
            "bend_segment: Segment {} in {} existiert nicht mehr",
            segment,
            node_id
        );
        return Ok(());
    }
    transition_network(state, "bend_segment", &node_id, false, |editor, origin| {
        editor.bend_segment(segment, t, &frozen, target - origin)
    })
}
