//! Use-Cases: netzweite Operationen (Planarisieren, Optimieren, Vereinigen).

use super::{edit_vector_network, require_vector_node, transition_network};
use crate::app::AppState;
use crate::core::VectorNetworkEditor;

/// Zerlegt alle Schnittpunkte des Netzes in eigene Vertices.
pub fn planarize(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    let tolerance = state.options.planarize_tolerance;
    transition_network(state, "planarize", node_id, true, |editor, _| {
        editor.planarize(tolerance)
    })?;
    log::info!("Netz von {} planarisiert", node_id);
    Ok(())
}

/// Führt nahe Vertices zusammen und entfernt überflüssige Segmente.
pub fn optimize(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    let config = state.options.optimize_config();
    transition_network(state, "optimize", node_id, true, |editor, _| {
        editor.optimize(&config)
    })?;
    log::info!("Netz von {} optimiert", node_id);
    Ok(())
}

/// Übernimmt das Netz von `source` in `target` und entfernt `source`.
///
/// Das Quellnetz wird in lokale Koordinaten von `target` umgerechnet.
pub fn union_networks(state: &mut AppState, target: &str, source: &str) -> anyhow::Result<()> {
    if target == source {
        log::warn!("union_networks: Quelle und Ziel sind identisch ({})", target);
        return Ok(());
    }
    if !require_vector_node(state, "union_networks", target)
        || !require_vector_node(state, "union_networks", source)
    {
        return Ok(());
    }
    let Some((source_origin, mut source_network)) = state
        .document()
        .node(source)
        .and_then(|n| Some((n.origin(), n.vector_network()?.clone())))
    else {
        return Ok(());
    };
    let config = state
        .options
        .optimize_on_union
        .then(|| state.options.optimize_config());

    state.apply_transition("union_networks", |s| {
        edit_vector_network(&mut s.document, target, |editor, origin| {
            let offset = source_origin - origin;
            for vertex in &mut source_network.vertices {
                *vertex += offset;
            }
            let joined =
                VectorNetworkEditor::union(editor.network(), &source_network, config.as_ref());
            *editor = VectorNetworkEditor::new(joined);
        });
        s.document.remove_node(source);
        s.selection.forget_node(source);
        s.selection.reset_items_of(target);
        if s.hovered_node.as_deref() == Some(source) {
            s.hovered_node = None;
        }
    })?;
    log::info!("Netz von {} in {} übernommen", source, target);
    Ok(())
}
