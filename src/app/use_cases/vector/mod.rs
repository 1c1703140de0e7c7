//! Use-Cases für die Bearbeitung von Vector Networks.
//!
//! Jede Netz-Änderung läuft über [`edit_vector_network`], das nach der
//! Bearbeitung die BBox-Renormalisierung des Nodes durchführt: das Netz
//! liegt danach mit seiner BBox bei `(0,0)`, der Versatz steckt in
//! `left/top`, `width/height` entsprechen der echten Ausdehnung.

mod network;
mod segments;
mod selection;
mod tangents;
mod vertices;

pub use network::{optimize, planarize, union_networks};
pub use segments::{begin_bend_segment, bend_segment, delete_segment, split_segment, translate_segment};
pub use selection::{delete_vector_selection, duplicate_vector_selection, translate_vector_selection};
pub use tangents::{bend_corner, delete_tangent, set_corner_tangents, update_tangent};
pub use vertices::{add_vertex, delete_vertex, translate_vertex};

use crate::app::AppState;
use crate::core::{Dimension, Document, Node, VectorNetworkEditor};
use glam::DVec2;

/// Bearbeitet das Netz eines Vector-Nodes und renormalisiert danach.
///
/// `edit` erhält den Editor und den lokalen Ursprung des Nodes (zum
/// Umrechnen von Canvas- in Netz-Koordinaten). `None`, wenn der Node fehlt
/// oder kein Vector-Node ist.
pub fn edit_vector_network<R, F>(document: &mut Document, node_id: &str, edit: F) -> Option<R>
where
    F: FnOnce(&mut VectorNetworkEditor, DVec2) -> R,
{
    let node = document.node_mut(node_id)?;
    let origin = node.origin();
    let network = node.vector_network_mut()?;

    let mut editor = VectorNetworkEditor::new(std::mem::take(network));
    let result = edit(&mut editor, origin);
    *network = editor.into_network();

    normalize_vector_node(node);
    Some(result)
}

/// Verschiebt das Netz so, dass seine BBox bei `(0,0)` beginnt, und
/// überträgt Versatz und Größe auf den Node.
///
/// Bei einem bereits normalisierten Netz entspricht der Versatz genau der
/// Änderung des BBox-Ursprungs durch die Bearbeitung.
pub fn normalize_vector_node(node: &mut Node) {
    let Some(network) = node.vector_network_mut() else {
        return;
    };
    let bbox = network.bbox();
    let offset = bbox.min();
    if offset != DVec2::ZERO {
        for vertex in &mut network.vertices {
            *vertex -= offset;
        }
    }
    node.left += offset.x;
    node.top += offset.y;
    node.width = Dimension::Fixed(bbox.width);
    node.height = Dimension::Fixed(bbox.height);
}

/// Prüft, ob `node_id` ein Vector-Node ist; sonst Warnung (Command wird ignoriert).
fn require_vector_node(state: &AppState, action_type: &str, node_id: &str) -> bool {
    match state.document().node(node_id) {
        Some(node) if node.is_vector() => true,
        Some(_) => {
            log::warn!("{}: Node {} ist kein Vector-Node", action_type, node_id);
            false
        }
        None => {
            log::warn!("{}: Node {} nicht gefunden", action_type, node_id);
            false
        }
    }
}

/// Führt eine Netz-Bearbeitung als History-Übergang aus.
///
/// Strukturelle Änderungen (Indizes verschieben sich) setzen die
/// Netz-Auswahl des Nodes zurück.
fn transition_network<F>(
    state: &mut AppState,
    action_type: &str,
    node_id: &str,
    structural: bool,
    edit: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&mut VectorNetworkEditor, DVec2),
{
    if !require_vector_node(state, action_type, node_id) {
        return Ok(());
    }
    state.apply_transition(action_type, |s| {
        edit_vector_network(&mut s.document, node_id, edit);
        if structural {
            s.selection.reset_items_of(node_id);
        }
    })?;
    Ok(())
}
