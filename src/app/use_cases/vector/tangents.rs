//! Use-Cases: Tangenten setzen, löschen und Ecken umschalten.

use super::transition_network;
use crate::app::AppState;
use crate::core::{TangentControl, TangentMirroringMode};
use glam::DVec2;

/// Setzt eine Tangente; das Gegenstück am Vertex folgt `mirroring`.
pub fn update_tangent(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    control: TangentControl,
    value: DVec2,
    mirroring: TangentMirroringMode,
) -> anyhow::Result<()> {
    transition_network(state, "update_tangent", node_id, false, |editor, _| {
        editor.update_tangent(segment, control, value, mirroring)
    })
}

pub fn delete_tangent(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    control: TangentControl,
) -> anyhow::Result<()> {
    transition_network(state, "delete_tangent", node_id, false, |editor, _| {
        editor.delete_tangent(segment, control)
    })
}

/// Setzt (oder löscht mit `None`) beide Tangenten einer Ecke.
pub fn set_corner_tangents(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    value: Option<DVec2>,
) -> anyhow::Result<()> {
    transition_network(state, "set_corner_tangents", node_id, false, |editor, _| {
        editor.set_corner_tangents(vertex, value)
    })
}

/// Schaltet eine Ecke zwischen spitz und glatt um.
pub fn bend_corner(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    preferred_side: Option<TangentControl>,
) -> anyhow::Result<()> {
    transition_network(state, "bend_corner", node_id, false, |editor, _| {
        editor.bend_corner(vertex, preferred_side)
    })?;
    log::debug!("Ecke {} von {} umgeschaltet", vertex, node_id);
    Ok(())
}
