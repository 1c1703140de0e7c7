//! Handler für Vector-Network-Bearbeitung und Zeichengesten.

use crate::app::state::DrawTool;
use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{PointOnSegment, TangentControl, TangentMirroringMode};
use glam::DVec2;

// === Vertices & Segmente ===

pub fn add_vertex(
    state: &mut AppState,
    node_id: &str,
    position: DVec2,
    from_vertex: Option<usize>,
    outgoing_tangent: Option<DVec2>,
) -> anyhow::Result<()> {
    use_cases::vector::add_vertex(state, node_id, position, from_vertex, outgoing_tangent)
}

pub fn delete_vertex(state: &mut AppState, node_id: &str, vertex: usize) -> anyhow::Result<()> {
    use_cases::vector::delete_vertex(state, node_id, vertex)
}

pub fn delete_segment(state: &mut AppState, node_id: &str, segment: usize) -> anyhow::Result<()> {
    use_cases::vector::delete_segment(state, node_id, segment)
}

pub fn split_segment(
    state: &mut AppState,
    node_id: &str,
    point: PointOnSegment,
) -> anyhow::Result<()> {
    use_cases::vector::split_segment(state, node_id, point)
}

pub fn translate_vertex(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    delta: DVec2,
) -> anyhow::Result<()> {
    use_cases::vector::translate_vertex(state, node_id, vertex, delta)
}

pub fn translate_segment(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    delta: DVec2,
) -> anyhow::Result<()> {
    use_cases::vector::translate_segment(state, node_id, segment, delta)
}

// === Netz-Auswahl ===

pub fn translate_selection(state: &mut AppState, delta: DVec2) -> anyhow::Result<()> {
    use_cases::vector::translate_vector_selection(state, delta)
}

pub fn delete_selection(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::vector::delete_vector_selection(state)
}

pub fn duplicate_selection(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::vector::duplicate_vector_selection(state)
}

// === Biegen & Tangenten ===

pub fn begin_bend_segment(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
) -> anyhow::Result<()> {
    use_cases::vector::begin_bend_segment(state, node_id, segment)
}

pub fn bend_segment(state: &mut AppState, t: f64, target: DVec2) -> anyhow::Result<()> {
    use_cases::vector::bend_segment(state, t, target)
}

pub fn update_tangent(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    control: TangentControl,
    value: DVec2,
    mirroring: TangentMirroringMode,
) -> anyhow::Result<()> {
    use_cases::vector::update_tangent(state, node_id, segment, control, value, mirroring)
}

pub fn delete_tangent(
    state: &mut AppState,
    node_id: &str,
    segment: usize,
    control: TangentControl,
) -> anyhow::Result<()> {
    use_cases::vector::delete_tangent(state, node_id, segment, control)
}

pub fn set_corner_tangents(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    value: Option<DVec2>,
) -> anyhow::Result<()> {
    use_cases::vector::set_corner_tangents(state, node_id, vertex, value)
}

pub fn bend_corner(
    state: &mut AppState,
    node_id: &str,
    vertex: usize,
    preferred_side: Option<TangentControl>,
) -> anyhow::Result<()> {
    use_cases::vector::bend_corner(state, node_id, vertex, preferred_side)
}

// === Netzweite Operationen ===

pub fn planarize(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    use_cases::vector::planarize(state, node_id)
}

pub fn optimize(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    use_cases::vector::optimize(state, node_id)
}

pub fn union(state: &mut AppState, target: &str, source: &str) -> anyhow::Result<()> {
    use_cases::vector::union_networks(state, target, source)
}

// === Zeichnen ===

pub fn begin_draw(state: &mut AppState, tool: DrawTool, position: DVec2) -> anyhow::Result<()> {
    use_cases::draw::begin_draw(state, tool, position)
}

pub fn draw_to(state: &mut AppState, position: DVec2) -> anyhow::Result<()> {
    use_cases::draw::draw_to(state, position)
}

pub fn end_gesture(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::draw::end_gesture(state)
}
