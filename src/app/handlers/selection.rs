//! Handler für Selektion, Content-Edit und Hover.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{NetworkSelection, NodeId};

pub fn select_nodes(state: &mut AppState, node_ids: &[NodeId], additive: bool) -> anyhow::Result<()> {
    use_cases::selection::select_nodes(state, node_ids, additive)
}

pub fn clear(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::selection::clear_selection(state)
}

pub fn enter_content_edit(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    use_cases::selection::enter_content_edit(state, node_id)
}

pub fn exit_content_edit(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::selection::exit_content_edit(state)
}

pub fn select_vector_items(
    state: &mut AppState,
    selection: NetworkSelection,
    additive: bool,
) -> anyhow::Result<()> {
    use_cases::selection::select_vector_items(state, selection, additive)
}

pub fn hover(state: &mut AppState, node_id: Option<NodeId>) -> anyhow::Result<()> {
    use_cases::selection::hover(state, node_id)
}

pub fn hover_vertex(state: &mut AppState, vertex: Option<usize>) -> anyhow::Result<()> {
    use_cases::selection::hover_vertex(state, vertex)
}
