//! Handler für Node-Graph-Operationen und Skalierung.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Node;
use glam::DVec2;

pub fn insert(state: &mut AppState, node: Node) -> anyhow::Result<()> {
    use_cases::node_graph::insert_node(state, node)
}

pub fn remove(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    use_cases::node_graph::remove_node(state, node_id)
}

pub fn translate(state: &mut AppState, node_id: &str, delta: DVec2) -> anyhow::Result<()> {
    use_cases::node_graph::translate_node(state, node_id, delta)
}

pub fn convert_to_vector(state: &mut AppState, node_id: &str) -> anyhow::Result<()> {
    use_cases::node_graph::convert_to_vector(state, node_id)
}

/// Skaliert die aktuelle Node-Selektion.
pub fn scale_selection(state: &mut AppState, factor: f64) -> anyhow::Result<()> {
    use_cases::scale::scale_selection(state, factor)
}
