use glam::DVec2;
use std::sync::Arc;
use vector_canvas_editor::{
    AppCommand, AppController, AppState, Document, EditorState, ManualClock, Node, VectorNetwork,
};

mod editing;
mod gestures;
mod history;
mod node_graph;

pub const START_MS: u64 = 10_000;

pub fn v(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}

/// AppState mit manueller Uhr und den gegebenen Nodes.
pub fn state_with(nodes: Vec<Node>) -> (AppState, ManualClock) {
    let clock = ManualClock::new(START_MS);
    let mut document = Document::new();
    for node in nodes {
        document.insert_node(node);
    }
    let state = AppState::new()
        .with_clock(clock.clone())
        .with_document(document);
    (state, clock)
}

/// Vector-Node mit einer geraden Strecke `(0,0) -> (len,0)`.
pub fn line_node(id: &str, len: f64) -> Node {
    Node::vector(id, VectorNetwork::polyline(&[v(0.0, 0.0), v(len, 0.0)]))
}

pub fn dispatch(
    controller: &mut AppController,
    state: &mut AppState,
    command: AppCommand,
) -> Arc<EditorState> {
    controller
        .handle_command(state, command)
        .expect("Command sollte ohne Fehler durchlaufen")
}

pub fn network<'a>(state: &'a AppState, node_id: &str) -> &'a VectorNetwork {
    state
        .document()
        .node(node_id)
        .and_then(|n| n.vector_network())
        .expect("Vector-Node sollte existieren")
}

/// Vertex-Positionen im Canvas-Raum (lokal + Node-Ursprung).
pub fn canvas_vertices(state: &AppState, node_id: &str) -> Vec<DVec2> {
    let origin = state
        .document()
        .node(node_id)
        .expect("Node sollte existieren")
        .origin();
    network(state, node_id)
        .vertices
        .iter()
        .map(|p| *p + origin)
        .collect()
}
