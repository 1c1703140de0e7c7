//! Use-Cases der Application-Layer-Orchestrierung.

pub mod draw;
pub mod file_io;
pub mod node_graph;
pub mod scale;
pub mod selection;
pub mod vector;
