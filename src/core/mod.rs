//! Core-Domänentypen: Vector Network, Bezier-Mathematik, Dokument, Spatial-Index.

pub mod bezier;
/// Dokument-Modell des Canvas
///
/// - Document: Container für alle Nodes und die Szenen-Reihenfolge
/// - Node: Einzelner Canvas-Node mit Position, Größe und Inhalt
/// - NodeKind: Inhalt eines Nodes (u.a. Vector Network)
pub mod document;
pub mod network_editor;
pub mod rect;
pub mod spatial;
pub mod vector_network;

pub use bezier::CubicBezier;
pub use document::{Dimension, Document, Node, NodeId, NodeKind};
pub use network_editor::{
    infer_mirroring_mode, FrozenSegment, NetworkSelection, OptimizeConfig, SplitOptions,
    VectorNetworkEditor,
};
pub use rect::Rect;
pub use spatial::{VertexIndex, VertexMatch};
pub use vector_network::{
    PointOnSegment, Segment, SegmentEnd, TangentControl, TangentMirroringMode, VectorNetwork,
    KAPPA,
};
