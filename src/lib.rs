//! Vector Canvas Editor Library.
//! Dokument-Mutations-Engine (Vector Networks, Patch-History) als Library
//! exportiert für Tests, Replay und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod svg;

pub use app::{
    AppCommand, AppController, AppState, Clock, EditorState, GeometryQuery, HistoryEntry,
    HistoryManager, ManualClock, Selection,
};
pub use core::{
    CubicBezier, Document, Node, NodeId, NodeKind, Rect, Segment, TangentControl,
    TangentMirroringMode, VectorNetwork, VectorNetworkEditor,
};
pub use shared::EditorOptions;
pub use svg::{parse_svg, write_svg};
