//! Application-Layer: Controller, State, History und Use-Cases.

pub mod clock;
pub mod command_log;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod handlers;
pub mod history;
pub mod patch;
/// Application State
///
/// Undofähiger Editor-Zustand plus Laufzeit-Kollaborateure (Uhr, Geometrie).
pub mod state;
pub mod use_cases;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::AppCommand;
pub use geometry::{DeclaredGeometry, GeometryQuery};
pub use history::{HistoryEntry, HistoryManager};
pub use patch::{Patch, PatchOp, PathSegment};
pub use state::{AppState, DrawTool, EditorState, Gesture, Selection, VectorSelection};
