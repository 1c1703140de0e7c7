//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Konfiguration, die `app`, `svg` und der
//! Headless-Treiber gemeinsam nutzen.

pub mod options;

pub use options::EditorOptions;
pub use options::{MAX_HISTORY, MERGE_WINDOW_MS};
