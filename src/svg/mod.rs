//! SVG Import/Export für Vector Networks.
//!
//! Pfade werden über ihr `d`-Attribut gelesen und geschrieben; Fill, Stroke
//! und Transformationen gehören nicht zum Dokumentmodell und werden ignoriert.

pub mod parser;
pub mod path_data;
pub mod writer;

pub use parser::{parse_svg, SvgPath};
pub use writer::write_svg;
