//! Core polygon type and its codecs.
//!
//! # Submodules
//! - `types` - the in-memory `Polygon` representation
//! - `binary` - the on-disk blob codec (endian-aware)
//! - `json` - the forgiving `[[x,y],...]` textual parser
//! - `render` - JSON / SVG textual renderers

mod binary;
mod json;
mod render;
mod types;

pub use json::parse_json;
pub use render::{to_json_array, to_svg_points};
pub use types::Polygon;
