//! A 2D polygon geometry engine: an endian-aware binary codec and forgiving
//! JSON parser for polygons, geometric primitives (area, bounding box,
//! point containment), a plane-sweep overlap classifier, and a SQLite
//! scalar-function / virtual-table surface built on `rusqlite`.

pub mod debug;
pub mod error;
pub mod functions;
pub mod geom;
pub mod overlap;
pub mod polygon;
pub mod vtab;

use rusqlite::Connection;

/// Register every `geopoly_*` scalar function and the `geopoly` virtual
/// table module on `conn`.
pub fn register_all(conn: &Connection) -> rusqlite::Result<()> {
    functions::register(conn)?;
    vtab::register(conn)?;
    Ok(())
}
