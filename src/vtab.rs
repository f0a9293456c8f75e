//! `geopoly` virtual table: a rowid table of polygons backed by an R-tree.
//!
//! # Submodules
//! - `index` - the `SpatialIndex` trait and its `rstar`-backed implementation
//! - `table` - the `VTab`/`CreateVTab`/`UpdateVTab` implementation
//! - `cursor` - the `VTabCursor` implementation

mod cursor;
mod index;
mod table;

pub use table::GeopolyTable;

use rusqlite::Connection;

/// Register the `geopoly` virtual table module on `conn`.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    let module = rusqlite::vtab::read_write_module::<GeopolyTable>();
    conn.create_module("geopoly", module, None)
}
