//! Cursor over the `geopoly` virtual table.

use std::os::raw::c_int;

use rusqlite::vtab::{Context, VTabCursor, Values};
use rusqlite::Result;

use crate::overlap::{self, Overlap};

use super::table::{GeopolyTable, Strategy};

pub struct GeopolyCursor<'vtab> {
    table: &'vtab GeopolyTable,
    rowids: Vec<i64>,
    pos: usize,
}

impl<'vtab> GeopolyCursor<'vtab> {
    pub(super) fn new(table: &'vtab GeopolyTable) -> Self {
        table.open_cursors.set(table.open_cursors.get() + 1);
        GeopolyCursor {
            table,
            rowids: Vec::new(),
            pos: 0,
        }
    }

    fn current_rowid(&self) -> i64 {
        self.rowids[self.pos]
    }
}

impl Drop for GeopolyCursor<'_> {
    fn drop(&mut self) {
        self.table
            .open_cursors
            .set(self.table.open_cursors.get() - 1);
    }
}

unsafe impl VTabCursor for GeopolyCursor<'_> {
    fn filter(&mut self, idx_num: c_int, _idx_str: Option<&str>, args: &Values<'_>) -> Result<()> {
        let storage = self.table.storage.borrow();
        self.rowids = if idx_num == Strategy::Rowid as c_int {
            let rowid: i64 = args.get(0)?;
            if storage.rows.contains_key(&rowid) {
                vec![rowid]
            } else {
                Vec::new()
            }
        } else if idx_num == Strategy::Bbox as c_int {
            let query = crate::functions::polygon_from_value(args.get_raw(0)).ok_or_else(|| {
                rusqlite::Error::ModuleError("MATCH argument is not a valid polygon".into())
            })?;
            let bbox = crate::geom::bbox(&query);
            // The R-tree only prunes by bounding box; a candidate's shape
            // still needs the exact plane-sweep test before it counts as a
            // MATCH (property 10: R-tree pruning soundness).
            storage
                .index
                .query(bbox)
                .into_iter()
                .filter(|rowid| {
                    let row = &storage.rows[rowid];
                    overlap::overlap(&row.shape, &query) != Overlap::Disjoint
                })
                .collect()
        } else {
            storage.rows.keys().copied().collect()
        };
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        self.pos += 1;
        Ok(())
    }

    fn eof(&self) -> bool {
        self.pos >= self.rowids.len()
    }

    fn column(&self, ctx: &mut Context, i: c_int) -> Result<()> {
        let storage = self.table.storage.borrow();
        let row = &storage.rows[&self.current_rowid()];
        let n_aux = self.table.aux_columns.len() as c_int;
        if i < n_aux {
            ctx.set_result(&row.aux[i as usize])
        } else if i == n_aux {
            ctx.set_result(&row.shape.to_bytes())
        } else {
            // _bbox HIDDEN: expose as the 4-vertex geopoly blob geopoly_bbox(X) would produce.
            ctx.set_result(&crate::geom::bbox_polygon(&row.shape).to_bytes())
        }
    }

    fn rowid(&self) -> Result<i64> {
        Ok(self.current_rowid())
    }
}

use super::index::SpatialIndex;
