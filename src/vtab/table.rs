//! The `VTab`/`CreateVTab`/`UpdateVTab` side of the `geopoly` module.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use rusqlite::types::Value;
use rusqlite::vtab::{
    CreateVTab, IndexConstraintOp, IndexInfo, VTab, VTabConnection, VTabKind, Values,
};
use rusqlite::{Error, Result};

use crate::geom;
use crate::polygon::Polygon;

use super::cursor::GeopolyCursor;
use super::index::{RstarIndex, SpatialIndex};

pub(super) struct Row {
    pub(super) shape: Polygon,
    pub(super) bbox: [f32; 4],
    pub(super) aux: Vec<Value>,
}

pub(super) struct Storage {
    pub(super) rows: BTreeMap<i64, Row>,
    pub(super) next_rowid: i64,
    pub(super) index: RstarIndex,
}

/// Strategy chosen by `best_index`, encoded as the `idxNum` passed back to
/// `filter`. Mirrors the original module's three-strategy cost model:
/// rowid lookup is cheapest, a `MATCH`-driven bbox query next, full scan
/// last.
#[derive(Clone, Copy)]
pub(super) enum Strategy {
    Rowid = 1,
    Bbox = 2,
    FullScan = 3,
}

pub struct GeopolyTable {
    pub(super) aux_columns: Vec<String>,
    pub(super) storage: RefCell<Storage>,
    /// Count of open cursors, standing in for the R-tree's `nNodeRef`
    /// node-pin guard: while a cursor is outstanding a write must not
    /// mutate the rows it's iterating over.
    pub(super) open_cursors: Cell<usize>,
}

fn polygon_column_index(aux_columns: &[String]) -> usize {
    aux_columns.len()
}

unsafe impl<'vtab> VTab<'vtab> for GeopolyTable {
    type Aux = ();
    type Cursor = GeopolyCursor<'vtab>;

    fn connect(
        db: &mut VTabConnection,
        _aux: Option<&Self::Aux>,
        args: &[&[u8]],
    ) -> Result<(String, Self)> {
        // args[0] = module name, args[1] = db name, args[2] = table name,
        // args[3..] = user-declared column names (the "shadow" columns
        // that ride alongside every polygon, e.g. a `name` column).
        let aux_columns: Vec<String> = args[3..]
            .iter()
            .map(|a| String::from_utf8_lossy(a).trim().to_string())
            .collect();

        let mut sql = String::from("CREATE TABLE x(");
        for name in &aux_columns {
            sql.push_str(name);
            sql.push(',');
        }
        sql.push_str("_shape, _bbox HIDDEN)");
        db.config(rusqlite::vtab::VTabConfig::ConstraintSupport)?;

        Ok((
            sql,
            GeopolyTable {
                aux_columns,
                storage: RefCell::new(Storage {
                    rows: BTreeMap::new(),
                    next_rowid: 1,
                    index: RstarIndex::default(),
                }),
                open_cursors: Cell::new(0),
            },
        ))
    }

    fn best_index(&self, info: &mut IndexInfo) -> Result<()> {
        let mut has_match = false;
        for constraint in info.constraints() {
            if constraint.operator() == IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_MATCH {
                has_match = true;
            }
        }

        if !has_match {
            for (i, constraint) in info.constraints().enumerate() {
                if constraint.is_usable()
                    && constraint.column() < 0
                    && constraint.operator() == IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_EQ
                {
                    let mut usage = info.constraint_usage(i);
                    usage.set_argv_index(1);
                    usage.set_omit(true);
                    info.set_idx_num(Strategy::Rowid as i32);
                    info.set_estimated_cost(30.0);
                    info.set_estimated_rows(1);
                    return Ok(());
                }
            }
        }

        let shape_col = polygon_column_index(&self.aux_columns) as i32;
        for (i, constraint) in info.constraints().enumerate() {
            if constraint.is_usable()
                && constraint.column() == shape_col // a MATCH against the visible _shape column
                && constraint.operator() == IndexConstraintOp::SQLITE_INDEX_CONSTRAINT_MATCH
            {
                let mut usage = info.constraint_usage(i);
                usage.set_argv_index(1);
                usage.set_omit(true);
                info.set_idx_num(Strategy::Bbox as i32);
                let n = self.storage.borrow().rows.len().max(1) as f64;
                info.set_estimated_cost(n.log2().max(1.0) * 30.0);
                info.set_estimated_rows((n / 10.0).max(1.0) as i64);
                return Ok(());
            }
        }

        info.set_idx_num(Strategy::FullScan as i32);
        let n = self.storage.borrow().rows.len().max(1) as f64;
        info.set_estimated_cost(n * 30.0);
        info.set_estimated_rows(n as i64);
        Ok(())
    }

    fn open(&'vtab self) -> Result<Self::Cursor> {
        Ok(GeopolyCursor::new(self))
    }
}

unsafe impl<'vtab> CreateVTab<'vtab> for GeopolyTable {
    const KIND: VTabKind = VTabKind::Default;

    fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

unsafe impl<'vtab> rusqlite::vtab::UpdateVTab<'vtab> for GeopolyTable {
    fn delete(&mut self, old_rowid: rusqlite::types::ValueRef<'_>) -> Result<()> {
        self.check_not_locked()?;
        let rowid = old_rowid
            .as_i64()
            .map_err(|e| Error::ModuleError(e.to_string()))?;
        let mut storage = self.storage.borrow_mut();
        if let Some(row) = storage.rows.remove(&rowid) {
            storage.index.remove(rowid, row.bbox);
        }
        Ok(())
    }

    fn insert(&mut self, args: &Values<'_>) -> Result<i64> {
        self.check_not_locked()?;
        self.upsert(args, None)
    }

    fn update(&mut self, args: &Values<'_>) -> Result<()> {
        self.check_not_locked()?;
        let old_rowid: i64 = args.get(0)?;
        self.upsert(args, Some(old_rowid))?;
        Ok(())
    }
}

impl GeopolyTable {
    /// Reject the call with a retryable "locked" error if a cursor is
    /// currently iterating this table - mirrors the R-tree's rule that a
    /// write must not proceed while a read cursor pins a node.
    fn check_not_locked(&self) -> Result<()> {
        if self.open_cursors.get() > 0 {
            return Err(Error::ModuleError(
                "database table is locked".to_string(),
            ));
        }
        Ok(())
    }

    /// Shared insert/update path. `args` layout (matching the schema
    /// declared in `connect`): `[new_rowid_or_null, aux_cols..., shape,
    /// bbox_hidden]` for insert; `[old_rowid, new_rowid_or_null,
    /// aux_cols..., shape, bbox_hidden]` for update.
    ///
    /// Follows the ordering in the source design's concurrency notes:
    /// (a) bbox validation, (b) conflict check, (c) old-row deletion,
    /// (d) new-row insertion, (e) aux-column write (folded into (d) here,
    /// since a row's aux columns live alongside its shape in one map entry
    /// rather than a separate prepared statement).
    fn upsert(&mut self, args: &Values<'_>, old_rowid: Option<i64>) -> Result<i64> {
        let base = if old_rowid.is_some() { 2 } else { 1 };
        let n_aux = self.aux_columns.len();

        // (a) bbox validation
        let shape = crate::functions::polygon_from_value(args.get_raw(base + n_aux))
            .ok_or_else(|| Error::ModuleError("_shape does not contain a valid polygon".into()))?;
        let bbox = geom::bbox(&shape);

        let mut aux = Vec::with_capacity(n_aux);
        for i in 0..n_aux {
            aux.push(args.get::<Value>(base + i)?);
        }

        let new_rowid_arg: Option<i64> =
            args.get(if old_rowid.is_some() { 1 } else { 0 })?;
        let rowid = new_rowid_arg.or(old_rowid);

        let mut storage = self.storage.borrow_mut();
        let rowid = match rowid {
            Some(r) => r,
            None => {
                let r = storage.next_rowid;
                storage.next_rowid += 1;
                r
            }
        };

        // (b) conflict check: a rowid collision with a *different* row,
        // always resolved as REPLACE. See DESIGN.md's open-question
        // decision #8 for why (rusqlite's safe vtab API has no accessor
        // for the host's on-conflict mode) and the gap this leaves against
        // SPEC_FULL.md §4.H/§7.
        if Some(rowid) != old_rowid {
            if let Some(displaced) = storage.rows.remove(&rowid) {
                storage.index.remove(rowid, displaced.bbox);
            }
        }

        // (c) old-row deletion
        if let Some(old) = old_rowid {
            if old != rowid {
                if let Some(prev) = storage.rows.remove(&old) {
                    storage.index.remove(old, prev.bbox);
                }
            }
        }

        storage.next_rowid = storage.next_rowid.max(rowid + 1);

        // (d) new-row insertion (+ aux write)
        if let Some(prev) = storage.rows.get(&rowid) {
            storage.index.remove(rowid, prev.bbox);
        }
        storage.index.insert(rowid, bbox);
        storage.rows.insert(rowid, Row { shape, bbox, aux });
        Ok(rowid)
    }
}

