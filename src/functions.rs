//! Scalar SQL functions: `geopoly_blob`, `geopoly_json`, `geopoly_svg`,
//! `geopoly_area`, `geopoly_bbox`, `geopoly_within`, `geopoly_overlap`,
//! `geopoly_debug`.
//!
//! Every function here follows the same NULL-on-bad-geometry convention as
//! the reference implementation: a BLOB or TEXT argument that doesn't
//! decode to a polygon produces SQL NULL, never a thrown error. Argument
//! *count* mistakes (handled by `rusqlite` before we're called) and actual
//! allocation failure are the only things that surface as real errors.

use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Result};

use crate::debug;
use crate::geom;
use crate::overlap;
use crate::polygon::Polygon;

/// Coerce a SQL argument into a [`Polygon`]: a BLOB is read as the binary
/// codec, TEXT is parsed as the forgiving JSON array, anything else (and
/// any parse/codec failure) coerces to `None`. Every `geopoly_*` function
/// funnels its polygon arguments through this so the two input forms stay
/// interchangeable everywhere, and so "not a valid polygon" always means
/// "return NULL" rather than "raise an error".
pub(crate) fn polygon_from_value(v: ValueRef<'_>) -> Option<Polygon> {
    match v {
        ValueRef::Blob(b) => Polygon::from_bytes(b).ok(),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|text| crate::polygon::parse_json(text).ok()),
        _ => None,
    }
}

fn geopoly_blob(ctx: &Context) -> Result<Option<Vec<u8>>> {
    Ok(polygon_from_value(ctx.get_raw(0)).map(|p| p.to_bytes()))
}

fn geopoly_json(ctx: &Context) -> Result<Option<String>> {
    Ok(polygon_from_value(ctx.get_raw(0)).map(|p| crate::polygon::to_json_array(&p)))
}

fn geopoly_svg(ctx: &Context) -> Result<Option<String>> {
    let Some(p) = polygon_from_value(ctx.get_raw(0)) else {
        return Ok(None);
    };
    let points = crate::polygon::to_svg_points(&p);
    let mut out = format!("<polyline points='{points}'");
    for i in 1..ctx.len() {
        if let Ok(s) = ctx.get_raw(i).as_str() {
            if !s.is_empty() {
                out.push(' ');
                out.push_str(s);
            }
        }
    }
    out.push_str("></polyline>");
    Ok(Some(out))
}

fn geopoly_area(ctx: &Context) -> Result<Option<f64>> {
    Ok(polygon_from_value(ctx.get_raw(0)).map(|p| geom::area(&p)))
}

fn geopoly_bbox(ctx: &Context) -> Result<Option<Vec<u8>>> {
    Ok(polygon_from_value(ctx.get_raw(0)).map(|p| geom::bbox_polygon(&p).to_bytes()))
}

fn geopoly_within(ctx: &Context) -> Result<Option<i32>> {
    let Some(p) = polygon_from_value(ctx.get_raw(0)) else {
        return Ok(None);
    };
    let x: f64 = ctx.get(1)?;
    let y: f64 = ctx.get(2)?;
    Ok(Some(geom::within(&p, x, y)))
}

fn geopoly_overlap(ctx: &Context) -> Result<Option<i64>> {
    let (Some(p1), Some(p2)) = (
        polygon_from_value(ctx.get_raw(0)),
        polygon_from_value(ctx.get_raw(1)),
    ) else {
        return Ok(None);
    };
    Ok(Some(overlap::overlap(&p1, &p2).as_code()))
}

/// No-op unless built with the crate's debug-tracing Cargo feature enabled;
/// see [`debug`].
fn geopoly_debug(ctx: &Context) -> Result<()> {
    if cfg!(feature = "geopoly_debug") {
        let enabled: i64 = ctx.get(0)?;
        debug::set_debug(enabled != 0);
    }
    Ok(())
}

/// Register every `geopoly_*` scalar function on `conn`.
pub fn register(conn: &Connection) -> Result<()> {
    let default_flags: FunctionFlags =
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC | FunctionFlags::SQLITE_INNOCUOUS;

    conn.create_scalar_function("geopoly_blob", 1, default_flags, geopoly_blob)?;
    conn.create_scalar_function("geopoly_json", 1, default_flags, geopoly_json)?;
    conn.create_scalar_function("geopoly_svg", -1, default_flags, geopoly_svg)?;
    conn.create_scalar_function("geopoly_area", 1, default_flags, geopoly_area)?;
    conn.create_scalar_function("geopoly_bbox", 1, default_flags, geopoly_bbox)?;
    conn.create_scalar_function("geopoly_within", 3, default_flags, geopoly_within)?;
    conn.create_scalar_function("geopoly_overlap", 2, default_flags, geopoly_overlap)?;
    // Not deterministic: flips a process-wide flag as a side effect.
    conn.create_scalar_function(
        "geopoly_debug",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_INNOCUOUS,
        geopoly_debug,
    )?;
    Ok(())
}
