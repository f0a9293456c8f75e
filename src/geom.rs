//! Area, bounding box, and point-containment primitives.

use crate::polygon::Polygon;

/// Signed area enclosed by the polygon, via the shoelace formula walked
/// edge by edge (`(x0-x1)*(y0+y1)*0.5`, summed, plus the closing edge back
/// to vertex 0). Positive for a counterclockwise ring, negative for
/// clockwise.
pub fn area(p: &Polygon) -> f64 {
    let n = p.n_vertex();
    let mut total = 0.0f64;
    for i in 0..n - 1 {
        let (x0, y0) = (p.coord(i, 0) as f64, p.coord(i, 1) as f64);
        let (x1, y1) = (p.coord(i + 1, 0) as f64, p.coord(i + 1, 1) as f64);
        total += (x0 - x1) * (y0 + y1) * 0.5;
    }
    let (xn, yn) = (p.coord(n - 1, 0) as f64, p.coord(n - 1, 1) as f64);
    let (x0, y0) = (p.coord(0, 0) as f64, p.coord(0, 1) as f64);
    total += (xn - x0) * (yn + y0) * 0.5;
    total
}

/// Axis-aligned bounding box: `[min_x, min_y, max_x, max_y]`. This is the
/// same shape `SpatialIndex` and `Row::bbox` store, so callers can pass
/// the result straight through without destructuring.
pub fn bbox(p: &Polygon) -> [f32; 4] {
    let (mut min_x, mut min_y) = p.vertex(0);
    let (mut max_x, mut max_y) = (min_x, min_y);
    for i in 1..p.n_vertex() {
        let (x, y) = p.vertex(i);
        if x < min_x {
            min_x = x;
        } else if x > max_x {
            max_x = x;
        }
        if y < min_y {
            min_y = y;
        } else if y > max_y {
            max_y = y;
        }
    }
    [min_x, min_y, max_x, max_y]
}

/// Render a polygon's bounding box as its own 4-vertex rectangle, in the
/// same `[x0,y0,x1,y1,...]` vertex order `geopoly_bbox` emits: min corner,
/// then counterclockwise.
pub fn bbox_polygon(p: &Polygon) -> Polygon {
    let [mn_x, mn_y, mx_x, mx_y] = bbox(p);
    Polygon::new(vec![mn_x, mn_y, mx_x, mn_y, mx_x, mx_y, mn_x, mx_y])
        .expect("a bounding box always has 4 distinct-looking vertices")
}

/// Point-vs-edge classification used by [`within`].
///
/// Returns `2` if `(x0,y0)` lies exactly on the segment, `1` if it is
/// strictly beneath it, `0` otherwise (including when the segment is
/// vertical and the point isn't on it). The left endpoint of the segment
/// (`min(x1,x2)`) is deliberately excluded from "on the segment", which is
/// what lets the accumulated parity below work out at shared vertices.
pub fn point_beneath_line(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> i32 {
    if x0 == x1 && y0 == y1 {
        return 2;
    }
    if x1 < x2 {
        if x0 <= x1 || x0 > x2 {
            return 0;
        }
    } else if x1 > x2 {
        if x0 <= x2 || x0 > x1 {
            return 0;
        }
    } else {
        if x0 != x1 {
            return 0;
        }
        if y0 < y1 && y0 < y2 {
            return 0;
        }
        if y0 > y1 && y0 > y2 {
            return 0;
        }
        return 2;
    }
    let y = y1 + (y2 - y1) * (x0 - x1) / (x2 - x1);
    if y0 == y {
        2
    } else if y0 < y {
        1
    } else {
        0
    }
}

/// Point-in-polygon classification: `0` outside, `1` on the boundary,
/// `2` inside.
pub fn within(p: &Polygon, x0: f64, y0: f64) -> i32 {
    let n = p.n_vertex();
    let mut cnt = 0i32;
    let mut v = 0i32;
    for i in 0..n - 1 {
        let (ax, ay) = (p.coord(i, 0) as f64, p.coord(i, 1) as f64);
        let (bx, by) = (p.coord(i + 1, 0) as f64, p.coord(i + 1, 1) as f64);
        v = point_beneath_line(x0, y0, ax, ay, bx, by);
        if v == 2 {
            break;
        }
        cnt += v;
    }
    if v != 2 {
        let (ax, ay) = (p.coord(n - 1, 0) as f64, p.coord(n - 1, 1) as f64);
        let (bx, by) = (p.coord(0, 0) as f64, p.coord(0, 1) as f64);
        v = point_beneath_line(x0, y0, ax, ay, bx, by);
    }
    if v == 2 {
        1
    } else if (v + cnt) & 1 == 0 {
        0
    } else {
        2
    }
}
