//! Textual renderers: the canonical JSON-array form and an SVG `<path>`.

use std::fmt::Write as _;

use super::types::Polygon;

/// Render as `[[x0,y0],[x1,y1],...,[x0,y0]]`, always repeating the first
/// vertex to close the ring - this is the form [`super::json::parse_json`]
/// is the mirror image of.
pub fn to_json_array(p: &Polygon) -> String {
    let n = p.n_vertex();
    let mut out = String::with_capacity(16 + n * 16);
    out.push('[');
    for i in 0..n {
        let (x, y) = p.vertex(i);
        if i > 0 {
            out.push(',');
        }
        write!(out, "[{},{}]", x, y).unwrap();
    }
    let (x0, y0) = p.vertex(0);
    write!(out, ",[{},{}]]", x0, y0).unwrap();
    out
}

/// Render the `points` attribute value for an SVG `<polyline>`: each vertex
/// as `x,y`, space-separated, with the first vertex repeated at the end to
/// close the ring. Does not include the surrounding quotes or the
/// `<polyline>` tag itself - see `functions::geopoly_svg` for those, since
/// the tag also carries caller-supplied attributes this module knows
/// nothing about.
pub fn to_svg_points(p: &Polygon) -> String {
    let n = p.n_vertex();
    let mut out = String::with_capacity(16 + n * 16);
    for i in 0..n {
        let (x, y) = p.vertex(i);
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{},{}", x, y).unwrap();
    }
    let (x0, y0) = p.vertex(0);
    write!(out, " {},{}", x0, y0).unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn json_array_closes_the_ring() {
        let s = to_json_array(&triangle());
        assert_eq!(s, "[[0,0],[1,0],[0,1],[0,0]]");
    }

    #[test]
    fn svg_points_repeats_the_first_vertex_to_close() {
        let s = to_svg_points(&triangle());
        assert_eq!(s, "0,0 1,0 0,1 0,0");
    }
}
