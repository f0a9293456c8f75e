//! In-memory polygon representation.

use crate::error::{GeoPolyError, Result};

/// A non-empty, ordered ring of `coords.len() / 2` vertices.
///
/// Vertices are stored as flat `[x0, y0, x1, y1, ...]`; there is no stored
/// duplicate of the closing vertex. `little_endian` records which byte
/// order this polygon would serialize to on the wire in its current host
/// representation (always the host's own endianness once decoded - see
/// [`Polygon::from_bytes`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) little_endian: bool,
    pub(crate) coords: Vec<f32>,
}

impl Polygon {
    /// Build a polygon from `coords` (`[x0, y0, x1, y1, ...]`).
    ///
    /// Returns [`GeoPolyError::TooFewVertices`] if `coords` does not
    /// describe at least 3 vertices.
    pub fn new(coords: Vec<f32>) -> Result<Self> {
        let n_vertex = coords.len() / 2;
        if coords.len() % 2 != 0 || n_vertex < 3 {
            return Err(GeoPolyError::TooFewVertices(n_vertex));
        }
        Ok(Polygon {
            little_endian: cfg!(target_endian = "little"),
            coords,
        })
    }

    /// Number of vertices in the ring.
    pub fn n_vertex(&self) -> usize {
        self.coords.len() / 2
    }

    /// The x or y component of vertex `i` (`component` 0 = x, 1 = y).
    pub fn coord(&self, vertex: usize, component: usize) -> f32 {
        self.coords[vertex * 2 + component]
    }

    /// The `(x, y)` pair for vertex `i`.
    pub fn vertex(&self, i: usize) -> (f32, f32) {
        (self.coords[i * 2], self.coords[i * 2 + 1])
    }

    /// All vertices as flat `[x0, y0, x1, y1, ...]`.
    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Whether this polygon's host representation is little-endian.
    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    /// Total length in bytes of this polygon's binary (blob) encoding.
    pub fn byte_len(&self) -> usize {
        4 + 8 * self.n_vertex()
    }

    /// A new polygon with the same vertices listed in reverse order.
    ///
    /// Used to flip orientation (CCW <-> CW); see the area-sign property in
    /// the testable-properties list.
    pub fn reversed(&self) -> Polygon {
        let n = self.n_vertex();
        let mut coords = Vec::with_capacity(self.coords.len());
        for i in (0..n).rev() {
            let (x, y) = self.vertex(i);
            coords.push(x);
            coords.push(y);
        }
        Polygon {
            little_endian: self.little_endian,
            coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_three_vertices() {
        let err = Polygon::new(vec![0.0, 0.0, 1.0, 0.0]).unwrap_err();
        assert_eq!(err, GeoPolyError::TooFewVertices(2));
    }

    #[test]
    fn accessors_read_back_vertices() {
        let p = Polygon::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(p.n_vertex(), 3);
        assert_eq!(p.vertex(1), (1.0, 0.0));
        assert_eq!(p.coord(2, 1), 1.0);
        assert_eq!(p.byte_len(), 4 + 8 * 3);
    }

    #[test]
    fn reversed_flips_vertex_order() {
        let p = Polygon::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        let r = p.reversed();
        assert_eq!(r.vertex(0), p.vertex(2));
        assert_eq!(r.vertex(2), p.vertex(0));
    }
}
