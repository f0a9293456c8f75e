//! On-disk binary codec.
//!
//! ```text
//! offset  bytes  meaning
//!  0      1      endian flag: 0 = big-endian coords, 1 = little-endian coords
//!  1      3      nVertex, 24-bit BIG-endian unsigned integer
//!  4      8·n    nVertex * 2 coordinates, x then y, in the declared endian
//! ```

use byteorder::{BigEndian, LittleEndian, NativeEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use super::types::Polygon;
use crate::error::{GeoPolyError, Result};

const COORD_SIZE: usize = std::mem::size_of::<f32>();
const HEADER_LEN: usize = 4;
const MIN_BLOB_LEN: usize = HEADER_LEN + 6 * COORD_SIZE;

impl Polygon {
    /// Decode a polygon from its binary blob representation.
    ///
    /// Validates, in order: minimum length for at least 3 vertices, a
    /// well-formed endian flag, and an exact match between the declared
    /// vertex count and the blob's actual length.
    pub fn from_bytes(blob: &[u8]) -> Result<Polygon> {
        if blob.len() < MIN_BLOB_LEN {
            return Err(GeoPolyError::BlobTooShort {
                len: blob.len(),
                min: MIN_BLOB_LEN,
            });
        }
        let endian_flag = blob[0];
        if endian_flag != 0 && endian_flag != 1 {
            return Err(GeoPolyError::BadEndianFlag(endian_flag));
        }
        let n_vertex = ((blob[1] as usize) << 16) | ((blob[2] as usize) << 8) | (blob[3] as usize);
        let expected = HEADER_LEN + 8 * n_vertex;
        if blob.len() != expected {
            return Err(GeoPolyError::BlobLengthMismatch {
                declared: blob.len(),
                expected,
            });
        }

        let mut coords = Vec::with_capacity(n_vertex * 2);
        let mut cur = Cursor::new(&blob[HEADER_LEN..]);
        for _ in 0..n_vertex * 2 {
            let v = if endian_flag == 0 {
                cur.read_f32::<BigEndian>()
            } else {
                cur.read_f32::<LittleEndian>()
            }
            .expect("length was validated above");
            coords.push(v);
        }

        Ok(Polygon {
            little_endian: cfg!(target_endian = "little"),
            coords,
        })
    }

    /// Encode this polygon to its binary blob representation, using the
    /// host's native endianness for the coordinate payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n_vertex = self.n_vertex();
        let mut out = Vec::with_capacity(self.byte_len());

        let endian_flag: u8 = if cfg!(target_endian = "little") { 1 } else { 0 };
        out.push(endian_flag);
        out.push(((n_vertex >> 16) & 0xff) as u8);
        out.push(((n_vertex >> 8) & 0xff) as u8);
        out.push((n_vertex & 0xff) as u8);

        for &c in &self.coords {
            out.write_f32::<NativeEndian>(c)
                .expect("writing to a Vec<u8> cannot fail");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn round_trip() {
        let p = square();
        let blob = p.to_bytes();
        let back = Polygon::from_bytes(&blob).unwrap();
        assert_eq!(back.coords(), p.coords());
        assert_eq!(back.n_vertex(), 4);
    }

    #[test]
    fn rejects_short_blob() {
        let err = Polygon::from_bytes(&[1, 0, 0, 3]).unwrap_err();
        assert!(matches!(err, GeoPolyError::BlobTooShort { .. }));
    }

    #[test]
    fn rejects_bad_endian_flag() {
        let mut blob = square().to_bytes();
        blob[0] = 2;
        let err = Polygon::from_bytes(&blob).unwrap_err();
        assert_eq!(err, GeoPolyError::BadEndianFlag(2));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut blob = square().to_bytes();
        blob.pop();
        let err = Polygon::from_bytes(&blob).unwrap_err();
        assert!(matches!(err, GeoPolyError::BlobLengthMismatch { .. }));
    }

    #[test]
    fn flipped_endian_blob_decodes_to_same_polygon() {
        let p = square();
        let native = p.to_bytes();

        // Build the opposite-endian encoding by hand: flip the flag and
        // byte-swap every coordinate.
        let mut flipped = native.clone();
        flipped[0] ^= 1;
        for chunk in flipped[4..].chunks_mut(4) {
            chunk.reverse();
        }

        let a = Polygon::from_bytes(&native).unwrap();
        let b = Polygon::from_bytes(&flipped).unwrap();
        assert_eq!(a.coords(), b.coords());
    }

    #[test]
    fn blob_with_three_vertices_from_c_reference_decodes() {
        // S12: header 00 00 00 03 + 3 big-endian f32 pairs, decoded on a
        // little-endian host (every CI target for this crate): coordinates
        // must come out byte-swapped into the correct values.
        let mut blob = vec![0u8, 0, 0, 3];
        for v in [0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0] {
            blob.extend_from_slice(&v.to_be_bytes());
        }
        let p = Polygon::from_bytes(&blob).unwrap();
        assert_eq!(p.coords(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }
}
