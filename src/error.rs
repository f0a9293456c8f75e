//! Error types for the polygon codec and geometry primitives.
//!
//! Parsing and geometry failures are modeled as a small matchable enum so
//! callers (the scalar-function coerce step, the vtab update path) can
//! distinguish "bad blob header" from "bad JSON grammar" from "too few
//! vertices" without string-matching a message.

use std::fmt;

/// Why a byte blob or JSON string failed to decode into a [`crate::polygon::Polygon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoPolyError {
    /// The blob was shorter than the minimum 3-vertex header+body length.
    BlobTooShort { len: usize, min: usize },
    /// The blob's declared length didn't match `4 + 8 * nVertex`.
    BlobLengthMismatch { declared: usize, expected: usize },
    /// The endian flag byte was neither 0 nor 1.
    BadEndianFlag(u8),
    /// The JSON input was not a well-formed `[[x,y],...]` array.
    InvalidJson(String),
    /// The JSON array parsed but yielded fewer than 3 distinct vertices.
    TooFewVertices(usize),
    /// Neither a BLOB nor TEXT value could be interpreted as a polygon.
    NotAPolygon,
}

impl fmt::Display for GeoPolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoPolyError::BlobTooShort { len, min } => {
                write!(f, "polygon blob too short: {len} bytes, need at least {min}")
            }
            GeoPolyError::BlobLengthMismatch { declared, expected } => write!(
                f,
                "polygon blob length {declared} does not match header-implied length {expected}"
            ),
            GeoPolyError::BadEndianFlag(b) => write!(f, "invalid endian flag byte: {b}"),
            GeoPolyError::InvalidJson(msg) => write!(f, "invalid polygon JSON: {msg}"),
            GeoPolyError::TooFewVertices(n) => {
                write!(f, "polygon must have at least 3 vertices, got {n}")
            }
            GeoPolyError::NotAPolygon => write!(f, "not a valid polygon"),
        }
    }
}

impl std::error::Error for GeoPolyError {}

pub type Result<T> = std::result::Result<T, GeoPolyError>;
