//! Geometry error types

use std::fmt;

/// Error type for mesh construction
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A triangle references a vertex that does not exist
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// A grid was requested with fewer than two samples per side
    InvalidResolution(usize),
    /// A per-vertex attribute array does not match the vertex count
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::IndexOutOfRange { index, vertex_count } => write!(
                f,
                "Triangle index {} out of range for {} vertices",
                index, vertex_count
            ),
            GeometryError::InvalidResolution(res) => {
                write!(f, "Grid resolution must be at least 2, got {}", res)
            }
            GeometryError::AttributeLength {
                attribute,
                expected,
                actual,
            } => write!(
                f,
                "Attribute '{}' has {} entries, expected {}",
                attribute, actual, expected
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GeometryError::IndexOutOfRange {
            index: 7,
            vertex_count: 3,
        };
        assert_eq!(err.to_string(), "Triangle index 7 out of range for 3 vertices");
        assert!(GeometryError::InvalidResolution(1).to_string().contains("at least 2"));
    }
}
