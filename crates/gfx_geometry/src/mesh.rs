//! Indexed triangle meshes

use gfx_math::{Rgba, Vec3};

use crate::error::GeometryError;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` when there are none
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min_components(p), hi.max_components(p)));
        Some(Self { min, max })
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A triangle mesh with optional per-vertex attributes
///
/// `normals`, `tex_coords` and `colors` are either empty or have one entry
/// per position.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<[f32; 2]>,
    pub colors: Vec<Rgba>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh after checking every triangle index
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, GeometryError> {
        let vertex_count = positions.len();
        if let Some(&index) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(Self {
            positions,
            triangles,
            ..Default::default()
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Compute smooth, area-weighted vertex normals
    ///
    /// Each triangle adds its unnormalized face normal to its three corners.
    /// Vertices used by no triangle end up with a zero normal.
    pub fn compute_normals(mut self) -> Self {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for &[a, b, c] in &self.triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let p0 = self.positions[a];
            let face = (self.positions[b] - p0).cross(self.positions[c] - p0);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals.into_iter().map(Vec3::normalized).collect();
        self
    }

    /// Use the (x, z) of every position as its texture coordinate
    pub fn with_planar_tex_coords(mut self) -> Self {
        self.tex_coords = self.positions.iter().map(|p| [p.x, p.z]).collect();
        self
    }

    /// Give every vertex the same color
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.colors = vec![color; self.positions.len()];
        self
    }

    /// Set per-vertex colors
    pub fn with_colors(mut self, colors: Vec<Rgba>) -> Result<Self, GeometryError> {
        if colors.len() != self.positions.len() {
            return Err(GeometryError::AttributeLength {
                attribute: "colors",
                expected: self.positions.len(),
                actual: colors.len(),
            });
        }
        self.colors = colors;
        Ok(self)
    }

    /// Lowest and highest y over all positions; `(0, 0)` for an empty mesh
    pub fn height_range(&self) -> (f32, f32) {
        match self.bounds() {
            Some(b) => (b.min.y, b.max.y),
            None => (0.0, 0.0),
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Append another mesh, offsetting its indices
    ///
    /// Attributes present on only one side are dropped from the result.
    pub fn merge(mut self, other: Mesh) -> Self {
        let (n, m) = (self.positions.len(), other.positions.len());
        let offset = n as u32;

        merge_attribute(&mut self.normals, other.normals, n, m);
        merge_attribute(&mut self.tex_coords, other.tex_coords, n, m);
        merge_attribute(&mut self.colors, other.colors, n, m);

        self.positions.extend(other.positions);
        self.triangles
            .extend(other.triangles.into_iter().map(|t| t.map(|i| i + offset)));
        self
    }
}

fn merge_attribute<T>(ours: &mut Vec<T>, theirs: Vec<T>, n: usize, m: usize) {
    if ours.len() == n && theirs.len() == m {
        ours.extend(theirs);
    } else {
        ours.clear();
    }
}
