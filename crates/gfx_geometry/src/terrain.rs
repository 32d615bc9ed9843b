//! Fault-method procedural terrain
//!
//! A square heightmap starts flat. Each fault picks a random grid cell, a
//! random direction and a random size, then raises every cell on one side
//! of the line through that cell and lowers every cell on the other side.
//! After all faults the heights are rescaled into a band proportional to
//! the grid extent and the grid is turned into a triangle mesh.

use std::f32::consts::TAU;

use gfx_math::{Mat4, Vec3};
use rand::Rng;

use crate::error::GeometryError;
use crate::mesh::Mesh;

/// Model matrix that centers a tessellated terrain on the origin
pub const TERRAIN_MODEL: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [-0.5, 0.0, -0.5, 1.0],
];

/// Parameters for [`build_terrain`]
#[derive(Clone, Debug, PartialEq)]
pub struct FaultTerrainParams {
    /// Samples per side of the grid
    pub resolution: usize,
    /// Number of faults to apply
    pub slices: usize,
    /// Fault sizes are drawn from `[0, max_fault_size)`
    pub max_fault_size: f32,
    /// Final height band as a fraction of the raw height spread
    pub height_scale: f32,
}

impl Default for FaultTerrainParams {
    fn default() -> Self {
        Self {
            resolution: 50,
            slices: 10,
            max_fault_size: 10.0,
            height_scale: 0.3,
        }
    }
}

impl FaultTerrainParams {
    pub fn new(resolution: usize, slices: usize) -> Self {
        Self {
            resolution,
            slices,
            ..Default::default()
        }
    }
}

/// Square grid of heights, row-major by `i`
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    resolution: usize,
    heights: Vec<f32>,
}

impl Heightmap {
    /// A `resolution × resolution` grid of zeros
    pub fn flat(resolution: usize) -> Self {
        Self {
            resolution,
            heights: vec![0.0; resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.heights[i * self.resolution + j]
    }

    /// Raise or lower every cell by `size` depending on its side of a fault
    ///
    /// The fault line passes through cell `(i, j)` with normal
    /// `(cos θ, sin θ)`. Cells on or in front of the line go up.
    pub fn apply_fault(&mut self, i: usize, j: usize, theta: f32, size: f32) {
        let (nx, ny) = (theta.cos(), theta.sin());
        let res = self.resolution;
        for a in 0..res {
            for b in 0..res {
                let side = (a as f32 - i as f32) * nx + (b as f32 - j as f32) * ny;
                self.heights[a * res + b] += if side >= 0.0 { size } else { -size };
            }
        }
    }

    /// Apply `params.slices` random faults
    pub fn generate<R: Rng + ?Sized>(&mut self, params: &FaultTerrainParams, rng: &mut R) {
        if self.resolution == 0 {
            return;
        }
        for _ in 0..params.slices {
            let i = rng.gen_range(0..self.resolution);
            let j = rng.gen_range(0..self.resolution);
            let theta = rng.gen_range(0.0..TAU);
            let size = if params.max_fault_size > 0.0 {
                rng.gen_range(0.0..params.max_fault_size)
            } else {
                0.0
            };
            self.apply_fault(i, j, theta, size);
        }
    }

    /// Lowest and highest height
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    /// Rescale heights into a band of size `(max − min)·c` centered on zero
    ///
    /// A flat grid is left unchanged.
    pub fn normalize(&mut self, c: f32) {
        let (min, max) = self.min_max();
        let spread = max - min;
        if spread <= 0.0 {
            return;
        }
        let h = spread * c;
        for v in &mut self.heights {
            *v = (*v - min) * h / spread - h / 2.0;
        }
    }

    /// Turn the grid into a mesh spanning `[0, 1)` in x and z
    ///
    /// Vertex `(i, j)` sits at `(i, v, j) / resolution` and has index
    /// `i·resolution + j`.
    pub fn tessellate(&self) -> Result<Mesh, GeometryError> {
        let res = self.resolution;
        if res < 2 {
            return Err(GeometryError::InvalidResolution(res));
        }
        let scale = res as f32;

        let mut positions = Vec::with_capacity(res * res);
        for i in 0..res {
            for j in 0..res {
                positions.push(Vec3::new(i as f32, self.get(i, j), j as f32) / scale);
            }
        }

        let idx = |i: usize, j: usize| (i * res + j) as u32;
        let mut triangles = Vec::with_capacity((res - 1) * (res - 1) * 2);
        for i in 0..res - 1 {
            for j in 0..res - 1 {
                triangles.push([idx(i, j), idx(i, j + 1), idx(i + 1, j)]);
                triangles.push([idx(i + 1, j), idx(i, j + 1), idx(i + 1, j + 1)]);
            }
        }

        Mesh::new(positions, triangles)
    }
}

/// Generate a complete terrain mesh with normals and planar texture coordinates
pub fn build_terrain<R: Rng + ?Sized>(
    params: &FaultTerrainParams,
    rng: &mut R,
) -> Result<Mesh, GeometryError> {
    if params.resolution < 2 {
        return Err(GeometryError::InvalidResolution(params.resolution));
    }

    let mut map = Heightmap::flat(params.resolution);
    map.generate(params, rng);
    map.normalize(params.height_scale);

    let mesh = map.tessellate()?.compute_normals().with_planar_tex_coords();
    log::info!(
        "Built terrain: {}x{} grid, {} faults, {} triangles",
        params.resolution,
        params.resolution,
        params.slices,
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfx_math::mat4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_fault_splits_grid() {
        let mut map = Heightmap::flat(4);
        // normal points along +i through cell (2, 0)
        map.apply_fault(2, 0, 0.0, 1.5);
        for b in 0..4 {
            assert_eq!(map.get(0, b), -1.5);
            assert_eq!(map.get(1, b), -1.5);
            // the fault cell's own row is on the raised side
            assert_eq!(map.get(2, b), 1.5);
            assert_eq!(map.get(3, b), 1.5);
        }
    }

    #[test]
    fn test_normalize_band() {
        let mut map = Heightmap::flat(3);
        map.apply_fault(1, 0, 0.0, 5.0);
        map.normalize(0.3);
        let (min, max) = map.min_max();
        // raw spread is 10, band is 3 centered on zero
        assert!(approx_eq(min, -1.5));
        assert!(approx_eq(max, 1.5));
    }

    #[test]
    fn test_normalize_flat_is_noop() {
        let mut map = Heightmap::flat(3);
        map.normalize(0.3);
        assert!(map.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_tessellate_layout() {
        let res = 4;
        let mesh = Heightmap::flat(res).tessellate().unwrap();
        assert_eq!(mesh.vertex_count(), res * res);
        assert_eq!(mesh.triangle_count(), 2 * (res - 1) * (res - 1));
        assert_eq!(mesh.positions[1 * res + 2], Vec3::new(0.25, 0.0, 0.5));
        assert_eq!(mesh.triangles[0], [0, 1, 4]);
        assert_eq!(mesh.triangles[1], [4, 1, 5]);
    }

    #[test]
    fn test_flat_terrain_faces_up() {
        let mesh = Heightmap::flat(3).tessellate().unwrap().compute_normals();
        for n in &mesh.normals {
            assert!(approx_eq(n.y, 1.0), "normal {:?}", n);
        }
    }

    #[test]
    fn test_build_terrain_is_seeded() {
        let params = FaultTerrainParams::new(16, 20);
        let a = build_terrain(&params, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = build_terrain(&params, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.normals.len(), 16 * 16);
        assert_eq!(a.tex_coords.len(), 16 * 16);

        // heights stay inside the normalized band scaled by 1/resolution
        let (lo, hi) = a.height_range();
        assert!(lo < 0.0 && hi > 0.0);
        assert!(hi - lo <= 0.3 * 2.0 * 10.0 * 20.0 / 16.0);
    }

    #[test]
    fn test_build_terrain_rejects_tiny_grid() {
        let params = FaultTerrainParams::new(1, 5);
        let err = build_terrain(&params, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, GeometryError::InvalidResolution(1));
    }

    #[test]
    fn test_model_matrix_centers_grid() {
        assert_eq!(mat4::translation(-0.5, 0.0, -0.5), TERRAIN_MODEL);
        let corner = mat4::transform_point(TERRAIN_MODEL, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(corner, Vec3::new(0.5, 0.0, 0.5));
    }
}
