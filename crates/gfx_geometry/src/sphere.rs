//! Sphere mesh generators

use std::collections::HashMap;
use std::f32::consts::PI;

use gfx_math::Vec3;

use crate::error::GeometryError;
use crate::mesh::Mesh;

/// Golden ratio, used for the icosahedron corners
const PHI: f32 = 1.618_034;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Build an indexed icosphere
///
/// Starts from a 12-vertex icosahedron and splits every triangle into four
/// `subdivisions` times. Edge midpoints are shared between neighbouring
/// triangles, so the result has `10·4^s + 2` vertices and `20·4^s` faces.
pub fn icosphere(radius: f32, subdivisions: u32) -> Mesh {
    let mut dirs: Vec<Vec3> = [
        (-1.0, PHI, 0.0), (1.0, PHI, 0.0), (-1.0, -PHI, 0.0), (1.0, -PHI, 0.0),
        (0.0, -1.0, PHI), (0.0, 1.0, PHI), (0.0, -1.0, -PHI), (0.0, 1.0, -PHI),
        (PHI, 0.0, -1.0), (PHI, 0.0, 1.0), (-PHI, 0.0, -1.0), (-PHI, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalized())
    .collect();

    let mut faces = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, dirs: &mut Vec<Vec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (dirs[a as usize] + dirs[b as usize]).normalized();
                dirs.push(mid);
                (dirs.len() - 1) as u32
            })
        };

        let mut next = Vec::with_capacity(faces.len() * 4);
        for &[a, b, c] in &faces {
            let ab = midpoint(a, b, &mut dirs);
            let bc = midpoint(b, c, &mut dirs);
            let ca = midpoint(c, a, &mut dirs);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let tex_coords = dirs.iter().map(|&d| spherical_uv(d)).collect();
    Mesh {
        positions: dirs.iter().map(|&d| d * radius).collect(),
        normals: dirs,
        tex_coords,
        colors: Vec::new(),
        triangles: faces,
    }
}

/// Build a latitude/longitude sphere
///
/// `rings` latitude bands and `2·rings` longitude segments. The seam column
/// is duplicated so texture coordinates wrap cleanly. Degenerate triangles
/// at the poles are skipped.
pub fn uv_sphere(rings: usize, radius: f32) -> Result<Mesh, GeometryError> {
    if rings < 2 {
        return Err(GeometryError::InvalidResolution(rings));
    }
    let segments = rings * 2;
    let row = segments + 1;

    let mut normals = Vec::with_capacity((rings + 1) * row);
    let mut tex_coords = Vec::with_capacity((rings + 1) * row);
    for i in 0..=rings {
        let v = i as f32 / rings as f32;
        let theta = PI * v;
        for j in 0..=segments {
            let u = j as f32 / segments as f32;
            let phi = 2.0 * PI * u;
            normals.push(Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ));
            tex_coords.push([u, v]);
        }
    }

    let mut triangles = Vec::with_capacity(rings * segments * 2);
    for i in 0..rings {
        for j in 0..segments {
            let a = (i * row + j) as u32;
            let b = a + row as u32;
            if i != 0 {
                triangles.push([a, a + 1, b]);
            }
            if i != rings - 1 {
                triangles.push([a + 1, b + 1, b]);
            }
        }
    }

    Ok(Mesh {
        positions: normals.iter().map(|&n| n * radius).collect(),
        normals,
        tex_coords,
        colors: Vec::new(),
        triangles,
    })
}

fn spherical_uv(d: Vec3) -> [f32; 2] {
    let u = 0.5 + d.z.atan2(d.x) / (2.0 * PI);
    let v = d.y.clamp(-1.0, 1.0).acos() / PI;
    [u, v]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Every face normal should point away from the center
    fn assert_outward(mesh: &Mesh) {
        for &[a, b, c] in &mesh.triangles {
            let (p0, p1, p2) = (
                mesh.positions[a as usize],
                mesh.positions[b as usize],
                mesh.positions[c as usize],
            );
            let face = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) * (1.0 / 3.0);
            assert!(face.dot(centroid) > 0.0, "inward face {:?}", [a, b, c]);
        }
    }

    #[test]
    fn test_icosahedron_counts() {
        let mesh = icosphere(1.0, 0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
    }

    #[test]
    fn test_subdivision_shares_midpoints() {
        for s in 1..=3 {
            let mesh = icosphere(1.0, s);
            let k = 4usize.pow(s);
            assert_eq!(mesh.vertex_count(), 10 * k + 2);
            assert_eq!(mesh.triangle_count(), 20 * k);
        }
    }

    #[test]
    fn test_icosphere_vertices_on_radius() {
        let mesh = icosphere(2.5, 2);
        for p in &mesh.positions {
            assert!(approx_eq(p.length(), 2.5), "length {}", p.length());
        }
        assert_outward(&mesh);
    }

    #[test]
    fn test_uv_sphere_shape() {
        let rings = 4;
        let mesh = uv_sphere(rings, 1.0).unwrap();
        assert_eq!(mesh.vertex_count(), (rings + 1) * (2 * rings + 1));
        // the pole bands have one triangle per segment, the rest have two
        assert_eq!(mesh.triangle_count(), 2 * rings * (2 * rings) - 2 * (2 * rings));
        for p in &mesh.positions {
            assert!(approx_eq(p.length(), 1.0));
        }
        assert_outward(&mesh);
    }

    #[test]
    fn test_uv_sphere_rejects_single_ring() {
        assert_eq!(
            uv_sphere(1, 1.0).unwrap_err(),
            GeometryError::InvalidResolution(1)
        );
    }
}
