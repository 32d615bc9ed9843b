//! Procedural block-I logo

use gfx_math::color::{ILLINI_BLUE, ILLINI_ORANGE};
use gfx_math::{Rgba, Vec3};

use crate::mesh::Mesh;

/// Width of the blue outline around each orange bar
const OUTLINE: f32 = 0.04;
/// The orange fill sits slightly in front of the outline
const FILL_DEPTH: f32 = 0.01;

/// (min_x, min_y, max_x, max_y) of the three bars
const BARS: [[f32; 4]; 3] = [
    [-0.5, 0.3, 0.5, 0.5],
    [-0.2, -0.3, 0.2, 0.3],
    [-0.5, -0.5, 0.5, -0.3],
];

/// Build the block-I logo in the XY plane, facing +Z
///
/// The shape is a top bar, a stem and a bottom bar centered on the origin
/// and fitting inside `[-0.5, 0.5]²`. Each bar is a blue rectangle with an
/// inset orange rectangle drawn in front of it.
pub fn block_i_logo() -> Mesh {
    let outline = BARS
        .iter()
        .map(|&[x0, y0, x1, y1]| rect(x0, y0, x1, y1, 0.0, ILLINI_BLUE));

    // the stem fill reaches into the bars so the orange reads as one piece
    let fill = BARS.iter().enumerate().map(|(i, &[x0, y0, x1, y1])| {
        let (y0, y1) = if i == 1 {
            (y0 - OUTLINE, y1 + OUTLINE)
        } else {
            (y0 + OUTLINE, y1 - OUTLINE)
        };
        rect(x0 + OUTLINE, y0, x1 - OUTLINE, y1, FILL_DEPTH, ILLINI_ORANGE)
    });

    outline.chain(fill).fold(Mesh::default(), Mesh::merge)
}

fn rect(x0: f32, y0: f32, x1: f32, y1: f32, z: f32, color: Rgba) -> Mesh {
    Mesh {
        positions: vec![
            Vec3::new(x0, y0, z),
            Vec3::new(x1, y0, z),
            Vec3::new(x1, y1, z),
            Vec3::new(x0, y1, z),
        ],
        normals: vec![Vec3::Z; 4],
        tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        colors: vec![color; 4],
        triangles: vec![[0, 1, 2], [0, 2, 3]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_fits_unit_square() {
        let logo = block_i_logo();
        let b = logo.bounds().unwrap();
        assert_eq!((b.min.x, b.min.y), (-0.5, -0.5));
        assert_eq!((b.max.x, b.max.y), (0.5, 0.5));
    }

    #[test]
    fn test_logo_counts_and_attributes() {
        let logo = block_i_logo();
        // six rectangles of four vertices and two triangles
        assert_eq!(logo.vertex_count(), 24);
        assert_eq!(logo.triangle_count(), 12);
        assert_eq!(logo.colors.len(), 24);
        assert_eq!(logo.normals.len(), 24);
        assert_eq!(logo.colors[0], ILLINI_BLUE);
        assert_eq!(logo.colors[23], ILLINI_ORANGE);
    }

    #[test]
    fn test_logo_faces_viewer() {
        let logo = block_i_logo();
        for &[a, b, c] in &logo.triangles {
            let p0 = logo.positions[a as usize];
            let face = (logo.positions[b as usize] - p0).cross(logo.positions[c as usize] - p0);
            assert!(face.z > 0.0);
        }
    }
}
