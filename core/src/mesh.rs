// Grid → triangle mesh conversion.
//
// Vertex `i` is grid cell `(i / height, i % height)`, the same traversal as
// the pixel buffer. Quads are stitched along each column; the last row of a
// column never starts a quad so triangles do not wrap into the next column.

use palette::LinSrgba;
use tracing::debug;

use crate::color::to_vertex_color_ramp;
use crate::noise_field::NoiseGrid;
use crate::params::{MeshParameters, NormalMode};

pub const PLACEHOLDER_NORMAL: [f32; 3] = [1.0, 0.0, 0.0];
pub const PLACEHOLDER_TANGENT: [f32; 3] = [0.0, 1.0, 0.0];
// Host meshes of the reference setup always received three entries
pub const PLACEHOLDER_LEN: usize = 3;

// Everything the host needs to create a mesh section.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<LinSrgba>,
    pub normals: Vec<[f32; 3]>,
    pub tangents: Vec<[f32; 3]>,
    pub triangles: Vec<u32>,
}

// The subset of `MeshBuffers` sent when a section is updated in place.
#[derive(Debug, Clone, Copy)]
pub struct MeshUpdate<'a> {
    pub vertices: &'a [[f32; 3]],
    pub normals: &'a [[f32; 3]],
    pub uvs: &'a [[f32; 2]],
    pub colors: &'a [LinSrgba],
    pub tangents: &'a [[f32; 3]],
}

impl MeshBuffers {
    pub fn update_view(&self) -> MeshUpdate<'_> {
        MeshUpdate {
            vertices: &self.vertices,
            normals: &self.normals,
            uvs: &self.uvs,
            colors: &self.colors,
            tangents: &self.tangents,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

// Builds vertex and index buffers from the magnitude channel.
pub fn build_mesh(grid: &NoiseGrid, params: &MeshParameters) -> MeshBuffers {
    let (width, height) = (grid.width(), grid.height());
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let scale = params.width_factor;

    let mut vertices = Vec::with_capacity(grid.len());
    let mut uvs = Vec::with_capacity(grid.len());
    for x in 0..width {
        for y in 0..height {
            let h = grid.get(x, y).magnitude * params.height_factor;
            vertices.push([
                (x as f32 - half_w) * scale,
                (y as f32 - half_h) * scale,
                h * scale,
            ]);
            // u follows y, v follows x
            uvs.push([y as f32 / height as f32, x as f32 / width as f32]);
        }
    }

    let triangles = grid_triangles(width, height);
    let (normals, tangents) = match params.normals {
        NormalMode::Placeholder => (
            vec![PLACEHOLDER_NORMAL; PLACEHOLDER_LEN],
            vec![PLACEHOLDER_TANGENT; PLACEHOLDER_LEN],
        ),
        NormalMode::PerVertex => vertex_frames(&vertices, width, height),
    };

    debug!(
        vertices = vertices.len(),
        triangles = triangles.len() / 3,
        normals = ?params.normals,
        "mesh built"
    );

    MeshBuffers {
        vertices,
        uvs,
        colors: to_vertex_color_ramp(grid),
        normals,
        tangents,
        triangles,
    }
}

// Index buffer for a `width × height` vertex grid.
pub fn grid_triangles(width: usize, height: usize) -> Vec<u32> {
    let quads = width.saturating_sub(1) * height.saturating_sub(1);
    let mut triangles = Vec::with_capacity(quads * 6);
    let h = height as u32;
    for i in 0..(height * width.saturating_sub(1)) as u32 {
        // skip the last row of each column
        if (i + 1) % h == 0 {
            continue;
        }
        triangles.extend_from_slice(&[i, i + 1, i + h]);
        triangles.extend_from_slice(&[i + 1, i + h + 1, i + h]);
    }
    triangles
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize_or(v: [f32; 3], fallback: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > f32::EPSILON {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        fallback
    }
}

// Central differences between neighbouring vertices, one-sided at the edges.
// Normal = d/dx × d/dy, tangent = d/dy (the +u direction).
fn vertex_frames(vertices: &[[f32; 3]], width: usize, height: usize) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let at = |x: usize, y: usize| vertices[x * height + y];
    let mut normals = Vec::with_capacity(vertices.len());
    let mut tangents = Vec::with_capacity(vertices.len());

    for x in 0..width {
        for y in 0..height {
            let d_dx = sub(at((x + 1).min(width - 1), y), at(x.saturating_sub(1), y));
            let d_dy = sub(at(x, (y + 1).min(height - 1)), at(x, y.saturating_sub(1)));
            let mut normal = normalize_or(cross(d_dx, d_dy), [0.0, 0.0, 1.0]);
            // keep facing +z when the width factor mirrors the lattice
            if normal[2] < 0.0 {
                normal = [-normal[0], -normal[1], -normal[2]];
            }
            normals.push(normal);
            tangents.push(normalize_or(d_dy, PLACEHOLDER_TANGENT));
        }
    }
    (normals, tangents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::NoiseSample;

    fn flat_grid(size: usize, value: f32) -> NoiseGrid {
        NoiseGrid::filled(size, size, NoiseSample::from([value, value, value])).unwrap()
    }

    #[test]
    fn three_by_three_index_sequence() {
        let tris = grid_triangles(3, 3);
        assert_eq!(
            tris,
            vec![
                0, 1, 3, 1, 4, 3, //
                1, 2, 4, 2, 5, 4, //
                3, 4, 6, 4, 7, 6, //
                4, 5, 7, 5, 8, 7,
            ]
        );
    }

    #[test]
    fn triangle_count_formula() {
        for &(w, h) in &[(2, 2), (3, 5), (7, 4), (16, 16)] {
            assert_eq!(grid_triangles(w, h).len(), 6 * (w - 1) * (h - 1));
        }
        assert!(grid_triangles(1, 5).is_empty());
        assert!(grid_triangles(5, 1).is_empty());
    }

    #[test]
    fn no_triangle_crosses_a_column_seam() {
        let (w, h) = (5usize, 4usize);
        for tri in grid_triangles(w, h).chunks(3) {
            let cols: Vec<u32> = tri.iter().map(|i| i / h as u32).collect();
            let rows: Vec<u32> = tri.iter().map(|i| i % h as u32).collect();
            assert!(cols.iter().max().unwrap() - cols.iter().min().unwrap() <= 1);
            assert!(rows.iter().max().unwrap() - rows.iter().min().unwrap() <= 1);
        }
    }

    #[test]
    fn flat_three_by_three_lattice() {
        let params = MeshParameters {
            height_factor: 4.0,
            width_factor: 2.0,
            normals: NormalMode::Placeholder,
        };
        let mesh = build_mesh(&flat_grid(3, 0.5), &params);
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.triangles.len(), 24);
        assert_eq!(mesh.triangle_count(), 8);

        let expected_xy = [-1.5f32, -0.5, 0.5];
        for x in 0..3 {
            for y in 0..3 {
                let v = mesh.vertices[x * 3 + y];
                assert_eq!(v[0], expected_xy[x] * 2.0);
                assert_eq!(v[1], expected_xy[y] * 2.0);
                // 0.5 * height factor, then the uniform width scale
                assert_eq!(v[2], 4.0);
            }
        }
    }

    #[test]
    fn uvs_swap_axes() {
        let grid = NoiseGrid::filled(4, 2, NoiseSample::default()).unwrap();
        let mesh = build_mesh(&grid, &MeshParameters::default());
        // cell (x = 3, y = 1)
        assert_eq!(mesh.uvs[3 * 2 + 1], [0.5, 0.75]);
        assert_eq!(mesh.uvs[0], [0.0, 0.0]);
    }

    #[test]
    fn placeholder_frames_have_three_entries() {
        let mesh = build_mesh(&flat_grid(8, 0.2), &MeshParameters::default());
        assert_eq!(mesh.normals, vec![[1.0, 0.0, 0.0]; 3]);
        assert_eq!(mesh.tangents, vec![[0.0, 1.0, 0.0]; 3]);
        assert_eq!(mesh.colors.len(), 64);
    }

    #[test]
    fn per_vertex_frames_on_flat_grid_point_up() {
        let params = MeshParameters {
            normals: NormalMode::PerVertex,
            ..MeshParameters::default()
        };
        let mesh = build_mesh(&flat_grid(4, 0.7), &params);
        assert_eq!(mesh.normals.len(), 16);
        assert_eq!(mesh.tangents.len(), 16);
        for (n, t) in mesh.normals.iter().zip(&mesh.tangents) {
            assert!(n[0].abs() < 1e-6 && n[1].abs() < 1e-6 && (n[2] - 1.0).abs() < 1e-6);
            assert!((t[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn per_vertex_normals_tilt_away_from_slope() {
        // height rises with x
        let samples = (0..9)
            .map(|i| NoiseSample::from([(i / 3) as f32 * 0.5, 0.0, 0.0]))
            .collect();
        let grid = NoiseGrid::from_samples(3, 3, samples).unwrap();
        let params = MeshParameters {
            height_factor: 2.0,
            width_factor: 1.0,
            normals: NormalMode::PerVertex,
        };
        let mesh = build_mesh(&grid, &params);
        let n = mesh.normals[4];
        assert!(n[0] < 0.0);
        assert!(n[1].abs() < 1e-6);
        assert!(n[2] > 0.0);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn colors_follow_magnitude() {
        let samples = vec![
            NoiseSample::from([0.0, 1.0, 1.0]),
            NoiseSample::from([1.0, 0.0, 0.0]),
        ];
        let grid = NoiseGrid::from_samples(1, 2, samples).unwrap();
        let mesh = build_mesh(&grid, &MeshParameters::default());
        assert!(mesh.colors[0].red.abs() < 1e-6);
        assert!((mesh.colors[1].red - 1.0).abs() < 1e-6);
    }
}
