pub mod assembler;
pub mod mesh;
pub mod sampler;
pub mod shapes;

pub use assembler::{Wrap, assemble_indices};
pub use mesh::TriangleMesh;
pub use sampler::{ParametricSurface, sample_grid};
pub use shapes::{SHAPES, ShapeId};

/// Samples `surface` and stitches the grid into a triangle mesh.
pub fn build_mesh<S>(surface: &S, rows: usize, cols: usize, wrap: Wrap) -> TriangleMesh
where
    S: ParametricSurface + ?Sized,
{
    let grid = sample_grid(surface, rows, cols, wrap);
    TriangleMesh {
        positions: grid.positions,
        normals: grid.normals,
        indices: assemble_indices(grid.rows, grid.cols, wrap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_build_mesh_invariants() {
        let saddle = |u: f32, v: f32| Vec3::new(u, (u - 0.5) * (v - 0.5), v);
        for (rows, cols) in [(2, 2), (3, 9), (16, 16), (1, 4), (0, 0)] {
            for wrap in [Wrap::NONE, Wrap::ROWS, Wrap::COLS, Wrap::BOTH] {
                let mesh = build_mesh(&saddle, rows, cols, wrap);
                assert_eq!(mesh.vertex_count(), rows * cols);
                assert_eq!(mesh.validate(), Ok(()));
            }
        }
    }
}
