use std::collections::{HashMap, HashSet};

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("{positions} positions but {normals} normals")]
    NormalCountMismatch { positions: usize, normals: usize },
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
    #[error("index {index} at slot {slot} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertices: usize,
    },
}

/// Indexed triangle list with one normal per vertex.
///
/// Built once by [`crate::math::build_mesh`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() != self.normals.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.indices.len()));
        }

        let vertices = self.positions.len();
        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertices)
        {
            return Err(MeshError::IndexOutOfRange {
                slot,
                index,
                vertices,
            });
        }

        Ok(())
    }

    /// Counts how many triangles use each undirected edge.
    fn edge_usage(&self) -> HashMap<(u32, u32), u32> {
        let mut usage = HashMap::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *usage.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        usage
    }

    /// Edges used by exactly one triangle. Zero for a closed manifold.
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_usage().values().filter(|&&n| n == 1).count()
    }

    /// Line-list index pairs covering every triangle edge once.
    ///
    /// Edges come out in first-seen order so the result is deterministic.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len() * 2);

        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            indices: vec![0, 1, 3, 0, 3, 2],
        }
    }

    #[test]
    fn test_quad_is_valid() {
        let mesh = quad();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_validate_normal_mismatch() {
        let mut mesh = quad();
        mesh.normals.pop();
        assert_eq!(
            mesh.validate(),
            Err(MeshError::NormalCountMismatch {
                positions: 4,
                normals: 3
            })
        );
    }

    #[test]
    fn test_validate_partial_triangle() {
        let mut mesh = quad();
        mesh.indices.push(1);
        assert_eq!(mesh.validate(), Err(MeshError::PartialTriangle(7)));
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let mut mesh = quad();
        mesh.indices[4] = 9;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                slot: 4,
                index: 9,
                vertices: 4
            })
        );
    }

    #[test]
    fn test_quad_boundary_and_wireframe() {
        let mesh = quad();
        // 4 outer edges, diagonal is shared
        assert_eq!(mesh.boundary_edge_count(), 4);

        let lines = mesh.wireframe_indices();
        assert_eq!(lines.len(), 5 * 2);
        assert_eq!(&lines[..6], &[0, 1, 1, 3, 3, 0]);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.boundary_edge_count(), 0);
        assert!(mesh.wireframe_indices().is_empty());
    }
}
