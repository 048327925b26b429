use std::collections::HashMap;

use tracing::warn;
use wgpu::util::DeviceExt;

use crate::math::{ShapeId, TriangleMesh};

/// A mesh uploaded to the GPU. Created once, never written again.
pub struct MeshBuffers {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    triangles: wgpu::Buffer,
    lines: wgpu::Buffer,
    triangle_index_count: u32,
    line_index_count: u32,
}

impl MeshBuffers {
    pub fn new(device: &wgpu::Device, label: &str, mesh: TriangleMesh) -> Self {
        if mesh.is_empty() {
            warn!(mesh = label, "uploading mesh with no triangles");
        }
        let lines = mesh.wireframe_indices();

        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Position Buffer")),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let normals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Normal Buffer")),
            contents: bytemuck::cast_slice(&mesh.normals),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let triangles = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Wireframe Index Buffer")),
            contents: bytemuck::cast_slice(&lines),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            positions,
            normals,
            triangles,
            lines: line_buffer,
            triangle_index_count: mesh.indices.len() as u32,
            line_index_count: lines.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, wireframe: bool) {
        let (indices, count) = if wireframe {
            (&self.lines, self.line_index_count)
        } else {
            (&self.triangles, self.triangle_index_count)
        };
        if count == 0 {
            return;
        }

        pass.set_vertex_buffer(0, self.positions.slice(..));
        pass.set_vertex_buffer(1, self.normals.slice(..));
        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..count, 0, 0..1);
    }
}

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

pub fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

/// Per-shape counts for the HUD, taken from the meshes before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeStats {
    pub name: &'static str,
    pub vertices: u32,
    pub triangles: u32,
}

impl ShapeStats {
    /// One entry per built mesh, in catalogue order.
    pub fn collect(meshes: &[(ShapeId, TriangleMesh)]) -> Vec<Self> {
        crate::math::SHAPES
            .iter()
            .filter_map(|def| {
                meshes
                    .iter()
                    .find(|(id, _)| *id == def.id)
                    .map(|(_, mesh)| ShapeStats {
                        name: def.name,
                        vertices: mesh.vertex_count() as u32,
                        triangles: mesh.triangle_count() as u32,
                    })
            })
            .collect()
    }
}

/// Every shape the scene can draw, keyed by id.
#[derive(Default)]
pub struct MeshLibrary {
    meshes: HashMap<ShapeId, MeshBuffers>,
}

impl MeshLibrary {
    pub fn upload(device: &wgpu::Device, meshes: Vec<(ShapeId, TriangleMesh)>) -> Self {
        let meshes = meshes
            .into_iter()
            .map(|(id, mesh)| (id, MeshBuffers::new(device, id.def().name, mesh)))
            .collect();
        Self { meshes }
    }

    pub fn get(&self, id: ShapeId) -> Option<&MeshBuffers> {
        self.meshes.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Wrap, build_mesh};
    use glam::Vec3;

    fn patch(rows: usize, cols: usize) -> TriangleMesh {
        build_mesh(&|u: f32, v: f32| Vec3::new(u, 0.0, -v), rows, cols, Wrap::NONE)
    }

    #[test]
    fn test_shape_stats_follow_catalogue_order() {
        let meshes = vec![
            (ShapeId::Torus, patch(3, 4)),
            (ShapeId::Sphere, patch(2, 2)),
        ];
        let stats = ShapeStats::collect(&meshes);
        assert_eq!(
            stats,
            vec![
                ShapeStats {
                    name: "Sphere",
                    vertices: 4,
                    triangles: 2,
                },
                ShapeStats {
                    name: "Torus",
                    vertices: 12,
                    triangles: 12,
                },
            ]
        );
    }

    #[test]
    fn test_shape_stats_skip_missing_meshes() {
        assert!(ShapeStats::collect(&[]).is_empty());
    }
}
