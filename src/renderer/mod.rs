pub mod gpu;
pub mod mesh_buffers;
pub mod uniforms;

pub use gpu::GpuState;
pub use mesh_buffers::ShapeStats;
