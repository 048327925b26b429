use glam::Mat4;

use crate::scene::DrawCommand;

/// Maps clip-space depth from `[-w, w]`, the range scene transforms are
/// written for, to wgpu's `[0, w]`.
pub const DEPTH_REMAP: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.0, 0.0, 0.5, 1.0,
]);

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub clip: [[f32; 4]; 4],
    pub transform: [[f32; 4]; 4],
    pub material: [f32; 4],
    pub mouse: [f32; 4],
}

impl DrawUniforms {
    pub fn from_command(cmd: &DrawCommand) -> Self {
        Self {
            clip: (DEPTH_REMAP * cmd.transform).to_cols_array_2d(),
            transform: cmd.transform.to_cols_array_2d(),
            material: cmd.color.extend(cmd.shininess).to_array(),
            mouse: [cmd.mouse.x, cmd.mouse.y, 0.0, 0.0],
        }
    }
}
