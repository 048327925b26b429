pub mod input;
pub mod modes;

use glam::{Mat4, Vec2, Vec3};

use crate::math::ShapeId;

pub use input::{FrameInput, InputState};
pub use modes::{ChaseState, RenderMode};

/// Shading program a draw runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    Wireframe,
    Normals,
    Grey,
    Colored,
    Creative,
}

impl Program {
    pub const ALL: [Program; 5] = [
        Program::Wireframe,
        Program::Normals,
        Program::Grey,
        Program::Colored,
        Program::Creative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Program::Wireframe => "wireframe",
            Program::Normals => "normals",
            Program::Grey => "grey",
            Program::Colored => "colored",
            Program::Creative => "creative",
        }
    }

    pub fn fragment_entry(self) -> &'static str {
        match self {
            Program::Wireframe => "fs_wireframe",
            Program::Normals => "fs_normals",
            Program::Grey => "fs_grey",
            Program::Colored => "fs_colored",
            Program::Creative => "fs_creative",
        }
    }

    /// Wireframe draws edge lists, everything else filled triangles.
    pub fn is_wireframe(self) -> bool {
        self == Program::Wireframe
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub shape: ShapeId,
    pub program: Program,
    pub transform: Mat4,
    pub color: Vec3,
    pub shininess: f32,
    pub mouse: Vec2,
}
