use glam::Vec2;

/// Raw input accumulated from window events between frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub cursor: Vec2,
    pub window: Vec2,
}

impl InputState {
    pub fn snapshot(&self, elapsed: f32) -> FrameInput {
        FrameInput {
            elapsed,
            mouse: mouse_ndc(self.cursor, self.window),
        }
    }
}

/// What a render strategy gets to see of the outside world for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Cursor in normalized device coordinates, +Y up.
    pub mouse: Vec2,
}

/// Converts a cursor position in pixels (origin top-left) to `[-1, 1]`
/// device coordinates with +Y up.
pub fn mouse_ndc(cursor: Vec2, window: Vec2) -> Vec2 {
    let n = cursor / window.max(Vec2::ONE);
    Vec2::new(n.x * 2.0 - 1.0, (1.0 - n.y) * 2.0 - 1.0)
}
