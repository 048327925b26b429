use glam::{Mat4, Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::math::ShapeId;
use crate::scene::{DrawCommand, FrameInput, Program};

/// Builds the draw list for one frame.
pub type RenderStrategy = fn(&FrameInput, &mut ChaseState) -> Vec<DrawCommand>;

pub const SPIN_AXIS: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const SPIN_DEGREES_PER_SEC: f32 = 10.0;

pub const CHASE_EASE: f32 = 0.99;
pub const CHASE_SCALE: f32 = 0.3;
pub const CHASE_NEAR_DISTANCE: f32 = CHASE_SCALE * 2.0;

pub const SWARM_PAIRS: usize = 18;
pub const SWARM_SCALE: f32 = 0.17;
pub const SWARM_SPIN_DEGREES_PER_SEC: f32 = 30.0;

const GREY: Vec3 = Vec3::splat(0.5);
const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

struct Placement {
    shape: ShapeId,
    scale: f32,
    offset: Vec3,
    color: Vec3,
    shininess: f32,
}

const SHOWCASE: [Placement; 4] = [
    Placement {
        shape: ShapeId::Sphere,
        scale: 0.46,
        offset: Vec3::new(-1.1, 1.0, 0.0),
        color: GREY,
        shininess: 128.0,
    },
    Placement {
        shape: ShapeId::Torus,
        scale: 0.46,
        offset: Vec3::new(1.0, 1.0, 0.0),
        color: RED,
        shininess: 32.0,
    },
    Placement {
        shape: ShapeId::Squiggle,
        scale: 0.3,
        offset: Vec3::new(1.5, -1.5, 0.0),
        color: BLUE,
        shininess: 64.0,
    },
    Placement {
        shape: ShapeId::Spikes,
        scale: 0.4,
        offset: Vec3::new(-1.2, -1.2, 0.0),
        color: GREEN,
        shininess: 300.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Wireframe,
    Normals,
    Grey,
    Colored,
    Chase,
    Swarm,
}

impl RenderMode {
    pub const ALL: [RenderMode; 6] = [
        RenderMode::Wireframe,
        RenderMode::Normals,
        RenderMode::Grey,
        RenderMode::Colored,
        RenderMode::Chase,
        RenderMode::Swarm,
    ];

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyQ => Some(RenderMode::Wireframe),
            KeyCode::KeyW => Some(RenderMode::Normals),
            KeyCode::KeyE => Some(RenderMode::Grey),
            KeyCode::KeyR => Some(RenderMode::Colored),
            KeyCode::KeyT => Some(RenderMode::Chase),
            KeyCode::KeyY => Some(RenderMode::Swarm),
            _ => None,
        }
    }

    pub fn key_label(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "Q",
            RenderMode::Normals => "W",
            RenderMode::Grey => "E",
            RenderMode::Colored => "R",
            RenderMode::Chase => "T",
            RenderMode::Swarm => "Y",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "Wireframe",
            RenderMode::Normals => "Normals",
            RenderMode::Grey => "Grey",
            RenderMode::Colored => "Colored",
            RenderMode::Chase => "Chase",
            RenderMode::Swarm => "Swarm",
        }
    }

    pub fn strategy(self) -> RenderStrategy {
        match self {
            RenderMode::Wireframe => wireframe,
            RenderMode::Normals => normals,
            RenderMode::Grey => grey,
            RenderMode::Colored => colored,
            RenderMode::Chase => chase,
            RenderMode::Swarm => swarm,
        }
    }
}

/// Eased follower positions carried between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseState {
    pub chaser: Vec2,
    pub swarm: [Vec2; SWARM_PAIRS * 2],
}

impl Default for ChaseState {
    fn default() -> Self {
        Self {
            chaser: Vec2::ZERO,
            swarm: [Vec2::ZERO; SWARM_PAIRS * 2],
        }
    }
}

/// Moves `current` a small step toward `target`; `ease` is the share of
/// `current` that is kept.
fn ease_toward(target: Vec2, current: Vec2, ease: f32) -> Vec2 {
    target.lerp(current, ease)
}

pub fn swarm_ease(index: usize) -> f32 {
    CHASE_EASE - (index as f32 * 0.003 + 0.001)
}

pub fn showcase_transform(scale: f32, offset: Vec3, elapsed: f32) -> Mat4 {
    let angle = (elapsed * SPIN_DEGREES_PER_SEC).to_radians();
    Mat4::from_scale(Vec3::splat(scale))
        * Mat4::from_translation(offset)
        * Mat4::from_axis_angle(SPIN_AXIS.normalize(), angle)
}

fn showcase(program: Program, input: &FrameInput) -> Vec<DrawCommand> {
    SHOWCASE
        .iter()
        .map(|p| DrawCommand {
            shape: p.shape,
            program,
            transform: showcase_transform(p.scale, p.offset, input.elapsed),
            color: p.color,
            shininess: p.shininess,
            mouse: input.mouse,
        })
        .collect()
}

fn wireframe(input: &FrameInput, _: &mut ChaseState) -> Vec<DrawCommand> {
    showcase(Program::Wireframe, input)
}

fn normals(input: &FrameInput, _: &mut ChaseState) -> Vec<DrawCommand> {
    showcase(Program::Normals, input)
}

fn grey(input: &FrameInput, _: &mut ChaseState) -> Vec<DrawCommand> {
    showcase(Program::Grey, input)
}

fn colored(input: &FrameInput, _: &mut ChaseState) -> Vec<DrawCommand> {
    showcase(Program::Colored, input)
}

fn chase(input: &FrameInput, state: &mut ChaseState) -> Vec<DrawCommand> {
    state.chaser = ease_toward(input.mouse, state.chaser, CHASE_EASE);

    let placed = |at: Vec2| {
        Mat4::from_translation(at.extend(0.0)) * Mat4::from_scale(Vec3::splat(CHASE_SCALE))
    };

    let cursor_color = if state.chaser.distance(input.mouse) > CHASE_NEAR_DISTANCE {
        GREEN
    } else {
        RED
    };

    vec![
        DrawCommand {
            shape: ShapeId::Sphere,
            program: Program::Colored,
            transform: placed(state.chaser),
            color: GREY,
            shininess: 100.0,
            mouse: input.mouse,
        },
        DrawCommand {
            shape: ShapeId::Sphere,
            program: Program::Colored,
            transform: placed(input.mouse),
            color: cursor_color,
            shininess: 100.0,
            mouse: input.mouse,
        },
    ]
}

fn swarm(input: &FrameInput, state: &mut ChaseState) -> Vec<DrawCommand> {
    let mirrored = -input.mouse;
    let spin = (input.elapsed * SWARM_SPIN_DEGREES_PER_SEC).to_radians();
    let flower = |at: Vec2| {
        Mat4::from_translation(at.extend(0.0))
            * Mat4::from_scale(Vec3::splat(SWARM_SCALE))
            * Mat4::from_rotation_x(90f32.to_radians())
            * Mat4::from_rotation_y(spin)
    };

    let mut draws = Vec::with_capacity(SWARM_PAIRS * 2);
    for i in 0..SWARM_PAIRS {
        let ease = swarm_ease(i);

        let follower = ease_toward(input.mouse, state.swarm[i], ease);
        state.swarm[i] = follower;
        draws.push(DrawCommand {
            shape: ShapeId::Flower,
            program: Program::Creative,
            transform: flower(follower),
            color: Vec3::ONE,
            shininess: 0.0,
            mouse: input.mouse,
        });

        let runner = ease_toward(mirrored, state.swarm[i + SWARM_PAIRS], ease);
        state.swarm[i + SWARM_PAIRS] = runner;
        draws.push(DrawCommand {
            shape: ShapeId::Flower,
            program: Program::Creative,
            transform: flower(runner),
            color: RED,
            shininess: 0.0,
            mouse: mirrored,
        });
    }

    draws
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(elapsed: f32, mouse: Vec2) -> FrameInput {
        FrameInput { elapsed, mouse }
    }

    #[test]
    fn test_key_bindings() {
        let keys = [
            KeyCode::KeyQ,
            KeyCode::KeyW,
            KeyCode::KeyE,
            KeyCode::KeyR,
            KeyCode::KeyT,
            KeyCode::KeyY,
        ];
        for (key, mode) in keys.into_iter().zip(RenderMode::ALL) {
            assert_eq!(RenderMode::from_key(key), Some(mode));
        }
        assert_eq!(RenderMode::from_key(KeyCode::KeyA), None);
        assert_eq!(RenderMode::from_key(KeyCode::Escape), None);
    }

    #[test]
    fn test_showcase_modes_draw_four_shapes() {
        let input = frame(1.0, Vec2::ZERO);
        let cases = [
            (RenderMode::Wireframe, Program::Wireframe),
            (RenderMode::Normals, Program::Normals),
            (RenderMode::Grey, Program::Grey),
            (RenderMode::Colored, Program::Colored),
        ];
        for (mode, program) in cases {
            let draws = (mode.strategy())(&input, &mut ChaseState::default());
            assert_eq!(draws.len(), 4);
            assert!(draws.iter().all(|d| d.program == program));
            let shapes: Vec<_> = draws.iter().map(|d| d.shape).collect();
            assert_eq!(
                shapes,
                vec![
                    ShapeId::Sphere,
                    ShapeId::Torus,
                    ShapeId::Squiggle,
                    ShapeId::Spikes
                ]
            );
        }
    }

    #[test]
    fn test_showcase_transform_at_rest() {
        let m = showcase_transform(0.5, Vec3::new(2.0, 0.0, 0.0), 0.0);
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        // scale applies last, to the translated point
        assert!((p - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_showcase_spins_about_axis() {
        let axis = SPIN_AXIS.normalize();
        let m = showcase_transform(1.0, Vec3::ZERO, 9.0);
        assert!((m.transform_vector3(axis) - axis).length() < 1e-5);

        let moved = m.transform_vector3(Vec3::Z);
        let expected = 90f32.to_radians().cos();
        assert!((moved.dot(Vec3::Z) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_chaser_eases_toward_mouse() {
        let mut state = ChaseState::default();
        let input = frame(0.0, Vec2::new(1.0, 0.0));
        chase(&input, &mut state);
        assert!((state.chaser.x - 0.01).abs() < 1e-6);

        for _ in 0..2000 {
            chase(&input, &mut state);
        }
        assert!((state.chaser - input.mouse).length() < 1e-3);
    }

    #[test]
    fn test_cursor_color_by_distance() {
        let mut state = ChaseState::default();
        let far = chase(&frame(0.0, Vec2::new(0.9, 0.9)), &mut state);
        assert_eq!(far.len(), 2);
        assert_eq!(far[0].color, GREY);
        assert_eq!(far[1].color, GREEN);

        let mut state = ChaseState::default();
        let near = chase(&frame(0.0, Vec2::new(0.1, 0.1)), &mut state);
        assert_eq!(near[1].color, RED);
    }

    #[test]
    fn test_swarm_pairs() {
        let mut state = ChaseState::default();
        let input = frame(0.5, Vec2::new(0.5, -0.5));
        let draws = swarm(&input, &mut state);

        assert_eq!(draws.len(), SWARM_PAIRS * 2);
        assert!(draws.iter().all(|d| d.shape == ShapeId::Flower));
        assert!(draws.iter().all(|d| d.program == Program::Creative));

        // followers head for the mouse, runners for its mirror image
        assert!(state.swarm[0].dot(input.mouse) > 0.0);
        assert!(state.swarm[SWARM_PAIRS].dot(input.mouse) < 0.0);
        assert_eq!(draws[1].mouse, -input.mouse);
        assert_eq!(draws[1].color, RED);
    }

    #[test]
    fn test_later_swarm_members_are_faster() {
        assert!((swarm_ease(0) - 0.989).abs() < 1e-6);
        for i in 1..SWARM_PAIRS {
            assert!(swarm_ease(i) < swarm_ease(i - 1));
        }
    }
}
