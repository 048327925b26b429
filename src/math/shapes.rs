use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use tracing::{info, warn};

use crate::math::{ParametricSurface, TriangleMesh, Wrap, build_mesh};

/// Sweeps a profile curve one full turn around +Y.
///
/// The profile maps `t ∈ [0, 1]` to `(radius, height)`. On the surface `u`
/// runs along the profile and `v` around the axis. Profiles that head
/// downward on their outer side produce outward normals.
pub struct Revolve<P> {
    profile: P,
}

impl<P> Revolve<P>
where
    P: Fn(f32) -> Vec2,
{
    pub fn new(profile: P) -> Self {
        Self { profile }
    }
}

impl<P> ParametricSurface for Revolve<P>
where
    P: Fn(f32) -> Vec2,
{
    fn position(&self, u: f32, v: f32) -> Vec3 {
        let p = (self.profile)(u);
        let theta = v * TAU;
        Vec3::new(p.x * theta.cos(), p.y, -p.x * theta.sin())
    }
}

/// Unit half circle from the north pole to the south pole.
pub fn half_circle(t: f32) -> Vec2 {
    let a = t * PI;
    Vec2::new(a.sin(), a.cos())
}

/// Circle of radius 0.5 centred one unit off the axis.
pub fn circle(t: f32) -> Vec2 {
    let a = t * TAU;
    Vec2::new(1.0 + 0.5 * a.cos(), -0.5 * a.sin())
}

/// Half circle with a radial ripple.
pub fn half_squiggle(t: f32) -> Vec2 {
    let a = t * PI;
    let ripple = 1.0 + 0.12 * (a * 10.0).sin();
    Vec2::new(a.sin() * ripple, a.cos())
}

/// Flattened sphere with eight lobes around the equator.
pub fn spikes(u: f32, v: f32) -> Vec3 {
    let (phi, theta) = (u * PI, v * TAU);
    let r = 1.0 + 0.35 * (8.0 * theta).cos() * phi.sin().powi(2);
    Vec3::new(
        r * phi.sin() * theta.cos(),
        0.4 * r * phi.cos(),
        -r * phi.sin() * theta.sin(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Sphere,
    Torus,
    Squiggle,
    Spikes,
    Flower,
}

pub struct ShapeDef {
    pub id: ShapeId,
    pub name: &'static str,
    pub description: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub wrap: Wrap,
}

/// Indexed by [`ShapeId::def`]; keep the order in step with it.
pub static SHAPES: [ShapeDef; 5] = [
    ShapeDef {
        id: ShapeId::Sphere,
        name: "Sphere",
        description: "Half circle revolved",
        rows: 16,
        cols: 16,
        wrap: Wrap::NONE,
    },
    ShapeDef {
        id: ShapeId::Torus,
        name: "Torus",
        description: "Offset circle revolved",
        rows: 16,
        cols: 16,
        wrap: Wrap::NONE,
    },
    ShapeDef {
        id: ShapeId::Squiggle,
        name: "Squiggle",
        description: "Rippled half circle revolved",
        rows: 160,
        cols: 160,
        wrap: Wrap::COLS,
    },
    ShapeDef {
        id: ShapeId::Spikes,
        name: "Spikes",
        description: "Eight-lobed flattened sphere",
        rows: 160,
        cols: 160,
        wrap: Wrap::COLS,
    },
    ShapeDef {
        id: ShapeId::Flower,
        name: "Flower",
        description: "Spikes, drawn in the swarm",
        rows: 160,
        cols: 160,
        wrap: Wrap::COLS,
    },
];

impl ShapeId {
    pub fn def(self) -> &'static ShapeDef {
        let slot = match self {
            ShapeId::Sphere => 0,
            ShapeId::Torus => 1,
            ShapeId::Squiggle => 2,
            ShapeId::Spikes => 3,
            ShapeId::Flower => 4,
        };
        &SHAPES[slot]
    }

    pub fn surface(self) -> Box<dyn ParametricSurface> {
        match self {
            ShapeId::Sphere => Box::new(Revolve::new(half_circle)),
            ShapeId::Torus => Box::new(Revolve::new(circle)),
            ShapeId::Squiggle => Box::new(Revolve::new(half_squiggle)),
            ShapeId::Spikes | ShapeId::Flower => Box::new(spikes),
        }
    }

    pub fn build(self) -> TriangleMesh {
        let def = self.def();
        let surface = self.surface();
        let mesh = build_mesh(&*surface, def.rows, def.cols, def.wrap);
        if let Err(err) = mesh.validate() {
            warn!(shape = def.name, %err, "mesh failed validation");
        }
        info!(
            shape = def.name,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            boundary_edges = mesh.boundary_edge_count(),
            "built mesh"
        );
        mesh
    }
}
