use glam::Vec3;
use tracing::debug;

use crate::math::assembler::Wrap;

/// Central difference step, in normalized parameter units.
pub const DERIVATIVE_STEP: f32 = 1e-3;

/// How far toward the domain interior tangents are re-evaluated when the
/// tangent frame collapses (sphere caps, cone tips).
pub const POLE_NUDGE: f32 = 1e-2;

const DEGENERATE_AREA_SQ: f32 = 1e-10;

/// A mapping from the unit square to 3D space.
///
/// `u` and `v` both run over `[0, 1]`; the surface decides which angular or
/// linear domain that covers.
pub trait ParametricSurface {
    fn position(&self, u: f32, v: f32) -> Vec3;

    /// Analytic normal, when the surface knows it. Finite differences are
    /// used otherwise.
    fn normal(&self, _u: f32, _v: f32) -> Option<Vec3> {
        None
    }
}

impl<F> ParametricSurface for F
where
    F: Fn(f32, f32) -> Vec3,
{
    fn position(&self, u: f32, v: f32) -> Vec3 {
        self(u, v)
    }
}

pub struct SampleGrid {
    pub rows: usize,
    pub cols: usize,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

/// Parameter value for grid index `index` out of `count` samples.
///
/// Indices map linearly from `[0, count - 1]` onto `[0, 1]`, so both ends of
/// the domain are sampled on every axis. On a wrapped axis the last sample
/// lands on the seam; the assembler closes the ring back to index 0.
pub fn grid_parameter(index: usize, count: usize) -> f32 {
    if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.0
    }
}

fn step(t: f32, delta: f32, wrapped: bool) -> f32 {
    let t = t + delta;
    if wrapped {
        t.rem_euclid(1.0)
    } else {
        t.clamp(0.0, 1.0)
    }
}

fn toward_interior(t: f32, wrapped: bool) -> f32 {
    if wrapped {
        (t + POLE_NUDGE).rem_euclid(1.0)
    } else if t < 0.5 {
        t + POLE_NUDGE
    } else {
        t - POLE_NUDGE
    }
}

fn tangents<S>(surface: &S, u: f32, v: f32, wrap: Wrap) -> (Vec3, Vec3)
where
    S: ParametricSurface + ?Sized,
{
    let (u_lo, u_hi) = (
        step(u, -DERIVATIVE_STEP, wrap.rows),
        step(u, DERIVATIVE_STEP, wrap.rows),
    );
    let (v_lo, v_hi) = (
        step(v, -DERIVATIVE_STEP, wrap.cols),
        step(v, DERIVATIVE_STEP, wrap.cols),
    );

    // Clamped differences span less than two steps at the domain edge.
    let du_span = if wrap.rows { 2.0 * DERIVATIVE_STEP } else { u_hi - u_lo };
    let dv_span = if wrap.cols { 2.0 * DERIVATIVE_STEP } else { v_hi - v_lo };

    let du = (surface.position(u_hi, v) - surface.position(u_lo, v)) / du_span;
    let dv = (surface.position(u, v_hi) - surface.position(u, v_lo)) / dv_span;
    (du, dv)
}

fn frame_normal(du: Vec3, dv: Vec3) -> Option<Vec3> {
    let n = du.cross(dv);
    (n.length_squared() > DEGENERATE_AREA_SQ).then(|| n.normalize())
}

/// Surface normal at `(u, v)`, oriented along `∂f/∂u × ∂f/∂v`.
pub fn estimate_normal<S>(surface: &S, u: f32, v: f32, wrap: Wrap) -> Option<Vec3>
where
    S: ParametricSurface + ?Sized,
{
    if let Some(n) = surface.normal(u, v) {
        let n = n.normalize_or_zero();
        return (n != Vec3::ZERO).then_some(n);
    }

    let (du, dv) = tangents(surface, u, v, wrap);
    frame_normal(du, dv).or_else(|| {
        let (du, dv) = tangents(
            surface,
            toward_interior(u, wrap.rows),
            toward_interior(v, wrap.cols),
            wrap,
        );
        frame_normal(du, dv)
    })
}

/// Samples `surface` on a `rows × cols` grid, row-major.
pub fn sample_grid<S>(surface: &S, rows: usize, cols: usize, wrap: Wrap) -> SampleGrid
where
    S: ParametricSurface + ?Sized,
{
    let count = rows * cols;
    let mut positions = Vec::with_capacity(count);
    let mut normals = Vec::with_capacity(count);
    let mut degenerate = 0usize;

    for i in 0..rows {
        let u = grid_parameter(i, rows);
        for j in 0..cols {
            let v = grid_parameter(j, cols);

            positions.push(surface.position(u, v));
            normals.push(estimate_normal(surface, u, v, wrap).unwrap_or_else(|| {
                degenerate += 1;
                Vec3::ZERO
            }));
        }
    }

    if degenerate > 0 {
        debug!(degenerate, rows, cols, "samples without a usable tangent frame");
    }

    SampleGrid {
        rows,
        cols,
        positions,
        normals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    fn plane(u: f32, v: f32) -> Vec3 {
        Vec3::new(u * 2.0, 0.0, -v * 3.0)
    }

    fn sphere(u: f32, v: f32) -> Vec3 {
        let (phi, theta) = (u * PI, v * TAU);
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), -phi.sin() * theta.sin())
    }

    struct Tilted;

    impl ParametricSurface for Tilted {
        fn position(&self, u: f32, v: f32) -> Vec3 {
            Vec3::new(u, v, 0.0)
        }

        fn normal(&self, _u: f32, _v: f32) -> Option<Vec3> {
            Some(Vec3::new(0.0, 3.0, 4.0))
        }
    }

    #[test]
    fn test_grid_parameter_spans_unit_interval() {
        assert_eq!(grid_parameter(0, 5), 0.0);
        assert_eq!(grid_parameter(4, 5), 1.0);
        assert_eq!(grid_parameter(2, 5), 0.5);
        assert_eq!(grid_parameter(0, 1), 0.0);
    }

    #[test]
    fn test_wrapped_axis_samples_both_ends() {
        let flat = |u: f32, v: f32| Vec3::new(u, v, 0.0);
        let grid = sample_grid(&flat, 2, 4, Wrap::COLS);
        let vs: Vec<f32> = grid.positions[..4].iter().map(|p| p.y).collect();
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        for (v, want) in vs.iter().zip(expected) {
            assert!((v - want).abs() < 1e-6, "v params {vs:?}");
        }
    }

    #[test]
    fn test_row_major_order() {
        let grid = sample_grid(&plane, 3, 4, Wrap::NONE);
        assert_eq!(grid.positions.len(), 12);
        assert_eq!(grid.normals.len(), 12);

        // sample (i, j) lives at i * cols + j
        let p = grid.positions[1 * 4 + 3];
        assert!((p - plane(0.5, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_plane_normals() {
        let grid = sample_grid(&plane, 4, 4, Wrap::NONE);
        for n in &grid.normals {
            // (2,0,0) x (0,0,-3) = (0,6,0)
            assert!((*n - Vec3::Y).length() < 1e-4, "bad normal {n:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let a = sample_grid(&sphere, 16, 16, Wrap::NONE);
        let b = sample_grid(&sphere, 16, 16, Wrap::NONE);
        let bits = |v: &[Vec3]| -> Vec<[u32; 3]> {
            v.iter()
                .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                .collect()
        };
        assert_eq!(bits(&a.positions), bits(&b.positions));
        assert_eq!(bits(&a.normals), bits(&b.normals));
    }

    #[test]
    fn test_sphere_normals_unit_and_outward() {
        let grid = sample_grid(&sphere, 16, 16, Wrap::NONE);
        for (p, n) in grid.positions.iter().zip(&grid.normals) {
            assert!((n.length() - 1.0).abs() < 1e-3, "normal {n:?} at {p:?}");
            assert!(n.dot(*p) > 0.9, "normal {n:?} not outward at {p:?}");
        }
    }

    #[test]
    fn test_pole_normals_point_along_axis() {
        let grid = sample_grid(&sphere, 9, 8, Wrap::NONE);
        for j in 0..8 {
            let top = grid.normals[j];
            let bottom = grid.normals[8 * 8 + j];
            assert!(top.dot(Vec3::Y) > 0.99, "top pole normal {top:?}");
            assert!(bottom.dot(Vec3::NEG_Y) > 0.99, "bottom pole normal {bottom:?}");
        }
    }

    #[test]
    fn test_wrapped_axis_ends_on_seam() {
        let grid = sample_grid(&sphere, 5, 8, Wrap::COLS);
        let equator = &grid.positions[2 * 8..3 * 8];
        for pair in equator[..7].windows(2) {
            assert!((pair[0] - pair[1]).length() > 0.5);
        }
        // v = 1 is a full turn, back on the v = 0 sample
        assert!((equator[7] - equator[0]).length() < 1e-5);

        let normals = &grid.normals[2 * 8..3 * 8];
        assert!((normals[7] - normals[0]).length() < 1e-3);
    }

    #[test]
    fn test_analytic_normal_wins() {
        let grid = sample_grid(&Tilted, 2, 2, Wrap::NONE);
        for n in &grid.normals {
            assert!((*n - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
        }
    }

    #[test]
    fn test_constant_surface_is_degenerate() {
        let point = |_u: f32, _v: f32| Vec3::ONE;
        let grid = sample_grid(&point, 3, 3, Wrap::NONE);
        assert!(grid.normals.iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn test_zero_resolution() {
        let grid = sample_grid(&plane, 0, 7, Wrap::BOTH);
        assert!(grid.positions.is_empty());
        assert!(grid.normals.is_empty());
    }
}
