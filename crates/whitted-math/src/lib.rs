#![warn(missing_docs)]

//! Math types for the whitted ray tracer.
//!
//! Thin wrappers around nalgebra providing the vector types used by the
//! geometry and shading crates, the two optics formulas (mirror reflection
//! and Snell refraction), and the tolerance constants that guard the
//! intersection routines against self-intersection.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Linear RGB color. Components are nominally in `[0, 1]` but are never
/// clamped by the tracer.
pub type Color = Vector3<f64>;

/// Mirror `incident` about the plane with unit normal `normal`.
///
/// `I - 2 (I·N) N`. The result has the same length as `incident`.
#[inline]
pub fn reflect(incident: &Vec3, normal: &Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Refract `incident` through a boundary with unit normal `normal`.
///
/// `eta` is the ratio of refractive indices `n_from / n_to`. Both vectors are
/// expected to be unit length and `normal` must face against `incident`.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(incident: &Vec3, normal: &Vec3, eta: f64) -> Option<Vec3> {
    let n_dot_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - n_dot_i * n_dot_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident - (eta * n_dot_i + k.sqrt()) * normal)
}

/// Tolerance constants for ray/surface intersection.
///
/// Scenes are measured in tens to hundreds of world units and secondary rays
/// start exactly on a surface, so these are far coarser than CAD tolerances.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Rays with `|D·N|` below this are treated as parallel to a flat face.
    pub parallel: f64,
    /// Minimum forward distance for a flat-face hit.
    pub flat_hit: f64,
    /// Discriminants with magnitude below this are treated as tangent misses.
    pub tangent: f64,
    /// Minimum forward distance for a sphere root.
    pub sphere_hit: f64,
    /// Minimum forward distance for a cone or cylinder root.
    pub quadric_hit: f64,
}

impl Tolerance {
    /// Default ray tracing tolerances.
    pub const DEFAULT: Self = Self {
        parallel: 1e-4,
        flat_hit: 1e-4,
        tangent: 1e-3,
        sphere_hit: 1e-3,
        quadric_hit: 0.01,
    };

    /// Check whether a discriminant signals a miss (negative or tangent).
    pub fn is_grazing(&self, discriminant: f64) -> bool {
        discriminant < 0.0 || discriminant.abs() < self.tangent
    }

    /// Check whether a ray direction is effectively parallel to a face.
    pub fn is_parallel(&self, d_dot_n: f64) -> bool {
        d_dot_n.abs() < self.parallel
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
