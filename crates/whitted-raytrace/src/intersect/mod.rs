//! Ray-shape intersection algorithms.
//!
//! Each shape type has a dedicated intersector returning the distance to the
//! nearest forward hit, or `None` when the ray misses. A hit closer than the
//! shape's tolerance counts as a miss so secondary rays leaving a surface do
//! not immediately hit it again.

mod cone;
mod cylinder;
mod plane;
mod sphere;
mod triangle;

pub use cone::intersect_cone;
pub use cylinder::intersect_cylinder;
pub use plane::intersect_quad;
pub use sphere::intersect_sphere;
pub use triangle::intersect_triangle;

use whitted_geom::Shape;
use whitted_math::Tolerance;

use crate::Ray;

pub(crate) const TOL: Tolerance = Tolerance::DEFAULT;

/// Intersect a ray with any shape.
///
/// This dispatches to the appropriate intersector based on shape type.
pub fn intersect_shape(ray: &Ray, shape: &Shape) -> Option<f64> {
    match shape {
        Shape::Sphere(s) => intersect_sphere(ray, s),
        Shape::Quad(q) => intersect_quad(ray, q),
        Shape::Triangle(t) => intersect_triangle(ray, t),
        Shape::Cone(c) => intersect_cone(ray, c),
        Shape::Cylinder(c) => intersect_cylinder(ray, c),
    }
}

/// Pick the nearer of two quadric roots that is far enough ahead of the
/// origin and whose hit point lies in the upright band `y_min ..= y_max`.
/// Falls back to the farther root when the nearer one is out of band.
pub(crate) fn root_in_band(ray: &Ray, t1: f64, t2: f64, y_min: f64, y_max: f64) -> Option<f64> {
    let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
    [near, far]
        .into_iter()
        .filter(|&t| t >= TOL.quadric_hit)
        .find(|&t| {
            let y = ray.origin.y + t * ray.direction.y;
            y >= y_min && y <= y_max
        })
}
