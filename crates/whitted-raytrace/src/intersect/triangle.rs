//! Ray-triangle intersection.

use whitted_geom::Triangle;

use super::plane::intersect_plane;
use crate::Ray;

/// Intersect a ray with a triangle.
///
/// Same plane hit as a quad, with the containment test run over three edges.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<f64> {
    let t = intersect_plane(ray, &triangle.vertices()[0], &triangle.normal())?;
    triangle.contains(&ray.at(t)).then_some(t)
}
