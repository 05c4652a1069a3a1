//! Ray-quad intersection (closed-form plane hit plus edge containment).

use whitted_geom::Quad;
use whitted_math::{Point3, Vec3};

use super::TOL;
use crate::Ray;

/// Intersect a ray with a convex quad.
///
/// Returns `None` if the ray is parallel to the quad's plane, meets the plane
/// at (or behind) the origin, or crosses the plane outside the quad.
pub fn intersect_quad(ray: &Ray, quad: &Quad) -> Option<f64> {
    let t = intersect_plane(ray, &quad.vertices()[0], &quad.normal())?;
    quad.contains(&ray.at(t)).then_some(t)
}

/// Distance to the infinite plane through `anchor` with unit `normal`.
pub(crate) fn intersect_plane(ray: &Ray, anchor: &Point3, normal: &Vec3) -> Option<f64> {
    let denom = ray.direction.as_ref().dot(normal);

    // Ray is parallel to plane
    if TOL.is_parallel(denom) {
        return None;
    }

    let t = (anchor - ray.origin).dot(normal) / denom;

    // Intersection is at or behind ray origin
    if t < TOL.flat_hit {
        return None;
    }

    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40 x 160 floor at y = -20, wound so the normal points up.
    fn floor() -> Quad {
        Quad::new(
            Point3::new(-20.0, -20.0, -40.0),
            Point3::new(20.0, -20.0, -40.0),
            Point3::new(20.0, -20.0, -200.0),
            Point3::new(-20.0, -20.0, -200.0),
        )
        .unwrap()
    }

    #[test]
    fn test_ray_quad_perpendicular() {
        let quad = floor();
        let ray = Ray::new(Point3::new(0.0, 0.0, -100.0), Vec3::new(0.0, -1.0, 0.0));
        let t = intersect_quad(&ray, &quad).unwrap();
        assert!((t - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_quad_angled() {
        let quad = floor();
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, -1.0, -4.0));
        let t = intersect_quad(&ray, &quad).unwrap();
        let p = ray.at(t);
        assert!((p.y + 20.0).abs() < 1e-10);
        assert!((p.z + 80.0).abs() < 1e-10);
        // hits the face from below as well
        let below = Ray::new(Point3::new(0.0, -30.0, -100.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect_quad(&below, &quad).is_some());
    }

    #[test]
    fn test_ray_quad_outside_edges() {
        let quad = floor();
        let ray = Ray::new(Point3::new(25.0, 0.0, -100.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(intersect_quad(&ray, &quad).is_none());
        let ray = Ray::new(Point3::new(0.0, 0.0, -30.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(intersect_quad(&ray, &quad).is_none());
    }

    #[test]
    fn test_ray_quad_parallel_misses_from_any_origin() {
        let quad = floor();
        let origins = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, -20.0, -100.0),
            Point3::new(-50.0, -25.0, -300.0),
        ];
        let directions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ];
        for origin in origins {
            for dir in directions {
                let ray = Ray::new(origin, dir);
                assert!(intersect_quad(&ray, &quad).is_none());
            }
        }
    }

    #[test]
    fn test_ray_quad_behind() {
        let quad = floor();
        let ray = Ray::new(Point3::new(0.0, 0.0, -100.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect_quad(&ray, &quad).is_none());
    }

    #[test]
    fn test_ray_starting_on_quad_skips_itself() {
        let quad = floor();
        let ray = Ray::new(Point3::new(0.0, -20.0, -100.0), Vec3::new(0.0, 1.0, -1.0));
        assert!(intersect_quad(&ray, &quad).is_none());
    }
}
