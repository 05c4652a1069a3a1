//! Ray-cylinder intersection (quadratic equation).

use whitted_geom::Cylinder;

use super::{root_in_band, TOL};
use crate::Ray;

/// Intersect a ray with an upright open cylinder.
///
/// Solves `(x - cx)² + (z - cz)² = r²` and keeps the first root whose hit
/// point lies between the bottom and top of the tube (both inclusive).
/// There are no caps, so a ray can enter through the open top and hit the
/// inside wall.
pub fn intersect_cylinder(ray: &Ray, cylinder: &Cylinder) -> Option<f64> {
    let d = ray.direction.as_ref();
    let oc = ray.origin - cylinder.center;

    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (d.x * oc.x + d.z * oc.z);
    let c = oc.x * oc.x + oc.z * oc.z - cylinder.radius * cylinder.radius;

    // Ray is parallel to axis
    if a.abs() < 1e-12 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if TOL.is_grazing(discriminant) {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let y_min = cylinder.center.y;
    root_in_band(ray, t1, t2, y_min, y_min + cylinder.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_math::{Point3, Vec3};

    fn cylinder() -> Cylinder {
        Cylinder::new(Point3::new(0.0, 0.0, 0.0), 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_ray_cylinder_perpendicular() {
        let ray = Ray::new(Point3::new(-5.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let t = intersect_cylinder(&ray, &cylinder()).unwrap();
        assert!((t - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_cylinder_band_bounds_inclusive() {
        let cyl = cylinder();
        for y in [0.0, 2.0] {
            let ray = Ray::new(Point3::new(-5.0, y, 0.0), Vec3::new(1.0, 0.0, 0.0));
            let t = intersect_cylinder(&ray, &cyl).unwrap();
            assert!((t - 4.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_ray_cylinder_outside_band() {
        let cyl = cylinder();
        for y in [-0.01, 2.01] {
            let ray = Ray::new(Point3::new(-5.0, y, 0.0), Vec3::new(1.0, 0.0, 0.0));
            assert!(intersect_cylinder(&ray, &cyl).is_none());
        }
    }

    #[test]
    fn test_ray_cylinder_through_open_top() {
        // Enters through the open top and meets the far inside wall
        let cyl = cylinder();
        let ray = Ray::new(Point3::new(-3.0, 5.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let t = intersect_cylinder(&ray, &cyl).unwrap();
        let p = ray.at(t);
        assert!((p.x - 1.0).abs() < 1e-10);
        assert!((p.y - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_cylinder_parallel_axis() {
        let ray = Ray::new(Point3::new(0.5, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(intersect_cylinder(&ray, &cylinder()).is_none());
    }

    #[test]
    fn test_ray_cylinder_tangent() {
        let ray = Ray::new(Point3::new(-5.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_cylinder(&ray, &cylinder()).is_none());
    }

    #[test]
    fn test_ray_from_wall_skips_itself() {
        // Secondary ray leaving the wall inward reaches the opposite side
        let ray = Ray::new(Point3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let t = intersect_cylinder(&ray, &cylinder()).unwrap();
        assert!((t - 2.0).abs() < 1e-10);
    }
}
