//! Ray-sphere intersection (quadratic equation).

use whitted_geom::Sphere;

use super::TOL;
use crate::Ray;

/// Intersect a ray with a sphere.
///
/// Solves `|P + tD - C|² = r²` in half-b form. Tangent rays (discriminant
/// near zero) are misses. Returns the smaller root beyond the tolerance, so a
/// ray starting on or inside the sphere reports the exit point.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f64> {
    let oc = ray.origin - sphere.center;
    let d = ray.direction.as_ref();

    let b = d.dot(&oc);
    let c = oc.norm_squared() - sphere.radius * sphere.radius;

    let discriminant = b * b - c;
    if TOL.is_grazing(discriminant) {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    [-b - sqrt_disc, -b + sqrt_disc]
        .into_iter()
        .find(|&t| t > TOL.sphere_hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use whitted_math::{Point3, Vec3};

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::origin(), 1.0).unwrap()
    }

    #[test]
    fn test_ray_sphere_head_on() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let t = intersect_sphere(&ray, &sphere).unwrap();
        assert!((t - 4.0).abs() < 1e-12);

        let point = ray.at(t);
        assert_relative_eq!(point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(sphere.normal(&point), Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_ray_toward_center_hits_at_surface_distance() {
        let sphere = Sphere::new(Point3::new(2.0, -1.0, -30.0), 3.0).unwrap();
        let origins = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(-7.0, 2.0, -60.0),
        ];
        for origin in origins {
            let to_center = sphere.center - origin;
            let ray = Ray::new(origin, to_center);
            let t = intersect_sphere(&ray, &sphere).unwrap();

            let expected = to_center.norm() - sphere.radius;
            assert!((t - expected).abs() < 1e-9);

            let point = ray.at(t);
            let n = sphere.normal(&point);
            assert!((n.norm() - 1.0).abs() < 1e-9);
            // parallel to (point - center)
            assert!(n.cross(&(point - sphere.center)).norm() < 1e-9);
        }
    }

    #[test]
    fn test_ray_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_sphere(&ray, &sphere).is_none());
    }

    #[test]
    fn test_ray_sphere_tangent_is_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_sphere(&ray, &sphere).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside_reports_exit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let t = intersect_sphere(&ray, &sphere).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_sphere_from_surface_skips_itself() {
        // Secondary ray leaving the surface inward: only the far side counts
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let t = intersect_sphere(&ray, &sphere).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_sphere_behind() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_sphere(&ray, &sphere).is_none());
    }
}
