//! Ray-cone intersection (quadratic equation).

use whitted_geom::Cone;

use super::{root_in_band, TOL};
use crate::Ray;

/// Intersect a ray with an upright open cone.
///
/// The implicit surface is `(x - cx)² + (z - cz)² = (r/h)² (h - (y - cy))²`,
/// which describes a double cone with its apex at `cy + h`. Only hits with
/// `cy <= y <= cy + h` belong to the lower nappe between base and apex.
pub fn intersect_cone(ray: &Ray, cone: &Cone) -> Option<f64> {
    let d = ray.direction.as_ref();
    let oc = ray.origin - cone.center;

    let k = cone.slope_squared();
    // Height of the apex above the ray origin
    let apex_dy = cone.center.y + cone.height - ray.origin.y;

    let a = d.x * d.x + d.z * d.z - k * d.y * d.y;
    let b = 2.0 * (oc.x * d.x + oc.z * d.z + k * apex_dy * d.y);
    let c = oc.x * oc.x + oc.z * oc.z - k * apex_dy * apex_dy;

    // Ray runs parallel to a generator line
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

    let y_min = cone.center.y;
    root_in_band(ray, t1, t2, y_min, y_min + cone.height)
}
