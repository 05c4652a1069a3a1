//! Composite solids built from flat faces.
//!
//! A cube is six [`Quad`]s and a tetrahedron four [`Triangle`]s. Every face is
//! wound counter-clockwise seen from outside so its normal points away from
//! the solid.

use whitted_math::{Point3, Vec3};

use crate::error::Result;
use crate::{Quad, Triangle};

/// Build the six faces of an axis-aligned box.
///
/// `size` holds the extents along x, y and z. Faces are returned in the order
/// +x, -x, -y, +y, +z, -z.
pub fn cube(center: Point3, size: Vec3) -> Result<[Quad; 6]> {
    let half = size / 2.0;
    let corner = |sx: f64, sy: f64, sz: f64| {
        Point3::new(
            center.x + sx * half.x,
            center.y + sy * half.y,
            center.z + sz * half.z,
        )
    };

    // a..d on the +x side, e..h their mirror images on -x
    let a = corner(1.0, -1.0, -1.0);
    let b = corner(1.0, 1.0, -1.0);
    let c = corner(1.0, 1.0, 1.0);
    let d = corner(1.0, -1.0, 1.0);
    let e = corner(-1.0, -1.0, -1.0);
    let f = corner(-1.0, 1.0, -1.0);
    let g = corner(-1.0, 1.0, 1.0);
    let h = corner(-1.0, -1.0, 1.0);

    Ok([
        Quad::new(a, b, c, d)?,
        Quad::new(e, h, g, f)?,
        Quad::new(a, d, h, e)?,
        Quad::new(b, f, g, c)?,
        Quad::new(d, c, g, h)?,
        Quad::new(a, e, f, b)?,
    ])
}

/// Build the four faces of a tetrahedron.
///
/// The base triangle lies in the plane `y = anchor.y`: two corners sit
/// `size / 2` either side of `anchor` along x and the third `size` ahead
/// along +z. The apex is `size` above the base, halfway along the base's
/// depth. Faces are returned as front, left, right, bottom.
pub fn tetrahedron(anchor: Point3, size: f64) -> Result<[Triangle; 4]> {
    let half = size / 2.0;
    let a = Point3::new(anchor.x - half, anchor.y, anchor.z);
    let b = Point3::new(anchor.x + half, anchor.y, anchor.z);
    let c = Point3::new(anchor.x, anchor.y, anchor.z + size);
    let d = Point3::new(anchor.x, anchor.y + size, anchor.z + half);

    Ok([
        Triangle::new(a, d, b)?,
        Triangle::new(c, d, a)?,
        Triangle::new(b, d, c)?,
        Triangle::new(a, b, c)?,
    ])
}
