#![warn(missing_docs)]

//! Scene primitives for the whitted ray tracer.
//!
//! Every primitive owns its geometric parameters and can report the outward
//! unit normal at a point on its surface. Ray intersection lives in
//! `whitted-raytrace`; this crate only describes the shapes.
//!
//! Cones and cylinders are upright: they span `center.y ..= center.y + height`
//! along +Y. Quads and triangles are one-sided flat faces whose normal follows
//! the vertex winding, so composite solids (see [`assembly`]) must wind every
//! face counter-clockwise when seen from outside.

use std::fmt;
use whitted_math::{Dir3, Point3, Vec3};

pub mod assembly;
pub mod error;

pub use assembly::{cube, tetrahedron};
pub use error::{GeomError, Result};

// =============================================================================
// Sphere
// =============================================================================

/// A sphere given by center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere. Fails if `radius` is not positive.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(GeomError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Outward unit normal at `point`.
    pub fn normal(&self, point: &Point3) -> Vec3 {
        (point - self.center) / self.radius
    }
}

// =============================================================================
// Quad
// =============================================================================

/// A convex planar quadrilateral.
///
/// The vertices are stored in winding order; the face normal is
/// `(b - a) × (d - a)`, so the face is counter-clockwise seen from the side the
/// normal points to.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    vertices: [Point3; 4],
    normal: Dir3,
}

impl Quad {
    /// Create a quad from four vertices in winding order.
    ///
    /// Fails if the vertices are degenerate, not coplanar, or not a convex
    /// polygon in the given order.
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Result<Self> {
        let normal = face_normal(&(b - a), &(d - a))?;
        let n = normal.as_ref();

        let scale = [b - a, c - b, d - c, a - d]
            .iter()
            .map(|e| e.norm())
            .fold(0.0, f64::max);
        let deviation = (c - a).dot(n).abs();
        if deviation > 1e-9 * scale.max(1.0) {
            return Err(GeomError::NonCoplanar(deviation));
        }

        let vertices = [a, b, c, d];
        for i in 0..4 {
            let e1 = vertices[(i + 1) % 4] - vertices[i];
            let e2 = vertices[(i + 2) % 4] - vertices[(i + 1) % 4];
            if e1.cross(&e2).dot(n) <= 0.0 {
                return Err(GeomError::NotConvex);
            }
        }

        Ok(Self { vertices, normal })
    }

    /// The four vertices in winding order.
    pub fn vertices(&self) -> &[Point3; 4] {
        &self.vertices
    }

    /// Unit face normal. The same at every point of the face.
    pub fn normal(&self) -> Vec3 {
        self.normal.into_inner()
    }

    /// Test whether a point already known to lie on the quad's plane is inside
    /// the quad. Points on an edge count as inside.
    pub fn contains(&self, point: &Point3) -> bool {
        edges_contain(&self.vertices, self.normal.as_ref(), point)
    }
}

// =============================================================================
// Triangle
// =============================================================================

/// A planar triangle. The normal is `(b - a) × (c - a)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3; 3],
    normal: Dir3,
}

impl Triangle {
    /// Create a triangle from three vertices in winding order.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        let normal = face_normal(&(b - a), &(c - a))?;
        Ok(Self {
            vertices: [a, b, c],
            normal,
        })
    }

    /// The three vertices in winding order.
    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    /// Unit face normal.
    pub fn normal(&self) -> Vec3 {
        self.normal.into_inner()
    }

    /// Test whether a point on the triangle's plane is inside the triangle
    /// (edges inclusive).
    pub fn contains(&self, point: &Point3) -> bool {
        edges_contain(&self.vertices, self.normal.as_ref(), point)
    }
}

fn face_normal(u: &Vec3, v: &Vec3) -> Result<Dir3> {
    Dir3::try_new(u.cross(v), 1e-12).ok_or(GeomError::DegenerateFace)
}

/// Convex polygon containment: the point must be on the inner side of every
/// ordered edge.
fn edges_contain(vertices: &[Point3], normal: &Vec3, point: &Point3) -> bool {
    let n = vertices.len();
    (0..n).all(|i| {
        let start = vertices[i];
        let edge = vertices[(i + 1) % n] - start;
        edge.cross(&(point - start)).dot(normal) >= 0.0
    })
}

// =============================================================================
// Cone
// =============================================================================

/// An upright open cone: base circle of `radius` at `center.y`, apex at
/// `center.y + height` above `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    /// Center of the base circle.
    pub center: Point3,
    /// Base radius.
    pub radius: f64,
    /// Distance from base to apex.
    pub height: f64,
}

impl Cone {
    /// Create a cone. Fails on a non-positive radius or height.
    pub fn new(center: Point3, radius: f64, height: f64) -> Result<Self> {
        check_upright(radius, height)?;
        Ok(Self {
            center,
            radius,
            height,
        })
    }

    /// Squared slope `(r / h)²` of the cone's generator.
    pub fn slope_squared(&self) -> f64 {
        let k = self.radius / self.height;
        k * k
    }

    /// Outward unit normal at a point on the lateral surface.
    ///
    /// At the apex the normal is undefined; +Y is returned there.
    pub fn normal(&self, point: &Point3) -> Vec3 {
        let d = point - self.center;
        let rho = (d.x * d.x + d.z * d.z).sqrt();
        Vec3::new(d.x, rho * (self.radius / self.height), d.z)
            .try_normalize(1e-12)
            .unwrap_or_else(Vec3::y)
    }
}

// =============================================================================
// Cylinder
// =============================================================================

/// An upright open tube of `radius` spanning `center.y ..= center.y + height`.
/// There are no end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    /// Center of the bottom circle.
    pub center: Point3,
    /// Tube radius.
    pub radius: f64,
    /// Tube length along +Y.
    pub height: f64,
}

impl Cylinder {
    /// Create a cylinder. Fails on a non-positive radius or height.
    pub fn new(center: Point3, radius: f64, height: f64) -> Result<Self> {
        check_upright(radius, height)?;
        Ok(Self {
            center,
            radius,
            height,
        })
    }

    /// Outward unit normal at a point on the tube.
    pub fn normal(&self, point: &Point3) -> Vec3 {
        let d = point - self.center;
        Vec3::new(d.x / self.radius, 0.0, d.z / self.radius)
    }
}

fn check_upright(radius: f64, height: f64) -> Result<()> {
    if !(radius > 0.0) {
        return Err(GeomError::NonPositiveRadius(radius));
    }
    if !(height > 0.0) {
        return Err(GeomError::NonPositiveHeight(height));
    }
    Ok(())
}

// =============================================================================
// Shape
// =============================================================================

/// The kind of a shape (for reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Sphere.
    Sphere,
    /// Convex quadrilateral.
    Quad,
    /// Triangle.
    Triangle,
    /// Upright cone.
    Cone,
    /// Upright open cylinder.
    Cylinder,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Quad => "quad",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Cone => "cone",
            ShapeKind::Cylinder => "cylinder",
        };
        f.pad(name)
    }
}

/// Any primitive that can appear in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A sphere.
    Sphere(Sphere),
    /// A convex quadrilateral.
    Quad(Quad),
    /// A triangle.
    Triangle(Triangle),
    /// An upright cone.
    Cone(Cone),
    /// An upright open cylinder.
    Cylinder(Cylinder),
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Quad(_) => ShapeKind::Quad,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Cone(_) => ShapeKind::Cone,
            Shape::Cylinder(_) => ShapeKind::Cylinder,
        }
    }

    /// Outward unit normal at a point assumed to lie on the surface.
    pub fn normal(&self, point: &Point3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal(point),
            Shape::Quad(q) => q.normal(),
            Shape::Triangle(t) => t.normal(),
            Shape::Cone(c) => c.normal(point),
            Shape::Cylinder(c) => c.normal(point),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Quad> for Shape {
    fn from(q: Quad) -> Self {
        Shape::Quad(q)
    }
}

impl From<Triangle> for Shape {
    fn from(t: Triangle) -> Self {
        Shape::Triangle(t)
    }
}

impl From<Cone> for Shape {
    fn from(c: Cone) -> Self {
        Shape::Cone(c)
    }
}

impl From<Cylinder> for Shape {
    fn from(c: Cylinder) -> Self {
        Shape::Cylinder(c)
    }
}
