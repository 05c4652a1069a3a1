//! Scene storage and the closest-hit query.

use std::ops::Range;

use whitted_geom::{cube, tetrahedron, Shape};
use whitted_math::{Color, Point3, Vec3};

use crate::error::{Result, TraceError};
use crate::intersect::intersect_shape;
use crate::material::Material;
use crate::{Ray, RayHit};

/// A shape with its material.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Geometry.
    pub shape: Shape,
    /// Appearance.
    pub material: Material,
}

impl Surface {
    /// Pair a shape with a material.
    pub fn new(shape: impl Into<Shape>, material: Material) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }

    /// Distance to this surface along `ray`, if it is hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        intersect_shape(ray, &self.shape)
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal(&self, point: &Point3) -> Vec3 {
        self.shape.normal(point)
    }

    /// Surface color at a point.
    pub fn color_at(&self, point: &Point3) -> Color {
        self.material.color_at(point)
    }
}

/// An ordered collection of surfaces.
///
/// Insertion order defines each surface's index, which is what [`RayHit`]
/// reports. The scene is read-only while tracing and can be shared between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface and return its index.
    pub fn add(&mut self, shape: impl Into<Shape>, material: Material) -> usize {
        self.surfaces.push(Surface::new(shape, material));
        self.surfaces.len() - 1
    }

    /// Add the six faces of an axis-aligned box, all sharing `material`.
    ///
    /// Returns the range of indices the faces occupy.
    pub fn add_cube(&mut self, center: Point3, size: Vec3, material: Material) -> Result<Range<usize>> {
        let faces = cube(center, size)?;
        Ok(self.extend(faces, material))
    }

    /// Add the four faces of a tetrahedron, all sharing `material`.
    ///
    /// See [`whitted_geom::tetrahedron`] for the layout. Returns the range of
    /// indices the faces occupy.
    pub fn add_tetrahedron(&mut self, anchor: Point3, size: f64, material: Material) -> Result<Range<usize>> {
        let faces = tetrahedron(anchor, size)?;
        Ok(self.extend(faces, material))
    }

    fn extend<S: Into<Shape>>(&mut self, shapes: impl IntoIterator<Item = S>, material: Material) -> Range<usize> {
        let start = self.surfaces.len();
        for shape in shapes {
            self.surfaces.push(Surface::new(shape, material.clone()));
        }
        start..self.surfaces.len()
    }

    /// All surfaces in index order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Surface at `index`.
    pub fn get(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Check every surface's material.
    pub fn validate(&self) -> Result<()> {
        for (index, surface) in self.surfaces.iter().enumerate() {
            surface.material.validate().map_err(|e| TraceError::Surface {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Find the nearest surface along `ray`.
    ///
    /// Tests every surface; on equal distances the lower index wins. Returns
    /// `None` when nothing is hit.
    pub fn closest_hit(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest: Option<(usize, f64)> = None;

        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(t) = surface.intersect(ray) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((index, t));
                }
            }
        }

        closest.map(|(index, t)| RayHit::new(t, ray.at(t), index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use whitted_geom::{Quad, Sphere};

    fn sphere(center: Point3, radius: f64) -> Sphere {
        Sphere::new(center, radius).unwrap()
    }

    fn red() -> Material {
        Material::flat(Color::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_unit_sphere_hit() {
        let mut scene = Scene::new();
        scene.add(sphere(Point3::origin(), 1.0), red());

        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);
        assert!((hit.t - 4.0).abs() < 1e-12);
        assert_relative_eq!(hit.point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(scene.surfaces()[0].normal(&hit.point), Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_scene_has_no_hit() {
        let scene = Scene::new();
        let ray = Ray::new(Point3::origin(), Vec3::new(0.3, -0.2, -1.0));
        assert!(scene.closest_hit(&ray).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_closest_of_several() {
        let mut scene = Scene::new();
        scene.add(sphere(Point3::new(0.0, 0.0, -50.0), 2.0), red());
        scene.add(sphere(Point3::new(0.0, 0.0, -20.0), 2.0), red());
        scene.add(sphere(Point3::new(10.0, 0.0, -10.0), 2.0), red());

        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.t - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_lower_index() {
        let mut scene = Scene::new();
        let s = sphere(Point3::new(0.0, 0.0, -10.0), 1.0);
        scene.add(s.clone(), red());
        scene.add(s, red());

        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.closest_hit(&ray).unwrap().index, 0);
    }

    #[test]
    fn test_closest_hit_idempotent() {
        let mut scene = Scene::new();
        scene.add(sphere(Point3::new(0.0, 0.0, -20.0), 3.0), red());
        scene
            .add_cube(Point3::new(1.0, 0.5, -12.0), Vec3::new(2.0, 2.0, 2.0), red())
            .unwrap();

        let ray = Ray::new(Point3::origin(), Vec3::new(0.08, 0.04, -1.0));
        let first = scene.closest_hit(&ray);
        let second = scene.closest_hit(&ray);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_add_assemblies_report_index_ranges() {
        let mut scene = Scene::new();
        scene.add(sphere(Point3::origin(), 1.0), red());
        let cube = scene
            .add_cube(Point3::new(0.0, 0.0, -10.0), Vec3::new(1.0, 1.0, 1.0), red())
            .unwrap();
        let tet = scene
            .add_tetrahedron(Point3::new(0.0, 0.0, -20.0), 6.0, red())
            .unwrap();
        assert_eq!(cube, 1..7);
        assert_eq!(tet, 7..11);
        assert_eq!(scene.len(), 11);
    }

    #[test]
    fn test_ray_hits_cube_front_face() {
        let mut scene = Scene::new();
        let faces = scene
            .add_cube(Point3::new(0.0, 0.0, -10.0), Vec3::new(2.0, 2.0, 2.0), red())
            .unwrap();

        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.closest_hit(&ray).unwrap();
        assert!(faces.contains(&hit.index));
        assert!((hit.t - 9.0).abs() < 1e-12);
        // outward normal of the face facing the camera
        assert_relative_eq!(scene.surfaces()[hit.index].normal(&hit.point), Vec3::z());
    }

    #[test]
    fn test_bad_cube_is_an_error() {
        let mut scene = Scene::new();
        let result = scene.add_cube(Point3::origin(), Vec3::new(0.0, 1.0, 1.0), red());
        assert!(matches!(result, Err(TraceError::Geometry(_))));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_validate_reports_surface_index() {
        use crate::material::Finish;

        let mut scene = Scene::new();
        let floor = Quad::new(
            Point3::new(-1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(-1.0, 0.0, -1.0),
        )
        .unwrap();
        scene.add(floor, red());
        scene.add(
            sphere(Point3::origin(), 1.0),
            red().with_finish(Finish::Transparent { opacity: -0.1 }),
        );
        match scene.validate() {
            Err(TraceError::Surface { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected surface error, got {other:?}"),
        }
    }
}
