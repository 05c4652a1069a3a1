//! The demo scene.
//!
//! | index  | surface                     | material                 |
//! |--------|-----------------------------|--------------------------|
//! | 0      | large blue sphere           | mirror                   |
//! | 1      | yellow sphere               | matte                    |
//! | 2      | green sphere                | glass                    |
//! | 3      | floor quad                  | blue/red checkerboard    |
//! | 4      | cylinder                    | matte                    |
//! | 5      | cone                        | transparent              |
//! | 6-11   | cube                        | matte                    |
//! | 12-15  | tetrahedron                 | matte                    |
//! | 16     | small sphere                | earth texture            |
//! | 17     | small sphere                | yellow/green stripes     |

use std::sync::Arc;

use whitted_geom::{Cone, Cylinder, Quad, Sphere};
use whitted_math::{Color, Point3, Vec3};
use whitted_raytrace::{Finish, Material, Pattern, Result, Scene, Texture};

const REFLECTION: f64 = 0.8;
const OPACITY: f64 = 0.6;
const ETA: f64 = 1.0 / 1.5;

/// Center of the textured sphere.
pub const EARTH_CENTER: Point3 = Point3::new(5.0, 5.0, -30.0);

/// Build the demo scene. Without a texture the earth sphere is flat green.
pub fn demo_scene(earth: Option<Arc<dyn Texture>>) -> Result<Scene> {
    let mut scene = Scene::new();

    scene.add(
        Sphere::new(Point3::new(-5.0, -5.0, -150.0), 15.0)?,
        Material::flat(Color::new(0.0, 0.0, 1.0)).with_finish(Finish::Reflective {
            coefficient: REFLECTION,
        }),
    );
    scene.add(
        Sphere::new(Point3::new(10.0, 5.0, -130.0), 4.0)?,
        Material::flat(Color::new(1.0, 1.0, 0.0)),
    );
    scene.add(
        Sphere::new(Point3::new(-10.0, -8.0, -60.0), 5.0)?,
        Material::flat(Color::new(0.0, 1.0, 0.0)).with_finish(Finish::Refractive {
            eta: ETA,
            opacity: OPACITY,
        }),
    );

    let floor = Quad::new(
        Point3::new(-20.0, -20.0, -40.0),
        Point3::new(20.0, -20.0, -40.0),
        Point3::new(20.0, -20.0, -200.0),
        Point3::new(-20.0, -20.0, -200.0),
    )?;
    scene.add(
        floor,
        Material::flat(Color::repeat(1.0)).with_pattern(Pattern::Checker {
            even: Color::new(0.050, 0.184, 0.611),
            odd: Color::new(0.827, 0.011, 0.011),
            size: 5.0,
            origin: Point3::new(-20.0, 0.0, 0.0),
        }),
    );

    scene.add(
        Cylinder::new(Point3::new(8.0, -15.0, -100.0), 2.0, 8.0)?,
        Material::flat(Color::new(0.27, 0.85, 0.91)),
    );
    scene.add(
        Cone::new(Point3::new(2.0, -15.0, -100.0), 2.0, 8.0)?,
        Material::flat(Color::new(0.341, 0.756, 0.490))
            .with_finish(Finish::Transparent { opacity: OPACITY }),
    );

    scene.add_cube(
        Point3::new(-8.0, -10.0, -90.0),
        Vec3::new(5.0, 5.0, 5.0),
        Material::flat(Color::new(0.15, 0.77, 0.4)),
    )?;
    scene.add_tetrahedron(
        Point3::new(3.0, -15.0, -65.0),
        6.0,
        Material::flat(Color::new(0.996, 0.184, 0.184)),
    )?;

    let mut earth_material = Material::flat(Color::new(0.0, 1.0, 0.0));
    if let Some(texture) = earth {
        earth_material = earth_material.with_pattern(Pattern::Spherical {
            texture,
            center: EARTH_CENTER,
        });
    }
    scene.add(Sphere::new(EARTH_CENTER, 2.0)?, earth_material);

    let stripe = Color::new(0.901, 0.941, 0.156);
    scene.add(
        Sphere::new(Point3::new(8.0, -8.0, -60.0), 2.0)?,
        Material::flat(stripe).with_pattern(Pattern::Stripes {
            even: stripe,
            odd: Color::new(0.156, 0.941, 0.403),
            width: 1.0,
        }),
    );

    scene.validate()?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitted_geom::ShapeKind;
    use whitted_raytrace::{render, ImagePlane, Ray, RenderSettings};

    #[derive(Debug)]
    struct White;

    impl Texture for White {
        fn color_at(&self, _u: f64, _v: f64) -> Color {
            Color::repeat(1.0)
        }
    }

    #[test]
    fn test_surface_layout() {
        let scene = demo_scene(None).unwrap();
        assert_eq!(scene.len(), 18);

        let kinds: Vec<ShapeKind> = scene.surfaces().iter().map(|s| s.shape.kind()).collect();
        assert_eq!(kinds[0], ShapeKind::Sphere);
        assert_eq!(kinds[3], ShapeKind::Quad);
        assert_eq!(kinds[4], ShapeKind::Cylinder);
        assert_eq!(kinds[5], ShapeKind::Cone);
        assert!(kinds[6..12].iter().all(|k| *k == ShapeKind::Quad));
        assert!(kinds[12..16].iter().all(|k| *k == ShapeKind::Triangle));
        assert_eq!(kinds[16], ShapeKind::Sphere);
        assert_eq!(kinds[17], ShapeKind::Sphere);

        let finish = |i: usize| scene.surfaces()[i].material.finish.name();
        assert_eq!(finish(0), "reflective");
        assert_eq!(finish(2), "refractive");
        assert_eq!(finish(5), "transparent");
        assert_eq!(finish(1), "matte");
    }

    #[test]
    fn test_earth_texture_attached() {
        let scene = demo_scene(Some(Arc::new(White))).unwrap();
        let earth = &scene.surfaces()[16];
        assert_eq!(earth.material.pattern.name(), "spherical");
        assert_eq!(earth.color_at(&Point3::new(7.0, 5.0, -30.0)), Color::repeat(1.0));

        let plain = demo_scene(None).unwrap();
        assert_eq!(plain.surfaces()[16].material.pattern.name(), "solid");
    }

    #[test]
    fn test_center_ray_hits_glass_sphere_region() {
        let scene = demo_scene(None).unwrap();
        // Straight at the glass sphere's center
        let ray = Ray::new(Point3::origin(), Vec3::new(-10.0, -8.0, -60.0));
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 2);
    }

    #[test]
    fn test_small_render() {
        let scene = demo_scene(None).unwrap();
        let settings = RenderSettings {
            plane: ImagePlane {
                resolution: 8,
                ..ImagePlane::default()
            },
            ..RenderSettings::default()
        };
        let image = render(&scene, &settings).unwrap();
        assert_eq!(image.to_rgb8().len(), 8 * 8 * 3);
        // The floor fills the bottom of the view
        assert_ne!(image.get(4, 7).unwrap(), settings.trace.background);
    }
}
