//! Recursive shading.
//!
//! [`Tracer::trace`] finds the closest hit, lights it with every point light
//! (ambient, diffuse, specular and a shadow test), then follows the surface's
//! [`Finish`] with reflected, refracted or straight-through secondary rays
//! until `max_depth` is reached.

use serde::{Deserialize, Serialize};
use whitted_math::{reflect, refract, Color, Dir3, Point3, Vec3};

use crate::error::{Result, TraceError};
use crate::material::Finish;
use crate::scene::Scene;
use crate::{Ray, RayHit};

/// An omnidirectional white light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// Light position in world space.
    pub position: Point3,
}

impl PointLight {
    /// Create a light at `position`.
    pub fn new(position: Point3) -> Self {
        Self { position }
    }
}

/// Shading parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Maximum recursion depth. Primary rays are traced at step 1.
    pub max_depth: u32,
    /// Color returned for rays that hit nothing.
    pub background: Color,
    /// Ambient light color, applied once per light.
    pub ambient: Color,
    /// Specular exponent.
    pub shininess: f64,
    /// Point lights.
    pub lights: Vec<PointLight>,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::zeros(),
            ambient: Color::repeat(0.2),
            shininess: 20.0,
            lights: vec![
                PointLight::new(Point3::new(-10.0, 40.0, -3.0)),
                PointLight::new(Point3::new(40.0, 40.0, -100.0)),
            ],
        }
    }
}

impl TraceSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TraceError::InvalidSettings("max_depth must be at least 1".into()));
        }
        if !(self.shininess >= 0.0) || !self.shininess.is_finite() {
            return Err(TraceError::InvalidSettings(
                "shininess must be a non-negative number".into(),
            ));
        }
        if self.ambient.iter().any(|c| !(*c >= 0.0)) {
            return Err(TraceError::InvalidSettings(
                "ambient components must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of sending a ray through a refractive solid.
enum Passage {
    /// The ray left the far side and is headed into the scene.
    Exit(Ray),
    /// A leg of the path hit nothing.
    Escaped,
    /// Total internal reflection at one of the boundaries.
    Trapped,
}

/// Recursive Whitted-style tracer over a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    settings: &'a TraceSettings,
}

impl<'a> Tracer<'a> {
    /// Create a tracer.
    pub fn new(scene: &'a Scene, settings: &'a TraceSettings) -> Self {
        Self { scene, settings }
    }

    /// The scene being traced.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// The shading parameters.
    pub fn settings(&self) -> &'a TraceSettings {
        self.settings
    }

    /// Color seen along `ray`.
    ///
    /// `step` counts from 1 for primary rays. Once it reaches `max_depth`
    /// only local illumination is returned.
    pub fn trace(&self, ray: &Ray, step: u32) -> Color {
        let Some(hit) = self.scene.closest_hit(ray) else {
            return self.settings.background;
        };
        let surface = &self.scene.surfaces()[hit.index];
        let normal = surface.normal(&hit.point);
        let color = surface.color_at(&hit.point);
        let local = self.local_color(&hit.point, &normal, &color);

        if step >= self.settings.max_depth {
            return local;
        }

        match surface.material.finish {
            Finish::Matte => local,
            Finish::Reflective { coefficient } => {
                let reflected = Ray::new(hit.point, reflect(ray.direction.as_ref(), &normal));
                local + coefficient * self.trace(&reflected, step + 1)
            }
            Finish::Refractive { eta, opacity } => match self.pass_through(ray, &hit, &normal, eta) {
                Passage::Exit(exit) => local * opacity + self.trace(&exit, step + 1) * (1.0 - opacity),
                Passage::Escaped => self.settings.background,
                Passage::Trapped => local,
            },
            Finish::Transparent { opacity } => {
                let behind = Ray {
                    origin: hit.point,
                    direction: ray.direction,
                };
                local * opacity + self.trace(&behind, step + 1) * (1.0 - opacity)
            }
        }
    }

    /// Direct illumination at `point`, summed over all lights.
    ///
    /// Each light contributes `ambient * color`, plus diffuse and white
    /// specular terms when it faces the surface and nothing lies between.
    pub fn local_color(&self, point: &Point3, normal: &Vec3, color: &Color) -> Color {
        self.settings
            .lights
            .iter()
            .fold(Color::zeros(), |sum, light| sum + self.illuminate(light, point, normal, color))
    }

    fn illuminate(&self, light: &PointLight, point: &Point3, normal: &Vec3, color: &Color) -> Color {
        let ambient = self.settings.ambient.component_mul(color);

        let to_light = light.position - point;
        let distance = to_light.norm();
        let Some(dir) = Dir3::try_new(to_light, f64::EPSILON) else {
            return ambient;
        };

        let l_dot_n = dir.dot(normal);
        if l_dot_n <= 0.0 || self.in_shadow(point, dir, distance) {
            return ambient;
        }

        let r = reflect(&-dir.into_inner(), normal);
        let specular = r.dot(normal).max(0.0).powf(self.settings.shininess);

        ambient + l_dot_n * color + Color::repeat(specular)
    }

    /// Whether a surface lies between `point` and a light `distance` away.
    fn in_shadow(&self, point: &Point3, dir: Dir3, distance: f64) -> bool {
        let shadow = Ray {
            origin: *point,
            direction: dir,
        };
        self.scene
            .closest_hit(&shadow)
            .is_some_and(|blocker| blocker.t < distance)
    }

    /// Refract into the solid at `hit`, find the far side and refract out.
    fn pass_through(&self, ray: &Ray, hit: &RayHit, normal: &Vec3, eta: f64) -> Passage {
        let Some(inside) = refract(ray.direction.as_ref(), normal, eta) else {
            return Passage::Trapped;
        };
        let inner = Ray::new(hit.point, inside);
        let Some(far) = self.scene.closest_hit(&inner) else {
            return Passage::Escaped;
        };

        let far_normal = self.scene.surfaces()[far.index].normal(&far.point);
        let Some(outside) = refract(inner.direction.as_ref(), &-far_normal, 1.0 / eta) else {
            return Passage::Trapped;
        };
        let exit = Ray::new(far.point, outside);
        if self.scene.closest_hit(&exit).is_none() {
            return Passage::Escaped;
        }
        Passage::Exit(exit)
    }
}
