#![warn(missing_docs)]

//! Recursive Whitted-style ray tracing.
//!
//! A [`Scene`] holds shapes from `whitted-geom`, each paired with a
//! [`Material`]. The [`Tracer`] shades a ray by finding its closest hit,
//! lighting it with point lights and shadow rays, and recursing into
//! reflected, refracted or straight-through rays up to a fixed depth. The
//! [`Sampler`] turns cells of an [`ImagePlane`] into colors with 4-ray
//! supersampling, and [`render`] does that for every cell in parallel.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and unit direction
//! - [`RayHit`] - Closest-hit result: distance, point and surface index
//! - [`intersect`] - Ray-shape intersection for each shape type
//! - [`material`] - Surface patterns, textures and optical finishes
//! - [`Scene`] - Ordered surfaces and the closest-hit query
//! - [`Tracer`] - Local illumination and recursive secondary rays
//! - [`Sampler`] - Per-pixel supersampling
//!
//! # Example
//!
//! ```ignore
//! use whitted_raytrace::{render, Material, RenderSettings, Scene};
//! use whitted_geom::Sphere;
//!
//! let mut scene = Scene::new();
//! scene.add(
//!     Sphere::new(Point3::new(0.0, 0.0, -60.0), 5.0)?,
//!     Material::flat(Color::new(0.2, 0.6, 0.9)),
//! );
//!
//! let image = render(&scene, &RenderSettings::default())?;
//! ```

mod error;
mod ray;
pub mod intersect;
pub mod material;
mod sample;
mod scene;
mod shade;

pub use error::{Result, TraceError};
pub use material::{Finish, Material, Pattern, Texture};
pub use ray::{Ray, RayHit};
pub use sample::{render, Framebuffer, ImagePlane, Sampler};
pub use scene::{Scene, Surface};
pub use shade::{PointLight, TraceSettings, Tracer};

use serde::{Deserialize, Serialize};

/// Everything [`render`] needs besides the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Camera and image plane.
    pub plane: ImagePlane,
    /// Shading parameters.
    pub trace: TraceSettings,
    /// Average four rays per pixel instead of one.
    pub antialias: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            plane: ImagePlane::default(),
            trace: TraceSettings::default(),
            antialias: true,
        }
    }
}

impl RenderSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        self.plane.validate()?;
        self.trace.validate()
    }
}
