//! Surface materials.
//!
//! A material has two independent parts: a [`Pattern`] that decides the
//! surface color at a point, and a [`Finish`] that decides which secondary
//! rays the tracer spawns from it.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use whitted_math::{Color, Point3};

use crate::error::{Result, TraceError};

/// A 2D image sampled in `[0, 1]²` texture space.
pub trait Texture: Send + Sync + fmt::Debug {
    /// Color at texture coordinates `(u, v)`. `v = 0` is the bottom row.
    fn color_at(&self, u: f64, v: f64) -> Color;
}

/// Where a surface's color comes from.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// The material's flat color everywhere.
    Solid,
    /// Checkerboard on the xz-plane: square cells of `size`, counted from
    /// `origin`. The cell containing `origin` gets `even`.
    Checker {
        /// Color of cells with even `ix + iz`.
        even: Color,
        /// Color of cells with odd `ix + iz`.
        odd: Color,
        /// Cell edge length.
        size: f64,
        /// Grid origin.
        origin: Point3,
    },
    /// Diagonal bands of constant `x + z`, each `width` wide.
    Stripes {
        /// Color of even bands.
        even: Color,
        /// Color of odd bands.
        odd: Color,
        /// Band width measured along `x + z`.
        width: f64,
    },
    /// Latitude/longitude lookup of a texture around `center`, with the
    /// northern hemisphere at the top of the image.
    Spherical {
        /// Image to sample.
        texture: Arc<dyn Texture>,
        /// Center of the mapped sphere.
        center: Point3,
    },
}

impl Pattern {
    /// Short name for reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Solid => "solid",
            Pattern::Checker { .. } => "checker",
            Pattern::Stripes { .. } => "stripes",
            Pattern::Spherical { .. } => "spherical",
        }
    }

    /// Color of the pattern at `point`, given the material's flat color.
    pub fn color_at(&self, point: &Point3, flat: &Color) -> Color {
        match self {
            Pattern::Solid => *flat,
            Pattern::Checker {
                even,
                odd,
                size,
                origin,
            } => {
                let ix = ((point.x - origin.x) / size).floor() as i64;
                let iz = ((point.z - origin.z) / size).floor() as i64;
                if (ix + iz).rem_euclid(2) == 0 {
                    *even
                } else {
                    *odd
                }
            }
            Pattern::Stripes { even, odd, width } => {
                let band = ((point.x + point.z) / width).floor() as i64;
                if band.rem_euclid(2) == 0 {
                    *even
                } else {
                    *odd
                }
            }
            Pattern::Spherical { texture, center } => {
                let (u, v) = spherical_uv(point, center);
                texture.color_at(u, v)
            }
        }
    }
}

/// Texture coordinates of `point` on a sphere around `center`.
///
/// `u` runs once around the equator, `v` from the south pole (0) to the north
/// pole (1).
pub fn spherical_uv(point: &Point3, center: &Point3) -> (f64, f64) {
    let d = (point - center).normalize();
    let u = 0.5 - d.z.atan2(d.x) / (2.0 * PI);
    let v = 0.5 + d.y.clamp(-1.0, 1.0).asin() / PI;
    (u, v)
}

/// How light leaves the surface besides local illumination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finish {
    /// Local illumination only.
    Matte,
    /// Mirror: adds `coefficient` times the reflected color.
    Reflective {
        /// Weight of the reflected color.
        coefficient: f64,
    },
    /// Solid glass: the ray is bent into the object, out through the far
    /// side, and the transmitted color is mixed with the local color.
    Refractive {
        /// Ratio of refractive indices outside / inside (1/1.5 for glass).
        eta: f64,
        /// Weight of the local color; the rest is transmitted light.
        opacity: f64,
    },
    /// See-through without bending: the ray continues in the same direction.
    Transparent {
        /// Weight of the local color; the rest is what lies behind.
        opacity: f64,
    },
}

impl Finish {
    /// Short name for reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Finish::Matte => "matte",
            Finish::Reflective { .. } => "reflective",
            Finish::Refractive { .. } => "refractive",
            Finish::Transparent { .. } => "transparent",
        }
    }
}

/// A surface material: flat color, pattern and finish.
#[derive(Debug, Clone)]
pub struct Material {
    /// Flat color, used directly by [`Pattern::Solid`].
    pub color: Color,
    /// Color source.
    pub pattern: Pattern,
    /// Secondary ray behavior.
    pub finish: Finish,
}

impl Material {
    /// A matte material of one flat color.
    pub fn flat(color: Color) -> Self {
        Self {
            color,
            pattern: Pattern::Solid,
            finish: Finish::Matte,
        }
    }

    /// Replace the pattern.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Replace the finish.
    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }

    /// Surface color at `point`.
    pub fn color_at(&self, point: &Point3) -> Color {
        self.pattern.color_at(point, &self.color)
    }

    /// Validate material parameters.
    pub fn validate(&self) -> Result<()> {
        match self.pattern {
            Pattern::Checker { size, .. } if !(size > 0.0) => {
                return Err(invalid(format!("checker size must be positive, got {size}")));
            }
            Pattern::Stripes { width, .. } if !(width > 0.0) => {
                return Err(invalid(format!("stripe width must be positive, got {width}")));
            }
            _ => {}
        }
        match self.finish {
            Finish::Matte => Ok(()),
            Finish::Reflective { coefficient } if !(coefficient >= 0.0) => Err(invalid(format!(
                "reflection coefficient must be non-negative, got {coefficient}"
            ))),
            Finish::Refractive { eta, .. } if !(eta > 0.0) => {
                Err(invalid(format!("eta must be positive, got {eta}")))
            }
            Finish::Refractive { opacity, .. } | Finish::Transparent { opacity }
                if !(0.0..=1.0).contains(&opacity) =>
            {
                Err(invalid(format!("opacity must be in [0, 1], got {opacity}")))
            }
            _ => Ok(()),
        }
    }
}

fn invalid(reason: String) -> TraceError {
    TraceError::InvalidMaterial(reason)
}
