//! Image plane sampling and whole-image rendering.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use whitted_math::{Color, Point3, Vec3};

use crate::error::{Result, TraceError};
use crate::scene::Scene;
use crate::shade::Tracer;
use crate::{Ray, RenderSettings};

/// A rectangular grid of cells in front of the eye.
///
/// The plane is centered on the -z axis at `distance`, spans `width` by
/// `height` world units and is divided into `resolution` cells per axis.
/// Cell `(0, 0)` is the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePlane {
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
    /// Distance from the eye along -z.
    pub distance: f64,
    /// Origin of primary rays.
    pub eye: Point3,
    /// Number of cells along each axis.
    pub resolution: u32,
}

impl Default for ImagePlane {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            distance: 40.0,
            eye: Point3::origin(),
            resolution: 500,
        }
    }
}

impl ImagePlane {
    /// Width and height of one cell.
    pub fn cell_size(&self) -> (f64, f64) {
        let n = f64::from(self.resolution);
        (self.width / n, self.height / n)
    }

    /// Plane coordinates of the center of cell `(i, j)`.
    pub fn pixel_center(&self, i: u32, j: u32) -> (f64, f64) {
        let (cell_x, cell_y) = self.cell_size();
        let x = -0.5 * self.width + (f64::from(i) + 0.5) * cell_x;
        let y = -0.5 * self.height + (f64::from(j) + 0.5) * cell_y;
        (x, y)
    }

    /// Primary ray from the eye through plane coordinates `(x, y)`.
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        Ray::new(self.eye, Vec3::new(x, y, -self.distance))
    }

    /// Validate plane parameters.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(TraceError::InvalidSettings("resolution must be at least 1".into()));
        }
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(TraceError::InvalidSettings(
                "image plane width and height must be positive".into(),
            ));
        }
        if !(self.distance > 0.0) {
            return Err(TraceError::InvalidSettings(
                "image plane distance must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Turns cells of an [`ImagePlane`] into colors.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    tracer: Tracer<'a>,
    plane: &'a ImagePlane,
    antialias: bool,
}

impl<'a> Sampler<'a> {
    /// Create a sampler. With `antialias` each cell is a box-filtered
    /// average of four rays; without it a single ray through the center.
    pub fn new(tracer: Tracer<'a>, plane: &'a ImagePlane, antialias: bool) -> Self {
        Self {
            tracer,
            plane,
            antialias,
        }
    }

    /// Color of cell `(i, j)`.
    pub fn render_pixel(&self, i: u32, j: u32) -> Color {
        let (x, y) = self.plane.pixel_center(i, j);
        if !self.antialias {
            return self.tracer.trace(&self.plane.ray_through(x, y), 1);
        }

        let (cell_x, cell_y) = self.plane.cell_size();
        let (qx, qy) = (0.25 * cell_x, 0.25 * cell_y);
        let sum = [(-qx, -qy), (qx, -qy), (-qx, qy), (qx, qy)]
            .iter()
            .fold(Color::zeros(), |sum, (dx, dy)| {
                sum + self.tracer.trace(&self.plane.ray_through(x + dx, y + dy), 1)
            });
        sum * 0.25
    }
}

/// A rendered image, stored row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// A black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unclamped color at column `x`, row `y` (counted from the top).
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// All pixels, row-major from the top.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Quantize to 8-bit RGB, saturating each channel to `[0, 1]`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.iter().map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }
}

/// Render a whole image.
///
/// Rows are traced in parallel. The image's top row is the plane's highest
/// row of cells.
pub fn render(scene: &Scene, settings: &RenderSettings) -> Result<Framebuffer> {
    settings.validate()?;
    scene.validate()?;

    let n = settings.plane.resolution;
    let tracer = Tracer::new(scene, &settings.trace);
    let sampler = Sampler::new(tracer, &settings.plane, settings.antialias);

    debug!(
        "Rendering {n}x{n} over {} surfaces ({} lights, antialias: {})",
        scene.len(),
        settings.trace.lights.len(),
        settings.antialias
    );
    let start = Instant::now();

    let mut image = Framebuffer::new(n, n);
    image
        .pixels
        .par_chunks_mut(n as usize)
        .enumerate()
        .for_each(|(row, line)| {
            let j = n - 1 - row as u32;
            for (i, pixel) in line.iter_mut().enumerate() {
                *pixel = sampler.render_pixel(i as u32, j);
            }
        });

    debug!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}
