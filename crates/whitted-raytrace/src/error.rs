//! Error types for scene setup and rendering.
//!
//! Nothing inside the tracer itself fails: misses, grazing rays and total
//! internal reflection all resolve to a color. These errors come from
//! validating what the caller hands in.

use thiserror::Error;
use whitted_geom::GeomError;

/// Errors that can occur while building a scene or configuring a render.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A shape could not be constructed.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeomError),

    /// A material parameter is out of range.
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// A surface in the scene carries an invalid material.
    #[error("surface {index}: {source}")]
    Surface {
        /// Index of the offending surface.
        index: usize,
        /// What is wrong with it.
        #[source]
        source: Box<TraceError>,
    },

    /// Invalid render settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TraceError>;
