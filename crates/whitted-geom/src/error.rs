//! Error types for shape construction.

use thiserror::Error;

/// Errors raised when a shape's parameters cannot describe a valid surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Radius must be strictly positive.
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Height must be strictly positive.
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    /// The face's vertices do not span a plane.
    #[error("face vertices are collinear or coincident")]
    DegenerateFace,

    /// A quad's fourth vertex lies off the plane of the first three.
    #[error("quad vertices are not coplanar (deviation {0})")]
    NonCoplanar(f64),

    /// A quad's vertices are not wound as a convex polygon.
    #[error("quad vertices do not form a convex, consistently wound polygon")]
    NotConvex,
}

/// Result type for shape construction.
pub type Result<T> = std::result::Result<T, GeomError>;
