use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::zero()
    }
}

/// The live 2D transform of a scene object: position, scale factors,
/// rotation in degrees, and opacity in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position offset (translation).
    pub position: Point2D,
    /// Scale factors (1.0 = unscaled).
    pub scale: Point2D,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity (0.0–1.0).
    pub opacity: f64,
}

impl Transform2D {
    /// Identity transform: no translation, scale 1, no rotation, fully opaque.
    pub fn identity() -> Self {
        Self {
            position: Point2D::zero(),
            scale: Point2D::new(1.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
