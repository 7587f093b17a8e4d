use serde::{Deserialize, Serialize};

use crate::math::Point2D;

/// The cubic-Bézier tangent handles a keyframe segment resolves to in the
/// exported format: `o` is the out-tangent leaving the start keyframe, `i`
/// the in-tangent arriving at the end keyframe. `x` is normalized time,
/// `y` is normalized value and may overshoot the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentHandles {
    pub o: Point2D,
    pub i: Point2D,
}

/// Easing curve for the segment leaving a keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

impl Easing {
    /// Construct an explicit cubic-Bézier easing. No range validation is
    /// performed: the editor clamps `x` interactively, and overshooting `y`
    /// values are the basis of the bounce presets.
    pub const fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::Bezier { x1, y1, x2, y2 }
    }

    /// Resolve this easing to its tangent-handle pair.
    pub fn handles(&self) -> TangentHandles {
        match *self {
            Easing::Linear => TangentHandles {
                o: Point2D::new(0.0, 0.0),
                i: Point2D::new(1.0, 1.0),
            },
            Easing::EaseIn => TangentHandles {
                o: Point2D::new(0.42, 0.0),
                i: Point2D::new(1.0, 1.0),
            },
            Easing::EaseOut => TangentHandles {
                o: Point2D::new(0.0, 0.0),
                i: Point2D::new(0.58, 1.0),
            },
            Easing::EaseInOut => TangentHandles {
                o: Point2D::new(0.42, 0.0),
                i: Point2D::new(0.58, 1.0),
            },
            Easing::Bezier { x1, y1, x2, y2 } => TangentHandles {
                o: Point2D::new(x1, y1),
                i: Point2D::new(x2, y2),
            },
        }
    }
}
