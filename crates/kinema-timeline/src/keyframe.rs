use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::ObjectId;
use kinema_core::Easing;

/// Unique identifier for a keyframe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub String);

impl KeyframeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique keyframe id.
    pub fn generate() -> Self {
        Self(format!("kf-{}", Uuid::new_v4()))
    }
}

impl std::fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The animatable property a keyframe targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Position,
    Scale,
    Rotation,
    Opacity,
    Fill,
    Stroke,
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::Position => write!(f, "position"),
            Property::Scale => write!(f, "scale"),
            Property::Rotation => write!(f, "rotation"),
            Property::Opacity => write!(f, "opacity"),
            Property::Fill => write!(f, "fill"),
            Property::Stroke => write!(f, "stroke"),
        }
    }
}

/// A keyframe value: a 2-vector for position/scale, a scalar for
/// rotation/opacity, a hex color string for fill/stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vec2([f64; 2]),
    Color(String),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f64; 2]> {
        match self {
            Value::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            Value::Color(hex) => Some(hex),
            _ => None,
        }
    }
}

/// A keyframe: a target value for one property of one object at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Unique keyframe identifier.
    pub id: KeyframeId,
    /// The scene object this keyframe animates.
    pub object_id: ObjectId,
    /// Position on the timeline frame grid.
    pub frame: u32,
    /// The property being animated.
    pub property: Property,
    /// Target value at this keyframe.
    pub value: Value,
    /// Easing of the segment leaving this keyframe.
    pub easing: Easing,
}

impl Keyframe {
    /// Create a keyframe with a freshly generated id and linear easing.
    pub fn new(object_id: ObjectId, frame: u32, property: Property, value: Value) -> Self {
        Self {
            id: KeyframeId::generate(),
            object_id,
            frame,
            property,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// A keyframe stripped of its identity, as held by the clipboard and
/// produced by preset generators before ids are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeData {
    pub object_id: ObjectId,
    pub frame: u32,
    pub property: Property,
    pub value: Value,
    pub easing: Easing,
}

impl KeyframeData {
    /// Promote to a full keyframe with a freshly generated id.
    pub fn into_keyframe(self) -> Keyframe {
        Keyframe {
            id: KeyframeId::generate(),
            object_id: self.object_id,
            frame: self.frame,
            property: self.property,
            value: self.value,
            easing: self.easing,
        }
    }
}

impl From<Keyframe> for KeyframeData {
    fn from(kf: Keyframe) -> Self {
        Self {
            object_id: kf.object_id,
            frame: kf.frame,
            property: kf.property,
            value: kf.value,
            easing: kf.easing,
        }
    }
}
