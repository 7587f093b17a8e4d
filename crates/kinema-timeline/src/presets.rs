use serde::{Deserialize, Serialize};

use crate::keyframe::{Keyframe, KeyframeData, Property, Value};
use crate::registry::ObjectId;
use kinema_core::{Easing, KinemaError, KinemaResult};

/// Elastic overshoot curve used by the bounce presets.
const BOUNCE_EASING: Easing = Easing::bezier(0.68, -0.55, 0.27, 1.55);
const EASE_OUT_CURVE: Easing = Easing::bezier(0.0, 0.0, 0.58, 1.0);
const EASE_IN_CURVE: Easing = Easing::bezier(0.42, 0.0, 1.0, 1.0);
const EASE_IN_OUT_CURVE: Easing = Easing::bezier(0.42, 0.0, 0.58, 1.0);

/// Category a preset is grouped under in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Fade,
    Scale,
    Rotate,
    Bounce,
    Slide,
}

impl std::fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetCategory::Fade => write!(f, "fade"),
            PresetCategory::Scale => write!(f, "scale"),
            PresetCategory::Rotate => write!(f, "rotate"),
            PresetCategory::Bounce => write!(f, "bounce"),
            PresetCategory::Slide => write!(f, "slide"),
        }
    }
}

/// Options for generating a preset's keyframe pair.
#[derive(Debug, Clone)]
pub struct PresetOptions {
    pub object_id: ObjectId,
    pub start_frame: u32,
    pub duration: u32,
}

impl PresetOptions {
    /// Default window: frames 0 through 30.
    pub fn new(object_id: ObjectId) -> Self {
        Self {
            object_id,
            start_frame: 0,
            duration: 30,
        }
    }

    pub fn with_start_frame(mut self, start_frame: u32) -> Self {
        self.start_frame = start_frame;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }
}

/// A parameterized keyframe-pair generator: a property animated from one
/// value to another under a fixed curve. The start keyframe carries the
/// curve; the end keyframe is always linear, since a terminal keyframe has
/// no outgoing segment to shape.
#[derive(Debug, Clone)]
pub struct PresetDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: PresetCategory,
    property: Property,
    from: Value,
    to: Value,
    easing: Easing,
}

impl PresetDefinition {
    /// Generate the id-less keyframe pair for this preset.
    pub fn generate(&self, options: &PresetOptions) -> Vec<KeyframeData> {
        vec![
            KeyframeData {
                object_id: options.object_id.clone(),
                frame: options.start_frame,
                property: self.property,
                value: self.from.clone(),
                easing: self.easing,
            },
            KeyframeData {
                object_id: options.object_id.clone(),
                frame: options.start_frame + options.duration,
                property: self.property,
                value: self.to.clone(),
                easing: Easing::Linear,
            },
        ]
    }
}

/// The built-in preset catalog. Slide endpoints assume the editor's
/// 512-square canvas, entering toward its center.
pub const ANIMATION_PRESETS: &[PresetDefinition] = &[
    PresetDefinition {
        name: "fade-in",
        label: "Fade In",
        description: "Fade from transparent to opaque",
        category: PresetCategory::Fade,
        property: Property::Opacity,
        from: Value::Scalar(0.0),
        to: Value::Scalar(100.0),
        easing: EASE_OUT_CURVE,
    },
    PresetDefinition {
        name: "fade-out",
        label: "Fade Out",
        description: "Fade from opaque to transparent",
        category: PresetCategory::Fade,
        property: Property::Opacity,
        from: Value::Scalar(100.0),
        to: Value::Scalar(0.0),
        easing: EASE_IN_CURVE,
    },
    PresetDefinition {
        name: "scale-up",
        label: "Scale Up",
        description: "Scale from small to full size",
        category: PresetCategory::Scale,
        property: Property::Scale,
        from: Value::Vec2([0.0, 0.0]),
        to: Value::Vec2([100.0, 100.0]),
        easing: EASE_OUT_CURVE,
    },
    PresetDefinition {
        name: "scale-down",
        label: "Scale Down",
        description: "Scale from full size to small",
        category: PresetCategory::Scale,
        property: Property::Scale,
        from: Value::Vec2([100.0, 100.0]),
        to: Value::Vec2([0.0, 0.0]),
        easing: EASE_IN_CURVE,
    },
    PresetDefinition {
        name: "rotate-cw",
        label: "Rotate Clockwise",
        description: "Rotate 360 degrees clockwise",
        category: PresetCategory::Rotate,
        property: Property::Rotation,
        from: Value::Scalar(0.0),
        to: Value::Scalar(360.0),
        easing: EASE_IN_OUT_CURVE,
    },
    PresetDefinition {
        name: "rotate-ccw",
        label: "Rotate Counter-Clockwise",
        description: "Rotate 360 degrees counter-clockwise",
        category: PresetCategory::Rotate,
        property: Property::Rotation,
        from: Value::Scalar(0.0),
        to: Value::Scalar(-360.0),
        easing: EASE_IN_OUT_CURVE,
    },
    PresetDefinition {
        name: "bounce-in",
        label: "Bounce In",
        description: "Scale up with elastic bounce",
        category: PresetCategory::Bounce,
        property: Property::Scale,
        from: Value::Vec2([0.0, 0.0]),
        to: Value::Vec2([100.0, 100.0]),
        easing: BOUNCE_EASING,
    },
    PresetDefinition {
        name: "bounce-out",
        label: "Bounce Out",
        description: "Scale down with elastic bounce",
        category: PresetCategory::Bounce,
        property: Property::Scale,
        from: Value::Vec2([100.0, 100.0]),
        to: Value::Vec2([0.0, 0.0]),
        easing: BOUNCE_EASING,
    },
    PresetDefinition {
        name: "slide-in-left",
        label: "Slide In Left",
        description: "Slide in from left edge",
        category: PresetCategory::Slide,
        property: Property::Position,
        from: Value::Vec2([-200.0, 256.0]),
        to: Value::Vec2([256.0, 256.0]),
        easing: EASE_OUT_CURVE,
    },
    PresetDefinition {
        name: "slide-in-right",
        label: "Slide In Right",
        description: "Slide in from right edge",
        category: PresetCategory::Slide,
        property: Property::Position,
        from: Value::Vec2([712.0, 256.0]),
        to: Value::Vec2([256.0, 256.0]),
        easing: EASE_OUT_CURVE,
    },
];

/// Look up a preset by name.
pub fn get_preset(name: &str) -> Option<&'static PresetDefinition> {
    ANIMATION_PRESETS.iter().find(|p| p.name == name)
}

/// Names of every preset in the catalog.
pub fn preset_names() -> Vec<&'static str> {
    ANIMATION_PRESETS.iter().map(|p| p.name).collect()
}

/// Presets belonging to a category.
pub fn presets_in_category(category: PresetCategory) -> Vec<&'static PresetDefinition> {
    ANIMATION_PRESETS
        .iter()
        .filter(|p| p.category == category)
        .collect()
}

/// Every preset category, in display order.
pub fn all_categories() -> [PresetCategory; 5] {
    [
        PresetCategory::Fade,
        PresetCategory::Scale,
        PresetCategory::Rotate,
        PresetCategory::Bounce,
        PresetCategory::Slide,
    ]
}

/// Generate the keyframes for a named preset, assigning a fresh unique id
/// to each. Fails for a name not in the catalog.
pub fn apply_preset(name: &str, options: &PresetOptions) -> KinemaResult<Vec<Keyframe>> {
    let preset = get_preset(name).ok_or_else(|| KinemaError::UnknownPreset(name.to_string()))?;
    Ok(preset
        .generate(options)
        .into_iter()
        .map(KeyframeData::into_keyframe)
        .collect())
}
