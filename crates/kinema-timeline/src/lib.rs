//! # kinema-timeline
//!
//! The authoritative in-memory animation timeline: keyframes per
//! (object, property) track, playhead state, selection, a copy/paste
//! clipboard with frame-relative remapping, the animation preset catalog,
//! and the scene object registry the exporter reads through.

pub mod keyframe;
pub mod presets;
pub mod registry;
pub mod store;

pub use keyframe::{Keyframe, KeyframeData, KeyframeId, Property, Value};
pub use presets::{
    all_categories, apply_preset, get_preset, preset_names, presets_in_category, PresetCategory,
    PresetDefinition, PresetOptions, ANIMATION_PRESETS,
};
pub use registry::{ObjectId, ObjectStyle, SceneObject, SceneRegistry, ShapeKind};
pub use store::{KeyframePatch, Timeline};
