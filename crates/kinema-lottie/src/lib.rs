//! # kinema-lottie
//!
//! The export surface of the Kinema engine: a typed model of the Lottie
//! animation document, the serializer that assembles one from the scene
//! registry and the timeline, and the validator that checks a produced
//! document for structural and semantic correctness.

pub mod document;
pub mod export;
pub mod validate;

pub use document::{
    LottieAnimation, LottieKeyframe, LottieLayer, LottieShape, LottieTransform, LottieValue,
    StaticValue, LOTTIE_VERSION,
};
pub use export::{export, export_to_string, ExportOptions};
pub use validate::{
    format_validation_errors, validate, validate_bounds, validate_structure, validate_value,
    ValidationError, ValidationResult,
};
