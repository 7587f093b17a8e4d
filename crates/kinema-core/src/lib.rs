//! # kinema-core
//!
//! Core types and primitives for the Kinema animation engine.
//! This crate contains foundational types shared across all Kinema crates:
//! colors, easing curves, 2D transforms, and error types.

pub mod color;
pub mod easing;
pub mod error;
pub mod math;

pub use color::{is_valid_hex, normalize_hex, Color, ColorError};
pub use easing::{Easing, TangentHandles};
pub use error::{KinemaError, KinemaResult};
pub use math::{Point2D, Transform2D};
