//! Shared data models for CineRig.
//!
//! This crate provides validated, immutable types for:
//! - Sensors, recording formats and camera bodies
//! - Lens specs with distortion, breathing and mechanical data
//! - Per-frame lens and camera state
//! - Optics and biomechanics results
//! - JSON lens descriptors

pub mod attributes;
pub mod breathing;
pub mod camera;
pub mod curve;
pub mod descriptor;
pub mod distortion;
pub mod error;
pub mod lens;
pub mod lens_state;
pub mod mechanics;
pub mod results;
pub mod sensor;
mod validate;

// Re-export common types
pub use attributes::{AttributeSet, AttributeValue, ToAttributes};
pub use breathing::{BreathingCurve, SqueezeBreathingCurve, INFINITY_FOCUS_M};
pub use camera::CameraState;
pub use curve::LinearCurve;
pub use descriptor::{load_lens_spec, FocusDistance, LensDescriptor};
pub use distortion::DistortionModel;
pub use error::{ModelError, ModelResult};
pub use lens::{LensSpec, LensSpecBuilder};
pub use lens_state::LensState;
pub use mechanics::{GearRingSpec, MechanicalSpec, PupilShiftFit};
pub use results::{BiomechanicsParams, OpticalResult};
pub use sensor::{FormatSpec, SensorSpec};
