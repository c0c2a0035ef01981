//! Optics engine, rig biomechanics and provider registry for CineRig.
//!
//! This crate provides:
//! - Field of view, hyperfocal distance and depth of field per frame
//! - Spring, damping, lag and handheld parameters from rig weight
//! - Optional biomechanics calibration from offline second-order fits
//! - An explicit lens/body registry with the built-in providers
//! - Parallel evaluation of focus pulls

pub mod biomechanics;
pub mod bodies;
pub mod calibration;
pub mod error;
pub mod lenses;
pub mod metrics;
pub mod optics;
pub mod registry;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use biomechanics::{derive_biomechanics, BiomechanicsConfig, BiomechanicsModel};
pub use bodies::{create_alexa35, Alexa35Provider};
pub use calibration::{solve_second_order, BiomechanicsCalibration, SecondOrderSolution};
pub use error::{RigError, RigResult};
pub use lenses::{CookeAnamorphicLens, CookeAnamorphicProvider};
pub use optics::{
    circle_of_confusion, compute_optics, depth_of_field, field_of_view, hyperfocal_distance,
};
pub use registry::{BodyProvider, BodySettings, LensProvider, RigRegistry};
pub use sequence::{evaluate_sequence, FocusPull, FrameEvaluation};
