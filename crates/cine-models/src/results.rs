//! Output records of the optics engine and biomechanics derivation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

/// Optical properties computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct OpticalResult {
    /// Horizontal field of view in degrees, including breathing
    pub hfov_deg: f64,
    /// Vertical field of view in degrees, including breathing
    pub vfov_deg: f64,
    /// Near depth-of-field limit in meters
    pub dof_near_m: f64,
    /// Far depth-of-field limit in meters (null when unbounded)
    #[serde(serialize_with = "finite_or_null")]
    #[schemars(with = "Option<f64>")]
    pub dof_far_m: f64,
    /// Hyperfocal distance in meters (null when unbounded)
    #[serde(serialize_with = "finite_or_null")]
    #[schemars(with = "Option<f64>")]
    pub hyperfocal_m: f64,
    /// Circle of confusion in millimeters
    pub coc_mm: f64,
}

impl OpticalResult {
    /// Everything from the near limit to infinity is acceptably sharp.
    pub fn is_far_unbounded(&self) -> bool {
        self.dof_far_m.is_infinite()
    }

    /// Total depth of field in meters; infinite when the far limit is unbounded.
    pub fn total_dof_m(&self) -> f64 {
        self.dof_far_m - self.dof_near_m
    }
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

/// Rig dynamics derived from the camera and lens weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BiomechanicsParams {
    /// Spring stiffness; lower is more sluggish
    pub spring_constant: f64,
    /// Damping ratio; higher settles with less overshoot
    pub damping_ratio: f64,
    /// Operator response delay in frames
    pub lag_frames: f64,
    /// Handheld shake amplitude in degrees
    pub handheld_amplitude_deg: f64,
    /// Handheld shake frequency in Hz
    pub handheld_frequency_hz: f64,
    /// kg*cm^2, reported for reference
    pub moment_of_inertia: f64,
    /// Body plus lens in kg
    pub combined_weight_kg: f64,
}
