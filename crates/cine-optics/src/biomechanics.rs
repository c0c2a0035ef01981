//! Operator biomechanics derivation.
//!
//! Maps the physical rig (body plus lens weight, lens length) onto spring,
//! damping and lag parameters for a second-order motion solver, plus handheld
//! shake amplitude and frequency. Heavier rigs respond slower, settle with less
//! overshoot and shake less.
//!
//! The default [`BiomechanicsModel::Linear`] model is weight driven. Moment of
//! inertia is reported but only the calibrated model consumes it.

use cine_models::{BiomechanicsParams, CameraState, LensState, ModelError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calibration::BiomechanicsCalibration;
use crate::error::{RigError, RigResult};

/// ARRI ALEXA 35 body without accessories.
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 3.9;
/// Sensor plane to lens mounting face.
pub const DEFAULT_SENSOR_TO_MOUNT_CM: f64 = 8.0;
/// Baseline damping of a studio fluid head.
pub const DEFAULT_DAMPING_BASE: f64 = 0.6;

/// How spring and damping are derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BiomechanicsModel {
    /// Linear functions of combined weight.
    #[default]
    Linear,
    /// Quadratic fits in moment of inertia; lag and handheld stay weight driven.
    Calibrated(BiomechanicsCalibration),
}

impl BiomechanicsModel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Calibrated(_) => "calibrated",
        }
    }
}

/// Rig assembly parameters not carried by the lens or camera state.
///
/// Deserialization validates like [`BiomechanicsConfig::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BiomechanicsConfigFile")]
pub struct BiomechanicsConfig {
    pub body_weight_kg: f64,
    pub sensor_to_mount_cm: f64,
    pub damping_base: f64,
    pub model: BiomechanicsModel,
}

impl Default for BiomechanicsConfig {
    fn default() -> Self {
        Self {
            body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
            sensor_to_mount_cm: DEFAULT_SENSOR_TO_MOUNT_CM,
            damping_base: DEFAULT_DAMPING_BASE,
            model: BiomechanicsModel::Linear,
        }
    }
}

impl BiomechanicsConfig {
    /// Linear-model configuration.
    ///
    /// Body weight and mount offset must be positive, damping base in `[0, 1]`.
    pub fn new(
        body_weight_kg: f64,
        sensor_to_mount_cm: f64,
        damping_base: f64,
    ) -> RigResult<Self> {
        let config = Self {
            body_weight_kg,
            sensor_to_mount_cm,
            damping_base,
            model: BiomechanicsModel::Linear,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants of [`BiomechanicsConfig::new`] on a config built
    /// from its public fields.
    pub fn validate(&self) -> RigResult<()> {
        if !(self.body_weight_kg.is_finite() && self.body_weight_kg > 0.0) {
            return Err(ModelError::validation(
                "body_weight_kg",
                format!("must be positive and finite, got {}", self.body_weight_kg),
            )
            .into());
        }
        if !(self.sensor_to_mount_cm.is_finite() && self.sensor_to_mount_cm > 0.0) {
            return Err(ModelError::validation(
                "sensor_to_mount_cm",
                format!("must be positive and finite, got {}", self.sensor_to_mount_cm),
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.damping_base) {
            return Err(ModelError::validation(
                "damping_base",
                format!("must be in [0, 1], got {}", self.damping_base),
            )
            .into());
        }
        Ok(())
    }

    pub fn with_body_weight(mut self, body_weight_kg: f64) -> RigResult<Self> {
        self.body_weight_kg = body_weight_kg;
        self.validate()?;
        Ok(self)
    }

    pub fn with_calibration(mut self, calibration: BiomechanicsCalibration) -> Self {
        self.model = BiomechanicsModel::Calibrated(calibration);
        self
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct BiomechanicsConfigFile {
    body_weight_kg: f64,
    sensor_to_mount_cm: f64,
    damping_base: f64,
    model: BiomechanicsModel,
}

impl Default for BiomechanicsConfigFile {
    fn default() -> Self {
        let BiomechanicsConfig {
            body_weight_kg,
            sensor_to_mount_cm,
            damping_base,
            model,
        } = BiomechanicsConfig::default();
        Self {
            body_weight_kg,
            sensor_to_mount_cm,
            damping_base,
            model,
        }
    }
}

impl TryFrom<BiomechanicsConfigFile> for BiomechanicsConfig {
    type Error = RigError;

    fn try_from(file: BiomechanicsConfigFile) -> RigResult<Self> {
        let config = Self {
            body_weight_kg: file.body_weight_kg,
            sensor_to_mount_cm: file.sensor_to_mount_cm,
            damping_base: file.damping_base,
            model: file.model,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Distance from the tripod pivot to the rig's center of mass, approximated as
/// the mount offset plus half the lens length.
pub fn moment_arm_cm(lens: &LensState, config: &BiomechanicsConfig) -> f64 {
    let half_lens_cm = lens
        .spec()
        .mechanics()
        .map(|m| m.length_mm() / 20.0)
        .unwrap_or(0.0);
    config.sensor_to_mount_cm + half_lens_cm
}

fn linear_spring(weight_kg: f64) -> f64 {
    (25.0 - 1.3 * weight_kg).max(5.0)
}

fn linear_damping(weight_kg: f64, base: f64) -> f64 {
    (base + 0.025 * weight_kg).min(0.95)
}

/// Derive solver parameters for a camera and lens.
///
/// The body weight comes from `config`; the camera state identifies the body
/// but does not carry its mass.
pub fn derive_biomechanics(
    _camera: &CameraState,
    lens: &LensState,
    config: &BiomechanicsConfig,
) -> BiomechanicsParams {
    let combined_weight_kg = config.body_weight_kg + lens.rig_weight_kg();
    let arm_cm = moment_arm_cm(lens, config);
    let moment_of_inertia = combined_weight_kg * arm_cm * arm_cm;

    let (spring_constant, damping_ratio) = match &config.model {
        BiomechanicsModel::Linear => (
            linear_spring(combined_weight_kg),
            linear_damping(combined_weight_kg, config.damping_base),
        ),
        BiomechanicsModel::Calibrated(cal) => {
            if !cal.covers(moment_of_inertia) {
                warn!(
                    moment_of_inertia,
                    range = ?cal.inertia_range(),
                    "Moment of inertia outside calibrated range, extrapolating"
                );
            }
            (
                cal.spring_constant(moment_of_inertia),
                cal.damping_ratio(moment_of_inertia),
            )
        }
    };

    let params = BiomechanicsParams {
        spring_constant,
        damping_ratio,
        lag_frames: 0.3 * combined_weight_kg,
        handheld_amplitude_deg: (1.5 / combined_weight_kg).max(0.05),
        handheld_frequency_hz: (8.0 - 0.3 * combined_weight_kg).max(2.0),
        moment_of_inertia,
        combined_weight_kg,
    };

    crate::metrics::record_biomechanics_derivation(config.model.name());
    debug!(
        combined_weight_kg,
        moment_of_inertia,
        spring_constant,
        damping_ratio,
        model = config.model.name(),
        "Derived biomechanics"
    );

    params
}
