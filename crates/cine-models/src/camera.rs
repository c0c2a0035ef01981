//! Camera body state at a single frame.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::sensor::{FormatSpec, SensorSpec};

pub const DEFAULT_EXPOSURE_INDEX: u32 = 800;
pub const DEFAULT_SHUTTER_ANGLE_DEG: f64 = 180.0;
pub const DEFAULT_WHITE_BALANCE_K: u32 = 5600;

/// Frame rate assumed by [`CameraState::shutter_speed_s`].
pub const REFERENCE_FPS: f64 = 24.0;

/// Sensor, recording format and exposure settings of a camera body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraState {
    model: String,
    sensor: SensorSpec,
    format: FormatSpec,
    exposure_index: u32,
    shutter_angle_deg: f64,
    white_balance_k: u32,
}

impl CameraState {
    pub fn new(
        model: impl Into<String>,
        sensor: SensorSpec,
        format: FormatSpec,
        exposure_index: u32,
        shutter_angle_deg: f64,
        white_balance_k: u32,
    ) -> ModelResult<Self> {
        if exposure_index == 0 {
            return Err(ModelError::validation(
                "exposure_index",
                "must be positive, got 0",
            ));
        }
        if shutter_angle_deg.is_nan() || shutter_angle_deg <= 0.0 || shutter_angle_deg > 360.0 {
            return Err(ModelError::validation(
                "shutter_angle_deg",
                format!("must be in (0, 360], got {}", shutter_angle_deg),
            ));
        }
        Ok(Self {
            model: model.into(),
            sensor,
            format,
            exposure_index,
            shutter_angle_deg,
            white_balance_k,
        })
    }

    /// EI 800, 180 degree shutter, 5600K.
    pub fn with_defaults(
        model: impl Into<String>,
        sensor: SensorSpec,
        format: FormatSpec,
    ) -> ModelResult<Self> {
        Self::new(
            model,
            sensor,
            format,
            DEFAULT_EXPOSURE_INDEX,
            DEFAULT_SHUTTER_ANGLE_DEG,
            DEFAULT_WHITE_BALANCE_K,
        )
    }

    /// Copy with a different exposure index.
    pub fn with_exposure_index(&self, exposure_index: u32) -> ModelResult<Self> {
        Self::new(
            self.model.clone(),
            self.sensor.clone(),
            self.format.clone(),
            exposure_index,
            self.shutter_angle_deg,
            self.white_balance_k,
        )
    }

    /// Copy with a different shutter angle.
    pub fn with_shutter_angle(&self, shutter_angle_deg: f64) -> ModelResult<Self> {
        Self::new(
            self.model.clone(),
            self.sensor.clone(),
            self.format.clone(),
            self.exposure_index,
            shutter_angle_deg,
            self.white_balance_k,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sensor(&self) -> &SensorSpec {
        &self.sensor
    }

    pub fn format(&self) -> &FormatSpec {
        &self.format
    }

    pub fn exposure_index(&self) -> u32 {
        self.exposure_index
    }

    pub fn shutter_angle_deg(&self) -> f64 {
        self.shutter_angle_deg
    }

    pub fn white_balance_k(&self) -> u32 {
        self.white_balance_k
    }

    /// Active sensor width for the current format.
    ///
    /// Every supported format records the full sensor width.
    pub fn active_width_mm(&self) -> f64 {
        self.sensor.width_mm()
    }

    pub fn active_height_mm(&self) -> f64 {
        self.sensor.height_mm()
    }

    /// Exposure time at [`REFERENCE_FPS`].
    pub fn shutter_speed_s(&self) -> f64 {
        self.shutter_speed_at(REFERENCE_FPS)
    }

    pub fn shutter_speed_at(&self, fps: f64) -> f64 {
        self.shutter_angle_deg / (360.0 * fps)
    }
}
