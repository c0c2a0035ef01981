//! Built-in camera bodies.
//!
//! ARRI ALEXA 35: 4.6K Super 35 ALEV-IV sensor, native EI 800, LogC4.

use cine_models::{CameraState, FormatSpec, SensorSpec};

use crate::biomechanics::DEFAULT_BODY_WEIGHT_KG;
use crate::error::{RigError, RigResult};
use crate::registry::{BodyProvider, BodySettings};

pub const ALEXA_35_ID: &str = "arri_alexa_35";
pub const ALEXA_35_MODEL: &str = "ARRI ALEXA 35";

/// Open Gate.
pub const DEFAULT_FORMAT: &str = "4.6K 3:2 Open Gate";

/// Recording formats as `(name, width_px, height_px)`.
pub const ALEXA_35_FORMATS: [(&str, u32, u32); 4] = [
    ("4.6K 3:2 Open Gate", 4608, 3164),
    ("4K 16:9", 4096, 2304),
    ("UHD", 3840, 2160),
    ("2K 16:9", 2048, 1152),
];

/// Open Gate active area.
pub fn alexa35_sensor() -> RigResult<SensorSpec> {
    Ok(SensorSpec::with_details(27.99, 19.22, 800, "ARRI LogC4", 6.075)?)
}

pub fn alexa35_format(name: &str) -> RigResult<FormatSpec> {
    let (name, width, height) = ALEXA_35_FORMATS
        .iter()
        .find(|(n, _, _)| *n == name)
        .copied()
        .ok_or_else(|| RigError::UnknownFormat {
            name: name.to_string(),
            available: ALEXA_35_FORMATS.iter().map(|(n, _, _)| n.to_string()).collect(),
        })?;
    Ok(FormatSpec::new(width, height, name)?)
}

/// Build an ALEXA 35 camera state.
pub fn create_alexa35(
    format_name: &str,
    exposure_index: u32,
    shutter_angle_deg: f64,
) -> RigResult<CameraState> {
    Ok(CameraState::new(
        ALEXA_35_MODEL,
        alexa35_sensor()?,
        alexa35_format(format_name)?,
        exposure_index,
        shutter_angle_deg,
        cine_models::camera::DEFAULT_WHITE_BALANCE_K,
    )?)
}

/// Registry provider for the ALEXA 35.
#[derive(Debug, Default, Clone, Copy)]
pub struct Alexa35Provider;

impl BodyProvider for Alexa35Provider {
    fn id(&self) -> &str {
        ALEXA_35_ID
    }

    fn body_weight_kg(&self) -> f64 {
        DEFAULT_BODY_WEIGHT_KG
    }

    fn formats(&self) -> Vec<String> {
        ALEXA_35_FORMATS.iter().map(|(n, _, _)| n.to_string()).collect()
    }

    fn create(&self, settings: &BodySettings) -> RigResult<CameraState> {
        create_alexa35(
            settings.format_name.as_deref().unwrap_or(DEFAULT_FORMAT),
            settings.exposure_index,
            settings.shutter_angle_deg,
        )
    }
}
