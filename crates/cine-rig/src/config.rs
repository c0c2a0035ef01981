//! Rig configuration.

use std::path::PathBuf;

use cine_models::camera::REFERENCE_FPS;
use cine_optics::biomechanics::{DEFAULT_DAMPING_BASE, DEFAULT_SENSOR_TO_MOUNT_CM};
use cine_optics::bodies::ALEXA_35_ID;
use cine_optics::lenses::COOKE_ANAMORPHIC_ID;
use cine_optics::{BiomechanicsCalibration, BiomechanicsConfig, BodySettings};
use tracing::{info, warn};

use crate::error::CliResult;

/// Rig configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RigConfig {
    /// Lens provider id
    pub lens_provider: String,
    /// Body provider id
    pub body_id: String,
    /// Sensor format; provider default when unset
    pub format_name: Option<String>,
    /// Overrides the body provider's weight
    pub body_weight_kg: Option<f64>,
    pub sensor_to_mount_cm: f64,
    /// Fluid head damping before the weight term
    pub damping_base: f64,
    /// Biomechanics calibration file; linear model when unset
    pub calibration_path: Option<PathBuf>,
    /// Project frame rate for shutter speed
    pub fps: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            lens_provider: COOKE_ANAMORPHIC_ID.to_string(),
            body_id: ALEXA_35_ID.to_string(),
            format_name: None,
            body_weight_kg: None,
            sensor_to_mount_cm: DEFAULT_SENSOR_TO_MOUNT_CM,
            damping_base: DEFAULT_DAMPING_BASE,
            calibration_path: None,
            fps: REFERENCE_FPS,
        }
    }
}

impl RigConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from any variable source.
    ///
    /// Values that do not parse or fall outside their valid range are
    /// ignored with a warning and the default applies.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, valid: fn(f64) -> bool| -> Option<f64> {
            let raw = var(key)?;
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && valid(value) => Some(value),
                _ => {
                    warn!(key, value = %raw, "Ignoring invalid configuration value");
                    None
                }
            }
        };
        let positive = |v: f64| v > 0.0;

        Self {
            lens_provider: var("CINERIG_LENS_PROVIDER").unwrap_or(defaults.lens_provider),
            body_id: var("CINERIG_BODY").unwrap_or(defaults.body_id),
            format_name: var("CINERIG_FORMAT"),
            body_weight_kg: number("CINERIG_BODY_WEIGHT_KG", positive),
            sensor_to_mount_cm: number("CINERIG_SENSOR_TO_MOUNT_CM", positive)
                .unwrap_or(defaults.sensor_to_mount_cm),
            damping_base: number("CINERIG_DAMPING_BASE", |v| (0.0..=1.0).contains(&v))
                .unwrap_or(defaults.damping_base),
            calibration_path: var("CINERIG_CALIBRATION_PATH").map(PathBuf::from),
            fps: number("CINERIG_FPS", positive).unwrap_or(defaults.fps),
        }
    }

    pub fn body_settings(&self) -> BodySettings {
        BodySettings {
            format_name: self.format_name.clone(),
            ..BodySettings::default()
        }
    }

    /// Biomechanics settings for a body of `body_weight_kg`, unless overridden.
    ///
    /// Loads the calibration file when one is configured. Fields set directly
    /// on this struct are validated here.
    pub fn biomechanics_config(&self, body_weight_kg: f64) -> CliResult<BiomechanicsConfig> {
        let mut config = BiomechanicsConfig::new(
            self.body_weight_kg.unwrap_or(body_weight_kg),
            self.sensor_to_mount_cm,
            self.damping_base,
        )?;

        if let Some(path) = &self.calibration_path {
            let calibration = BiomechanicsCalibration::from_path(path)?;
            info!(
                path = %path.display(),
                method = %calibration.method,
                "Loaded biomechanics calibration"
            );
            config = config.with_calibration(calibration);
        }

        Ok(config)
    }
}
