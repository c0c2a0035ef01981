//! Sensor and recording format specifications.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::validate::{ensure_non_negative, ensure_positive};

/// Default native sensitivity (EI) of a cinema sensor.
pub const DEFAULT_NATIVE_ISO: u32 = 800;
/// Default color science identifier.
pub const DEFAULT_COLOR_SCIENCE: &str = "ARRI LogC4";

/// Physical sensor specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSpec {
    width_mm: f64,
    height_mm: f64,
    native_iso: u32,
    color_science: String,
    /// 0 = unknown
    pixel_pitch_um: f64,
}

impl SensorSpec {
    /// Sensor with default native ISO, color science and unknown pixel pitch.
    pub fn new(width_mm: f64, height_mm: f64) -> ModelResult<Self> {
        Self::with_details(
            width_mm,
            height_mm,
            DEFAULT_NATIVE_ISO,
            DEFAULT_COLOR_SCIENCE,
            0.0,
        )
    }

    pub fn with_details(
        width_mm: f64,
        height_mm: f64,
        native_iso: u32,
        color_science: impl Into<String>,
        pixel_pitch_um: f64,
    ) -> ModelResult<Self> {
        ensure_positive("width_mm", width_mm, "mm")?;
        ensure_positive("height_mm", height_mm, "mm")?;
        ensure_non_negative("pixel_pitch_um", pixel_pitch_um, "um")?;
        Ok(Self {
            width_mm,
            height_mm,
            native_iso,
            color_science: color_science.into(),
            pixel_pitch_um,
        })
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn native_iso(&self) -> u32 {
        self.native_iso
    }

    pub fn color_science(&self) -> &str {
        &self.color_science
    }

    pub fn pixel_pitch_um(&self) -> f64 {
        self.pixel_pitch_um
    }

    pub fn diagonal_mm(&self) -> f64 {
        self.width_mm.hypot(self.height_mm)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }
}

/// Recording format / resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FormatSpec {
    width_px: u32,
    height_px: u32,
    name: String,
}

impl FormatSpec {
    pub fn new(width_px: u32, height_px: u32, name: impl Into<String>) -> ModelResult<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(ModelError::validation(
                "resolution",
                format!("must be positive, got {}x{}", width_px, height_px),
            ));
        }
        Ok(Self {
            width_px,
            height_px,
            name: name.into(),
        })
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width_px as f64 / self.height_px as f64
    }
}
