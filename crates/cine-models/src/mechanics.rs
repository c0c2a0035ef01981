//! Physical lens mechanics: gear rings, barrel dimensions, entrance pupil.
//!
//! Mechanical data drives the rig biomechanics (weight, moment arm) and
//! parallax-correct panning (entrance pupil position).

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::validate::{ensure_non_negative, ensure_positive};

/// Standard cine gear module (0.8mm pitch).
pub const DEFAULT_GEAR_MODULE: f64 = 0.8;

const KG_TO_LBS: f64 = 2.20462;

/// Focus distances closer than this are clamped when evaluating pupil shift.
const PUPIL_FIT_MIN_FOCUS_M: f64 = 0.3;

/// Gear ring on a cinema lens barrel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GearRingSpec {
    rotation_deg: f64,
    gear_teeth: u32,
    gear_module: f64,
}

impl GearRingSpec {
    pub fn new(rotation_deg: f64, gear_teeth: u32, gear_module: f64) -> ModelResult<Self> {
        if rotation_deg <= 0.0 || rotation_deg > 360.0 || rotation_deg.is_nan() {
            return Err(ModelError::validation(
                "rotation_deg",
                format!("must be in (0, 360], got {}", rotation_deg),
            ));
        }
        if gear_teeth == 0 {
            return Err(ModelError::validation(
                "gear_teeth",
                format!("must be positive, got {}", gear_teeth),
            ));
        }
        ensure_positive("gear_module", gear_module, "mm")?;
        Ok(Self {
            rotation_deg,
            gear_teeth,
            gear_module,
        })
    }

    /// Ring with the standard 0.8 module.
    pub fn standard(rotation_deg: f64, gear_teeth: u32) -> ModelResult<Self> {
        Self::new(rotation_deg, gear_teeth, DEFAULT_GEAR_MODULE)
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn gear_teeth(&self) -> u32 {
        self.gear_teeth
    }

    pub fn gear_module(&self) -> f64 {
        self.gear_module
    }

    /// PCD = module x teeth. Used for follow-focus motor compatibility.
    pub fn pitch_circle_diameter_mm(&self) -> f64 {
        self.gear_module * self.gear_teeth as f64
    }

    /// Angular resolution of the ring.
    pub fn degrees_per_tooth(&self) -> f64 {
        self.rotation_deg / self.gear_teeth as f64
    }
}

/// Entrance pupil position as a rational (1,1) function of focus distance.
///
/// `offset_mm(f) = (a0 + a1*f) / (1 + b1*f)` with `f = max(0.3, focus_m)`.
/// Coefficients come from an offline fit against manufacturer data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PupilShiftFit {
    pub a0: f64,
    pub a1: f64,
    pub b1: f64,
    pub r_squared: f64,
}

impl PupilShiftFit {
    pub fn new(a0: f64, a1: f64, b1: f64, r_squared: f64) -> Self {
        Self {
            a0,
            a1,
            b1,
            r_squared,
        }
    }

    /// Entrance pupil offset in mm at the given focus distance.
    pub fn evaluate(&self, focus_m: f64) -> f64 {
        let f = focus_m.max(PUPIL_FIT_MIN_FOCUS_M);
        let denom = 1.0 + self.b1 * f;
        if denom.abs() < 1e-8 {
            return self.a0;
        }
        (self.a0 + self.a1 * f) / denom
    }
}

/// Physical dimensions and mechanics of a cinema lens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanicalSpec {
    weight_kg: f64,
    length_mm: f64,
    front_diameter_mm: f64,
    /// e.g. "M105x0.75"
    filter_thread: String,
    focus_ring: GearRingSpec,
    iris_ring: GearRingSpec,
    /// Sensor plane to nodal point.
    entrance_pupil_offset_mm: f64,
    pupil_shift: Option<PupilShiftFit>,
}

impl MechanicalSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weight_kg: f64,
        length_mm: f64,
        front_diameter_mm: f64,
        filter_thread: impl Into<String>,
        focus_ring: GearRingSpec,
        iris_ring: GearRingSpec,
        entrance_pupil_offset_mm: f64,
    ) -> ModelResult<Self> {
        ensure_positive("weight_kg", weight_kg, "kg")?;
        ensure_positive("length_mm", length_mm, "mm")?;
        ensure_positive("front_diameter_mm", front_diameter_mm, "mm")?;
        ensure_non_negative("entrance_pupil_offset_mm", entrance_pupil_offset_mm, "mm")?;
        Ok(Self {
            weight_kg,
            length_mm,
            front_diameter_mm,
            filter_thread: filter_thread.into(),
            focus_ring,
            iris_ring,
            entrance_pupil_offset_mm,
            pupil_shift: None,
        })
    }

    /// Attach a focus-dependent entrance pupil fit.
    pub fn with_pupil_shift(mut self, fit: PupilShiftFit) -> Self {
        self.pupil_shift = Some(fit);
        self
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn weight_lbs(&self) -> f64 {
        self.weight_kg * KG_TO_LBS
    }

    pub fn length_mm(&self) -> f64 {
        self.length_mm
    }

    pub fn front_diameter_mm(&self) -> f64 {
        self.front_diameter_mm
    }

    pub fn filter_thread(&self) -> &str {
        &self.filter_thread
    }

    pub fn focus_ring(&self) -> &GearRingSpec {
        &self.focus_ring
    }

    pub fn iris_ring(&self) -> &GearRingSpec {
        &self.iris_ring
    }

    pub fn entrance_pupil_offset_mm(&self) -> f64 {
        self.entrance_pupil_offset_mm
    }

    /// Scene units are centimeters.
    pub fn entrance_pupil_offset_cm(&self) -> f64 {
        self.entrance_pupil_offset_mm / 10.0
    }

    pub fn pupil_shift(&self) -> Option<&PupilShiftFit> {
        self.pupil_shift.as_ref()
    }

    /// Entrance pupil offset at a focus distance, using the fit when present.
    pub fn entrance_pupil_offset_at(&self, focus_m: f64) -> f64 {
        match &self.pupil_shift {
            Some(fit) => fit.evaluate(focus_m),
            None => self.entrance_pupil_offset_mm,
        }
    }
}
