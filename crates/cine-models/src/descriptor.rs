//! JSON lens descriptors.
//!
//! A descriptor is the on-disk description of one lens. Older descriptors
//! without `mechanics` or `squeeze_breathing` sections still load; the
//! resulting spec simply reports no mechanical data and nominal squeeze.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::breathing::{BreathingCurve, SqueezeBreathingCurve, INFINITY_FOCUS_M};
use crate::distortion::DistortionModel;
use crate::error::{ModelError, ModelResult};
use crate::lens::{LensSpec, DEFAULT_IMAGE_CIRCLE_MM};
use crate::mechanics::{GearRingSpec, MechanicalSpec, PupilShiftFit, DEFAULT_GEAR_MODULE};

/// Focus distance in meters, a numeric string, or the literal `"infinity"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FocusDistance {
    Meters(f64),
    Keyword(String),
}

impl FocusDistance {
    /// Resolve to meters; `"infinity"` (any case) maps to [`INFINITY_FOCUS_M`].
    pub fn to_meters(&self) -> ModelResult<f64> {
        match self {
            Self::Meters(m) => Ok(*m),
            Self::Keyword(k) if k.trim().eq_ignore_ascii_case("infinity") => Ok(INFINITY_FOCUS_M),
            Self::Keyword(k) => k
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|m| m.is_finite())
                .ok_or_else(|| ModelError::descriptor(format!("unknown focus distance '{}'", k))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BreathingPoint {
    pub focus_m: FocusDistance,
    pub fov_shift_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SqueezePoint {
    pub focus_m: FocusDistance,
    pub effective_squeeze: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DistortionDescriptor {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub p1: f64,
    pub p2: f64,
    pub squeeze_uniformity: f64,
}

impl Default for DistortionDescriptor {
    fn default() -> Self {
        Self {
            k1: 0.0,
            k2: 0.0,
            k3: 0.0,
            p1: 0.0,
            p2: 0.0,
            squeeze_uniformity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChromaticAberrationDescriptor {
    pub lateral_ca_px_per_mm: f64,
    pub longitudinal_ca_stops: f64,
}

/// Gear ring section; missing fields fall back to the ring's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GearRingDescriptor {
    pub rotation_deg: Option<f64>,
    pub gear_teeth: Option<u32>,
    pub gear_module: Option<f64>,
}

impl GearRingDescriptor {
    fn to_ring(&self, default_rotation: f64, default_teeth: u32) -> ModelResult<GearRingSpec> {
        GearRingSpec::new(
            self.rotation_deg.unwrap_or(default_rotation),
            self.gear_teeth.unwrap_or(default_teeth),
            self.gear_module.unwrap_or(DEFAULT_GEAR_MODULE),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PupilShiftCoefficients {
    pub a0: f64,
    pub a1: f64,
    pub b1: f64,
}

/// Offline-fitted entrance pupil shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PupilShiftFitDescriptor {
    pub coefficients: PupilShiftCoefficients,
    #[serde(default)]
    pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MechanicsDescriptor {
    pub weight_kg: f64,
    pub length_mm: f64,
    pub front_diameter_mm: f64,
    #[serde(default)]
    pub filter_thread: String,
    #[serde(default)]
    pub focus_ring: GearRingDescriptor,
    #[serde(default)]
    pub iris_ring: GearRingDescriptor,
    #[serde(default)]
    pub entrance_pupil_offset_mm: f64,
    #[serde(default)]
    pub entrance_pupil_shift_fit: Option<PupilShiftFitDescriptor>,
}

impl MechanicsDescriptor {
    fn to_spec(&self) -> ModelResult<MechanicalSpec> {
        let spec = MechanicalSpec::new(
            self.weight_kg,
            self.length_mm,
            self.front_diameter_mm,
            self.filter_thread.clone(),
            self.focus_ring.to_ring(300.0, 140)?,
            self.iris_ring.to_ring(90.0, 134)?,
            self.entrance_pupil_offset_mm,
        )?;
        Ok(match &self.entrance_pupil_shift_fit {
            Some(fit) => spec.with_pupil_shift(PupilShiftFit::new(
                fit.coefficients.a0,
                fit.coefficients.a1,
                fit.coefficients.b1,
                fit.r_squared,
            )),
            None => spec,
        })
    }
}

/// `null` and `{}` both mean the lens has no mechanical data.
fn empty_mechanics_as_none<'de, D>(
    deserializer: D,
) -> Result<Option<MechanicsDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn default_image_circle() -> f64 {
    DEFAULT_IMAGE_CIRCLE_MM
}

/// Complete lens descriptor as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LensDescriptor {
    pub lens_id: String,
    pub manufacturer: String,
    pub series: String,
    pub focal_length_mm: f64,
    /// `[min, max]`
    pub t_stop_range: [f64; 2],
    pub iris_blades: u32,
    pub close_focus_m: f64,
    #[serde(default = "default_image_circle")]
    pub image_circle_mm: f64,
    pub squeeze_ratio: f64,
    #[serde(default)]
    pub distortion: DistortionDescriptor,
    #[serde(default)]
    pub breathing: Vec<BreathingPoint>,
    #[serde(default)]
    pub chromatic_aberration: ChromaticAberrationDescriptor,
    #[serde(default, deserialize_with = "empty_mechanics_as_none")]
    pub mechanics: Option<MechanicsDescriptor>,
    /// Nominal squeeze of this curve is `squeeze_ratio`.
    #[serde(default)]
    pub squeeze_breathing: Option<Vec<SqueezePoint>>,
}

impl LensDescriptor {
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON schema of the descriptor format.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(LensDescriptor)
    }

    /// Validate and convert into a [`LensSpec`].
    pub fn to_spec(&self) -> ModelResult<LensSpec> {
        let breathing = self
            .breathing
            .iter()
            .map(|p| Ok((p.focus_m.to_meters()?, p.fov_shift_pct)))
            .collect::<ModelResult<Vec<_>>>()?;

        let d = &self.distortion;
        let distortion =
            DistortionModel::new(d.k1, d.k2, d.k3, d.p1, d.p2, d.squeeze_uniformity)?;

        let [t_stop_min, t_stop_max] = self.t_stop_range;
        let mut builder = LensSpec::builder(
            self.lens_id.clone(),
            self.manufacturer.clone(),
            self.series.clone(),
            self.focal_length_mm,
            (t_stop_min, t_stop_max),
        )
        .iris_blades(self.iris_blades)
        .close_focus_m(self.close_focus_m)
        .image_circle_mm(self.image_circle_mm)
        .squeeze_ratio(self.squeeze_ratio)
        .distortion(distortion)
        .breathing(BreathingCurve::new(breathing)?)
        .chromatic_aberration(
            self.chromatic_aberration.lateral_ca_px_per_mm,
            self.chromatic_aberration.longitudinal_ca_stops,
        );

        if let Some(mech) = &self.mechanics {
            builder = builder.mechanics(mech.to_spec()?);
        }

        // An empty list carries no data and is treated like a missing section.
        if let Some(points) = self.squeeze_breathing.as_ref().filter(|p| !p.is_empty()) {
            let points = points
                .iter()
                .map(|p| Ok((p.focus_m.to_meters()?, p.effective_squeeze)))
                .collect::<ModelResult<Vec<_>>>()?;
            builder = builder.squeeze_breathing(SqueezeBreathingCurve::new(
                points,
                self.squeeze_ratio,
            )?);
        }

        builder.build()
    }
}

/// Read a descriptor file and build its spec.
pub fn load_lens_spec(path: impl AsRef<Path>) -> ModelResult<LensSpec> {
    LensDescriptor::from_path(path)?.to_spec()
}
