//! Flattened, typed key/value views of states and results.
//!
//! Scene-authoring layers consume these as namespaced attributes, e.g.
//! `cinema:lens:focalLengthMm`. Insertion order is preserved.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::camera::CameraState;
use crate::lens_state::LensState;
use crate::results::{BiomechanicsParams, OpticalResult};

pub const CAMERA_PREFIX: &str = "cinema:camera";
pub const LENS_PREFIX: &str = "cinema:lens";
pub const OPTICS_PREFIX: &str = "cinema:optics";
pub const BIOMECH_PREFIX: &str = "cinema:biomech";

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl AttributeValue {
    /// Type name as used by scene description attribute authoring.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Float(_) => "Float",
            Self::Int(_) => "Int",
            Self::Bool(_) => "Bool",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// Ordered set of attributes sharing a namespace prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet {
    prefix: &'static str,
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeSet {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            entries: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Add `name` under the set prefix. Names may contain further `:` segments.
    pub fn insert(&mut self, name: &str, value: impl Into<AttributeValue>) {
        let key = format!("{}:{}", self.prefix, name);
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up by full key, e.g. `cinema:lens:tStop`.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Types that can be flattened into an [`AttributeSet`].
pub trait ToAttributes {
    fn to_attributes(&self) -> AttributeSet;
}

impl ToAttributes for CameraState {
    fn to_attributes(&self) -> AttributeSet {
        AttributeSet::new(CAMERA_PREFIX)
            .with("model", self.model())
            .with("sensorWidthMm", self.sensor().width_mm())
            .with("sensorHeightMm", self.sensor().height_mm())
            .with("exposureIndex", self.exposure_index())
            .with("shutterAngleDeg", self.shutter_angle_deg())
            .with("colorScience", self.sensor().color_science())
            .with("resolutionX", self.format().width_px())
            .with("resolutionY", self.format().height_px())
    }
}

impl ToAttributes for LensState {
    fn to_attributes(&self) -> AttributeSet {
        let spec = self.spec();
        let d = spec.distortion();
        let mut set = AttributeSet::new(LENS_PREFIX)
            .with("manufacturer", spec.manufacturer())
            .with("series", spec.series())
            .with("focalLengthMm", spec.focal_length_mm())
            .with("squeezeRatioNominal", spec.squeeze_ratio())
            .with("squeezeRatioEffective", self.effective_squeeze())
            .with("tStop", self.t_stop())
            .with("focusDistanceM", self.focus_distance_m())
            .with("irisBlades", spec.iris_blades())
            .with("distortion:k1", d.k1())
            .with("distortion:k2", d.k2())
            .with("distortion:k3", d.k3())
            .with("distortion:p1", d.p1())
            .with("distortion:p2", d.p2())
            .with("distortion:sqUniformity", d.squeeze_uniformity());

        if let Some(m) = spec.mechanics() {
            set.insert("weightKg", m.weight_kg());
            set.insert("lengthMm", m.length_mm());
            set.insert("frontDiameterMm", m.front_diameter_mm());
            set.insert("entrancePupilOffsetMm", self.entrance_pupil_offset_mm());
            set.insert("focusRingRotationDeg", m.focus_ring().rotation_deg());
            set.insert("irisRingRotationDeg", m.iris_ring().rotation_deg());
        }
        set
    }
}

impl ToAttributes for OpticalResult {
    fn to_attributes(&self) -> AttributeSet {
        AttributeSet::new(OPTICS_PREFIX)
            .with("hfovDeg", self.hfov_deg)
            .with("vfovDeg", self.vfov_deg)
            .with("dofNearM", self.dof_near_m)
            .with("dofFarM", self.dof_far_m)
            .with("hyperfocalM", self.hyperfocal_m)
            .with("cocMm", self.coc_mm)
    }
}

impl ToAttributes for BiomechanicsParams {
    fn to_attributes(&self) -> AttributeSet {
        AttributeSet::new(BIOMECH_PREFIX)
            .with("springConstant", self.spring_constant)
            .with("dampingRatio", self.damping_ratio)
            .with("lagFrames", self.lag_frames)
            .with("handheldAmplitudeDeg", self.handheld_amplitude_deg)
            .with("handheldFrequencyHz", self.handheld_frequency_hz)
            .with("momentOfInertia", self.moment_of_inertia)
            .with("combinedWeightKg", self.combined_weight_kg)
    }
}
