//! Static lens specification.
//!
//! A [`LensSpec`] is built once per lens through [`LensSpecBuilder`] and then
//! shared read-only across frames. Mechanical data and the squeeze-breathing
//! curve are optional so that older lens descriptions without them still load.

use serde::Serialize;

use crate::breathing::{BreathingCurve, SqueezeBreathingCurve};
use crate::distortion::DistortionModel;
use crate::error::{ModelError, ModelResult};
use crate::mechanics::MechanicalSpec;
use crate::validate::{ensure_non_negative, ensure_positive};

/// Image circle assumed when a description does not give one (Super 35).
pub const DEFAULT_IMAGE_CIRCLE_MM: f64 = 31.1;

/// Squeeze ratios above this count as anamorphic.
const ANAMORPHIC_THRESHOLD: f64 = 1.01;

/// Complete lens specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensSpec {
    lens_id: String,
    manufacturer: String,
    series: String,
    focal_length_mm: f64,
    t_stop_min: f64,
    t_stop_max: f64,
    iris_blades: u32,
    close_focus_m: f64,
    image_circle_mm: f64,
    /// Nominal squeeze (1.0 spherical, 2.0 anamorphic)
    squeeze_ratio: f64,
    distortion: DistortionModel,
    breathing: BreathingCurve,
    lateral_ca_px_per_mm: f64,
    longitudinal_ca_stops: f64,

    // Scalar physical fields kept for older consumers; back-filled from mechanics.
    weight_kg: f64,
    length_mm: f64,
    front_diameter_mm: f64,

    mechanics: Option<MechanicalSpec>,
    squeeze_breathing: Option<SqueezeBreathingCurve>,
}

impl LensSpec {
    /// Start building a lens with its identity, focal length and T-stop range.
    pub fn builder(
        lens_id: impl Into<String>,
        manufacturer: impl Into<String>,
        series: impl Into<String>,
        focal_length_mm: f64,
        t_stop_range: (f64, f64),
    ) -> LensSpecBuilder {
        LensSpecBuilder::new(lens_id, manufacturer, series, focal_length_mm, t_stop_range)
    }

    pub fn lens_id(&self) -> &str {
        &self.lens_id
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn focal_length_mm(&self) -> f64 {
        self.focal_length_mm
    }

    pub fn t_stop_min(&self) -> f64 {
        self.t_stop_min
    }

    pub fn t_stop_max(&self) -> f64 {
        self.t_stop_max
    }

    pub fn iris_blades(&self) -> u32 {
        self.iris_blades
    }

    /// Minimum object distance in meters.
    pub fn close_focus_m(&self) -> f64 {
        self.close_focus_m
    }

    pub fn image_circle_mm(&self) -> f64 {
        self.image_circle_mm
    }

    pub fn squeeze_ratio(&self) -> f64 {
        self.squeeze_ratio
    }

    pub fn distortion(&self) -> &DistortionModel {
        &self.distortion
    }

    pub fn breathing(&self) -> &BreathingCurve {
        &self.breathing
    }

    pub fn lateral_ca_px_per_mm(&self) -> f64 {
        self.lateral_ca_px_per_mm
    }

    pub fn longitudinal_ca_stops(&self) -> f64 {
        self.longitudinal_ca_stops
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn length_mm(&self) -> f64 {
        self.length_mm
    }

    pub fn front_diameter_mm(&self) -> f64 {
        self.front_diameter_mm
    }

    pub fn mechanics(&self) -> Option<&MechanicalSpec> {
        self.mechanics.as_ref()
    }

    pub fn squeeze_breathing(&self) -> Option<&SqueezeBreathingCurve> {
        self.squeeze_breathing.as_ref()
    }

    pub fn is_anamorphic(&self) -> bool {
        self.squeeze_ratio > ANAMORPHIC_THRESHOLD
    }

    pub fn has_mechanics(&self) -> bool {
        self.mechanics.is_some()
    }

    /// Entrance pupil offset from the sensor plane, 0 without mechanical data.
    pub fn entrance_pupil_offset_mm(&self) -> f64 {
        self.mechanics
            .as_ref()
            .map(MechanicalSpec::entrance_pupil_offset_mm)
            .unwrap_or(0.0)
    }

    /// Squeeze at the given focus distance; nominal ratio without a curve.
    pub fn effective_squeeze(&self, focus_distance_m: f64) -> f64 {
        match &self.squeeze_breathing {
            Some(curve) => curve.evaluate(focus_distance_m),
            None => self.squeeze_ratio,
        }
    }
}

/// Builder for [`LensSpec`]; all invariants are checked in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct LensSpecBuilder {
    lens_id: String,
    manufacturer: String,
    series: String,
    focal_length_mm: f64,
    t_stop_min: f64,
    t_stop_max: f64,
    iris_blades: u32,
    close_focus_m: f64,
    image_circle_mm: f64,
    squeeze_ratio: f64,
    distortion: DistortionModel,
    breathing: BreathingCurve,
    lateral_ca_px_per_mm: f64,
    longitudinal_ca_stops: f64,
    weight_kg: f64,
    length_mm: f64,
    front_diameter_mm: f64,
    mechanics: Option<MechanicalSpec>,
    squeeze_breathing: Option<SqueezeBreathingCurve>,
}

impl LensSpecBuilder {
    pub fn new(
        lens_id: impl Into<String>,
        manufacturer: impl Into<String>,
        series: impl Into<String>,
        focal_length_mm: f64,
        (t_stop_min, t_stop_max): (f64, f64),
    ) -> Self {
        Self {
            lens_id: lens_id.into(),
            manufacturer: manufacturer.into(),
            series: series.into(),
            focal_length_mm,
            t_stop_min,
            t_stop_max,
            iris_blades: 9,
            close_focus_m: 0.0,
            image_circle_mm: DEFAULT_IMAGE_CIRCLE_MM,
            squeeze_ratio: 1.0,
            distortion: DistortionModel::default(),
            breathing: BreathingCurve::none(),
            lateral_ca_px_per_mm: 0.0,
            longitudinal_ca_stops: 0.0,
            weight_kg: 0.0,
            length_mm: 0.0,
            front_diameter_mm: 0.0,
            mechanics: None,
            squeeze_breathing: None,
        }
    }

    pub fn iris_blades(mut self, blades: u32) -> Self {
        self.iris_blades = blades;
        self
    }

    pub fn close_focus_m(mut self, close_focus_m: f64) -> Self {
        self.close_focus_m = close_focus_m;
        self
    }

    pub fn image_circle_mm(mut self, image_circle_mm: f64) -> Self {
        self.image_circle_mm = image_circle_mm;
        self
    }

    pub fn squeeze_ratio(mut self, squeeze_ratio: f64) -> Self {
        self.squeeze_ratio = squeeze_ratio;
        self
    }

    pub fn distortion(mut self, distortion: DistortionModel) -> Self {
        self.distortion = distortion;
        self
    }

    pub fn breathing(mut self, breathing: BreathingCurve) -> Self {
        self.breathing = breathing;
        self
    }

    pub fn chromatic_aberration(mut self, lateral_px_per_mm: f64, longitudinal_stops: f64) -> Self {
        self.lateral_ca_px_per_mm = lateral_px_per_mm;
        self.longitudinal_ca_stops = longitudinal_stops;
        self
    }

    /// Scalar physical data for lenses described without [`MechanicalSpec`].
    pub fn legacy_physical(mut self, weight_kg: f64, length_mm: f64, front_diameter_mm: f64) -> Self {
        self.weight_kg = weight_kg;
        self.length_mm = length_mm;
        self.front_diameter_mm = front_diameter_mm;
        self
    }

    pub fn mechanics(mut self, mechanics: MechanicalSpec) -> Self {
        self.mechanics = Some(mechanics);
        self
    }

    pub fn squeeze_breathing(mut self, curve: SqueezeBreathingCurve) -> Self {
        self.squeeze_breathing = Some(curve);
        self
    }

    /// Validate and produce the spec.
    pub fn build(self) -> ModelResult<LensSpec> {
        ensure_positive("focal_length_mm", self.focal_length_mm, "mm")?;
        if !(self.t_stop_min > 0.0 && self.t_stop_max > self.t_stop_min) {
            return Err(ModelError::validation(
                "t_stop_range",
                format!(
                    "expected 0 < min < max, got {}-{}",
                    self.t_stop_min, self.t_stop_max
                ),
            ));
        }
        if !(self.squeeze_ratio >= 1.0) {
            return Err(ModelError::validation(
                "squeeze_ratio",
                format!("must be >= 1.0, got {}", self.squeeze_ratio),
            ));
        }
        ensure_non_negative("close_focus_m", self.close_focus_m, "m")?;
        ensure_non_negative("weight_kg", self.weight_kg, "kg")?;

        let (weight_kg, length_mm, front_diameter_mm) = match &self.mechanics {
            Some(mech) if self.weight_kg == 0.0 => (
                mech.weight_kg(),
                mech.length_mm(),
                mech.front_diameter_mm(),
            ),
            _ => (self.weight_kg, self.length_mm, self.front_diameter_mm),
        };

        Ok(LensSpec {
            lens_id: self.lens_id,
            manufacturer: self.manufacturer,
            series: self.series,
            focal_length_mm: self.focal_length_mm,
            t_stop_min: self.t_stop_min,
            t_stop_max: self.t_stop_max,
            iris_blades: self.iris_blades,
            close_focus_m: self.close_focus_m,
            image_circle_mm: self.image_circle_mm,
            squeeze_ratio: self.squeeze_ratio,
            distortion: self.distortion,
            breathing: self.breathing,
            lateral_ca_px_per_mm: self.lateral_ca_px_per_mm,
            longitudinal_ca_stops: self.longitudinal_ca_stops,
            weight_kg,
            length_mm,
            front_diameter_mm,
            mechanics: self.mechanics,
            squeeze_breathing: self.squeeze_breathing,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::breathing::INFINITY_FOCUS_M;
    use crate::mechanics::GearRingSpec;

    pub(crate) fn cooke_mechanics() -> MechanicalSpec {
        MechanicalSpec::new(
            3.6,
            205.0,
            110.0,
            "M105x0.75",
            GearRingSpec::new(300.0, 140, 0.8).unwrap(),
            GearRingSpec::new(90.0, 134, 0.8).unwrap(),
            125.0,
        )
        .unwrap()
    }

    pub(crate) fn cooke_50mm() -> LensSpec {
        LensSpec::builder("cooke_ana_i_s35_50mm", "Cooke", "Anamorphic/i S35", 50.0, (2.3, 22.0))
            .iris_blades(11)
            .close_focus_m(0.85)
            .squeeze_ratio(2.0)
            .distortion(DistortionModel::new(-0.015, 0.002, 0.0, 0.0, 0.0, 0.94).unwrap())
            .breathing(
                BreathingCurve::new(vec![(0.85, 3.2), (2.0, 1.1), (INFINITY_FOCUS_M, 0.0)])
                    .unwrap(),
            )
            .mechanics(cooke_mechanics())
            .squeeze_breathing(
                SqueezeBreathingCurve::new(
                    vec![
                        (0.85, 1.85),
                        (1.5, 1.92),
                        (3.0, 1.97),
                        (10.0, 1.99),
                        (INFINITY_FOCUS_M, 2.0),
                    ],
                    2.0,
                )
                .unwrap(),
            )
            .build()
            .unwrap()
    }

    pub(crate) fn spherical_50mm() -> LensSpec {
        LensSpec::builder("test_spherical_50mm", "Test", "Spherical", 50.0, (1.4, 22.0))
            .close_focus_m(0.45)
            .image_circle_mm(43.3)
            .distortion(DistortionModel::radial(-0.01, 0.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_anamorphic_with_mechanics() {
        let spec = cooke_50mm();
        assert!(spec.is_anamorphic());
        assert!(spec.has_mechanics());
        assert_eq!(spec.entrance_pupil_offset_mm(), 125.0);
        assert_eq!(spec.effective_squeeze(0.85), 1.85);
        assert_eq!(spec.effective_squeeze(INFINITY_FOCUS_M), 2.0);
    }

    #[test]
    fn test_legacy_weight_backfilled_from_mechanics() {
        let spec = cooke_50mm();
        assert_eq!(spec.weight_kg(), 3.6);
        assert_eq!(spec.length_mm(), 205.0);
        assert_eq!(spec.front_diameter_mm(), 110.0);
    }

    #[test]
    fn test_explicit_legacy_weight_is_kept() {
        let spec = LensSpec::builder("l", "m", "s", 50.0, (2.0, 16.0))
            .legacy_physical(2.5, 180.0, 95.0)
            .mechanics(cooke_mechanics())
            .build()
            .unwrap();
        assert_eq!(spec.weight_kg(), 2.5);
        assert_eq!(spec.length_mm(), 180.0);
    }

    #[test]
    fn test_spherical_without_mechanics() {
        let spec = spherical_50mm();
        assert!(!spec.is_anamorphic());
        assert!(!spec.has_mechanics());
        assert!(spec.squeeze_breathing().is_none());
        assert_eq!(spec.entrance_pupil_offset_mm(), 0.0);
        assert_eq!(spec.weight_kg(), 0.0);
        for focus in [0.45, 1.0, 5.0, INFINITY_FOCUS_M] {
            assert_eq!(spec.effective_squeeze(focus), 1.0);
        }
    }

    #[test]
    fn test_invalid_focal_length() {
        let err = LensSpec::builder("l", "m", "s", 0.0, (2.0, 16.0))
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("focal_length_mm"));
    }

    #[test]
    fn test_invalid_t_stop_range() {
        for range in [(0.0, 16.0), (4.0, 4.0), (8.0, 2.0), (-1.0, 2.0)] {
            let err = LensSpec::builder("l", "m", "s", 50.0, range)
                .build()
                .unwrap_err();
            assert_eq!(err.field(), Some("t_stop_range"));
        }
    }

    #[test]
    fn test_invalid_squeeze_ratio() {
        let err = LensSpec::builder("l", "m", "s", 50.0, (2.0, 16.0))
            .squeeze_ratio(0.9)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("squeeze_ratio"));
    }

    #[test]
    fn test_slight_squeeze_is_not_anamorphic() {
        let spec = LensSpec::builder("l", "m", "s", 50.0, (2.0, 16.0))
            .squeeze_ratio(1.01)
            .build()
            .unwrap();
        assert!(!spec.is_anamorphic());
    }
}
