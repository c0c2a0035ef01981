//! Shared fixtures for unit tests.

use std::sync::Arc;

use cine_models::{
    BreathingCurve, CameraState, DistortionModel, GearRingSpec, LensSpec, LensState,
    MechanicalSpec, SqueezeBreathingCurve, INFINITY_FOCUS_M,
};

use crate::bodies::{create_alexa35, DEFAULT_FORMAT};

pub(crate) const COOKE_50MM_JSON: &str = r#"{
    "lens_id": "cooke_ana_i_s35_50mm",
    "manufacturer": "Cooke",
    "series": "Anamorphic/i S35",
    "focal_length_mm": 50.0,
    "t_stop_range": [2.3, 22.0],
    "iris_blades": 11,
    "close_focus_m": 0.85,
    "squeeze_ratio": 2.0,
    "distortion": {"k1": -0.015, "k2": 0.002, "squeeze_uniformity": 0.94},
    "breathing": [
        {"focus_m": 0.85, "fov_shift_pct": 3.2},
        {"focus_m": 2.0, "fov_shift_pct": 1.1},
        {"focus_m": "infinity", "fov_shift_pct": 0.0}
    ],
    "mechanics": {
        "weight_kg": 3.6,
        "length_mm": 205.0,
        "front_diameter_mm": 110.0,
        "filter_thread": "M105x0.75",
        "entrance_pupil_offset_mm": 125.0
    },
    "squeeze_breathing": [
        {"focus_m": 0.85, "effective_squeeze": 1.85},
        {"focus_m": 1.5, "effective_squeeze": 1.92},
        {"focus_m": 3.0, "effective_squeeze": 1.97},
        {"focus_m": 10.0, "effective_squeeze": 1.99},
        {"focus_m": "infinity", "effective_squeeze": 2.0}
    ]
}"#;

pub(crate) fn alexa_35() -> CameraState {
    create_alexa35(DEFAULT_FORMAT, 800, 180.0).unwrap()
}

fn mechanics(weight_kg: f64, length_mm: f64) -> MechanicalSpec {
    MechanicalSpec::new(
        weight_kg,
        length_mm,
        110.0,
        "M105x0.75",
        GearRingSpec::standard(300.0, 140).unwrap(),
        GearRingSpec::standard(90.0, 134).unwrap(),
        125.0,
    )
    .unwrap()
}

pub(crate) fn cooke_50mm_spec() -> Arc<LensSpec> {
    let spec = LensSpec::builder("cooke_ana_i_s35_50mm", "Cooke", "Anamorphic/i S35", 50.0, (2.3, 22.0))
        .iris_blades(11)
        .close_focus_m(0.85)
        .squeeze_ratio(2.0)
        .distortion(DistortionModel::new(-0.015, 0.002, 0.0, 0.0, 0.0, 0.94).unwrap())
        .breathing(
            BreathingCurve::new(vec![(0.85, 3.2), (2.0, 1.1), (INFINITY_FOCUS_M, 0.0)]).unwrap(),
        )
        .mechanics(mechanics(3.6, 205.0))
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
        .unwrap();
    Arc::new(spec)
}

pub(crate) fn cooke_50mm_state() -> LensState {
    LensState::new(cooke_50mm_spec(), 2.8, 2.0).unwrap()
}

/// Spherical lens carrying only the given mechanics.
pub(crate) fn lens_state_with_weight(weight_kg: f64, length_mm: f64) -> LensState {
    let spec = LensSpec::builder("test_weighted", "Test", "Weighted", 100.0, (2.8, 22.0))
        .close_focus_m(1.0)
        .mechanics(mechanics(weight_kg, length_mm))
        .build()
        .unwrap();
    LensState::new(Arc::new(spec), 4.0, 3.0).unwrap()
}

/// Spherical lens without mechanical data.
pub(crate) fn spherical_state() -> LensState {
    let spec = LensSpec::builder("test_spherical_50mm", "Test", "Spherical", 50.0, (1.4, 22.0))
        .close_focus_m(0.45)
        .build()
        .unwrap();
    LensState::new(Arc::new(spec), 2.8, 3.0).unwrap()
}
