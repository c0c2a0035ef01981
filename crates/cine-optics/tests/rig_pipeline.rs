//! End-to-end: descriptor file -> registry -> optics and biomechanics.

use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use cine_models::{AttributeValue, LensState, ToAttributes};
use cine_optics::bodies::ALEXA_35_ID;
use cine_optics::lenses::COOKE_ANAMORPHIC_ID;
use cine_optics::{
    compute_optics, derive_biomechanics, evaluate_sequence, BiomechanicsCalibration,
    BiomechanicsConfig, FocusPull, RigError, RigRegistry,
};
use tempfile::TempDir;

const COOKE_V4: &str = r#"{
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
        "focus_ring": {"rotation_deg": 300.0, "gear_teeth": 140, "gear_module": 0.8},
        "iris_ring": {"rotation_deg": 90.0, "gear_teeth": 134, "gear_module": 0.8},
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

const COOKE_V3: &str = r#"{
    "lens_id": "cooke_ana_i_s35_75mm",
    "manufacturer": "Cooke",
    "series": "Anamorphic/i S35",
    "focal_length_mm": 75.0,
    "t_stop_range": [2.3, 22.0],
    "iris_blades": 11,
    "close_focus_m": 1.0,
    "squeeze_ratio": 2.0,
    "breathing": []
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_light_anamorphic_rig_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cooke_50.json", COOKE_V4);

    let registry = RigRegistry::with_builtin();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let spec = std::sync::Arc::new(registry.lens(COOKE_ANAMORPHIC_ID, &path).unwrap());
    let lens = LensState::new(spec, 2.8, 2.0).unwrap();

    let optics = compute_optics(&camera, &lens);
    let coc = camera.sensor().diagonal_mm() / 1500.0;
    assert_relative_eq!(optics.coc_mm, coc, epsilon = 1e-12);
    assert!(optics.dof_near_m < 2.0 && optics.dof_far_m > 2.0);
    assert!(optics.hfov_deg > optics.vfov_deg);

    let bio = derive_biomechanics(&camera, &lens, &BiomechanicsConfig::default());
    assert_relative_eq!(bio.combined_weight_kg, 7.5, epsilon = 1e-12);
    assert_relative_eq!(bio.spring_constant, 15.25, epsilon = 1e-12);

    let attrs = lens.to_attributes();
    assert_eq!(
        attrs.get("cinema:lens:squeezeRatioNominal"),
        Some(&AttributeValue::Float(2.0))
    );
    assert!(attrs.get("cinema:lens:focusRingRotationDeg").is_some());
}

#[test]
fn test_v3_descriptor_without_mechanics() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cooke_75.json", COOKE_V3);

    let registry = RigRegistry::with_builtin();
    let spec = registry.lens(COOKE_ANAMORPHIC_ID, &path).unwrap();
    assert!(!spec.has_mechanics());
    assert_eq!(spec.effective_squeeze(1.0), 2.0);
    assert_eq!(spec.effective_squeeze(100.0), 2.0);

    let lens = LensState::new(std::sync::Arc::new(spec), 4.0, 3.0).unwrap();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let bio = derive_biomechanics(&camera, &lens, &BiomechanicsConfig::default());
    assert_relative_eq!(bio.combined_weight_kg, 3.9);
    assert!(lens.to_attributes().get("cinema:lens:weightKg").is_none());
}

#[test]
fn test_focus_at_hyperfocal_has_unbounded_far_limit() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cooke_50.json", COOKE_V4);

    let registry = RigRegistry::with_builtin();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let spec = std::sync::Arc::new(registry.lens(COOKE_ANAMORPHIC_ID, &path).unwrap());

    let probe = LensState::new(spec.clone(), 16.0, 2.0).unwrap();
    let hyperfocal = compute_optics(&camera, &probe).hyperfocal_m;

    let lens = LensState::new(spec, 16.0, hyperfocal * 1.5).unwrap();
    let optics = compute_optics(&camera, &lens);
    assert!(optics.dof_far_m.is_infinite());

    let json = serde_json::to_value(optics).unwrap();
    assert!(json["dof_far_m"].is_null());
}

#[test]
fn test_calibrated_biomechanics_from_file() {
    let dir = TempDir::new().unwrap();
    let lens_path = write(&dir, "cooke_50.json", COOKE_V4);
    let cal_path = write(
        &dir,
        "biomechanics_calibration.json",
        r#"{
            "method": "ode_exact",
            "spring_k_fit": {"coefficients": {"a0": 20.0, "a1": -0.002}, "r_squared": 0.98},
            "damping_ratio_fit": {"coefficients": {"a0": 0.5, "a1": 0.00005}, "r_squared": 0.96}
        }"#,
    );

    let registry = RigRegistry::with_builtin();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let spec = std::sync::Arc::new(registry.lens(COOKE_ANAMORPHIC_ID, &lens_path).unwrap());
    let lens = LensState::new(spec, 2.8, 2.0).unwrap();

    let calibration = BiomechanicsCalibration::from_path(&cal_path).unwrap();
    let config = BiomechanicsConfig::default().with_calibration(calibration);
    let bio = derive_biomechanics(&camera, &lens, &config);

    let inertia = 7.5 * 18.25 * 18.25;
    assert_relative_eq!(bio.moment_of_inertia, inertia, epsilon = 1e-9);
    assert_relative_eq!(bio.spring_constant, 20.0 - 0.002 * inertia, epsilon = 1e-9);
    assert_relative_eq!(bio.damping_ratio, 0.5 + 0.00005 * inertia, epsilon = 1e-9);
}

#[test]
fn test_focus_pull_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cooke_50.json", COOKE_V4);

    let registry = RigRegistry::with_builtin();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let spec = std::sync::Arc::new(registry.lens(COOKE_ANAMORPHIC_ID, &path).unwrap());

    let pull = FocusPull::new(3.0, 0.85, 48).unwrap();
    let frames = evaluate_sequence(&camera, &spec, 2.8, &pull).unwrap();
    assert_eq!(frames.len(), 48);
    assert_relative_eq!(frames[0].effective_squeeze, 1.97, epsilon = 1e-12);
    assert_eq!(frames[47].effective_squeeze, 1.85);
    assert_relative_eq!(frames[47].breathing_shift_pct, 3.2);
}

#[test]
fn test_invalid_states_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cooke_50.json", COOKE_V4);
    let registry = RigRegistry::with_builtin();
    let spec = std::sync::Arc::new(registry.lens(COOKE_ANAMORPHIC_ID, &path).unwrap());

    assert!(LensState::new(spec.clone(), 2.0, 2.0).is_err());
    assert!(LensState::new(spec.clone(), 2.8, 0.5).is_err());

    let pull = FocusPull::new(1.0, 0.5, 4).unwrap();
    let camera = registry.body(ALEXA_35_ID).unwrap();
    let err = evaluate_sequence(&camera, &spec, 2.8, &pull).unwrap_err();
    assert!(matches!(err, RigError::Model(_)));
}
