//! Optics engine: circle of confusion, field of view, hyperfocal distance
//! and depth of field.
//!
//! All functions are pure. Inputs are expected to come from validated states,
//! so degenerate values degrade (zero DOF, unbounded far limit) instead of
//! failing.

use cine_models::{CameraState, LensState, OpticalResult};
use tracing::debug;

/// Acceptable blur is the sensor diagonal divided by this.
const COC_DIVISOR: f64 = 1500.0;

/// Circle of confusion in mm for a sensor diagonal.
pub fn circle_of_confusion(sensor_diagonal_mm: f64) -> f64 {
    sensor_diagonal_mm / COC_DIVISOR
}

/// Field of view in degrees across `aperture_mm`, widened by a breathing shift in percent.
///
/// Returns 0 for non-positive focal length or aperture.
pub fn field_of_view(focal_length_mm: f64, aperture_mm: f64, breathing_shift_pct: f64) -> f64 {
    if focal_length_mm <= 0.0 || aperture_mm <= 0.0 {
        return 0.0;
    }
    let base = 2.0 * (aperture_mm / (2.0 * focal_length_mm)).atan().to_degrees();
    base * (1.0 + breathing_shift_pct / 100.0)
}

/// Hyperfocal distance in meters, `H = f^2 / (N c) + f`.
///
/// Unbounded when the f-number or circle of confusion is not positive.
pub fn hyperfocal_distance(focal_length_mm: f64, f_number: f64, coc_mm: f64) -> f64 {
    if f_number <= 0.0 || coc_mm <= 0.0 {
        return f64::INFINITY;
    }
    let h_mm = focal_length_mm.powi(2) / (f_number * coc_mm) + focal_length_mm;
    h_mm / 1000.0
}

/// Near and far depth-of-field limits in meters.
///
/// The far limit is unbounded once focus reaches the hyperfocal distance.
pub fn depth_of_field(
    focal_length_mm: f64,
    f_number: f64,
    focus_distance_m: f64,
    coc_mm: f64,
) -> (f64, f64) {
    if focus_distance_m <= 0.0 {
        return (0.0, 0.0);
    }

    let h = hyperfocal_distance(focal_length_mm, f_number, coc_mm) * 1000.0;
    let s = focus_distance_m * 1000.0;
    let f = focal_length_mm;

    let denom_near = h + s - 2.0 * f;
    let near_m = if denom_near <= 0.0 {
        0.0
    } else {
        s * (h - f) / denom_near / 1000.0
    };

    let denom_far = h - s;
    let far_m = if denom_far <= 0.0 {
        f64::INFINITY
    } else {
        s * (h - f) / denom_far / 1000.0
    };

    (near_m.max(0.0), far_m)
}

/// Evaluate every optical quantity for one frame.
pub fn compute_optics(camera: &CameraState, lens: &LensState) -> OpticalResult {
    let coc_mm = circle_of_confusion(camera.sensor().diagonal_mm());
    let focal = lens.spec().focal_length_mm();
    let breathing = lens.breathing_shift_pct();

    let hfov_deg = field_of_view(focal, camera.active_width_mm(), breathing);
    let vfov_deg = field_of_view(focal, camera.active_height_mm(), breathing);
    let hyperfocal_m = hyperfocal_distance(focal, lens.t_stop(), coc_mm);
    let (dof_near_m, dof_far_m) =
        depth_of_field(focal, lens.t_stop(), lens.focus_distance_m(), coc_mm);

    crate::metrics::record_optics_evaluation(lens.spec().is_anamorphic());
    debug!(
        lens_id = lens.spec().lens_id(),
        t_stop = lens.t_stop(),
        focus_m = lens.focus_distance_m(),
        hfov_deg,
        dof_near_m,
        dof_far_m,
        "Computed optics"
    );

    OpticalResult {
        hfov_deg,
        vfov_deg,
        dof_near_m,
        dof_far_m,
        hyperfocal_m,
        coc_mm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_of_confusion() {
        assert_relative_eq!(circle_of_confusion(43.3), 43.3 / 1500.0);
        assert_eq!(circle_of_confusion(0.0), 0.0);
    }

    #[test]
    fn test_fov_full_frame_50mm() {
        // 36mm wide at 50mm: 2 * atan(0.36) = 39.5978 deg
        assert_relative_eq!(field_of_view(50.0, 36.0, 0.0), 39.597_752_709_4, epsilon = 1e-6);
    }

    #[test]
    fn test_fov_breathing_widens() {
        let base = field_of_view(50.0, 27.99, 0.0);
        assert_relative_eq!(field_of_view(50.0, 27.99, 3.2), base * 1.032, epsilon = 1e-12);
        assert!(field_of_view(50.0, 27.99, -1.0) < base);
    }

    #[test]
    fn test_fov_degenerate_inputs() {
        assert_eq!(field_of_view(0.0, 36.0, 0.0), 0.0);
        assert_eq!(field_of_view(50.0, -1.0, 5.0), 0.0);
    }

    #[test]
    fn test_hyperfocal() {
        let coc = 0.03;
        // 50^2 / (2.8 * 0.03) + 50 = 29811.9mm
        assert_relative_eq!(
            hyperfocal_distance(50.0, 2.8, coc),
            (2500.0 / 0.084 + 50.0) / 1000.0,
            epsilon = 1e-12
        );
        assert!(hyperfocal_distance(50.0, 0.0, coc).is_infinite());
        assert!(hyperfocal_distance(50.0, 2.8, 0.0).is_infinite());
    }

    #[test]
    fn test_dof_brackets_focus() {
        let (near, far) = depth_of_field(50.0, 2.8, 3.0, 0.0226);
        assert!(near > 0.0 && near < 3.0);
        assert!(far > 3.0 && far.is_finite());
    }

    #[test]
    fn test_dof_non_positive_focus() {
        assert_eq!(depth_of_field(50.0, 2.8, 0.0, 0.0226), (0.0, 0.0));
        assert_eq!(depth_of_field(50.0, 2.8, -1.0, 0.0226), (0.0, 0.0));
    }

    #[test]
    fn test_dof_at_or_beyond_hyperfocal_is_unbounded() {
        let h = hyperfocal_distance(35.0, 8.0, 0.0226);
        let (near, far) = depth_of_field(35.0, 8.0, h, 0.0226);
        assert!(far.is_infinite());
        // Near limit at hyperfocal focus is roughly H/2
        assert_relative_eq!(near, h / 2.0, max_relative = 0.01);

        let (_, far) = depth_of_field(35.0, 8.0, h * 4.0, 0.0226);
        assert!(far.is_infinite());
    }

    #[test]
    fn test_dof_unbounded_hyperfocal() {
        let (near, far) = depth_of_field(50.0, 0.0, 2.0, 0.0226);
        assert!(far.is_infinite());
        assert_eq!(near, 0.0);
    }

    #[test]
    fn test_dof_narrows_when_opening_up() {
        let (near_wide, far_wide) = depth_of_field(50.0, 2.0, 3.0, 0.0226);
        let (near_stop, far_stop) = depth_of_field(50.0, 8.0, 3.0, 0.0226);
        assert!(far_wide - near_wide < far_stop - near_stop);
    }
}
