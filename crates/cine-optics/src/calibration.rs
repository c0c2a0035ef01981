//! Offline biomechanics calibration.
//!
//! The calibrated model replaces the weight-linear spring and damping formulas
//! with quadratic polynomials in moment of inertia. Coefficients are produced
//! by a batch fit against exact second-order solutions for a set of reference
//! rigs and stored as JSON:
//!
//! ```json
//! {
//!   "method": "ode_exact",
//!   "spring_k_fit": { "coefficients": { "a0": 0.0, "a1": 1.0, "a2": 0.0 }, "r_squared": 0.99 },
//!   "damping_ratio_fit": { "coefficients": { "a0": 0.5 }, "r_squared": 0.97 },
//!   "calibration_points": [ { "weight_kg": 5.0, "arm_cm": 15.0, "settle_s": 0.3, "overshoot_pct": 15.0 } ]
//! }
//! ```

use std::f64::consts::PI;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{RigError, RigResult};

pub const MIN_CALIBRATED_SPRING: f64 = 0.1;
pub const CALIBRATED_DAMPING_RANGE: (f64, f64) = (0.05, 0.95);

/// `a0 + a1*x + a2*x^2`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QuadraticCoefficients {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolynomialFit {
    pub coefficients: QuadraticCoefficients,
    #[serde(default)]
    pub r_squared: f64,
}

impl PolynomialFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        c.a0 + c.a1 * x + c.a2 * x * x
    }

    fn is_finite(&self) -> bool {
        let c = &self.coefficients;
        c.a0.is_finite() && c.a1.is_finite() && c.a2.is_finite()
    }
}

/// Target response of a reference rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalibrationPoint {
    pub weight_kg: f64,
    pub arm_cm: f64,
    /// 2% settling time
    pub settle_s: f64,
    pub overshoot_pct: f64,
}

impl CalibrationPoint {
    pub fn moment_of_inertia(&self) -> f64 {
        self.weight_kg * self.arm_cm * self.arm_cm
    }

    pub fn solve(&self) -> RigResult<SecondOrderSolution> {
        solve_second_order(self.weight_kg, self.arm_cm, self.settle_s, self.overshoot_pct)
    }
}

/// Reference rigs from operator experience, light and snappy to heavy and slow.
pub const REFERENCE_RIGS: [CalibrationPoint; 5] = [
    CalibrationPoint { weight_kg: 5.0, arm_cm: 15.0, settle_s: 0.3, overshoot_pct: 15.0 },
    CalibrationPoint { weight_kg: 7.5, arm_cm: 18.0, settle_s: 0.5, overshoot_pct: 10.0 },
    CalibrationPoint { weight_kg: 10.0, arm_cm: 20.0, settle_s: 0.8, overshoot_pct: 5.0 },
    CalibrationPoint { weight_kg: 13.3, arm_cm: 22.0, settle_s: 1.2, overshoot_pct: 2.0 },
    CalibrationPoint { weight_kg: 20.0, arm_cm: 25.0, settle_s: 1.8, overshoot_pct: 1.0 },
];

/// Fitted spring and damping curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BiomechanicsCalibration {
    #[serde(default)]
    pub method: String,
    pub spring_k_fit: PolynomialFit,
    pub damping_ratio_fit: PolynomialFit,
    #[serde(default)]
    pub calibration_points: Vec<CalibrationPoint>,
}

impl BiomechanicsCalibration {
    pub fn new(spring_k_fit: PolynomialFit, damping_ratio_fit: PolynomialFit) -> RigResult<Self> {
        let calibration = Self {
            method: String::new(),
            spring_k_fit,
            damping_ratio_fit,
            calibration_points: Vec::new(),
        };
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn from_json_str(json: &str) -> RigResult<Self> {
        let calibration: Self = serde_json::from_str(json)?;
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> RigResult<()> {
        if !self.spring_k_fit.is_finite() {
            return Err(RigError::calibration("spring_k_fit has non-finite coefficients"));
        }
        if !self.damping_ratio_fit.is_finite() {
            return Err(RigError::calibration(
                "damping_ratio_fit has non-finite coefficients",
            ));
        }
        Ok(())
    }

    /// Spring constant at a moment of inertia, floored at [`MIN_CALIBRATED_SPRING`].
    pub fn spring_constant(&self, moment_of_inertia: f64) -> f64 {
        self.spring_k_fit
            .evaluate(moment_of_inertia)
            .max(MIN_CALIBRATED_SPRING)
    }

    /// Damping ratio at a moment of inertia, clamped to [`CALIBRATED_DAMPING_RANGE`].
    pub fn damping_ratio(&self, moment_of_inertia: f64) -> f64 {
        let (lo, hi) = CALIBRATED_DAMPING_RANGE;
        self.damping_ratio_fit.evaluate(moment_of_inertia).clamp(lo, hi)
    }

    /// Inertia span covered by the calibration points, if any were recorded.
    pub fn inertia_range(&self) -> Option<(f64, f64)> {
        self.calibration_points
            .iter()
            .map(CalibrationPoint::moment_of_inertia)
            .fold(None, |acc, i| match acc {
                None => Some((i, i)),
                Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
            })
    }

    pub fn covers(&self, moment_of_inertia: f64) -> bool {
        match self.inertia_range() {
            Some((lo, hi)) => (lo..=hi).contains(&moment_of_inertia),
            None => true,
        }
    }
}

/// Exact second-order response for one rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct SecondOrderSolution {
    pub spring_k: f64,
    pub damping_ratio: f64,
    pub damping_c: f64,
    pub natural_freq_hz: f64,
    pub moment_of_inertia: f64,
}

/// Damping ratio producing the given percent overshoot of a step response.
pub fn damping_ratio_for_overshoot(overshoot_pct: f64) -> f64 {
    let ln_os = (overshoot_pct / 100.0).ln();
    -ln_os / (PI * PI + ln_os * ln_os).sqrt()
}

/// Solve `I θ'' + c θ' + k θ = 0` for the spring and damping that settle in
/// `settle_s` with `overshoot_pct` overshoot.
pub fn solve_second_order(
    weight_kg: f64,
    arm_cm: f64,
    settle_s: f64,
    overshoot_pct: f64,
) -> RigResult<SecondOrderSolution> {
    if !(weight_kg > 0.0 && arm_cm > 0.0 && settle_s > 0.0) {
        return Err(RigError::calibration(format!(
            "weight, arm and settling time must be positive, got {}kg {}cm {}s",
            weight_kg, arm_cm, settle_s
        )));
    }
    if !(overshoot_pct > 0.0 && overshoot_pct < 100.0) {
        return Err(RigError::calibration(format!(
            "overshoot must be in (0, 100)%, got {}",
            overshoot_pct
        )));
    }

    let inertia = weight_kg * arm_cm * arm_cm;
    let zeta = damping_ratio_for_overshoot(overshoot_pct);
    // ts ~ 4 / (zeta * wn) for the 2% band
    let wn = 4.0 / (zeta * settle_s);
    let spring_k = wn * wn * inertia;
    let damping_c = 2.0 * zeta * (spring_k * inertia).sqrt();

    Ok(SecondOrderSolution {
        spring_k,
        damping_ratio: zeta,
        damping_c,
        natural_freq_hz: wn / (2.0 * PI),
        moment_of_inertia: inertia,
    })
}
