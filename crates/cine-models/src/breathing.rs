//! Focus-dependent lens curves: field-of-view breathing and anamorphic
//! squeeze breathing ("mumps").

use serde::Serialize;

use crate::curve::LinearCurve;
use crate::error::{ModelError, ModelResult};

/// Focus distance used for the literal `"infinity"` in lens descriptors.
///
/// A large finite sentinel keeps interpolation arithmetic well defined.
pub const INFINITY_FOCUS_M: f64 = 1e10;

/// Squeeze may exceed the nominal ratio by at most this much at any focus.
pub const SQUEEZE_TOLERANCE: f64 = 0.1;

/// Default nominal squeeze for front-anamorphic lenses.
pub const DEFAULT_NOMINAL_SQUEEZE: f64 = 2.0;

/// Focus-dependent FOV shift.
///
/// Points are `(focus_m, fov_shift_pct)`. At infinity the shift is usually 0%;
/// at close focus it is positive (wider FOV). An empty curve means no breathing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreathingCurve {
    curve: LinearCurve,
}

impl BreathingCurve {
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> ModelResult<Self> {
        Ok(Self {
            curve: LinearCurve::labelled("breathing", points)?,
        })
    }

    /// Curve with no breathing at any focus distance.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        self.curve.points()
    }

    /// FOV shift in percent at the given focus distance.
    pub fn evaluate(&self, focus_distance_m: f64) -> f64 {
        self.curve.evaluate_or(focus_distance_m, 0.0)
    }
}

/// Focus-dependent effective squeeze of a front-anamorphic lens.
///
/// Nominal squeeze is only reached at infinity; towards minimum object distance
/// the effective squeeze drops and faces look wider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqueezeBreathingCurve {
    curve: LinearCurve,
    nominal_squeeze: f64,
}

impl SqueezeBreathingCurve {
    /// Build from `(focus_m, effective_squeeze)` points.
    ///
    /// Every squeeze must lie in `[1.0, nominal + 0.1]`.
    pub fn new(points: impl Into<Vec<(f64, f64)>>, nominal_squeeze: f64) -> ModelResult<Self> {
        if !nominal_squeeze.is_finite() || nominal_squeeze < 1.0 {
            return Err(ModelError::validation(
                "nominal_squeeze",
                format!("must be >= 1.0, got {}", nominal_squeeze),
            ));
        }

        let curve = LinearCurve::labelled("squeeze_breathing", points)?;
        let ceiling = nominal_squeeze + SQUEEZE_TOLERANCE;
        for &(focus_m, squeeze) in curve.points() {
            if squeeze < 1.0 || squeeze > ceiling {
                return Err(ModelError::validation(
                    "squeeze_breathing",
                    format!(
                        "squeeze {} at {}m outside [1.0, {}] (nominal: {})",
                        squeeze, focus_m, ceiling, nominal_squeeze
                    ),
                ));
            }
        }

        Ok(Self {
            curve,
            nominal_squeeze,
        })
    }

    /// Curve without data; evaluates to the nominal squeeze everywhere.
    pub fn nominal(nominal_squeeze: f64) -> ModelResult<Self> {
        Self::new(Vec::new(), nominal_squeeze)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        self.curve.points()
    }

    pub fn nominal_squeeze(&self) -> f64 {
        self.nominal_squeeze
    }

    /// Effective squeeze at the given focus distance.
    pub fn evaluate(&self, focus_m: f64) -> f64 {
        self.curve.evaluate_or(focus_m, self.nominal_squeeze)
    }
}
