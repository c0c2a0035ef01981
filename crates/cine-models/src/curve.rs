//! Piecewise-linear curves over focus distance.
//!
//! Both the breathing curve and the squeeze-breathing curve are thin wrappers
//! around [`LinearCurve`], which owns the sorting, clamping and interpolation
//! policy:
//!
//! - empty curve: the caller's default
//! - left of the first point: the first value
//! - right of the last point: the last value
//! - otherwise: linear interpolation inside the bracketing segment

use serde::Serialize;

use crate::error::{ModelError, ModelResult};

/// Sorted `(x, y)` control points with clamped linear interpolation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinearCurve {
    points: Vec<(f64, f64)>,
}

impl LinearCurve {
    /// Build a curve from control points in any order.
    ///
    /// Points are sorted ascending by `x` once, here. Non-finite coordinates are
    /// rejected so interpolation arithmetic stays well defined.
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> ModelResult<Self> {
        Self::labelled("points", points)
    }

    /// As [`LinearCurve::new`], reporting errors against `field`.
    pub(crate) fn labelled(
        field: &'static str,
        points: impl Into<Vec<(f64, f64)>>,
    ) -> ModelResult<Self> {
        let mut points = points.into();
        if let Some((x, y)) = points
            .iter()
            .find(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ModelError::validation(
                field,
                format!("control point ({}, {}) is not finite", x, y),
            ));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { points })
    }

    /// Empty curve.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorted control points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Evaluate at `x`, returning `default` when the curve has no points.
    pub fn evaluate_or(&self, x: f64, default: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return default,
        };

        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        self.points
            .windows(2)
            .find(|seg| seg[0].0 <= x && x <= seg[1].0)
            .map(|seg| lerp_segment(seg[0], seg[1], x))
            .unwrap_or(default)
    }
}

fn lerp_segment((x0, y0): (f64, f64), (x1, y1): (f64, f64), x: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}
