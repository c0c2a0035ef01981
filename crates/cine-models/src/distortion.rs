//! Brown-Conrady lens distortion with anamorphic squeeze non-uniformity.
//!
//! Coordinates are centered and normalized (0 at the optical axis). Only point
//! mapping lives here; image resampling is left to downstream compositing.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};

const UNDISTORT_MAX_ITERATIONS: usize = 10;
const UNDISTORT_TOLERANCE: f64 = 1e-6;

/// Distortion coefficients plus anamorphic squeeze uniformity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistortionModel {
    /// Radial (barrel/pincushion)
    k1: f64,
    /// Higher-order radial
    k2: f64,
    /// Highest-order radial
    k3: f64,
    /// Tangential
    p1: f64,
    /// Tangential
    p2: f64,
    /// 1.0 = perfect, below 1.0 squeeze varies across the frame
    squeeze_uniformity: f64,
}

impl Default for DistortionModel {
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

impl DistortionModel {
    pub fn new(
        k1: f64,
        k2: f64,
        k3: f64,
        p1: f64,
        p2: f64,
        squeeze_uniformity: f64,
    ) -> ModelResult<Self> {
        if !(0.8..=1.0).contains(&squeeze_uniformity) {
            return Err(ModelError::validation(
                "squeeze_uniformity",
                format!("must be 0.8-1.0, got {}", squeeze_uniformity),
            ));
        }
        Ok(Self {
            k1,
            k2,
            k3,
            p1,
            p2,
            squeeze_uniformity,
        })
    }

    /// Purely radial model with perfect squeeze uniformity.
    pub fn radial(k1: f64, k2: f64, k3: f64) -> Self {
        Self {
            k1,
            k2,
            k3,
            ..Self::default()
        }
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    pub fn k3(&self) -> f64 {
        self.k3
    }

    pub fn p1(&self) -> f64 {
        self.p1
    }

    pub fn p2(&self) -> f64 {
        self.p2
    }

    pub fn squeeze_uniformity(&self) -> f64 {
        self.squeeze_uniformity
    }

    /// Map an undistorted centered point to its distorted position.
    pub fn distort(&self, x: f64, y: f64) -> (f64, f64) {
        let (xr, yr, _) = self.radial_tangential(x, y);
        (xr, yr)
    }

    /// Distortion with a dynamic anamorphic squeeze on the X axis.
    ///
    /// Y is scaled by the squeeze non-uniformity, blended towards the frame edge.
    pub fn distort_anamorphic(&self, x: f64, y: f64, effective_squeeze: f64) -> (f64, f64) {
        let (xr, yr, r2) = self.radial_tangential(x, y);
        let sq_var = 1.0 + (self.squeeze_uniformity - 1.0) * r2;
        (xr * effective_squeeze, yr * sq_var)
    }

    /// Invert [`distort`](Self::distort) by fixed-point iteration.
    pub fn undistort(&self, x: f64, y: f64) -> (f64, f64) {
        let (mut ux, mut uy) = (x, y);
        for _ in 0..UNDISTORT_MAX_ITERATIONS {
            let (dx, dy) = self.distort(ux, uy);
            let (ex, ey) = (dx - x, dy - y);
            if ex.hypot(ey) < UNDISTORT_TOLERANCE {
                break;
            }
            ux -= ex;
            uy -= ey;
        }
        (ux, uy)
    }

    fn radial_tangential(&self, x: f64, y: f64) -> (f64, f64, f64) {
        let r2 = x * x + y * y;
        let r4 = r2 * r2;
        let r6 = r4 * r2;
        let radial = 1.0 + self.k1 * r2 + self.k2 * r4 + self.k3 * r6;

        let dx = 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let dy = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;

        (x * radial + dx, y * radial + dy, r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squeeze_uniformity_range() {
        assert!(DistortionModel::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.8).is_ok());
        assert!(DistortionModel::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0).is_ok());
        let err = DistortionModel::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.79).unwrap_err();
        assert_eq!(err.field(), Some("squeeze_uniformity"));
        assert!(DistortionModel::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.01).is_err());
    }

    #[test]
    fn test_identity_model_is_noop() {
        let model = DistortionModel::default();
        assert_eq!(model.distort(0.3, -0.2), (0.3, -0.2));
        assert_eq!(model.distort_anamorphic(0.3, -0.2, 1.0), (0.3, -0.2));
    }

    #[test]
    fn test_barrel_distortion_pulls_inward() {
        let model = DistortionModel::radial(-0.015, 0.002, 0.0);
        let (x, y) = model.distort(0.5, 0.0);
        assert!(x < 0.5);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_undistort_inverts_distort() {
        let model = DistortionModel::new(-0.05, 0.01, 0.0, 0.001, -0.0005, 0.94).unwrap();
        let (dx, dy) = model.distort(0.4, 0.25);
        let (ux, uy) = model.undistort(dx, dy);
        assert_relative_eq!(ux, 0.4, epsilon = 1e-5);
        assert_relative_eq!(uy, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_anamorphic_scales_x_by_squeeze() {
        let model = DistortionModel::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.9).unwrap();
        let (x, y) = model.distort_anamorphic(0.5, 0.5, 1.85);
        assert_relative_eq!(x, 0.925, epsilon = 1e-12);
        // r2 = 0.5, y scaled by lerp(1.0, 0.9, 0.5) = 0.95
        assert_relative_eq!(y, 0.475, epsilon = 1e-12);
    }
}
