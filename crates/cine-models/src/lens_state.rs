//! Per-frame lens state: a shared spec plus T-stop and focus distance.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::lens::LensSpec;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensState {
    spec: Arc<LensSpec>,
    t_stop: f64,
    focus_distance_m: f64,
}

impl LensState {
    /// Compose a state, checking the T-stop range and close focus of `spec`.
    pub fn new(spec: Arc<LensSpec>, t_stop: f64, focus_distance_m: f64) -> ModelResult<Self> {
        if !(spec.t_stop_min()..=spec.t_stop_max()).contains(&t_stop) {
            return Err(ModelError::state(format!(
                "T-stop {} outside range [{}, {}]",
                t_stop,
                spec.t_stop_min(),
                spec.t_stop_max()
            )));
        }
        if focus_distance_m.is_nan() || focus_distance_m < spec.close_focus_m() {
            return Err(ModelError::state(format!(
                "Focus {}m below close focus {}m",
                focus_distance_m,
                spec.close_focus_m()
            )));
        }
        Ok(Self {
            spec,
            t_stop,
            focus_distance_m,
        })
    }

    pub fn spec(&self) -> &LensSpec {
        &self.spec
    }

    /// Shared handle to the spec, for composing further states.
    pub fn spec_arc(&self) -> &Arc<LensSpec> {
        &self.spec
    }

    pub fn t_stop(&self) -> f64 {
        self.t_stop
    }

    pub fn focus_distance_m(&self) -> f64 {
        self.focus_distance_m
    }

    pub fn breathing_shift_pct(&self) -> f64 {
        self.spec.breathing().evaluate(self.focus_distance_m)
    }

    /// Squeeze at the current focus distance.
    pub fn effective_squeeze(&self) -> f64 {
        self.spec.effective_squeeze(self.focus_distance_m)
    }

    /// Entrance pupil offset at the current focus, from the pupil fit when present.
    pub fn entrance_pupil_offset_mm(&self) -> f64 {
        self.spec
            .mechanics()
            .map(|m| m.entrance_pupil_offset_at(self.focus_distance_m))
            .unwrap_or(0.0)
    }

    pub fn entrance_pupil_offset_cm(&self) -> f64 {
        self.entrance_pupil_offset_mm() / 10.0
    }

    /// Lens weight only; the body is added when the full rig is assembled.
    pub fn rig_weight_kg(&self) -> f64 {
        self.spec.weight_kg()
    }
}
