//! Per-frame evaluation of focus pulls.

use std::sync::Arc;
use std::time::Instant;

use cine_models::{CameraState, LensSpec, LensState, ModelError, OpticalResult};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::info;

use crate::error::RigResult;
use crate::optics::compute_optics;

/// Linear focus pull from one distance to another over a number of frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct FocusPull {
    from_m: f64,
    to_m: f64,
    frames: u32,
}

impl FocusPull {
    pub fn new(from_m: f64, to_m: f64, frames: u32) -> RigResult<Self> {
        if frames == 0 {
            return Err(ModelError::validation("frames", "must be at least 1, got 0").into());
        }
        if !from_m.is_finite() || !to_m.is_finite() {
            return Err(ModelError::validation(
                "focus_pull",
                format!("distances must be finite, got {}m to {}m", from_m, to_m),
            )
            .into());
        }
        Ok(Self {
            from_m,
            to_m,
            frames,
        })
    }

    /// A single held frame.
    pub fn hold(focus_m: f64) -> RigResult<Self> {
        Self::new(focus_m, focus_m, 1)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Focus distance at `frame`; the last frame lands exactly on the target.
    pub fn focus_at(&self, frame: u32) -> f64 {
        if self.frames <= 1 || frame == 0 {
            return self.from_m;
        }
        let last = self.frames - 1;
        if frame >= last {
            return self.to_m;
        }
        let t = frame as f64 / last as f64;
        self.from_m + (self.to_m - self.from_m) * t
    }
}

/// Lens and optics values at one frame of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct FrameEvaluation {
    pub frame: u32,
    pub focus_distance_m: f64,
    pub effective_squeeze: f64,
    pub breathing_shift_pct: f64,
    pub optics: OpticalResult,
}

/// Evaluate every frame of `pull` at a fixed T-stop.
///
/// Frames are evaluated in parallel and returned in frame order. Any frame
/// failing state validation fails the whole sequence.
pub fn evaluate_sequence(
    camera: &CameraState,
    spec: &Arc<LensSpec>,
    t_stop: f64,
    pull: &FocusPull,
) -> RigResult<Vec<FrameEvaluation>> {
    let start = Instant::now();

    let frames: RigResult<Vec<FrameEvaluation>> = (0..pull.frames())
        .into_par_iter()
        .map(|frame| -> RigResult<FrameEvaluation> {
            let focus = pull.focus_at(frame);
            let lens = LensState::new(spec.clone(), t_stop, focus)?;
            Ok(FrameEvaluation {
                frame,
                focus_distance_m: focus,
                effective_squeeze: lens.effective_squeeze(),
                breathing_shift_pct: lens.breathing_shift_pct(),
                optics: compute_optics(camera, &lens),
            })
        })
        .collect();
    let frames = frames?;

    crate::metrics::record_sequence_frames(frames.len() as u64);
    info!(
        lens_id = spec.lens_id(),
        frames = frames.len(),
        elapsed = ?start.elapsed(),
        "Evaluated focus pull"
    );

    Ok(frames)
}
