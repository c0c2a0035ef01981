//! Rig report assembly.

use std::sync::Arc;

use cine_models::{AttributeSet, LensState, ToAttributes};
use cine_optics::{
    compute_optics, derive_biomechanics, evaluate_sequence, FocusPull, FrameEvaluation,
    RigRegistry,
};
use serde::Serialize;
use tracing::info;

use crate::args::ReportArgs;
use crate::config::RigConfig;
use crate::error::CliResult;

/// Everything known about one rig at one frame, plus an optional focus pull.
#[derive(Debug, Clone, Serialize)]
pub struct RigReport {
    pub body_id: String,
    pub lens_id: String,
    pub biomechanics_model: &'static str,
    /// At the configured project frame rate
    pub shutter_speed_s: f64,
    pub camera: AttributeSet,
    pub lens: AttributeSet,
    pub optics: AttributeSet,
    pub biomechanics: AttributeSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<FrameEvaluation>>,
}

impl RigReport {
    pub fn to_json_pretty(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn build_report(
    registry: &RigRegistry,
    config: &RigConfig,
    args: &ReportArgs,
) -> CliResult<RigReport> {
    let body = registry.body_provider(&config.body_id)?;
    let camera = body.create(&config.body_settings())?;
    let bio_config = config.biomechanics_config(body.body_weight_kg())?;

    let spec = Arc::new(registry.lens(&config.lens_provider, &args.descriptor)?);
    let lens = LensState::new(spec.clone(), args.t_stop, args.focus_m)?;

    let optics = compute_optics(&camera, &lens);
    let biomechanics = derive_biomechanics(&camera, &lens, &bio_config);

    let sequence = match args.pull() {
        Some(pull) => {
            let pull = FocusPull::new(args.focus_m, pull.to_m, pull.frames)?;
            Some(evaluate_sequence(&camera, &spec, args.t_stop, &pull)?)
        }
        None => None,
    };

    info!(
        body_id = %config.body_id,
        lens_id = spec.lens_id(),
        t_stop = args.t_stop,
        focus_m = args.focus_m,
        frames = sequence.as_ref().map_or(0, Vec::len),
        "Built rig report"
    );

    Ok(RigReport {
        body_id: config.body_id.clone(),
        lens_id: spec.lens_id().to_string(),
        biomechanics_model: bio_config.model.name(),
        shutter_speed_s: camera.shutter_speed_at(config.fps),
        camera: camera.to_attributes(),
        lens: lens.to_attributes(),
        optics: optics.to_attributes(),
        biomechanics: biomechanics.to_attributes(),
        sequence,
    })
}
