//! Evaluation counters.
//!
//! Recording is a no-op until the host process installs a `metrics` recorder.

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const OPTICS_EVALUATIONS_TOTAL: &str = "cinerig_optics_evaluations_total";
    pub const BIOMECHANICS_DERIVATIONS_TOTAL: &str = "cinerig_biomechanics_derivations_total";
    pub const SEQUENCE_FRAMES_TOTAL: &str = "cinerig_sequence_frames_total";
}

/// Record one `compute_optics` call.
pub fn record_optics_evaluation(anamorphic: bool) {
    let labels = [("anamorphic", anamorphic.to_string())];
    counter!(names::OPTICS_EVALUATIONS_TOTAL, &labels).increment(1);
}

/// Record one biomechanics derivation.
pub fn record_biomechanics_derivation(model: &'static str) {
    let labels = [("model", model)];
    counter!(names::BIOMECHANICS_DERIVATIONS_TOTAL, &labels).increment(1);
}

/// Record frames evaluated as part of a sequence.
pub fn record_sequence_frames(frames: u64) {
    counter!(names::SEQUENCE_FRAMES_TOTAL).increment(frames);
}
