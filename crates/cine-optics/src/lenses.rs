//! Built-in lens families.

use std::path::Path;
use std::sync::Arc;

use cine_models::{LensDescriptor, LensSpec, LensState};
use tracing::debug;

use crate::error::RigResult;
use crate::registry::LensProvider;

pub const COOKE_ANAMORPHIC_ID: &str = "cooke_ana_i_s35";

/// A Cooke Anamorphic/i S35 lens loaded from its descriptor.
///
/// Descriptors without mechanics or squeeze breathing load as well; the lens
/// then reports nominal squeeze at every focus distance.
#[derive(Debug, Clone)]
pub struct CookeAnamorphicLens {
    spec: Arc<LensSpec>,
}

impl CookeAnamorphicLens {
    pub fn new(spec: LensSpec) -> Self {
        Self {
            spec: Arc::new(spec),
        }
    }

    pub fn from_json(path: impl AsRef<Path>) -> RigResult<Self> {
        let path = path.as_ref();
        let spec = LensDescriptor::from_path(path)?.to_spec()?;
        debug!(
            path = %path.display(),
            lens_id = spec.lens_id(),
            has_mechanics = spec.has_mechanics(),
            "Loaded Cooke anamorphic descriptor"
        );
        Ok(Self::new(spec))
    }

    pub fn spec(&self) -> &Arc<LensSpec> {
        &self.spec
    }

    /// State at a T-stop and focus distance.
    pub fn create_state(&self, t_stop: f64, focus_distance_m: f64) -> RigResult<LensState> {
        Ok(LensState::new(self.spec.clone(), t_stop, focus_distance_m)?)
    }
}

/// Registry provider loading [`CookeAnamorphicLens`] descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookeAnamorphicProvider;

impl LensProvider for CookeAnamorphicProvider {
    fn id(&self) -> &str {
        COOKE_ANAMORPHIC_ID
    }

    fn load(&self, path: &Path) -> RigResult<LensSpec> {
        let lens = CookeAnamorphicLens::from_json(path)?;
        Ok(LensSpec::clone(lens.spec()))
    }
}
