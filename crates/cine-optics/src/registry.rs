//! Lens and camera body registry.
//!
//! Providers are registered explicitly at startup and the registry is passed
//! to whoever needs it. [`RigRegistry::with_builtin`] registers the bundled
//! ALEXA 35 body and Cooke Anamorphic/i lens loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use cine_models::camera::{DEFAULT_EXPOSURE_INDEX, DEFAULT_SHUTTER_ANGLE_DEG};
use cine_models::{CameraState, LensSpec};
use tracing::info;

use crate::bodies::Alexa35Provider;
use crate::error::{RigError, RigResult};
use crate::lenses::CookeAnamorphicProvider;

/// Loads lens specs of one family from descriptor files.
pub trait LensProvider: Send + Sync {
    /// Registry key, e.g. `cooke_ana_i_s35`.
    fn id(&self) -> &str;

    fn load(&self, path: &Path) -> RigResult<LensSpec>;
}

/// Settings applied when instantiating a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySettings {
    /// Provider default when `None`
    pub format_name: Option<String>,
    pub exposure_index: u32,
    pub shutter_angle_deg: f64,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            format_name: None,
            exposure_index: DEFAULT_EXPOSURE_INDEX,
            shutter_angle_deg: DEFAULT_SHUTTER_ANGLE_DEG,
        }
    }
}

/// Creates camera states for one body model.
pub trait BodyProvider: Send + Sync {
    fn id(&self) -> &str;

    /// Body only, without lens or accessories.
    fn body_weight_kg(&self) -> f64;

    fn formats(&self) -> Vec<String>;

    fn create(&self, settings: &BodySettings) -> RigResult<CameraState>;
}

/// Registry of lens and body providers keyed by id.
#[derive(Default, Clone)]
pub struct RigRegistry {
    lenses: BTreeMap<String, Arc<dyn LensProvider>>,
    bodies: BTreeMap<String, Arc<dyn BodyProvider>>,
}

impl RigRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_body(Arc::new(Alexa35Provider));
        registry.register_lens(Arc::new(CookeAnamorphicProvider));
        registry
    }

    /// Register a lens provider, replacing any provider with the same id.
    pub fn register_lens(&mut self, provider: Arc<dyn LensProvider>) {
        info!(lens_id = provider.id(), "Registered lens provider");
        self.lenses.insert(provider.id().to_string(), provider);
    }

    /// Register a body provider, replacing any provider with the same id.
    pub fn register_body(&mut self, provider: Arc<dyn BodyProvider>) {
        info!(body_id = provider.id(), "Registered body provider");
        self.bodies.insert(provider.id().to_string(), provider);
    }

    pub fn lens_provider(&self, lens_id: &str) -> RigResult<Arc<dyn LensProvider>> {
        self.lenses
            .get(lens_id)
            .cloned()
            .ok_or_else(|| RigError::UnknownLens {
                id: lens_id.to_string(),
                available: self.list_lenses(),
            })
    }

    pub fn body_provider(&self, body_id: &str) -> RigResult<Arc<dyn BodyProvider>> {
        self.bodies
            .get(body_id)
            .cloned()
            .ok_or_else(|| RigError::UnknownBody {
                id: body_id.to_string(),
                available: self.list_bodies(),
            })
    }

    /// Load a lens spec through the provider registered as `lens_id`.
    pub fn lens(&self, lens_id: &str, path: impl AsRef<Path>) -> RigResult<LensSpec> {
        self.lens_provider(lens_id)?.load(path.as_ref())
    }

    /// Camera state for `body_id` with default settings.
    pub fn body(&self, body_id: &str) -> RigResult<CameraState> {
        self.body_with(body_id, &BodySettings::default())
    }

    pub fn body_with(&self, body_id: &str, settings: &BodySettings) -> RigResult<CameraState> {
        self.body_provider(body_id)?.create(settings)
    }

    /// Registered lens ids, sorted.
    pub fn list_lenses(&self) -> Vec<String> {
        self.lenses.keys().cloned().collect()
    }

    /// Registered body ids, sorted.
    pub fn list_bodies(&self) -> Vec<String> {
        self.bodies.keys().cloned().collect()
    }
}

impl std::fmt::Debug for RigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigRegistry")
            .field("lenses", &self.list_lenses())
            .field("bodies", &self.list_bodies())
            .finish()
    }
}
