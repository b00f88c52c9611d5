//! Motor model registry.
//!
//! The host runtime keeps one [`MotorRegistry`] per process and asks each component
//! crate to register its models at startup. Registration is explicit and idempotent:
//! registering a model twice keeps the first constructor.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{WinchError, WinchResult};
use crate::logging::Logger;
use crate::motor::Motor;
use crate::resource::{Dependencies, Model, ResourceConfig};

/// Constructor stored for a model: `(dependencies, configuration, logger) -> motor`.
pub type MotorConstructor =
    Arc<dyn Fn(&Dependencies, &ResourceConfig, Logger) -> WinchResult<Arc<dyn Motor>> + Send + Sync>;

/// Model triplet to constructor map owned by the host.
#[derive(Default)]
pub struct MotorRegistry {
    constructors: BTreeMap<Model, MotorConstructor>,
}

impl std::fmt::Debug for MotorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotorRegistry")
            .field("models", &self.models())
            .finish()
    }
}

impl MotorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `model` with `constructor`.
    ///
    /// Returns `true` if the model was newly registered, `false` if it was already
    /// present (the existing constructor is kept).
    pub fn register_motor<F>(&mut self, model: Model, constructor: F) -> bool
    where
        F: Fn(&Dependencies, &ResourceConfig, Logger) -> WinchResult<Arc<dyn Motor>>
            + Send
            + Sync
            + 'static,
    {
        if self.constructors.contains_key(&model) {
            tracing::debug!(%model, "model already registered");
            return false;
        }
        tracing::debug!(%model, "registering motor model");
        self.constructors.insert(model, Arc::new(constructor));
        true
    }

    /// Whether a constructor exists for `model`.
    pub fn is_registered(&self, model: &Model) -> bool {
        self.constructors.contains_key(model)
    }

    /// Registered model triplets, sorted.
    pub fn models(&self) -> Vec<String> {
        self.constructors.keys().map(Model::to_string).collect()
    }

    /// Instantiate the component for `conf.model`. The component is not reconfigured.
    pub fn construct(
        &self,
        conf: &ResourceConfig,
        deps: &Dependencies,
        logger: Logger,
    ) -> WinchResult<Arc<dyn Motor>> {
        let constructor = self
            .constructors
            .get(&conf.model)
            .ok_or_else(|| WinchError::UnknownModel(conf.model.to_string()))?;
        constructor(deps, conf, logger)
    }

    /// Construct and then apply `conf` once, the way the host brings a component up.
    pub async fn build(
        &self,
        conf: &ResourceConfig,
        deps: &Dependencies,
        logger: Logger,
    ) -> WinchResult<Arc<dyn Motor>> {
        let motor = self.construct(conf, deps, logger)?;
        motor.reconfigure(deps, conf).await?;
        Ok(motor)
    }
}
