//! Robot configuration and a minimal bench host.
//!
//! Stands in for the host runtime when exercising the winch motor on the bench. A robot
//! file declares the boards (backed by [`MockBoard`]) and the motor components to build:
//!
//! ```toml
//! [[boards]]
//! name = "pi"
//! pins = ["29", "31"]
//!
//! [[components]]
//! name = "winch"
//! model = "pulltorefresh:ptrwinchmotor:ptrwinchmotor"
//! attributes = { "board-1" = "pi" }
//! ```
//!
//! Configuration is loaded from the TOML file, then environment variables prefixed with
//! `PTR_WINCH_` are merged on top (nested keys separated by `__`).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use winch_core::{
    Dependencies, Logger, Motor, MotorRegistry, ResourceConfig, WinchError, MOTOR_API,
};
use winch_driver_mock::MockBoard;

use crate::config::Config;
use crate::MODEL;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file or environment could not be read into a [`RobotConfig`].
    #[error("Configuration load error: {0}")]
    LoadError(#[from] Box<figment::Error>),
    /// The robot file is well formed but inconsistent.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    /// A component rejected its own attributes.
    #[error(transparent)]
    Component(#[from] WinchError),
}

/// Board declared in the robot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDefinition {
    /// Name components use in `board-1`.
    pub name: String,
    /// GPIO pin names the board exposes.
    #[serde(default)]
    pub pins: Vec<String>,
}

/// Top-level robot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Boards to simulate.
    #[serde(default)]
    pub boards: Vec<BoardDefinition>,
    /// Components to build, in order.
    #[serde(default)]
    pub components: Vec<ResourceConfig>,
}

impl RobotConfig {
    /// Load from `path`, merge `PTR_WINCH_` overrides, and validate.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("PTR_WINCH_").split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadError(Box::new(e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check names are unique and every winch motor points at a declared board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut boards = HashSet::new();
        for board in &self.boards {
            if !boards.insert(board.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate board name: '{}'",
                    board.name
                )));
            }
        }

        let mut names = HashSet::new();
        for (index, component) in self.components.iter().enumerate() {
            let name = component.name.as_str();
            if !names.insert(name) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate component name: '{name}'"
                )));
            }
            if component.api != MOTOR_API {
                return Err(ConfigError::ValidationError(format!(
                    "Component '{name}' has unsupported api '{}'. Must be {MOTOR_API}",
                    component.api
                )));
            }

            for dependency in self.implicit_dependencies(index)? {
                if !boards.contains(dependency.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "Component '{name}' depends on undeclared board '{dependency}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Dependencies of `components[index]`: those returned by model validation plus
    /// `depends_on`.
    pub fn implicit_dependencies(&self, index: usize) -> Result<Vec<String>, ConfigError> {
        let component = self.components.get(index).ok_or_else(|| {
            ConfigError::ValidationError(format!("No component at index {index}"))
        })?;

        let mut deps = if component.model == MODEL {
            let native: Config = component.native_config()?;
            native.validate(&format!("components.{index}"))?
        } else {
            Vec::new()
        };
        deps.extend(component.depends_on.iter().cloned());
        Ok(deps)
    }
}

/// Running bench robot: boards plus constructed, configured motors.
pub struct Robot {
    boards: BTreeMap<String, Arc<MockBoard>>,
    deps: Dependencies,
    motors: BTreeMap<String, Arc<dyn Motor>>,
}

impl std::fmt::Debug for Robot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Robot")
            .field("boards", &self.boards.keys().collect::<Vec<_>>())
            .field("motors", &self.motors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Robot {
    /// Create the boards, then construct and reconfigure every component.
    pub async fn start(config: &RobotConfig, registry: &MotorRegistry) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut boards = BTreeMap::new();
        let mut deps = Dependencies::new();
        for definition in &config.boards {
            let board = Arc::new(MockBoard::with_pins(
                definition.name.clone(),
                definition.pins.iter().cloned(),
            ));
            deps.insert_board(definition.name.clone(), board.clone());
            boards.insert(definition.name.clone(), board);
        }

        let mut motors = BTreeMap::new();
        for component in &config.components {
            let logger = Logger::new(component.name.as_str());
            let motor = registry.build(component, &deps, logger).await?;
            info!(name = %component.name, model = %component.model, "component started");
            motors.insert(component.name.to_string(), motor);
        }

        Ok(Self {
            boards,
            deps,
            motors,
        })
    }

    /// Handle to the motor called `name`.
    pub fn motor(&self, name: &str) -> Option<Arc<dyn Motor>> {
        self.motors.get(name).cloned()
    }

    /// Board called `name`, for inspecting pin levels.
    pub fn board(&self, name: &str) -> Option<Arc<MockBoard>> {
        self.boards.get(name).cloned()
    }

    /// Names of every started motor, sorted.
    pub fn motor_names(&self) -> Vec<String> {
        self.motors.keys().cloned().collect()
    }

    /// Re-apply a component's configuration against the current boards.
    pub async fn reconfigure(&self, conf: &ResourceConfig) -> Result<(), WinchError> {
        let motor = self
            .motors
            .get(conf.name.as_str())
            .ok_or_else(|| WinchError::DependencyNotFound(conf.name.to_string()))?;
        motor.reconfigure(&self.deps, conf).await
    }

    /// Stop every motor, then close it.
    ///
    /// Motors that do not support `stop` are skipped quietly. Every close error is
    /// collected; shutdown carries on past failures.
    pub async fn shutdown(self) -> Vec<WinchError> {
        let mut errors = Vec::new();
        for (name, motor) in self.motors {
            match motor.stop(None).await {
                Ok(()) => debug!(%name, "stopped"),
                Err(err) if err.is_unimplemented() => debug!(%name, "stop not supported"),
                Err(err) => {
                    warn!(%name, error = %err, "stop failed");
                    errors.push(err);
                }
            }
            if let Err(err) = motor.close().await {
                warn!(%name, error = %err, "close failed");
                errors.push(err);
            }
        }
        errors
    }
}
