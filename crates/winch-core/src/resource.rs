//! Resource identity, raw configuration and dependency sets.
//!
//! A host runtime describes every component with a [`ResourceConfig`]: a name, the API it
//! implements, the [`Model`] triplet used to find its constructor, and a free-form JSON
//! attribute map that the component parses into its own native configuration.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{WinchError, WinchResult};

/// Free-form per-call options forwarded by the host runtime.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// API identifier for motor components.
pub const MOTOR_API: &str = "rdk:component:motor";
/// API identifier for board components.
pub const BOARD_API: &str = "rdk:component:board";

/// Name of a configured resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Wrap a resource name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Colon-delimited model triplet: `namespace:family:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Model {
    namespace: Cow<'static, str>,
    family: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl Model {
    /// Build a model from its three segments, validating each one.
    pub fn new(namespace: &str, family: &str, name: &str) -> WinchResult<Self> {
        let segment = regex_lite::Regex::new(r"^[A-Za-z0-9_-]+$")
            .map_err(|e| WinchError::Configuration(e.to_string()))?;
        for part in [namespace, family, name] {
            if !segment.is_match(part) {
                return Err(WinchError::InvalidModel(format!(
                    "{namespace}:{family}:{name}"
                )));
            }
        }
        Ok(Self {
            namespace: Cow::Owned(namespace.to_string()),
            family: Cow::Owned(family.to_string()),
            name: Cow::Owned(name.to_string()),
        })
    }

    /// Compile-time model for a component crate's own triplet.
    ///
    /// Segments are not validated here; use [`Model::new`] for user input.
    pub const fn from_static(namespace: &'static str, family: &'static str, name: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            family: Cow::Borrowed(family),
            name: Cow::Borrowed(name),
        }
    }

    /// First segment, usually the organisation.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Second segment.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Third segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.family, self.name)
    }
}

impl FromStr for Model {
    type Err = WinchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [namespace, family, name] => Model::new(namespace, family, name),
            _ => Err(WinchError::InvalidModel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Model {
    type Error = WinchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}

/// Raw configuration for one resource, as supplied by the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name, unique per robot.
    pub name: Name,
    /// API the resource implements.
    #[serde(default = "default_api")]
    pub api: String,
    /// Model used to find the constructor.
    pub model: Model,
    /// Model-specific attributes, parsed by [`ResourceConfig::native_config`].
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Explicit dependencies in addition to those returned by validation.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

fn default_api() -> String {
    MOTOR_API.to_string()
}

impl ResourceConfig {
    /// Motor config with no attributes.
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: Name::new(name),
            api: default_api(),
            model,
            attributes: serde_json::Map::new(),
            depends_on: Vec::new(),
        }
    }

    /// Builder-style helper to set one attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Convert the generic attribute map into the model-specific configuration.
    pub fn native_config<T: DeserializeOwned>(&self) -> WinchResult<T> {
        serde_json::from_value(serde_json::Value::Object(self.attributes.clone())).map_err(
            |source| WinchError::Attributes {
                resource: self.name.to_string(),
                source,
            },
        )
    }
}

/// Resolved dependencies handed to constructors and `reconfigure`.
#[derive(Clone, Default)]
pub struct Dependencies {
    boards: HashMap<String, Arc<dyn Board>>,
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.boards.keys().collect();
        names.sort();
        f.debug_struct("Dependencies").field("boards", &names).finish()
    }
}

impl Dependencies {
    /// Empty dependency set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a board under `name`.
    pub fn insert_board(&mut self, name: impl Into<String>, board: Arc<dyn Board>) {
        self.boards.insert(name.into(), board);
    }

    /// Look up a board by name.
    pub fn board(&self, name: &str) -> WinchResult<Arc<dyn Board>> {
        self.boards
            .get(name)
            .cloned()
            .ok_or_else(|| WinchError::DependencyNotFound(name.to_string()))
    }

    /// Number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// True when no boards are present.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trips_through_display() {
        let model: Model = "pulltorefresh:ptrwinchmotor:ptrwinchmotor".parse().unwrap();
        assert_eq!(model.namespace(), "pulltorefresh");
        assert_eq!(model.family(), "ptrwinchmotor");
        assert_eq!(model.name(), "ptrwinchmotor");
        assert_eq!(
            model.to_string(),
            "pulltorefresh:ptrwinchmotor:ptrwinchmotor"
        );
    }

    #[test]
    fn test_model_rejects_bad_triplets() {
        for bad in ["", "a:b", "a:b:c:d", "a::c", "a:b:c d", ":b:c"] {
            assert!(
                matches!(bad.parse::<Model>(), Err(WinchError::InvalidModel(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_native_config_reports_resource_name() {
        #[derive(Debug, Deserialize)]
        struct Native {
            #[allow(dead_code)]
            count: u32,
        }

        let model = Model::new("acme", "demo", "thing").unwrap();
        let conf = ResourceConfig::new("thing-1", model).with_attribute("count", "nope");
        let err = conf.native_config::<Native>().unwrap_err();
        assert!(err.to_string().contains("thing-1"));
    }

    #[test]
    fn test_missing_dependency() {
        let deps = Dependencies::new();
        assert!(deps.is_empty());
        let err = deps.board("b1").err().unwrap();
        assert!(matches!(err, WinchError::DependencyNotFound(name) if name == "b1"));
    }

    #[test]
    fn test_resource_config_from_json() {
        let conf: ResourceConfig = serde_json::from_str(
            r#"{"name":"winch","model":"pulltorefresh:ptrwinchmotor:ptrwinchmotor","attributes":{"board-1":"b1"}}"#,
        )
        .unwrap();
        assert_eq!(conf.api, MOTOR_API);
        assert_eq!(conf.attributes["board-1"], "b1");
        assert!(conf.depends_on.is_empty());
    }
}
