//! Motor capability interface.
//!
//! Every motor model implements the whole interface. Models that cannot support an
//! operation return [`WinchError::Unimplemented`](crate::WinchError::Unimplemented) rather
//! than omitting it, so generic orchestration code (e.g. a supervisor stopping every
//! actuator at shutdown) can tell "not supported" from "failed".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WinchResult;
use crate::resource::{Dependencies, Extra, Name, ResourceConfig};

/// Lifecycle shared by every component.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Configured resource name.
    fn name(&self) -> &Name;

    /// Apply a new configuration, re-resolving dependencies from `deps`.
    async fn reconfigure(&self, deps: &Dependencies, conf: &ResourceConfig) -> WinchResult<()>;

    /// Terminal hook called by the host during shutdown.
    async fn close(&self) -> WinchResult<()>;
}

/// Physical capabilities reported by a motor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// The motor can report its position.
    pub position_reporting: bool,
}

/// Motor capability interface.
#[async_trait]
pub trait Motor: Resource {
    /// Set power as a fraction in `[-1, 1]`. Negative values reverse direction.
    async fn set_power(&self, power: f64, extra: Option<&Extra>) -> WinchResult<()>;

    /// Run at `rpm` for `revolutions`. If both are negative the motor turns forward.
    async fn go_for(&self, rpm: f64, revolutions: f64, extra: Option<&Extra>) -> WinchResult<()>;

    /// Move to `position_revolutions` (from home) at `rpm`, regardless of the sign of `rpm`.
    async fn go_to(
        &self,
        rpm: f64,
        position_revolutions: f64,
        extra: Option<&Extra>,
    ) -> WinchResult<()>;

    /// Run at `rpm` indefinitely.
    async fn set_rpm(&self, rpm: f64, extra: Option<&Extra>) -> WinchResult<()>;

    /// Make the current position (plus `offset`) the new zero.
    async fn reset_zero_position(&self, offset: f64, extra: Option<&Extra>) -> WinchResult<()>;

    /// Encoder position in revolutions.
    async fn position(&self, extra: Option<&Extra>) -> WinchResult<f64>;

    /// Whether the motor is currently turning.
    async fn is_moving(&self) -> WinchResult<bool>;

    /// Whether the motor is on, and the power fraction in `[0, 1]`.
    async fn is_powered(&self, extra: Option<&Extra>) -> WinchResult<(bool, f64)>;

    /// Static capabilities of this motor.
    async fn properties(&self, extra: Option<&Extra>) -> WinchResult<Properties>;

    /// Cut power and stop.
    async fn stop(&self, extra: Option<&Extra>) -> WinchResult<()>;
}
