//! Board boundary consumed by components.
//!
//! The host runtime owns boards; components only hold shared handles to them and use
//! two operations: look up a GPIO pin by name and drive it to a logic level.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoardError;
use crate::resource::Extra;

/// A named digital I/O device.
pub trait Board: Send + Sync {
    /// Name the board was registered under.
    fn name(&self) -> &str;

    /// Look up a GPIO pin by its board-specific name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PinNotFound`] when the board has no such pin.
    fn gpio_pin_by_name(&self, name: &str) -> Result<Arc<dyn GpioPin>, BoardError>;
}

/// A single GPIO pin.
#[async_trait]
pub trait GpioPin: Send + Sync {
    /// Drive the pin high (`true`) or low (`false`).
    async fn set(&self, high: bool, extra: Option<&Extra>) -> Result<(), BoardError>;

    /// Read the current logic level.
    async fn get(&self, extra: Option<&Extra>) -> Result<bool, BoardError>;
}
