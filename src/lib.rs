//! Winch motor component for the pull-to-refresh rig.
//!
//! The component exposes the standard motor capability interface while switching a
//! single GPIO pin (the propeller pin) on a shared board. It is constructed unbound,
//! bound to a board by `reconfigure`, and driven through `set_power`.
//!
//! ```rust,ignore
//! use ptr_winch_motor::{register, MODEL};
//! use winch_core::{Dependencies, Logger, MotorRegistry, ResourceConfig};
//!
//! let mut registry = MotorRegistry::new();
//! register(&mut registry);
//!
//! let conf = ResourceConfig::new("winch", MODEL).with_attribute("board-1", "pi");
//! let motor = registry.build(&conf, &deps, Logger::new("winch")).await?;
//! motor.set_power(1.0, None).await?;
//! ```

pub mod config;
pub mod pins;
pub mod robot;
pub mod winch;

use winch_core::{Model, MotorRegistry};

pub use config::Config;
pub use pins::{set_pin, PinValue, PROPELLER_PIN, TURNING_PINS, WINCH_PINS};
pub use winch::{new_winch_motor, WinchMotor};

/// Model triplet this crate registers: `pulltorefresh:ptrwinchmotor:ptrwinchmotor`.
pub const MODEL: Model = Model::from_static("pulltorefresh", "ptrwinchmotor", "ptrwinchmotor");

/// Register the winch motor model with `registry`.
///
/// Call once during process startup. Calling again is harmless and returns `false`.
pub fn register(registry: &mut MotorRegistry) -> bool {
    registry.register_motor(MODEL, new_winch_motor)
}
