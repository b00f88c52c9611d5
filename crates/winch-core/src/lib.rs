//! Host-runtime contracts for ptr-winch-motor.
//!
//! This crate holds what a component needs from the runtime that hosts it:
//!
//! - [`resource`]: resource names, model triplets, raw configuration and dependency sets
//! - [`board`]: the board/GPIO boundary components drive
//! - [`motor`]: the motor capability interface
//! - [`registry`]: model → constructor registration
//! - [`logging`]: the per-component diagnostic sink
//! - [`error`]: the shared error type

pub mod board;
pub mod error;
pub mod logging;
pub mod motor;
pub mod registry;
pub mod resource;

pub use board::{Board, GpioPin};
pub use error::{BoardError, WinchError, WinchResult};
pub use logging::Logger;
pub use motor::{Motor, Properties, Resource};
pub use registry::{MotorConstructor, MotorRegistry};
pub use resource::{Dependencies, Extra, Model, Name, ResourceConfig, BOARD_API, MOTOR_API};
