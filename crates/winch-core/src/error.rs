//! Error types shared by the host-runtime contracts and the components built on them.
//!
//! `WinchError` is the single error type returned by every capability call. It uses
//! `thiserror` so that lower-level causes (attribute parsing, board failures) stay
//! attached as `source()` while the `?` operator keeps call sites short.
//!
//! ## Error Hierarchy
//!
//! - **`Configuration`** / **`Attributes`**: the user-supplied settings are wrong. These
//!   surface from validation and from reconfiguration, never from hardware.
//! - **`InvalidModel`** / **`UnknownModel`**: a model triplet is malformed or nothing is
//!   registered for it.
//! - **`DependencyNotFound`** / **`DependencyResolution`**: a named dependency could not be
//!   resolved. The second wraps the first with the board name that was attempted.
//! - **`Unbound`**: a hardware-touching capability was invoked before a successful
//!   reconfigure.
//! - **`PinLookup`** / **`PinWrite`**: the board rejected a pin operation.
//! - **`Unimplemented`**: the capability exists on the interface but this model does not
//!   support it. This is expected behavior, not a fault.

use thiserror::Error;

/// Convenience alias for results using [`WinchError`].
pub type WinchResult<T> = std::result::Result<T, WinchError>;

/// Errors raised by the board boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The board has no pin with this name.
    #[error("pin {0:?} does not exist on this board")]
    PinNotFound(String),

    /// The board accepted the request but the hardware failed it.
    #[error("hardware error: {0}")]
    Hardware(String),
}

/// Error returned by every capability and lifecycle call.
#[derive(Error, Debug)]
pub enum WinchError {
    /// Attributes parsed but failed validation.
    #[error("Configuration validation error: {0}")]
    Configuration(String),

    /// Attributes could not be parsed into the native configuration.
    #[error("Invalid attributes for {resource}: {source}")]
    Attributes {
        /// Resource whose attributes were rejected.
        resource: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Model string is not a `namespace:family:name` triplet.
    #[error("Invalid model triplet {0:?}: expected namespace:family:name")]
    InvalidModel(String),

    /// No constructor is registered for the model.
    #[error("No constructor registered for model {0}")]
    UnknownModel(String),

    /// A named dependency is not in the dependency set.
    #[error("Resource {0:?} missing from dependencies")]
    DependencyNotFound(String),

    /// The component could not obtain its board during reconfigure.
    #[error("Unable to get board {board:?} for winch motor: {source}")]
    DependencyResolution {
        /// Board name that was attempted.
        board: String,
        /// Lookup failure.
        #[source]
        source: Box<WinchError>,
    },

    /// Hardware was touched before a successful reconfigure, or after close.
    #[error("Motor {0} is not bound to a board; reconfigure it first")]
    Unbound(String),

    /// The board rejected the pin lookup.
    #[error("Failed to look up pin {pin:?}: {source}")]
    PinLookup {
        /// Pin name.
        pin: String,
        /// Board error.
        #[source]
        source: BoardError,
    },

    /// The board rejected the pin write.
    #[error("Failed to set pin {pin:?}: {source}")]
    PinWrite {
        /// Pin name.
        pin: String,
        /// Board error.
        #[source]
        source: BoardError,
    },

    /// The model does not support this capability.
    #[error("{0} is unimplemented")]
    Unimplemented(&'static str),
}

impl WinchError {
    /// True when the capability is intentionally unsupported.
    ///
    /// Supervisors use this to tell "not supported" apart from "failed".
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, WinchError::Unimplemented(_))
    }

    /// True when the component has no board bound.
    pub fn is_unbound(&self) -> bool {
        matches!(self, WinchError::Unbound(_))
    }
}
