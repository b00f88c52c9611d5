//! Winch motor component.
//!
//! Implements the full motor capability interface on top of a single GPIO pin. Only
//! [`Motor::set_power`] drives hardware; the remaining operations report
//! [`WinchError::Unimplemented`].
//!
//! # Lifecycle
//!
//! ```text
//! new() ── unbound ──reconfigure(ok)──▶ bound ──reconfigure(ok)──▶ bound (new board)
//!             ▲                           │
//!             └──── reconfigure(err) ─────┘
//!             └──────── close() ──────────┘
//! ```
//!
//! The board handle is cleared before a new one is resolved, so a failed
//! reconfigure never leaves a stale board behind. Pin writes hold the slot lock until
//! the board answers, so `close` waits for an in-flight `set_power` and its low write
//! is always the last one.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use winch_core::{
    Board, Dependencies, Extra, Logger, Motor, Name, Properties, Resource, ResourceConfig,
    WinchError, WinchResult,
};

use crate::config::Config;
use crate::pins::{set_pin, PinValue, PROPELLER_PIN};

/// Motor that switches the propeller pin on a shared board.
pub struct WinchMotor {
    name: Name,
    logger: Logger,
    board: Mutex<Option<Arc<dyn Board>>>,
}

impl std::fmt::Debug for WinchMotor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let board = match self.board.try_lock() {
            Ok(slot) => slot.as_ref().map(|b| b.name().to_string()),
            Err(_) => Some("<busy>".to_string()),
        };
        f.debug_struct("WinchMotor")
            .field("name", &self.name)
            .field("board", &board)
            .finish()
    }
}

impl WinchMotor {
    /// Create an unbound motor. No hardware is touched until [`Resource::reconfigure`].
    pub fn new(name: Name, logger: Logger) -> Self {
        Self {
            name,
            logger,
            board: Mutex::new(None),
        }
    }

    /// Whether a board is currently bound.
    ///
    /// Waits for any pin write in progress.
    pub async fn is_bound(&self) -> bool {
        self.board.lock().await.is_some()
    }

    /// Name of the bound board, if any.
    pub async fn board_name(&self) -> Option<String> {
        self.board.lock().await.as_ref().map(|b| b.name().to_string())
    }
}

/// Registry constructor: builds an unbound [`WinchMotor`] named after `conf`.
pub fn new_winch_motor(
    _deps: &Dependencies,
    conf: &ResourceConfig,
    logger: Logger,
) -> WinchResult<Arc<dyn Motor>> {
    Ok(Arc::new(WinchMotor::new(conf.name.clone(), logger)))
}

#[async_trait]
impl Resource for WinchMotor {
    fn name(&self) -> &Name {
        &self.name
    }

    async fn reconfigure(&self, deps: &Dependencies, conf: &ResourceConfig) -> WinchResult<()> {
        let mut slot = self.board.lock().await;
        *slot = None;

        let config: Config = conf.native_config()?;
        let board = deps
            .board(&config.board)
            .map_err(|source| WinchError::DependencyResolution {
                board: config.board.clone(),
                source: Box::new(source),
            })?;

        self.logger
            .in_scope(|| tracing::info!(board = %config.board, "winch motor bound to board"));
        *slot = Some(board);
        Ok(())
    }

    /// Drive the propeller pin low and release the board.
    ///
    /// Waits for an in-flight `set_power` first. The board is released even when the
    /// final write fails.
    async fn close(&self) -> WinchResult<()> {
        let mut slot = self.board.lock().await;
        let Some(board) = slot.take() else {
            self.logger.debug("close: no board bound");
            return Ok(());
        };

        let result = set_pin(board.as_ref(), &self.logger, PinValue::new(PROPELLER_PIN, false)).await;
        drop(slot);
        self.logger.debug("close: board released");
        result
    }
}

#[async_trait]
impl Motor for WinchMotor {
    /// Switch the propeller on at full power (`power == 1`) and off for anything else.
    ///
    /// This is an on/off threshold, not proportional control.
    async fn set_power(&self, power: f64, _extra: Option<&Extra>) -> WinchResult<()> {
        let slot = self.board.lock().await;
        let board = slot
            .as_ref()
            .ok_or_else(|| WinchError::Unbound(self.name.to_string()))?;
        #[allow(clippy::float_cmp)]
        let high = power == 1.0;
        set_pin(board.as_ref(), &self.logger, PinValue::new(PROPELLER_PIN, high)).await
    }

    async fn go_for(&self, _rpm: f64, _revolutions: f64, _extra: Option<&Extra>) -> WinchResult<()> {
        Err(WinchError::Unimplemented("GoFor"))
    }

    async fn go_to(
        &self,
        _rpm: f64,
        _position_revolutions: f64,
        _extra: Option<&Extra>,
    ) -> WinchResult<()> {
        Err(WinchError::Unimplemented("GoTo"))
    }

    async fn set_rpm(&self, _rpm: f64, _extra: Option<&Extra>) -> WinchResult<()> {
        Err(WinchError::Unimplemented("SetRPM"))
    }

    async fn reset_zero_position(&self, _offset: f64, _extra: Option<&Extra>) -> WinchResult<()> {
        Err(WinchError::Unimplemented("ResetZeroPosition"))
    }

    async fn position(&self, _extra: Option<&Extra>) -> WinchResult<f64> {
        Err(WinchError::Unimplemented("Position"))
    }

    async fn is_moving(&self) -> WinchResult<bool> {
        Err(WinchError::Unimplemented("IsMoving"))
    }

    async fn is_powered(&self, _extra: Option<&Extra>) -> WinchResult<(bool, f64)> {
        Err(WinchError::Unimplemented("IsPowered"))
    }

    async fn properties(&self, _extra: Option<&Extra>) -> WinchResult<Properties> {
        Err(WinchError::Unimplemented("Properties"))
    }

    async fn stop(&self, _extra: Option<&Extra>) -> WinchResult<()> {
        Err(WinchError::Unimplemented("Stop"))
    }
}
