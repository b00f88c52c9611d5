//! Pin vocabulary and the pin-write primitive.

use winch_core::{Board, Logger, WinchError, WinchResult};

/// Pin switching the propeller drive.
pub const PROPELLER_PIN: &str = "29";

/// Steering pins. Not driven yet.
pub const TURNING_PINS: [&str; 4] = ["40", "38", "36", "32"];

/// Winch drum pins. Not driven yet.
pub const WINCH_PINS: [&str; 4] = ["31", "33", "35", "37"];

/// One pin write: which pin, and which level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinValue {
    /// Board pin name.
    pub pin: &'static str,
    /// Target level.
    pub high: bool,
}

impl PinValue {
    /// Command driving `pin` to `high`.
    pub fn new(pin: &'static str, high: bool) -> Self {
        Self { pin, high }
    }
}

/// Look up `pv.pin` on `board` and drive it to `pv.high`.
///
/// Failures are logged to `logger` before being returned.
///
/// # Errors
///
/// [`WinchError::PinLookup`] when the board has no such pin, [`WinchError::PinWrite`]
/// when the board rejects the write.
pub async fn set_pin(board: &dyn Board, logger: &Logger, pv: PinValue) -> WinchResult<()> {
    let pin = match board.gpio_pin_by_name(pv.pin) {
        Ok(pin) => pin,
        Err(source) => {
            logger.in_scope(|| {
                tracing::error!(pin = pv.pin, board = board.name(), error = %source, "pin lookup failed")
            });
            return Err(WinchError::PinLookup {
                pin: pv.pin.to_string(),
                source,
            });
        }
    };

    if let Err(source) = pin.set(pv.high, None).await {
        logger.in_scope(|| {
            tracing::error!(pin = pv.pin, high = pv.high, error = %source, "pin write failed")
        });
        return Err(WinchError::PinWrite {
            pin: pv.pin.to_string(),
            source,
        });
    }

    logger.in_scope(|| tracing::trace!(pin = pv.pin, high = pv.high, "pin set"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use winch_driver_mock::MockBoard;

    #[test]
    fn test_pin_vocabulary_is_disjoint() {
        let mut all: Vec<&str> = vec![PROPELLER_PIN];
        all.extend(TURNING_PINS);
        all.extend(WINCH_PINS);
        let mut unique = all.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), all.len());
    }

    #[tokio::test]
    async fn test_set_pin_drives_level() {
        let board = MockBoard::with_pins("b1", [PROPELLER_PIN]);
        let logger = Logger::new("test");

        set_pin(&board, &logger, PinValue::new(PROPELLER_PIN, true))
            .await
            .unwrap();
        set_pin(&board, &logger, PinValue::new(PROPELLER_PIN, false))
            .await
            .unwrap();

        let pin = board.pin(PROPELLER_PIN).unwrap();
        assert_eq!(pin.writes(), vec![true, false]);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_missing_pin_is_logged_and_returned() {
        let board = MockBoard::with_pins("b1", ["40"]);
        let logger = Logger::new("test");

        let err = set_pin(&board, &logger, PinValue::new(PROPELLER_PIN, true))
            .await
            .unwrap_err();

        assert!(matches!(&err, WinchError::PinLookup { pin, .. } if pin == PROPELLER_PIN));
        assert!(logs_contain("pin lookup failed"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_write_failure_is_logged_and_returned() {
        let board = MockBoard::with_pins("b1", [PROPELLER_PIN]);
        board.pin(PROPELLER_PIN).unwrap().set_fail_writes(true);
        let logger = Logger::new("test");

        let err = set_pin(&board, &logger, PinValue::new(PROPELLER_PIN, true))
            .await
            .unwrap_err();

        assert!(matches!(&err, WinchError::PinWrite { pin, .. } if pin == PROPELLER_PIN));
        assert!(logs_contain("pin write failed"));
        // Exactly one attempt, no retry
        assert_eq!(board.lookups().len(), 1);
    }
}
