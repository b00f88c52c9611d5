//! Mock Board Implementations
//!
//! Provides simulated boards for exercising components without physical hardware.
//! Every pin lookup and every pin write is recorded so tests can assert on exactly
//! what a component did (or did not do) to the board.
//!
//! # Available Mocks
//!
//! - `MockBoard` - Named board with a fixed set of GPIO pins
//! - `MockPin` - Recording GPIO pin with optional write-failure injection
//! - `WriteGate` - Holds pin writes mid-flight so tests can interleave callers
//!
//! # Example
//!
//! ```rust,ignore
//! let board = MockBoard::with_pins("b1", ["29"]);
//! let pin = board.gpio_pin_by_name("29")?;
//! pin.set(true, None).await?;
//! assert_eq!(board.pin("29").unwrap().writes(), vec![true]);
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Notify, Semaphore};
use winch_core::{Board, BoardError, Extra, GpioPin};

// =============================================================================
// WriteGate - Held Writes
// =============================================================================

/// Gate installed by [`MockPin::hold_writes`].
///
/// Every write that reaches a held pin signals [`WriteGate::entered`] and then waits
/// until [`MockPin::release_writes`] opens the gate.
#[derive(Debug)]
pub struct WriteGate {
    entered: Notify,
    open: Semaphore,
}

impl WriteGate {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            open: Semaphore::new(0),
        }
    }

    /// Resolves once a write is parked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    async fn pass(&self) {
        self.entered.notify_one();
        // closed semaphore == open gate
        let _ = self.open.acquire().await;
    }
}

// =============================================================================
// MockPin - Recording GPIO Pin
// =============================================================================

/// GPIO pin that remembers its level and every write it received.
#[derive(Debug)]
pub struct MockPin {
    name: String,
    level: AtomicBool,
    writes: Mutex<Vec<bool>>,
    fail_writes: AtomicBool,
    gate: Mutex<Option<Arc<WriteGate>>>,
}

impl MockPin {
    /// Create a pin that starts low.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: AtomicBool::new(false),
            writes: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
            gate: Mutex::new(None),
        }
    }

    /// Pin name on its board.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current logic level.
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Every level successfully written, oldest first.
    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().clone()
    }

    /// Make subsequent writes fail with a hardware error (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Park every subsequent write until [`MockPin::release_writes`].
    pub fn hold_writes(&self) -> Arc<WriteGate> {
        let gate = Arc::new(WriteGate::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    /// Let parked writes through and stop holding new ones.
    pub fn release_writes(&self) {
        if let Some(gate) = self.gate.lock().take() {
            gate.open.close();
        }
    }
}

#[async_trait]
impl GpioPin for MockPin {
    async fn set(&self, high: bool, _extra: Option<&Extra>) -> Result<(), BoardError> {
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BoardError::Hardware(format!(
                "injected write failure on pin {}",
                self.name
            )));
        }
        self.level.store(high, Ordering::SeqCst);
        self.writes.lock().push(high);
        tracing::trace!(pin = %self.name, high, "MockPin: level set");
        Ok(())
    }

    async fn get(&self, _extra: Option<&Extra>) -> Result<bool, BoardError> {
        Ok(self.level())
    }
}

// =============================================================================
// MockBoard - Simulated Board
// =============================================================================

/// Board with a fixed pin set that records lookups.
#[derive(Debug)]
pub struct MockBoard {
    name: String,
    pins: BTreeMap<String, Arc<MockPin>>,
    lookups: Mutex<Vec<String>>,
}

impl MockBoard {
    /// Create a board with no pins.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: BTreeMap::new(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Create a board exposing the given pin names.
    pub fn with_pins<I, S>(name: impl Into<String>, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut board = Self::new(name);
        for pin in pins {
            let pin = pin.into();
            board.pins.insert(pin.clone(), Arc::new(MockPin::new(pin)));
        }
        board
    }

    /// Concrete handle to a pin, for inspection in tests.
    pub fn pin(&self, name: &str) -> Option<Arc<MockPin>> {
        self.pins.get(name).cloned()
    }

    /// Pin names, sorted.
    pub fn pin_names(&self) -> Vec<String> {
        self.pins.keys().cloned().collect()
    }

    /// Every pin name looked up so far, including failed lookups.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }

    /// Lookups plus successful writes across all pins.
    pub fn operation_count(&self) -> usize {
        let writes: usize = self.pins.values().map(|pin| pin.writes().len()).sum();
        self.lookups.lock().len() + writes
    }
}

impl Board for MockBoard {
    fn name(&self) -> &str {
        &self.name
    }

    fn gpio_pin_by_name(&self, name: &str) -> Result<Arc<dyn GpioPin>, BoardError> {
        self.lookups.lock().push(name.to_string());
        match self.pins.get(name) {
            Some(pin) => Ok(pin.clone() as Arc<dyn GpioPin>),
            None => Err(BoardError::PinNotFound(name.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_pin_records_writes() {
        let board = MockBoard::with_pins("b1", ["29"]);

        let pin = board.gpio_pin_by_name("29").unwrap();
        pin.set(true, None).await.unwrap();
        pin.set(false, None).await.unwrap();

        let mock = board.pin("29").unwrap();
        assert_eq!(mock.writes(), vec![true, false]);
        assert!(!mock.level());
        assert!(!pin.get(None).await.unwrap());
        assert_eq!(board.operation_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_pin_is_recorded() {
        let board = MockBoard::with_pins("b1", ["29"]);

        let result = board.gpio_pin_by_name("40");
        assert!(matches!(result, Err(BoardError::PinNotFound(name)) if name == "40"));
        assert_eq!(board.lookups(), vec!["40".to_string()]);
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let board = MockBoard::with_pins("b1", ["29"]);
        let mock = board.pin("29").unwrap();
        mock.set_fail_writes(true);

        let pin = board.gpio_pin_by_name("29").unwrap();
        assert!(matches!(
            pin.set(true, None).await,
            Err(BoardError::Hardware(_))
        ));
        assert!(mock.writes().is_empty());

        // Recovers once the fault is cleared
        mock.set_fail_writes(false);
        pin.set(true, None).await.unwrap();
        assert!(mock.level());
    }

    #[tokio::test]
    async fn test_held_write_lands_after_release() {
        let board = Arc::new(MockBoard::with_pins("b1", ["29"]));
        let mock = board.pin("29").unwrap();
        let gate = mock.hold_writes();

        let writer = tokio::spawn({
            let board = board.clone();
            async move {
                let pin = board.gpio_pin_by_name("29")?;
                pin.set(true, None).await
            }
        });
        gate.entered().await;
        assert!(mock.writes().is_empty());

        mock.release_writes();
        writer.await.unwrap().unwrap();
        assert_eq!(mock.writes(), vec![true]);

        // gate is gone, later writes go straight through
        mock.set(false, None).await.unwrap();
        assert!(!mock.level());
    }

    #[test]
    fn test_board_name_and_pins() {
        let board = MockBoard::with_pins("b1", ["31", "29"]);
        assert_eq!(board.name(), "b1");
        assert_eq!(board.pin_names(), vec!["29".to_string(), "31".to_string()]);
        assert_eq!(board.operation_count(), 0);
    }
}
