//! Common test utilities for ptr-winch-motor integration tests
//!
//! This module provides reusable test helpers for:
//! - Building a registry with the winch model registered
//! - Mock board setup with the propeller pin wired
//! - Winch resource configurations

#![allow(dead_code)] // Utilities may not all be used by every test binary

use std::sync::Arc;

use ptr_winch_motor::{register, MODEL, PROPELLER_PIN};
use winch_core::{Board, Dependencies, MotorRegistry, ResourceConfig};
use winch_driver_mock::{MockBoard, MockPin};

/// Registry with the winch model registered once.
pub fn registry() -> MotorRegistry {
    let mut registry = MotorRegistry::new();
    assert!(register(&mut registry));
    registry
}

/// Winch configuration named `name` pointing at `board`.
pub fn winch_config(name: &str, board: &str) -> ResourceConfig {
    ResourceConfig::new(name, MODEL).with_attribute("board-1", board)
}

/// Mock board exposing only the propeller pin.
pub fn propeller_board(name: &str) -> Arc<MockBoard> {
    Arc::new(MockBoard::with_pins(name, [PROPELLER_PIN]))
}

/// Dependency set holding every board in `boards` under its own name.
pub fn deps_of(boards: &[&Arc<MockBoard>]) -> Dependencies {
    let mut deps = Dependencies::new();
    for board in boards {
        deps.insert_board(board.name().to_string(), Arc::clone(*board) as Arc<dyn Board>);
    }
    deps
}

/// The propeller pin of a board built by [`propeller_board`].
pub fn propeller(board: &MockBoard) -> Arc<MockPin> {
    match board.pin(PROPELLER_PIN) {
        Some(pin) => pin,
        None => panic!("board {} has no propeller pin", board.name()),
    }
}
