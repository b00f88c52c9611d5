//! Native configuration for the winch motor model.

use serde::{Deserialize, Serialize};
use winch_core::{WinchError, WinchResult};

/// Attributes recognised by the winch motor.
///
/// ```json
/// { "board-1": "pi" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the board dependency that carries the winch pins.
    #[serde(rename = "board-1")]
    pub board: String,
}

impl Config {
    /// Validate the attributes and return the implicit dependencies the host must
    /// resolve before construction.
    ///
    /// `path` is the config location used in error messages.
    pub fn validate(&self, path: &str) -> WinchResult<Vec<String>> {
        if self.board.trim().is_empty() {
            return Err(WinchError::Configuration(format!(
                r#"expected "board-1" attribute for winch motor {path:?}"#
            )));
        }
        Ok(vec![self.board.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_board_attribute() {
        let config: Config = serde_json::from_str(r#"{"board-1": "pi"}"#).unwrap();
        assert_eq!(config.board, "pi");
        assert_eq!(config.validate("components.0").unwrap(), vec!["pi"]);
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let config: Config =
            serde_json::from_str(r#"{"board-1": "pi", "motorL": "left"}"#).unwrap();
        assert_eq!(config.board, "pi");
    }

    #[test]
    fn test_missing_board_attribute() {
        assert!(serde_json::from_str::<Config>("{}").is_err());
        assert!(serde_json::from_str::<Config>(r#"{"board-1": 3}"#).is_err());
    }

    #[test]
    fn test_empty_board_is_a_configuration_error() {
        for board in ["", "   "] {
            let config = Config {
                board: board.to_string(),
            };
            let err = config.validate("components.0").unwrap_err();
            assert!(matches!(err, WinchError::Configuration(_)));
            assert!(err.to_string().contains("board-1"));
        }
    }
}
