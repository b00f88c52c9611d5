//! Loading robot files from disk and bringing the bench robot up from them.

mod common;

use std::io::Write;

use common::{propeller, registry};
use ptr_winch_motor::robot::{ConfigError, Robot, RobotConfig};
use ptr_winch_motor::MODEL;
use tempfile::NamedTempFile;
use winch_core::Motor;

const ROBOT_TOML: &str = r#"
[[boards]]
name = "pi"
pins = ["29", "31"]

[[components]]
name = "winch"
model = "pulltorefresh:ptrwinchmotor:ptrwinchmotor"
attributes = { "board-1" = "pi" }
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_robot_file() {
    let file = write_config(ROBOT_TOML);

    let config = RobotConfig::load_from(file.path()).unwrap();

    assert_eq!(config.boards.len(), 1);
    assert_eq!(config.boards[0].pins, vec!["29", "31"]);
    assert_eq!(config.components[0].model, MODEL);
    assert_eq!(config.implicit_dependencies(0).unwrap(), vec!["pi"]);
}

#[test]
fn test_load_rejects_bad_model() {
    let file = write_config(&ROBOT_TOML.replace(
        "pulltorefresh:ptrwinchmotor:ptrwinchmotor",
        "pulltorefresh:ptrwinchmotor",
    ));

    let err = RobotConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}

#[test]
fn test_load_rejects_blank_board() {
    let file = write_config(&ROBOT_TOML.replace(r#""board-1" = "pi""#, r#""board-1" = """#));

    let err = RobotConfig::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("board-1"), "{err}");
}

#[test]
fn test_load_rejects_undeclared_board() {
    let file = write_config(&ROBOT_TOML.replace(r#""board-1" = "pi""#, r#""board-1" = "b2""#));

    let err = RobotConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[tokio::test]
async fn test_robot_from_file_drives_pin() {
    let file = write_config(ROBOT_TOML);
    let config = RobotConfig::load_from(file.path()).unwrap();
    let registry = registry();

    let robot = Robot::start(&config, &registry).await.unwrap();
    assert_eq!(robot.motor_names(), vec!["winch"]);

    let board = robot.board("pi").unwrap();
    let pin = propeller(&board);
    robot
        .motor("winch")
        .unwrap()
        .set_power(1.0, None)
        .await
        .unwrap();
    assert!(pin.level());
    assert!(!board.pin("31").unwrap().level());

    assert!(robot.shutdown().await.is_empty());
    assert!(!pin.level());
}

#[tokio::test]
async fn test_robot_reconfigure_to_missing_board() {
    let file = write_config(ROBOT_TOML);
    let config = RobotConfig::load_from(file.path()).unwrap();
    let registry = registry();
    let robot = Robot::start(&config, &registry).await.unwrap();

    let mut changed = config.components[0].clone();
    changed
        .attributes
        .insert("board-1".into(), serde_json::Value::from("gone"));

    assert!(robot.reconfigure(&changed).await.is_err());
    assert!(robot
        .motor("winch")
        .unwrap()
        .set_power(1.0, None)
        .await
        .unwrap_err()
        .is_unbound());
}
