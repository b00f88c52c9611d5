//! Bench host for the winch motor.
//!
//! Loads a robot file, brings the components up against mock boards and drives them
//! from the command line. Set `RUST_LOG=debug` for lifecycle logs.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ptr_winch_motor::robot::{Robot, RobotConfig};
use tracing_subscriber::EnvFilter;
use winch_core::{Motor, MotorRegistry, WinchResult};

#[derive(Parser, Debug)]
#[command(name = "ptr-winch-motor", version, about = "Bench host for the winch motor")]
struct Cli {
    /// Robot configuration file (TOML)
    #[arg(short, long, default_value = "robot.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered motor models
    Models,
    /// Validate the robot file and print each component's dependencies
    Validate,
    /// Set power on one motor and report the board pins
    SetPower {
        motor: String,
        #[arg(allow_hyphen_values = true)]
        power: f64,
    },
    /// Call every capability on one motor and report the outcome
    Exercise { motor: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut registry = MotorRegistry::new();
    ptr_winch_motor::register(&mut registry);

    match cli.command {
        Command::Models => {
            for model in registry.models() {
                println!("{model}");
            }
        }
        Command::Validate => {
            let config = load(&cli.config)?;
            for (index, component) in config.components.iter().enumerate() {
                let deps = config.implicit_dependencies(index)?;
                println!("{} ({}): depends on {:?}", component.name, component.model, deps);
            }
        }
        Command::SetPower { motor, power } => {
            let config = load(&cli.config)?;
            let robot = Robot::start(&config, &registry).await?;
            let handle = robot
                .motor(&motor)
                .ok_or_else(|| anyhow!("no motor named '{motor}'"))?;

            handle
                .set_power(power, None)
                .await
                .with_context(|| format!("set_power({power}) on '{motor}'"))?;

            for definition in &config.boards {
                let Some(board) = robot.board(&definition.name) else {
                    continue;
                };
                for pin in board.pin_names() {
                    let level = board.pin(&pin).is_some_and(|p| p.level());
                    let level = if level { "high" } else { "low" };
                    println!("{}:{pin} = {level}", definition.name);
                }
            }
            report_shutdown(robot).await;
        }
        Command::Exercise { motor } => {
            let config = load(&cli.config)?;
            let robot = Robot::start(&config, &registry).await?;
            let handle = robot
                .motor(&motor)
                .ok_or_else(|| anyhow!("no motor named '{motor}'"))?;

            exercise(handle.as_ref()).await;
            report_shutdown(robot).await;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<RobotConfig> {
    RobotConfig::load_from(path).with_context(|| format!("loading {}", path.display()))
}

fn outcome<T: std::fmt::Debug>(result: WinchResult<T>) -> String {
    match result {
        Ok(value) => format!("ok {value:?}"),
        Err(err) if err.is_unimplemented() => "unsupported".to_string(),
        Err(err) => format!("failed: {err}"),
    }
}

async fn exercise(motor: &dyn Motor) {
    println!("set_power(1)        {}", outcome(motor.set_power(1.0, None).await));
    println!("set_power(0)        {}", outcome(motor.set_power(0.0, None).await));
    println!("go_for              {}", outcome(motor.go_for(60.0, 1.0, None).await));
    println!("go_to               {}", outcome(motor.go_to(60.0, 1.0, None).await));
    println!("set_rpm             {}", outcome(motor.set_rpm(60.0, None).await));
    println!("reset_zero_position {}", outcome(motor.reset_zero_position(0.0, None).await));
    println!("position            {}", outcome(motor.position(None).await));
    println!("is_moving           {}", outcome(motor.is_moving().await));
    println!("is_powered          {}", outcome(motor.is_powered(None).await));
    println!("properties          {}", outcome(motor.properties(None).await));
    println!("stop                {}", outcome(motor.stop(None).await));
}

async fn report_shutdown(robot: Robot) {
    for err in robot.shutdown().await {
        eprintln!("shutdown: {err}");
    }
}
