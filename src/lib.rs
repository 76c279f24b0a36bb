//! # Drive Config
//!
//! Physical and kinematic description of a wheeled robot's drivetrain.
//!
//! The central type is [`RobotConfig`], an immutable value object built once
//! per robot which converts between whole-body [`ChassisSpeeds`] and
//! per-wheel [`WheelState`]s for holonomic (swerve style) and differential
//! drivetrains, and which pre-computes the traction limits used by
//! force-limited motion planning.
//!
//! Configs can be built directly from physical parameters, or loaded from the
//! persisted settings file via the [`settings`] module.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod error;
pub mod kinematics;
pub mod module_config;
pub mod motor;
pub mod robot_config;
pub mod settings;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use error::ConfigError;
pub use kinematics::{ChassisSpeeds, KinematicsError, WheelState};
pub use module_config::ModuleConfig;
pub use motor::DcMotor;
pub use robot_config::{Drivetrain, RobotConfig};
