//! Drivetrain kinematics
//!
//! Conversions between whole-body chassis speeds and per-wheel states for the
//! two supported drivetrain topologies. Both solvers are pure - they hold
//! fixed geometry and no mutable state, so a single instance can be shared
//! freely between threads.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod differential;
mod swerve;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
pub use differential::DifferentialDriveKinematics;
pub use swerve::SwerveDriveKinematics;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Robot-relative velocity of the chassis as a whole.
///
/// Frame: robot body, +x forward, +y left, +angle counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChassisSpeeds {
    /// Forward velocity.
    ///
    /// Units: meters/second
    pub vx_ms: f64,

    /// Lateral velocity, positive to the left.
    ///
    /// Units: meters/second
    pub vy_ms: f64,

    /// Angular rate, positive counter-clockwise.
    ///
    /// Units: radians/second
    pub omega_rads: f64,
}

/// The state of a single drive module - the linear speed of its wheel and the
/// steering angle of the module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    /// Linear speed of the wheel at the contact point.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// Steering angle relative to the robot's +x axis. Always zero for
    /// differential drivetrains, which have no steering freedom.
    ///
    /// Units: radians
    pub angle_rad: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors raised by the kinematics solvers.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    /// The wheel state sequence passed to a chassis speeds conversion does
    /// not have one entry per drive module. This is rejected rather than
    /// truncated or padded, since a silent fixup would corrupt downstream
    /// control.
    #[error("Expected {expected} wheel states, got {actual}")]
    WrongModuleCount { expected: usize, actual: usize },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ChassisSpeeds {
    pub fn new(vx_ms: f64, vy_ms: f64, omega_rads: f64) -> Self {
        Self {
            vx_ms,
            vy_ms,
            omega_rads,
        }
    }
}

impl WheelState {
    pub fn new(speed_ms: f64, angle_rad: f64) -> Self {
        Self { speed_ms, angle_rad }
    }
}
