//! Differential drive kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{ChassisSpeeds, KinematicsError, WheelState};
use crate::error::{check_positive, ConfigError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// A differential drivetrain always has exactly two wheels, left then right.
const NUM_WHEELS: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematics solver for a two-sided (tank style) drivetrain.
///
/// Translation and rotation are coupled through the two wheel speeds, so this
/// topology cannot represent a lateral velocity - any `vy` component of a
/// commanded chassis speed is ignored, and recovered chassis speeds always
/// have `vy` of zero.
#[derive(Clone, Copy, Debug)]
pub struct DifferentialDriveKinematics {
    /// Distance between the left and right wheels.
    ///
    /// Units: meters
    trackwidth_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DifferentialDriveKinematics {
    /// Build a solver for the given trackwidth, which must be finite and
    /// strictly positive.
    pub fn new(trackwidth_m: f64) -> Result<Self, ConfigError> {
        check_positive("trackwidth_m", trackwidth_m)?;

        Ok(Self { trackwidth_m })
    }

    /// The distance between the left and right wheels.
    ///
    /// Units: meters
    pub fn trackwidth_m(&self) -> f64 {
        self.trackwidth_m
    }

    pub fn num_modules(&self) -> usize {
        NUM_WHEELS
    }

    /// Convert chassis speeds into `[left, right]` wheel states.
    ///
    /// Wheel angles are always zero since the wheels cannot steer. The
    /// lateral component of the chassis speeds is not representable and is
    /// ignored.
    pub fn to_wheel_states(&self, speeds: ChassisSpeeds) -> Vec<WheelState> {
        let half_track = self.trackwidth_m / 2.0;

        vec![
            WheelState::new(speeds.vx_ms - speeds.omega_rads * half_track, 0.0),
            WheelState::new(speeds.vx_ms + speeds.omega_rads * half_track, 0.0),
        ]
    }

    /// Convert `[left, right]` wheel states back into chassis speeds.
    ///
    /// The lateral component of the result is always zero.
    pub fn to_chassis_speeds(&self, states: &[WheelState]) -> Result<ChassisSpeeds, KinematicsError> {
        if states.len() != NUM_WHEELS {
            return Err(KinematicsError::WrongModuleCount {
                expected: NUM_WHEELS,
                actual: states.len(),
            });
        }

        let left_ms = states[0].speed_ms;
        let right_ms = states[1].speed_ms;

        Ok(ChassisSpeeds {
            vx_ms: (left_ms + right_ms) / 2.0,
            vy_ms: 0.0,
            omega_rads: (right_ms - left_ms) / self.trackwidth_m,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
