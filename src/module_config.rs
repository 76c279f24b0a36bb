//! Drive module configuration

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use crate::error::{check_non_negative, check_positive, ConfigError};
use crate::motor::DcMotor;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Physical parameters shared by every drive module on the robot.
///
/// Immutable once built; all derived values are computed by [`ModuleConfig::new`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ModuleConfig {
    /// Radius of the drive wheel.
    ///
    /// Units: meters
    pub wheel_radius_m: f64,

    /// Maximum attainable linear speed of the wheel.
    ///
    /// Units: meters/second
    pub max_drive_speed_ms: f64,

    /// Coefficient of friction between wheel and surface.
    pub wheel_cof: f64,

    /// Model of the motor (and gearbox) driving the wheel, as seen at the
    /// wheel axle.
    pub drive_motor: DcMotor,

    /// Supply current limit applied to the drive motor.
    ///
    /// Units: amps
    pub drive_current_limit_a: f64,

    // ---- DERIVED ----

    /// Maximum attainable angular rate of the wheel.
    ///
    /// Units: radians/second
    pub max_drive_rate_rads: f64,

    /// Torque needed just to spin the wheel at its maximum speed, lost to the
    /// motor's own losses and therefore unavailable for acceleration.
    ///
    /// Units: newton-meters
    pub torque_loss_nm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ModuleConfig {
    /// Build a module config, validating all scalars.
    ///
    /// Wheel radius, max drive speed and current limit must be finite and
    /// strictly positive; the friction coefficient must be non-negative.
    pub fn new(
        wheel_radius_m: f64,
        max_drive_speed_ms: f64,
        wheel_cof: f64,
        drive_motor: DcMotor,
        drive_current_limit_a: f64,
    ) -> Result<Self, ConfigError> {
        check_positive("wheel_radius_m", wheel_radius_m)?;
        check_positive("max_drive_speed_ms", max_drive_speed_ms)?;
        check_non_negative("wheel_cof", wheel_cof)?;
        check_positive("drive_current_limit_a", drive_current_limit_a)?;

        let max_drive_rate_rads = max_drive_speed_ms / wheel_radius_m;
        let torque_loss_nm = drive_motor
            .torque_nm(drive_motor.current_a(max_drive_rate_rads, drive_motor.nominal_voltage_v))
            .max(0.0);

        Ok(Self {
            wheel_radius_m,
            max_drive_speed_ms,
            wheel_cof,
            drive_motor,
            drive_current_limit_a,
            max_drive_rate_rads,
            torque_loss_nm,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_motor() -> DcMotor {
        DcMotor::new(12.0, 2.6, 105.0, 1.8, DcMotor::rpm_to_radps(5676.0), 1).with_reduction(6.75)
    }

    #[test]
    fn test_derived_values() {
        let config = ModuleConfig::new(0.05, 4.5, 1.2, test_motor(), 60.0).unwrap();

        assert!((config.max_drive_rate_rads - 4.5 / 0.05).abs() < 1e-9);
        assert!(config.torque_loss_nm >= 0.0);
    }

    #[test]
    fn test_invalid_scalars_rejected() {
        let motor = test_motor();

        assert!(ModuleConfig::new(0.0, 4.5, 1.2, motor, 60.0).is_err());
        assert!(ModuleConfig::new(0.05, -1.0, 1.2, motor, 60.0).is_err());
        assert!(ModuleConfig::new(0.05, 4.5, -0.5, motor, 60.0).is_err());
        assert!(ModuleConfig::new(0.05, 4.5, 1.2, motor, 0.0).is_err());

        // Zero COF is physically meaningless but not invalid
        assert!(ModuleConfig::new(0.05, 4.5, 0.0, motor, 60.0).is_ok());
    }
}
