//! Steady-state DC motor model
//!
//! The config core treats the drive motor as an opaque source of per-wheel
//! torque and speed limits. The catalog of named motor models lives with the
//! settings loader, not here, so supporting a new motor never touches this
//! module.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steady-state model of a (possibly geared, possibly paralleled) permanent
/// magnet DC motor, characterised by its nameplate constants.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DcMotor {
    /// Voltage at which the nameplate constants were measured.
    ///
    /// Units: volts
    pub nominal_voltage_v: f64,

    /// Torque produced at stall.
    ///
    /// Units: newton-meters
    pub stall_torque_nm: f64,

    /// Current drawn at stall.
    ///
    /// Units: amps
    pub stall_current_a: f64,

    /// Current drawn under no load.
    ///
    /// Units: amps
    pub free_current_a: f64,

    /// Angular velocity under no load.
    ///
    /// Units: radians/second
    pub free_speed_radps: f64,

    // ---- DERIVED ----

    /// Winding resistance.
    ///
    /// Units: ohms
    pub resistance_ohm: f64,

    /// Velocity constant.
    ///
    /// Units: radians/second/volt
    pub kv_radps_per_v: f64,

    /// Torque constant.
    ///
    /// Units: newton-meters/amp
    pub kt_nm_per_a: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DcMotor {
    /// Build a motor model from nameplate constants.
    ///
    /// `num_motors` models several identical motors driving one output in
    /// parallel: torque and current scale, speed does not.
    pub fn new(
        nominal_voltage_v: f64,
        stall_torque_nm: f64,
        stall_current_a: f64,
        free_current_a: f64,
        free_speed_radps: f64,
        num_motors: usize,
    ) -> Self {
        let n = num_motors as f64;
        let stall_torque_nm = stall_torque_nm * n;
        let stall_current_a = stall_current_a * n;
        let free_current_a = free_current_a * n;

        let resistance_ohm = nominal_voltage_v / stall_current_a;
        let kv_radps_per_v =
            free_speed_radps / (nominal_voltage_v - resistance_ohm * free_current_a);
        let kt_nm_per_a = stall_torque_nm / stall_current_a;

        Self {
            nominal_voltage_v,
            stall_torque_nm,
            stall_current_a,
            free_current_a,
            free_speed_radps,
            resistance_ohm,
            kv_radps_per_v,
            kt_nm_per_a,
        }
    }

    /// Return this motor as seen through a gearbox with the given reduction
    /// (> 1 reduces speed and multiplies torque).
    pub fn with_reduction(self, gearing: f64) -> Self {
        Self {
            stall_torque_nm: self.stall_torque_nm * gearing,
            free_speed_radps: self.free_speed_radps / gearing,
            kv_radps_per_v: self.kv_radps_per_v / gearing,
            kt_nm_per_a: self.kt_nm_per_a * gearing,
            ..self
        }
    }

    /// Torque produced at the given current draw.
    ///
    /// Units: newton-meters
    pub fn torque_nm(&self, current_a: f64) -> f64 {
        self.kt_nm_per_a * current_a
    }

    /// Current drawn at the given output speed and applied voltage.
    ///
    /// Units: amps
    pub fn current_a(&self, speed_radps: f64, voltage_v: f64) -> f64 {
        -speed_radps / (self.kv_radps_per_v * self.resistance_ohm)
            + voltage_v / self.resistance_ohm
    }

    /// Convert a rotational speed in revolutions/minute to radians/second.
    pub fn rpm_to_radps(rpm: f64) -> f64 {
        rpm * std::f64::consts::TAU / 60.0
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    fn test_motor(num_motors: usize) -> DcMotor {
        // NEO-like nameplate values
        DcMotor::new(12.0, 2.6, 105.0, 1.8, DcMotor::rpm_to_radps(5676.0), num_motors)
    }

    #[test]
    fn test_derived_constants() {
        let motor = test_motor(1);

        assert!((motor.resistance_ohm - 12.0 / 105.0).abs() < TOL);
        assert!((motor.kt_nm_per_a - 2.6 / 105.0).abs() < TOL);
    }

    #[test]
    fn test_free_current_at_free_speed() {
        let motor = test_motor(1);

        // At free speed under nominal voltage the model must reproduce the
        // nameplate free current
        let current = motor.current_a(motor.free_speed_radps, motor.nominal_voltage_v);
        assert!((current - motor.free_current_a).abs() < 1e-6);
    }

    #[test]
    fn test_paralleling() {
        let single = test_motor(1);
        let double = test_motor(2);

        assert!((double.stall_torque_nm - 2.0 * single.stall_torque_nm).abs() < TOL);
        assert!((double.stall_current_a - 2.0 * single.stall_current_a).abs() < TOL);
        assert!((double.free_speed_radps - single.free_speed_radps).abs() < TOL);
        // Kt is unchanged: twice the torque for twice the current
        assert!((double.kt_nm_per_a - single.kt_nm_per_a).abs() < TOL);
    }

    #[test]
    fn test_reduction() {
        let motor = test_motor(1);
        let geared = motor.with_reduction(5.0);

        assert!((geared.stall_torque_nm - 5.0 * motor.stall_torque_nm).abs() < TOL);
        assert!((geared.free_speed_radps - motor.free_speed_radps / 5.0).abs() < TOL);
        assert!((geared.torque_nm(40.0) - 5.0 * motor.torque_nm(40.0)).abs() < TOL);
    }
}
