//! Settings file loader
//!
//! Thin adapter between the persisted JSON settings file (whose format is
//! owned by the external settings producer) and the pure [`RobotConfig`]
//! constructors. All file system and parsing concerns, along with the catalog
//! of named drive motors, live here and never reach the core.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

// Internal
use crate::error::{check_positive, ConfigError};
use crate::module_config::ModuleConfig;
use crate::motor::DcMotor;
use crate::robot_config::RobotConfig;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Deserialized settings file record.
///
/// Field names mirror the keys of the external JSON format.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    #[serde(rename = "holonomicMode")]
    pub holonomic_mode: bool,

    /// Units: kilograms
    #[serde(rename = "robotMass")]
    pub robot_mass_kg: f64,

    /// Units: kilogram-meters^2
    #[serde(rename = "robotMOI")]
    pub robot_moi_kgm2: f64,

    /// Units: meters
    #[serde(rename = "robotWheelbase")]
    pub robot_wheelbase_m: f64,

    /// Units: meters
    #[serde(rename = "robotTrackwidth")]
    pub robot_trackwidth_m: f64,

    /// Units: meters
    #[serde(rename = "driveWheelRadius")]
    pub drive_wheel_radius_m: f64,

    /// Gearbox reduction between drive motor and wheel.
    #[serde(rename = "driveGearing")]
    pub drive_gearing: f64,

    /// Units: meters/second
    #[serde(rename = "maxDriveSpeed")]
    pub max_drive_speed_ms: f64,

    #[serde(rename = "wheelCOF")]
    pub wheel_cof: f64,

    /// Name of the drive motor model, resolved against the catalog in this
    /// module.
    #[serde(rename = "driveMotorType")]
    pub drive_motor_type: String,

    /// Units: amps
    #[serde(rename = "driveCurrentLimit")]
    pub drive_current_limit_a: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs while loading the settings file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot load the settings file: {0}")]
    FileLoadError(#[from] std::io::Error),

    #[error("Cannot read the settings file: {0}")]
    DeserialiseError(#[from] serde_json::Error),

    #[error("Unsupported drive motor type: {0:?}")]
    UnsupportedMotorType(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a [`RobotConfig`] from the settings file at the given path.
pub fn load<P: AsRef<Path>>(settings_file_path: P) -> Result<RobotConfig, LoadError> {
    let settings_str = read_to_string(settings_file_path)?;
    let settings: Settings = serde_json::from_str(&settings_str)?;

    from_settings(&settings)
}

/// Build a [`RobotConfig`] from an already deserialized settings record.
pub fn from_settings(settings: &Settings) -> Result<RobotConfig, LoadError> {
    check_positive("driveGearing", settings.drive_gearing)?;

    // Holonomic modules are driven by a single motor, differential sides by
    // two
    let num_motors = if settings.holonomic_mode { 1 } else { 2 };

    let drive_motor = resolve_drive_motor(&settings.drive_motor_type, num_motors)?
        .with_reduction(settings.drive_gearing);

    let module_config = ModuleConfig::new(
        settings.drive_wheel_radius_m,
        settings.max_drive_speed_ms,
        settings.wheel_cof,
        drive_motor,
        settings.drive_current_limit_a,
    )?;

    let config = if settings.holonomic_mode {
        RobotConfig::holonomic(
            settings.robot_mass_kg,
            settings.robot_moi_kgm2,
            module_config,
            settings.robot_trackwidth_m,
            settings.robot_wheelbase_m,
        )?
    } else {
        RobotConfig::differential(
            settings.robot_mass_kg,
            settings.robot_moi_kgm2,
            module_config,
            settings.robot_trackwidth_m,
        )?
    };

    debug!(
        "Loaded {} robot config: {} modules, {:.1} kg",
        if config.is_holonomic() {
            "holonomic"
        } else {
            "differential"
        },
        config.num_modules,
        config.mass_kg
    );

    Ok(config)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Resolve a drive motor type name against the catalog of supported motors.
///
/// Nameplate constants are the manufacturers' published 12 V figures.
fn resolve_drive_motor(motor_type: &str, num_motors: usize) -> Result<DcMotor, LoadError> {
    let rpm = DcMotor::rpm_to_radps;

    let motor = match motor_type {
        "krakenX60" => DcMotor::new(12.0, 7.09, 366.0, 2.0, rpm(6000.0), num_motors),
        "krakenX60FOC" => DcMotor::new(12.0, 9.37, 483.0, 2.0, rpm(5800.0), num_motors),
        "falcon500" => DcMotor::new(12.0, 4.69, 257.0, 1.5, rpm(6380.0), num_motors),
        "falcon500FOC" => DcMotor::new(12.0, 5.84, 304.0, 1.5, rpm(6080.0), num_motors),
        "vortex" => DcMotor::new(12.0, 3.60, 211.0, 3.6, rpm(6784.0), num_motors),
        "NEO" => DcMotor::new(12.0, 2.6, 105.0, 1.8, rpm(5676.0), num_motors),
        "CIM" => DcMotor::new(12.0, 2.42, 133.0, 2.7, rpm(5330.0), num_motors),
        "miniCIM" => DcMotor::new(12.0, 1.41, 89.0, 3.0, rpm(5840.0), num_motors),
        _ => return Err(LoadError::UnsupportedMotorType(motor_type.to_string())),
    };

    Ok(motor)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn settings_json(motor_type: &str, holonomic: bool) -> String {
        format!(
            r#"{{
                "holonomicMode": {},
                "robotMass": 50.0,
                "robotMOI": 6.8,
                "robotWheelbase": 0.7,
                "robotTrackwidth": 0.5,
                "driveWheelRadius": 0.05,
                "driveGearing": 6.75,
                "maxDriveSpeed": 4.5,
                "wheelCOF": 1.0,
                "driveMotorType": "{}",
                "driveCurrentLimit": 60.0
            }}"#,
            holonomic, motor_type
        )
    }

    #[test]
    fn test_holonomic_settings() {
        let settings: Settings =
            serde_json::from_str(&settings_json("krakenX60", true)).unwrap();
        let config = from_settings(&settings).unwrap();

        assert!(config.is_holonomic());
        assert_eq!(config.num_modules, 4);
        assert_eq!(config.mass_kg, 50.0);
        assert_eq!(config.moi_kgm2, 6.8);
        assert_eq!(config.module_config.wheel_radius_m, 0.05);
        assert!((config.wheel_friction_force_n - 122.5).abs() < 1e-9);
    }

    #[test]
    fn test_differential_settings() {
        let settings: Settings = serde_json::from_str(&settings_json("CIM", false)).unwrap();
        let config = from_settings(&settings).unwrap();

        assert!(!config.is_holonomic());
        assert_eq!(config.num_modules, 2);

        // Two motors per side: stall torque doubles before gearing
        assert!((config.module_config.drive_motor.stall_torque_nm - 2.0 * 2.42 * 6.75).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_motor_type() {
        let settings: Settings =
            serde_json::from_str(&settings_json("brushedMystery", true)).unwrap();

        match from_settings(&settings) {
            Err(LoadError::UnsupportedMotorType(name)) => assert_eq!(name, "brushedMystery"),
            other => panic!("Expected UnsupportedMotorType, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_gearing_rejected() {
        let mut settings: Settings =
            serde_json::from_str(&settings_json("NEO", true)).unwrap();
        settings.drive_gearing = 0.0;

        assert!(matches!(
            from_settings(&settings),
            Err(LoadError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut path = std::env::temp_dir();
        path.push("drive_config_test_settings.json");
        std::fs::write(&path, settings_json("NEO", true)).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.num_modules, 4);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = load("/nonexistent/settings.json");
        assert!(matches!(result, Err(LoadError::FileLoadError(_))));
    }
}
