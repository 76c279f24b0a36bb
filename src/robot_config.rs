//! Robot configuration structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector2;

// Internal
use crate::error::{check_positive, ConfigError};
use crate::kinematics::{
    ChassisSpeeds, DifferentialDriveKinematics, KinematicsError, SwerveDriveKinematics, WheelState,
};
use crate::module_config::ModuleConfig;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Acceleration due to gravity.
///
/// Units: meters/second^2
const GRAVITY_MS2: f64 = 9.8;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The drivetrain topology and its kinematics solver.
///
/// Exactly one solver exists for the lifetime of a config, so dispatching on
/// the wrong topology is unrepresentable rather than a runtime error.
#[derive(Clone, Debug)]
pub enum Drivetrain {
    /// Swerve-style drivetrain able to translate and rotate independently.
    Holonomic(SwerveDriveKinematics),

    /// Two-sided drivetrain with velocity and rotation coupled through the
    /// left and right wheel speeds.
    Differential(DifferentialDriveKinematics),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything that needs to be known about the robot's drivetrain to plan
/// force-limited motion.
///
/// Built once per robot, immutable afterwards. All conversions are pure
/// functions of the fixed geometry, so a single instance can be shared
/// between any number of concurrent readers.
#[derive(Clone, Debug)]
pub struct RobotConfig {
    /// Mass of the robot, including battery and bumpers.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Moment of inertia of the robot about its vertical axis.
    ///
    /// Units: kilogram-meters^2
    pub moi_kgm2: f64,

    /// Physical parameters shared by every drive module.
    pub module_config: ModuleConfig,

    /// Position of each module's contact point in the robot body frame. The
    /// order is fixed for the lifetime of the config and defines the index
    /// correspondence of every per-module sequence, including the wheel
    /// states produced and consumed by the conversions.
    ///
    /// Units: meters,
    /// Frame: robot body, +x forward, +y left
    pub module_locations: Vec<Vector2<f64>>,

    /// The drivetrain topology and its kinematics solver.
    pub drivetrain: Drivetrain,

    // ---- DERIVED ----

    /// Number of drive modules.
    pub num_modules: usize,

    /// Distance from the robot centre to each module's contact point, in
    /// module order.
    ///
    /// Units: meters
    pub module_pivot_dist_m: Vec<f64>,

    /// Static friction force available at each wheel, assuming even weight
    /// distribution across the modules.
    ///
    /// Units: newtons
    pub wheel_friction_force_n: f64,

    /// Maximum torque a module can apply before its wheel breaks traction.
    ///
    /// Units: newton-meters
    pub max_torque_friction_nm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RobotConfig {
    /// Build a config for a holonomic robot with the standard rectangular
    /// four-module layout.
    ///
    /// Module locations are derived from the trackwidth (left-right span) and
    /// wheelbase (front-back span), in the order front-left, front-right,
    /// back-left, back-right.
    pub fn holonomic(
        mass_kg: f64,
        moi_kgm2: f64,
        module_config: ModuleConfig,
        trackwidth_m: f64,
        wheelbase_m: f64,
    ) -> Result<Self, ConfigError> {
        check_positive("trackwidth_m", trackwidth_m)?;
        check_positive("wheelbase_m", wheelbase_m)?;

        let module_locations = vec![
            Vector2::new(wheelbase_m / 2.0, trackwidth_m / 2.0),
            Vector2::new(wheelbase_m / 2.0, -trackwidth_m / 2.0),
            Vector2::new(-wheelbase_m / 2.0, trackwidth_m / 2.0),
            Vector2::new(-wheelbase_m / 2.0, -trackwidth_m / 2.0),
        ];

        Self::holonomic_with_locations(mass_kg, moi_kgm2, module_config, module_locations)
    }

    /// Build a config for a holonomic robot with an explicit module layout of
    /// at least 2 locations.
    pub fn holonomic_with_locations(
        mass_kg: f64,
        moi_kgm2: f64,
        module_config: ModuleConfig,
        module_locations: Vec<Vector2<f64>>,
    ) -> Result<Self, ConfigError> {
        let kinematics = SwerveDriveKinematics::new(&module_locations)?;

        Self::finish(
            mass_kg,
            moi_kgm2,
            module_config,
            module_locations,
            Drivetrain::Holonomic(kinematics),
        )
    }

    /// Build a config for a differential drive robot.
    ///
    /// The two wheels sit at (0, ±trackwidth/2), left then right.
    pub fn differential(
        mass_kg: f64,
        moi_kgm2: f64,
        module_config: ModuleConfig,
        trackwidth_m: f64,
    ) -> Result<Self, ConfigError> {
        let kinematics = DifferentialDriveKinematics::new(trackwidth_m)?;

        let module_locations = vec![
            Vector2::new(0.0, trackwidth_m / 2.0),
            Vector2::new(0.0, -trackwidth_m / 2.0),
        ];

        Self::finish(
            mass_kg,
            moi_kgm2,
            module_config,
            module_locations,
            Drivetrain::Differential(kinematics),
        )
    }

    /// Validate the shared scalars and compute the derived constants.
    fn finish(
        mass_kg: f64,
        moi_kgm2: f64,
        module_config: ModuleConfig,
        module_locations: Vec<Vector2<f64>>,
        drivetrain: Drivetrain,
    ) -> Result<Self, ConfigError> {
        check_positive("mass_kg", mass_kg)?;
        check_positive("moi_kgm2", moi_kgm2)?;

        let num_modules = module_locations.len();
        let module_pivot_dist_m = module_locations.iter().map(|loc| loc.norm()).collect();

        let wheel_friction_force_n =
            module_config.wheel_cof * (mass_kg / num_modules as f64) * GRAVITY_MS2;
        let max_torque_friction_nm = wheel_friction_force_n * module_config.wheel_radius_m;

        Ok(Self {
            mass_kg,
            moi_kgm2,
            module_config,
            module_locations,
            drivetrain,
            num_modules,
            module_pivot_dist_m,
            wheel_friction_force_n,
            max_torque_friction_nm,
        })
    }

    /// Convert robot-relative chassis speeds into one wheel state per module,
    /// in module order.
    ///
    /// For a differential drivetrain the wheel angles are always zero and any
    /// lateral component of the commanded speeds is ignored.
    pub fn to_wheel_states(&self, speeds: ChassisSpeeds) -> Vec<WheelState> {
        let states = match &self.drivetrain {
            Drivetrain::Holonomic(kin) => kin.to_wheel_states(speeds),
            Drivetrain::Differential(kin) => kin.to_wheel_states(speeds),
        };

        trace!("to_wheel_states({:?}) -> {:?}", speeds, states);

        states
    }

    /// Convert per-module wheel states back into robot-relative chassis
    /// speeds.
    ///
    /// The wheel state slice must have exactly `num_modules` entries in
    /// module order; any other length is rejected rather than truncated or
    /// padded.
    pub fn to_chassis_speeds(&self, states: &[WheelState]) -> Result<ChassisSpeeds, KinematicsError> {
        match &self.drivetrain {
            Drivetrain::Holonomic(kin) => kin.to_chassis_speeds(states),
            Drivetrain::Differential(kin) => kin.to_chassis_speeds(states),
        }
    }

    /// True if this config describes a holonomic drivetrain.
    pub fn is_holonomic(&self) -> bool {
        matches!(self.drivetrain, Drivetrain::Holonomic(_))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
