//! Swerve (holonomic) drive kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{DMatrix, DVector, Vector2};

// Internal
use super::{ChassisSpeeds, KinematicsError, WheelState};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematics solver for a holonomic drivetrain of N >= 2 independently
/// steered drive modules.
///
/// The chassis-to-module mapping is linear: each module's velocity is the
/// chassis translation plus the angular rate crossed with the module's
/// position vector. The module-to-chassis direction solves the same system in
/// a least-squares sense through an SVD pseudo-inverse, computed once at
/// construction. For the usual non-degenerate rectangular geometry the system
/// is full rank and the inversion is exact; for over-determined or unusual
/// geometries the solve is nalgebra's minimum-norm least-squares solution.
#[derive(Clone, Debug)]
pub struct SwerveDriveKinematics {
    /// Module positions in the robot body frame.
    ///
    /// Units: meters,
    /// Frame: robot body
    modules: Vec<Vector2<f64>>,

    /// Pseudo-inverse of the chassis-to-module matrix, shape 3 x 2N.
    forward_kin: DMatrix<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SwerveDriveKinematics {
    /// Singular values below this are treated as zero when inverting the
    /// kinematics matrix.
    const PINV_EPSILON: f64 = 1e-9;

    /// Build a solver from the module positions in the robot body frame.
    ///
    /// At least 2 modules are required.
    pub fn new(modules: &[Vector2<f64>]) -> Result<Self, ConfigError> {
        if modules.len() < 2 {
            return Err(ConfigError::TooFewModules(modules.len()));
        }

        // Chassis-to-module matrix. Each module contributes two rows mapping
        // (vx, vy, omega) to the module's velocity components:
        //
        //     vx_i = vx - omega * y_i
        //     vy_i = vy + omega * x_i
        let mut inverse_kin = DMatrix::<f64>::zeros(2 * modules.len(), 3);
        for (i, module) in modules.iter().enumerate() {
            inverse_kin[(2 * i, 0)] = 1.0;
            inverse_kin[(2 * i, 2)] = -module.y;
            inverse_kin[(2 * i + 1, 1)] = 1.0;
            inverse_kin[(2 * i + 1, 2)] = module.x;
        }

        let forward_kin = inverse_kin
            .pseudo_inverse(Self::PINV_EPSILON)
            .map_err(ConfigError::DegenerateGeometry)?;

        Ok(Self {
            modules: modules.to_vec(),
            forward_kin,
        })
    }

    /// The number of drive modules this solver was built for.
    pub fn num_modules(&self) -> usize {
        self.modules.len()
    }

    /// Convert chassis speeds into one wheel state per module, in module
    /// order.
    ///
    /// A module with zero commanded velocity reports a steering angle of
    /// zero.
    pub fn to_wheel_states(&self, speeds: ChassisSpeeds) -> Vec<WheelState> {
        self.modules
            .iter()
            .map(|module| {
                let vx = speeds.vx_ms - speeds.omega_rads * module.y;
                let vy = speeds.vy_ms + speeds.omega_rads * module.x;

                WheelState {
                    speed_ms: vx.hypot(vy),
                    angle_rad: vy.atan2(vx),
                }
            })
            .collect()
    }

    /// Convert per-module wheel states back into chassis speeds.
    ///
    /// The wheel state slice must have exactly one entry per module, in
    /// module order.
    pub fn to_chassis_speeds(&self, states: &[WheelState]) -> Result<ChassisSpeeds, KinematicsError> {
        if states.len() != self.modules.len() {
            return Err(KinematicsError::WrongModuleCount {
                expected: self.modules.len(),
                actual: states.len(),
            });
        }

        // Stack the module velocity vectors and solve for the chassis twist
        let module_vels = DVector::<f64>::from_iterator(
            2 * states.len(),
            states.iter().flat_map(|s| {
                vec![
                    s.speed_ms * s.angle_rad.cos(),
                    s.speed_ms * s.angle_rad.sin(),
                ]
            }),
        );

        let chassis = &self.forward_kin * module_vels;

        Ok(ChassisSpeeds {
            vx_ms: chassis[0],
            vy_ms: chassis[1],
            omega_rads: chassis[2],
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    /// Square module layout, 0.3 m half-spans, in FL, FR, BL, BR order.
    fn square_modules() -> Vec<Vector2<f64>> {
        vec![
            Vector2::new(0.3, 0.3),
            Vector2::new(0.3, -0.3),
            Vector2::new(-0.3, 0.3),
            Vector2::new(-0.3, -0.3),
        ]
    }

    #[test]
    fn test_too_few_modules_rejected() {
        assert!(SwerveDriveKinematics::new(&[]).is_err());
        assert!(SwerveDriveKinematics::new(&[Vector2::new(0.3, 0.3)]).is_err());
        assert!(SwerveDriveKinematics::new(&square_modules()[..2]).is_ok());
    }

    #[test]
    fn test_pure_translation() {
        let kin = SwerveDriveKinematics::new(&square_modules()).unwrap();

        let states = kin.to_wheel_states(ChassisSpeeds::new(1.5, 0.0, 0.0));

        assert_eq!(states.len(), 4);
        for state in states {
            assert!((state.speed_ms - 1.5).abs() < TOL);
            assert!(state.angle_rad.abs() < TOL);
        }
    }

    #[test]
    fn test_pure_rotation() {
        let kin = SwerveDriveKinematics::new(&square_modules()).unwrap();

        let states = kin.to_wheel_states(ChassisSpeeds::new(0.0, 0.0, 2.0));

        // All wheels travel on a circle of radius |r| at speed |omega| * |r|,
        // tangent to that circle.
        let pivot_dist = (0.3f64.powi(2) + 0.3f64.powi(2)).sqrt();
        for (state, module) in states.iter().zip(square_modules()) {
            assert!((state.speed_ms - 2.0 * pivot_dist).abs() < TOL);

            let expected_angle = (2.0 * module.x).atan2(-2.0 * module.y);
            assert!((state.angle_rad - expected_angle).abs() < TOL);
        }
    }

    #[test]
    fn test_round_trip() {
        let kin = SwerveDriveKinematics::new(&square_modules()).unwrap();
        let speeds = ChassisSpeeds::new(1.2, -0.7, 2.5);

        let recovered = kin.to_chassis_speeds(&kin.to_wheel_states(speeds)).unwrap();

        assert!((recovered.vx_ms - speeds.vx_ms).abs() < TOL);
        assert!((recovered.vy_ms - speeds.vy_ms).abs() < TOL);
        assert!((recovered.omega_rads - speeds.omega_rads).abs() < TOL);
    }

    #[test]
    fn test_round_trip_three_modules() {
        // Non-rectangular geometry, still full rank
        let modules = vec![
            Vector2::new(0.25, 0.0),
            Vector2::new(-0.2, 0.2),
            Vector2::new(-0.2, -0.2),
        ];
        let kin = SwerveDriveKinematics::new(&modules).unwrap();
        let speeds = ChassisSpeeds::new(-0.4, 1.1, -1.8);

        let recovered = kin.to_chassis_speeds(&kin.to_wheel_states(speeds)).unwrap();

        assert!((recovered.vx_ms - speeds.vx_ms).abs() < TOL);
        assert!((recovered.vy_ms - speeds.vy_ms).abs() < TOL);
        assert!((recovered.omega_rads - speeds.omega_rads).abs() < TOL);
    }

    #[test]
    fn test_wrong_module_count_rejected() {
        let kin = SwerveDriveKinematics::new(&square_modules()).unwrap();

        let result = kin.to_chassis_speeds(&[WheelState::new(1.0, 0.0); 3]);

        assert_eq!(
            result,
            Err(KinematicsError::WrongModuleCount {
                expected: 4,
                actual: 3
            })
        );
    }
}
