//! Named method handles: a human-readable label, an interpolation flag,
//! and a factory that binds a right-hand side to a ready-to-step method.

use crate::coefficients;
use crate::dopri8::Dopri853;
use crate::error::ConfigError;
use crate::everhart::Everhart;
use crate::method::Method;
use crate::system::OdeSystem;
use crate::tableau::RungeKutta;

/// A catalog entry naming one integration scheme.
///
/// The label is for display; the driver uses [`Scheme::build`] and
/// [`Scheme::supports_interpolation`] to pick between [`crate::solve`]
/// and [`crate::solve_with_interpolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Explicit Euler, 1 stage, order 1.
    Euler,
    /// Heun's explicit trapezoidal rule, 2 stages, order 2.
    HeunTrapezoid,
    /// Explicit midpoint, 2 stages, order 2.
    Midpoint,
    /// Ralston's third-order method.
    Ralston3,
    /// Kutta's third-order method.
    Kutta3,
    /// Heun's third-order method.
    Heun3,
    /// The classical fourth-order Runge-Kutta method.
    ClassicalRk4,
    /// Kutta's 3/8 rule, order 4.
    Rule38,
    /// Gill's √2 variant of RK4.
    Gill4,
    /// Kutta-Nyström's fifth-order method, 6 stages.
    KuttaNystrom5,
    /// A sixth-order scheme, 7 stages.
    Rk6a,
    /// Butcher's golden-ratio sixth-order method, 7 stages.
    Butcher6,
    /// Dormand-Prince 5(4) with the embedded fourth-order weights.
    Dopri4,
    /// Dormand-Prince 5(4) with the fifth-order weights.
    Dopri5,
    /// The Dormand-Prince 8(5,3) tableau driven by the plain executor.
    Dopri8,
    /// The dedicated Dormand-Prince 8(5,3) stepper with FSAL reuse.
    Dopri853,
    /// Everhart's implicit Gauss-Radau/Lobatto integrator.
    Everhart {
        /// Integration order, 2..=32.
        order: usize,
    },
}

impl Scheme {
    /// Every catalog entry, in presentation order. The Everhart entry
    /// carries its customary default order.
    pub const ALL: [Scheme; 17] = [
        Scheme::Euler,
        Scheme::HeunTrapezoid,
        Scheme::Midpoint,
        Scheme::Ralston3,
        Scheme::Kutta3,
        Scheme::Heun3,
        Scheme::ClassicalRk4,
        Scheme::Rule38,
        Scheme::Gill4,
        Scheme::KuttaNystrom5,
        Scheme::Rk6a,
        Scheme::Butcher6,
        Scheme::Dopri4,
        Scheme::Dopri5,
        Scheme::Dopri8,
        Scheme::Dopri853,
        Scheme::Everhart { order: 15 },
    ];

    /// Human-readable label, "(stages:order)" style.
    pub fn label(&self) -> &'static str {
        match self {
            Scheme::Euler => "Euler (1:1)",
            Scheme::HeunTrapezoid => "Heun trapezoid (2:2)",
            Scheme::Midpoint => "Explicit midpoint (2:2)",
            Scheme::Ralston3 => "Ralston (3:3)",
            Scheme::Kutta3 => "Kutta third-order (3:3)",
            Scheme::Heun3 => "Heun third-order (3:3)",
            Scheme::ClassicalRk4 => "Classical Runge-Kutta (4:4)",
            Scheme::Rule38 => "Kutta 3/8 rule (4:4)",
            Scheme::Gill4 => "Gill (4:4)",
            Scheme::KuttaNystrom5 => "Kutta-Nystrom (6:5)",
            Scheme::Rk6a => "RK6a (7:6)",
            Scheme::Butcher6 => "Butcher (7:6)",
            Scheme::Dopri4 => "Dormand-Prince (7:4)",
            Scheme::Dopri5 => "Dormand-Prince (7:5)",
            Scheme::Dopri8 => "Dormand-Prince (13:8)",
            Scheme::Dopri853 => "Dormand-Prince 8(5,3)",
            Scheme::Everhart { .. } => "Everhart (Gauss-Radau/Lobatto)",
        }
    }

    /// Whether the built method produces dense output.
    pub fn supports_interpolation(&self) -> bool {
        matches!(self, Scheme::Everhart { .. })
    }

    /// Bind `sys` and return a ready-to-step method.
    ///
    /// Configuration problems (an out-of-range Everhart order) surface
    /// here, never at step time.
    pub fn build<S, const N: usize>(
        &self,
        sys: S,
    ) -> Result<Box<dyn Method<N>>, ConfigError>
    where
        S: OdeSystem<N> + 'static,
    {
        Ok(match *self {
            Scheme::Euler => Box::new(RungeKutta::new(&coefficients::EULER, sys)),
            Scheme::HeunTrapezoid => Box::new(RungeKutta::new(&coefficients::HEUN2, sys)),
            Scheme::Midpoint => Box::new(RungeKutta::new(&coefficients::MIDPOINT, sys)),
            Scheme::Ralston3 => Box::new(RungeKutta::new(&coefficients::RALSTON3, sys)),
            Scheme::Kutta3 => Box::new(RungeKutta::new(&coefficients::KUTTA3, sys)),
            Scheme::Heun3 => Box::new(RungeKutta::new(&coefficients::HEUN3, sys)),
            Scheme::ClassicalRk4 => {
                Box::new(RungeKutta::new(&coefficients::CLASSICAL_RK4, sys))
            }
            Scheme::Rule38 => Box::new(RungeKutta::new(&coefficients::RULE_38, sys)),
            Scheme::Gill4 => Box::new(RungeKutta::new(&coefficients::GILL4, sys)),
            Scheme::KuttaNystrom5 => {
                Box::new(RungeKutta::new(&coefficients::KUTTA_NYSTROM5, sys))
            }
            Scheme::Rk6a => Box::new(RungeKutta::new(&coefficients::RK6A, sys)),
            Scheme::Butcher6 => Box::new(RungeKutta::new(&coefficients::BUTCHER6, sys)),
            Scheme::Dopri4 => Box::new(RungeKutta::new(&coefficients::DOPRI4, sys)),
            Scheme::Dopri5 => Box::new(RungeKutta::new(&coefficients::DOPRI5, sys)),
            Scheme::Dopri8 => Box::new(RungeKutta::new(&coefficients::DOPRI8, sys)),
            Scheme::Dopri853 => Box::new(Dopri853::new(sys)),
            Scheme::Everhart { order } => Box::new(Everhart::new(sys, order)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, solve_with_interpolation};

    struct Growth;
    impl OdeSystem<1> for Growth {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
            dydt[0] = y[0];
            true
        }
    }

    #[test]
    fn test_every_scheme_builds_and_steps() {
        for scheme in Scheme::ALL {
            let mut method = scheme.build::<_, 1>(Growth).unwrap();
            let traj = solve(method.as_mut(), 0.0, &[1.0], 0.1, 10).unwrap();
            assert_eq!(traj.len(), 11, "{}", scheme.label());
            // Every catalog method is at least first-order accurate
            let err = (traj.y[10][0] - 1.0f64.exp()).abs();
            assert!(err < 0.2, "{}: err = {}", scheme.label(), err);
        }
    }

    #[test]
    fn test_interpolation_flag_matches_behavior() {
        for scheme in Scheme::ALL {
            let mut method = scheme.build::<_, 1>(Growth).unwrap();
            let traj =
                solve_with_interpolation(method.as_mut(), 0.0, &[1.0], 0.1, 5, 2).unwrap();
            let expected = if scheme.supports_interpolation() {
                5 * 3 + 1
            } else {
                6
            };
            assert_eq!(traj.len(), expected, "{}", scheme.label());
        }
    }

    #[test]
    fn test_everhart_order_validated_at_build() {
        let result = Scheme::Everhart { order: 40 }.build::<_, 1>(Growth);
        assert!(matches!(
            result,
            Err(ConfigError::OrderOutOfRange { order: 40 })
        ));
    }

    #[test]
    fn test_labels_are_unique() {
        for (i, a) in Scheme::ALL.iter().enumerate() {
            for b in Scheme::ALL.iter().skip(i + 1) {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
