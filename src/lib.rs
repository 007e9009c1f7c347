//! # odestep: fixed-step ODE integrators
//!
//! A library of numerical integrators for ordinary differential equations
//! of the form dy/dt = f(t, y), built around three pieces:
//!
//! - A generic explicit Runge-Kutta stepper driven by Butcher tableaux,
//!   with a catalog of published schemes of orders 1 through 6 plus both
//!   Dormand-Prince 5(4) weight choices
//! - A dedicated 13-stage Dormand-Prince 8(5,3) stepper with FSAL reuse
//!   and an embedded 5th-order error estimator
//! - Everhart's implicit Gauss-Radau/Gauss-Lobatto integrator of orders
//!   2 through 32 with iterative coefficient refinement and dense
//!   intra-step interpolation
//!
//! A trajectory driver advances an initial-value problem across a fixed
//! grid of steps and can sample interpolated points between grid nodes
//! for methods that support it. Step-size adaptivity is deliberately out
//! of scope; steps are uniform and may be negative for backward
//! integration.
//!
//! ## Basic usage
//!
//! ```rust
//! use odestep::{coefficients, solve, OdeSystem, RungeKutta};
//!
//! // Exponential decay: y' = -k y
//! struct Decay { k: f64 }
//!
//! impl OdeSystem<1> for Decay {
//!     fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
//!         dydt[0] = -self.k * y[0];
//!         true
//!     }
//! }
//!
//! let mut method = RungeKutta::new(&coefficients::CLASSICAL_RK4, Decay { k: 1.0 });
//! let trajectory = solve(&mut method, 0.0, &[1.0], 0.01, 100).unwrap();
//!
//! let (tf, yf) = trajectory.last().unwrap();
//! assert_eq!(trajectory.len(), 101);
//! assert!((yf[0] - (-tf).exp()).abs() < 1e-9);
//! ```
//!
//! ## High-order integration with dense output
//!
//! ```rust
//! use odestep::{solve_with_interpolation, Everhart, OdeSystem};
//!
//! struct Growth;
//! impl OdeSystem<1> for Growth {
//!     fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
//!         dydt[0] = y[0];
//!         true
//!     }
//! }
//!
//! let mut method = Everhart::new(Growth, 15).unwrap();
//! // 10 steps with 3 interpolated samples inside each
//! let trajectory = solve_with_interpolation(&mut method, 0.0, &[1.0], 0.1, 10, 3).unwrap();
//! assert_eq!(trajectory.len(), 10 * 4 + 1);
//! ```
//!
//! ## Choosing a scheme by name
//!
//! [`Scheme`] wraps every integrator behind a label and a factory, the
//! shape a UI or configuration layer wants:
//!
//! ```rust
//! use odestep::{solve, OdeSystem, Scheme};
//!
//! # struct Growth;
//! # impl OdeSystem<1> for Growth {
//! #     fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
//! #         dydt[0] = y[0];
//! #         true
//! #     }
//! # }
//! let scheme = Scheme::Dopri853;
//! let mut method = scheme.build::<_, 1>(Growth).unwrap();
//! let trajectory = solve(method.as_mut(), 0.0, &[1.0], 0.05, 20).unwrap();
//! assert!((trajectory.y[20][0] - 1.0f64.exp()).abs() < 1e-12);
//! ```
//!
//! ## References
//!
//! 1. Hairer, E., Nørsett, S.P., & Wanner, G. (1993). "Solving Ordinary
//!    Differential Equations I: Nonstiff Problems". Springer.
//! 2. Everhart, E. (1985). "An Efficient Integrator that Uses Gauss-Radau
//!    Spacings".
//! 3. Dormand, J.R. & Prince, P.J. (1980). "A family of embedded
//!    Runge-Kutta formulae".

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod coefficients;
pub mod diff;
pub mod dopri8;
pub mod error;
pub mod everhart;
pub mod method;
pub mod scheme;
pub mod solver;
pub mod system;
pub mod tableau;
pub mod test_functions;

pub use diff::{central_difference, central_difference_points};
pub use dopri8::Dopri853;
pub use error::{ConfigError, SolveError, StepError};
pub use everhart::Everhart;
pub use method::Method;
pub use scheme::Scheme;
pub use solver::{solve, solve_with_interpolation, Trajectory};
pub use system::OdeSystem;
pub use tableau::{ButcherTableau, RungeKutta};
pub use test_functions::{QuadratureProblem, TestFunction};
