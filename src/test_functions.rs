//! Analytic reference functions for verifying scalar integrators.

use std::fmt;

use crate::diff::central_difference;
use crate::system::OdeSystem;

/// A test function with a known analytic derivative.
///
/// Feeding `derivative(x)` into a scheme as the right-hand side of
/// dy/dx = g′(x) turns `value(x)` into the exact solution, which makes
/// accuracy measurements trivial. `SpacecraftMotion` is a display-only
/// marker: its values are trivial, the real dynamics come from an
/// external forces model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFunction {
    /// sin(x)
    Sin,
    /// cos(x)
    Cos,
    /// eˣ
    Exp,
    /// x²
    Quadratic,
    /// sin(x)·cos(10x)
    SinCosTen,
    /// ln(x)
    Log,
    /// Placeholder for the external spacecraft dynamics.
    SpacecraftMotion,
}

impl TestFunction {
    /// Every built-in function.
    pub const ALL: [TestFunction; 7] = [
        TestFunction::Sin,
        TestFunction::Cos,
        TestFunction::Exp,
        TestFunction::Quadratic,
        TestFunction::SinCosTen,
        TestFunction::Log,
        TestFunction::SpacecraftMotion,
    ];

    /// The analytic reference value.
    pub fn value(&self, x: f64) -> f64 {
        match self {
            TestFunction::Sin => x.sin(),
            TestFunction::Cos => x.cos(),
            TestFunction::Exp => x.exp(),
            TestFunction::Quadratic => x * x,
            TestFunction::SinCosTen => x.sin() * (10.0 * x).cos(),
            TestFunction::Log => x.ln(),
            TestFunction::SpacecraftMotion => 0.0,
        }
    }

    /// The analytic derivative.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            TestFunction::Sin => x.cos(),
            TestFunction::Cos => -x.sin(),
            TestFunction::Exp => x.exp(),
            TestFunction::Quadratic => 2.0 * x,
            TestFunction::SinCosTen => {
                x.cos() * (10.0 * x).cos() - 10.0 * x.sin() * (10.0 * x).sin()
            }
            TestFunction::Log => 1.0 / x,
            TestFunction::SpacecraftMotion => 0.0,
        }
    }

    /// Central-difference estimate of the derivative.
    pub fn numerical_derivative(&self, x: f64) -> f64 {
        central_difference(|x| self.value(x), x)
    }

    /// A string form for display.
    pub fn expression(&self) -> &'static str {
        match self {
            TestFunction::Sin => "sin(x)",
            TestFunction::Cos => "cos(x)",
            TestFunction::Exp => "exp(x)",
            TestFunction::Quadratic => "x^2",
            TestFunction::SinCosTen => "sin(x)*cos(10x)",
            TestFunction::Log => "log(x)",
            TestFunction::SpacecraftMotion => "Spacecraft Motion",
        }
    }
}

impl fmt::Display for TestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

/// Scalar ODE adapter: dy/dx = g′(x) with g a [`TestFunction`], so the
/// exact solution through (x₀, g(x₀)) is g itself.
///
/// The right-hand side reports a domain failure when the derivative is
/// not finite (log at x ≤ 0, for instance).
#[derive(Debug, Clone, Copy)]
pub struct QuadratureProblem {
    /// The reference function whose derivative drives the ODE.
    pub function: TestFunction,
}

impl OdeSystem<1> for QuadratureProblem {
    fn rhs(&self, t: f64, _y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
        let d = self.function.derivative(t);
        if !d.is_finite() {
            return false;
        }
        dydt[0] = d;
        true
    }
}
