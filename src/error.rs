//! Error types for integrator configuration, stepping, and trajectory runs.

use thiserror::Error;

/// Errors raised at the configuration call site, never at step time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Requested Everhart order lies outside the supported range 2..=32.
    #[error("integration order {order} outside supported range 2..=32")]
    OrderOutOfRange {
        /// The rejected order.
        order: usize,
    },
}

/// Failure of a single integration step.
///
/// Steppers are total with respect to success/failure reporting: on any
/// error the output buffer is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StepError {
    /// The right-hand side reported the point is outside its domain.
    #[error("right-hand side evaluation failed at t = {t}")]
    RhsFailure {
        /// Time of the failing evaluation.
        t: f64,
    },
    /// The corrector hit the iteration cap without meeting the
    /// component-wise tolerance (with convergence verification enabled).
    #[error("corrector did not converge within {max_iterations} iterations")]
    NonConvergence {
        /// The iteration cap that was exhausted.
        max_iterations: usize,
    },
}

/// Failure of a trajectory run, labelled with the failing step index.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolveError {
    /// A step failed; the trajectory up to this step is discarded.
    #[error("integration failed at step {step}: {source}")]
    StepFailed {
        /// Zero-based index of the failing step.
        step: usize,
        /// The underlying step failure.
        source: StepError,
    },
}
