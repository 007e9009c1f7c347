//! The single-step method interface shared by all integrators.

use crate::error::StepError;

/// A single-step integration method bound to a right-hand side.
///
/// This is the only surface the trajectory driver needs: advance the state
/// by one step, optionally evaluate the dense-output interpolant of the
/// most recent step, and reset before a new trajectory.
///
/// Implementations own their scratch buffers and are not safe to share
/// between concurrent callers; independent instances may run in parallel.
pub trait Method<const N: usize> {
    /// Advance the state from `(t, y)` by one step of size `h` into `y_out`.
    ///
    /// `h` may be negative for backward integration; its sign propagates
    /// through stage-time offsets unchanged. On failure `y_out` is left
    /// untouched and no partial result is published.
    fn step(
        &mut self,
        t: f64,
        y: &[f64; N],
        h: f64,
        y_out: &mut [f64; N],
    ) -> Result<(), StepError>;

    /// Evaluate the solution at a time inside the most recent step.
    ///
    /// Valid immediately after the step that ended at the queried interval.
    /// Returns `false` (leaving `y_out` untouched) outside the stored
    /// interval or before any step has completed. Methods without dense
    /// output keep the default.
    fn interpolate(&mut self, t: f64, y_out: &mut [f64; N]) -> bool {
        let _ = (t, y_out);
        false
    }

    /// Whether [`Method::interpolate`] can produce interior samples.
    fn supports_interpolation(&self) -> bool {
        false
    }

    /// Pre-trajectory reset hook: discard any warm state carried between
    /// steps (FSAL caches, predictor coefficients, step counters).
    fn initialize(&mut self) {}
}
