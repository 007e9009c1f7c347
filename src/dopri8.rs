//! Dedicated Dormand-Prince 8(5,3) stepper with FSAL reuse.

use crate::coefficients::{DOPRI8_A, DOPRI8_B, DOPRI8_C, DOPRI8_E5};
use crate::error::StepError;
use crate::method::Method;
use crate::system::OdeSystem;

/// Number of stages in the Dormand-Prince 8(5,3) scheme.
const STAGES: usize = 13;

/// Dormand-Prince 8(5,3): 13 stages, order 8, embedded 5th-order error
/// estimator.
///
/// The 13th stage is evaluated at the step end with the weight row as its
/// coefficients, so its derivative equals f(t + h, y_out). The stepper
/// caches it: a subsequent step issued from the new state reuses it as the
/// first stage, saving one evaluation per accepted step (FSAL). The cache
/// is invalidated by [`Method::initialize`] and absent on the first step
/// of any trajectory.
///
/// No adaptive step-control loop is wired in; callers that want the
/// embedded error can read it through [`Dopri853::error_estimate`].
pub struct Dopri853<S, const N: usize> {
    sys: S,
    /// Stage derivatives of the most recent step.
    k: [[f64; N]; STAGES],
    /// Stage state buffer.
    y_stage: [f64; N],
    /// Step size of the most recent successful step.
    h_last: f64,
    /// Whether the FSAL cache holds f(t, y) for the next step's origin.
    warm: bool,
}

impl<S: OdeSystem<N>, const N: usize> Dopri853<S, N> {
    /// Create a stepper bound to `sys`.
    pub fn new(sys: S) -> Self {
        Self {
            sys,
            k: [[0.0; N]; STAGES],
            y_stage: [0.0; N],
            h_last: 0.0,
            warm: false,
        }
    }

    /// The bound system.
    pub fn system(&self) -> &S {
        &self.sys
    }

    /// Fifth-order error norm of the most recent step, or `None` before
    /// any step has completed.
    ///
    /// err = √( (1/n) · Σᵢ (h · Σⱼ E5ⱼ · kⱼᵢ)² )
    pub fn error_estimate(&self) -> Option<f64> {
        if !self.warm {
            return None;
        }
        let mut sum_sq = 0.0;
        for m in 0..N {
            let mut err = 0.0;
            for j in 0..STAGES {
                err += DOPRI8_E5[j] * self.k[j][m];
            }
            sum_sq += err * err;
        }
        Some((sum_sq / N as f64).sqrt() * self.h_last.abs())
    }
}

impl<S: OdeSystem<N>, const N: usize> Method<N> for Dopri853<S, N> {
    fn step(
        &mut self,
        t: f64,
        y: &[f64; N],
        h: f64,
        y_out: &mut [f64; N],
    ) -> Result<(), StepError> {
        // Stage 1: reuse the cached end-of-step derivative when warm
        if !self.warm {
            if !self.sys.rhs(t, y, &mut self.k[0]) {
                return Err(StepError::RhsFailure { t });
            }
        }

        // Stages 2..13; the last row equals the weights, so stage 13 is
        // evaluated at (t + h, y_out)
        for i in 1..STAGES {
            self.y_stage = *y;
            let row = i * (i - 1) / 2;
            for j in 0..i {
                let a = DOPRI8_A[row + j];
                if a != 0.0 {
                    for m in 0..N {
                        self.y_stage[m] += h * a * self.k[j][m];
                    }
                }
            }
            let t_stage = t + DOPRI8_C[i - 1] * h;
            if !self.sys.rhs(t_stage, &self.y_stage, &mut self.k[i]) {
                return Err(StepError::RhsFailure { t: t_stage });
            }
        }

        for m in 0..N {
            let mut sum = 0.0;
            for j in 0..STAGES {
                if DOPRI8_B[j] != 0.0 {
                    sum += DOPRI8_B[j] * self.k[j][m];
                }
            }
            y_out[m] = y[m] + h * sum;
        }

        // k₁₃ = f(t + h, y_out) becomes the next step's k₀
        self.k[0] = self.k[STAGES - 1];
        self.h_last = h;
        self.warm = true;
        Ok(())
    }

    fn initialize(&mut self) {
        self.warm = false;
        self.h_last = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Growth;
    impl OdeSystem<1> for Growth {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
            dydt[0] = y[0];
            true
        }
    }

    #[test]
    fn test_single_step_order() {
        // One step on y' = y: 8th-order local error
        let mut method = Dopri853::new(Growth);
        let mut out = [0.0];
        method.step(0.0, &[1.0], 0.25, &mut out).unwrap();
        let err = (out[0] - 0.25f64.exp()).abs();
        assert!(err < 1e-11, "err = {:e}", err);
    }

    #[test]
    fn test_fsal_matches_cold_step() {
        // A warm step must be bit-identical to a cold step from the same
        // state, because the cached k₁₃ was evaluated at exactly (t, y)
        let h = 0.25;

        let mut warm = Dopri853::new(Growth);
        let mut y1 = [0.0];
        warm.step(0.0, &[1.0], h, &mut y1).unwrap();
        let mut y2_warm = [0.0];
        warm.step(h, &y1, h, &mut y2_warm).unwrap();

        let mut cold = Dopri853::new(Growth);
        let mut y2_cold = [0.0];
        cold.step(h, &y1, h, &mut y2_cold).unwrap();

        assert_eq!(y2_warm[0], y2_cold[0]);
    }

    #[test]
    fn test_initialize_does_not_alter_results() {
        // Inserting a reset anywhere must not change subsequent y values
        let h = 0.1;
        let mut a = Dopri853::new(Growth);
        let mut b = Dopri853::new(Growth);
        let mut ya = [1.0];
        let mut yb = [1.0];
        let mut out = [0.0];
        let mut t = 0.0;
        for i in 0..5 {
            a.step(t, &ya, h, &mut out).unwrap();
            ya = out;
            if i == 2 {
                b.initialize();
            }
            b.step(t, &yb, h, &mut out).unwrap();
            yb = out;
            t += h;
        }
        assert_eq!(ya[0], yb[0]);
    }

    #[test]
    fn test_error_estimate_available_after_step() {
        let mut method = Dopri853::new(Growth);
        assert!(method.error_estimate().is_none());
        let mut out = [0.0];
        method.step(0.0, &[1.0], 0.1, &mut out).unwrap();
        let err = method.error_estimate().unwrap();
        assert!(err > 0.0 && err < 1e-9, "err = {:e}", err);
    }
}
