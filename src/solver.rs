//! Trajectory driver: advances an initial-value problem across a fixed
//! grid of steps, optionally sampling interpolated points between nodes.

use log::debug;

use crate::error::SolveError;
use crate::method::Method;

/// A computed trajectory: grid times (plus any interior sample times) and
/// the state at each of them, in emission order.
///
/// The initial condition is always the first entry. Every state is a
/// fresh copy; nothing aliases the caller's buffers.
#[derive(Debug, Clone)]
pub struct Trajectory<const N: usize> {
    /// Times, one per emitted state, strictly ordered along the step
    /// direction.
    pub t: Vec<f64>,
    /// States, parallel to `t`.
    pub y: Vec<[f64; N]>,
}

impl<const N: usize> Trajectory<N> {
    /// Number of emitted states.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the trajectory holds no states.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// The final time and state.
    pub fn last(&self) -> Option<(f64, &[f64; N])> {
        Some((*self.t.last()?, self.y.last()?))
    }
}

/// Advance `steps` uniform steps of size `h` from `(t0, y0)`.
///
/// The method is re-initialized first, the initial condition is emitted,
/// and each successful step appends its end state; the result holds
/// `steps + 1` entries. A failing step aborts the run with its index.
pub fn solve<M, const N: usize>(
    method: &mut M,
    t0: f64,
    y0: &[f64; N],
    h: f64,
    steps: usize,
) -> Result<Trajectory<N>, SolveError>
where
    M: Method<N> + ?Sized,
{
    solve_inner(method, t0, y0, h, steps, 0)
}

/// Like [`solve`], but additionally queries the method for `samples`
/// evenly spaced interior points after each successful step, before
/// appending the step's end state.
///
/// Interior points lie at t + j·h/(samples + 1) for j = 1..=samples.
/// Methods that do not support interpolation silently skip them, so the
/// result holds `steps·(samples + 1) + 1` entries for an
/// interpolation-capable method and `steps + 1` otherwise.
pub fn solve_with_interpolation<M, const N: usize>(
    method: &mut M,
    t0: f64,
    y0: &[f64; N],
    h: f64,
    steps: usize,
    samples: usize,
) -> Result<Trajectory<N>, SolveError>
where
    M: Method<N> + ?Sized,
{
    solve_inner(method, t0, y0, h, steps, samples)
}

fn solve_inner<M, const N: usize>(
    method: &mut M,
    t0: f64,
    y0: &[f64; N],
    h: f64,
    steps: usize,
    samples: usize,
) -> Result<Trajectory<N>, SolveError>
where
    M: Method<N> + ?Sized,
{
    method.initialize();

    let mut trajectory = Trajectory {
        t: Vec::with_capacity(steps * (samples + 1) + 1),
        y: Vec::with_capacity(steps * (samples + 1) + 1),
    };
    trajectory.t.push(t0);
    trajectory.y.push(*y0);

    let mut t = t0;
    let mut y = *y0;
    let mut y_next = [0.0; N];
    let mut y_sample = [0.0; N];

    for step in 0..steps {
        if let Err(source) = method.step(t, &y, h, &mut y_next) {
            debug!("trajectory aborted at step {}: {}", step, source);
            return Err(SolveError::StepFailed { step, source });
        }

        for j in 1..=samples {
            let t_sample = t + j as f64 * h / (samples as f64 + 1.0);
            if method.interpolate(t_sample, &mut y_sample) {
                trajectory.t.push(t_sample);
                trajectory.y.push(y_sample);
            }
        }

        t += h;
        trajectory.t.push(t);
        trajectory.y.push(y_next);
        y = y_next;
    }

    Ok(trajectory)
}
