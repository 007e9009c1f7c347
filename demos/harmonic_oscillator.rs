//! Basic usage — harmonic oscillator.
//!
//! Integrates y'' + ω²y = 0 for one period with the classical RK4 scheme
//! and with DOPRI8, comparing both against the exact solution.
//!
//! Run with:
//!   cargo run --example harmonic_oscillator

use odestep::{coefficients, solve, Dopri853, OdeSystem, RungeKutta};

/// Simple harmonic oscillator: y'' + ω²y = 0
///
/// State vector: [y, y']
struct HarmonicOscillator {
    omega: f64,
}

impl OdeSystem<2> for HarmonicOscillator {
    fn rhs(&self, _t: f64, y: &[f64; 2], dydt: &mut [f64; 2]) -> bool {
        dydt[0] = y[1];
        dydt[1] = -self.omega * self.omega * y[0];
        true
    }
}

fn main() {
    let omega = 2.0;

    // Integrate for one full period: T = 2π/ω
    let period = 2.0 * std::f64::consts::PI / omega;
    let steps = 200;
    let h = period / steps as f64;
    let y0 = [1.0, 0.0]; // y(0) = 1, y'(0) = 0

    let mut rk4 = RungeKutta::new(&coefficients::CLASSICAL_RK4, HarmonicOscillator { omega });
    let rk4_traj = solve(&mut rk4, 0.0, &y0, h, steps).unwrap();

    let mut dopri8 = Dopri853::new(HarmonicOscillator { omega });
    let dopri8_traj = solve(&mut dopri8, 0.0, &y0, h, steps).unwrap();

    // Exact solution: y(t) = cos(ωt), y'(t) = -ω sin(ωt)
    let (tf, rk4_yf) = rk4_traj.last().unwrap();
    let y_exact = (omega * tf).cos();
    let v_exact = -omega * (omega * tf).sin();
    let (_, dopri8_yf) = dopri8_traj.last().unwrap();

    println!("Harmonic Oscillator (ω = {omega})");
    println!("  Period:     {period:.6} s");
    println!("  Steps:      {steps} (h = {h:.6})");
    println!();
    println!("  Classical RK4:");
    println!("    y(T)  = {:.15}   (exact: {:.15})", rk4_yf[0], y_exact);
    println!("    y'(T) = {:.15}   (exact: {:.15})", rk4_yf[1], v_exact);
    println!("    Position error: {:.2e}", (rk4_yf[0] - y_exact).abs());
    println!();
    println!("  Dormand-Prince 8(5,3):");
    println!("    y(T)  = {:.15}", dopri8_yf[0]);
    println!("    y'(T) = {:.15}", dopri8_yf[1]);
    println!("    Position error: {:.2e}", (dopri8_yf[0] - y_exact).abs());
}
