//! Two-body Keplerian orbit — energy conservation check.
//!
//! Propagates a circular LEO orbit for one period with a fixed-step
//! DOPRI8 and checks that the spacecraft returns to the starting position
//! with conserved energy.
//!
//! Run with:
//!   cargo run --example two_body_orbit

use odestep::{solve, Dopri853, OdeSystem};

/// Keplerian two-body problem: d²r/dt² = -μ r / |r|³
///
/// State vector: [x, y, z, vx, vy, vz]  (km, km/s)
struct TwoBody {
    mu: f64,
}

impl OdeSystem<6> for TwoBody {
    fn rhs(&self, _t: f64, y: &[f64; 6], dydt: &mut [f64; 6]) -> bool {
        let r2 = y[0] * y[0] + y[1] * y[1] + y[2] * y[2];
        let r = r2.sqrt();
        let r3 = r2 * r;
        let mu_r3 = self.mu / r3;

        // dr/dt = v
        dydt[0] = y[3];
        dydt[1] = y[4];
        dydt[2] = y[5];

        // dv/dt = -μ r / |r|³
        dydt[3] = -mu_r3 * y[0];
        dydt[4] = -mu_r3 * y[1];
        dydt[5] = -mu_r3 * y[2];
        true
    }
}

fn energy(mu: f64, y: &[f64; 6]) -> f64 {
    let r = (y[0] * y[0] + y[1] * y[1] + y[2] * y[2]).sqrt();
    let v2 = y[3] * y[3] + y[4] * y[4] + y[5] * y[5];
    0.5 * v2 - mu / r
}

fn main() {
    let mu = 398600.4418; // Earth μ (km³/s²)

    // Circular orbit at 400 km altitude
    let earth_radius = 6378.137; // km
    let r0: f64 = earth_radius + 400.0;
    let v0 = (mu / r0).sqrt(); // circular velocity

    let y0 = [r0, 0.0, 0.0, 0.0, v0, 0.0];

    // Orbital period: T = 2π √(a³/μ)
    let period = 2.0 * std::f64::consts::PI * (r0.powi(3) / mu).sqrt();
    let steps = 2000;
    let h = period / steps as f64;

    let mut solver = Dopri853::new(TwoBody { mu });

    let e0 = energy(mu, &y0);
    let traj = solve(&mut solver, 0.0, &y0, h, steps).unwrap();
    let (tf, yf) = traj.last().unwrap();
    let ef = energy(mu, yf);

    let pos_err =
        ((yf[0] - y0[0]).powi(2) + (yf[1] - y0[1]).powi(2) + (yf[2] - y0[2]).powi(2)).sqrt();

    println!("Two-Body Circular Orbit");
    println!("  Altitude:  400 km");
    println!("  Radius:    {r0:.3} km");
    println!("  Velocity:  {v0:.6} km/s");
    println!("  Period:    {:.1} s ({:.1} min)", period, period / 60.0);
    println!("  Steps:     {steps} (h = {h:.3} s)");
    println!();
    println!("  Final time: {tf:.6} s");
    println!("  Position error (return to start): {pos_err:.2e} km");
    println!(
        "  Energy drift: {:.2e}  (relative: {:.2e})",
        (ef - e0).abs(),
        ((ef - e0) / e0).abs()
    );
}
