//! Central-difference numerical differentiation.

/// Coefficient for the adaptive differentiation step.
///
/// `h = (|x| + 1) * H_COEFF` keeps the step above the rounding floor near
/// zero while scaling with the magnitude of `x` to control truncation
/// error.
const H_COEFF: f64 = 1e-8;

/// Estimate the derivative of `f` at `x` by central differences.
///
/// Uses `(f(x + h) - f(x - h)) / (2h)` with `h = (|x| + 1) * 1e-8`.
/// No error estimate is returned; this helper serves visualization and
/// verification, not the integrators themselves.
pub fn central_difference<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = (x.abs() + 1.0) * H_COEFF;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Estimate the derivative of `f` at each point of `xs`.
pub fn central_difference_points<F>(f: F, xs: &[f64]) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    xs.iter().map(|&x| central_difference(&f, x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynomial_derivative() {
        // d/dx x² = 2x
        let d = central_difference(|x| x * x, 3.0);
        assert!((d - 6.0).abs() < 1e-6, "d = {}", d);
    }

    #[test]
    fn test_sin_derivative() {
        let d = central_difference(f64::sin, 1.0);
        assert!((d - 1.0f64.cos()).abs() < 1e-7, "d = {}", d);
    }

    #[test]
    fn test_derivative_near_zero() {
        // Step stays above the rounding floor at x = 0
        let d = central_difference(f64::exp, 0.0);
        assert!((d - 1.0).abs() < 1e-7, "d = {}", d);
    }

    #[test]
    fn test_points_map() {
        let ds = central_difference_points(|x| x * x, &[0.0, 1.0, 2.0]);
        let expected = [0.0, 2.0, 4.0];
        for (d, e) in ds.iter().zip(expected.iter()) {
            assert!((d - e).abs() < 1e-6);
        }
    }
}
