//! Published Butcher tableaux for the scheme catalog.
//!
//! Coefficients follow the standard literature:
//!
//! * Hairer, E., Nørsett, S.P., & Wanner, G. (1993). "Solving Ordinary
//!   Differential Equations I: Nonstiff Problems". Springer.
//! * Butcher, J.C. (1964). "On Runge-Kutta processes of high order".
//! * Dormand, J.R. & Prince, P.J. (1980/1989), including the 8(5,3)
//!   "sqrt(6)" family used by [`DOPRI8`] and the dedicated
//!   [`crate::dopri8::Dopri853`] stepper.
//!
//! Every tableau satisfies |a| = s(s−1)/2 and |c| = s−1; the checks in the
//! test module verify that together with the row-sum and weight-sum
//! consistency conditions.

use crate::tableau::ButcherTableau;

/// Explicit Euler: 1 stage, order 1.
pub static EULER: ButcherTableau = ButcherTableau {
    c: &[],
    a: &[],
    b: &[1.0],
};

/// Heun's explicit trapezoidal rule: 2 stages, order 2.
pub static HEUN2: ButcherTableau = ButcherTableau {
    c: &[1.0],
    a: &[1.0],
    b: &[0.5, 0.5],
};

/// Explicit midpoint: 2 stages, order 2.
pub static MIDPOINT: ButcherTableau = ButcherTableau {
    c: &[0.5],
    a: &[0.5],
    b: &[0.0, 1.0],
};

/// Ralston's third-order method: 3 stages, order 3.
pub static RALSTON3: ButcherTableau = ButcherTableau {
    c: &[0.5, 0.75],
    a: &[
        0.5, //
        0.0, 0.75,
    ],
    b: &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0],
};

/// Kutta's third-order method: 3 stages, order 3.
pub static KUTTA3: ButcherTableau = ButcherTableau {
    c: &[0.5, 1.0],
    a: &[
        0.5, //
        -1.0, 2.0,
    ],
    b: &[1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
};

/// Heun's third-order method: 3 stages, order 3.
pub static HEUN3: ButcherTableau = ButcherTableau {
    c: &[1.0 / 3.0, 2.0 / 3.0],
    a: &[
        1.0 / 3.0, //
        0.0, 2.0 / 3.0,
    ],
    b: &[0.25, 0.0, 0.75],
};

/// The classical Runge-Kutta method: 4 stages, order 4.
pub static CLASSICAL_RK4: ButcherTableau = ButcherTableau {
    c: &[0.5, 0.5, 1.0],
    a: &[
        0.5, //
        0.0, 0.5, //
        0.0, 0.0, 1.0,
    ],
    b: &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
};

/// Kutta's 3/8 rule: 4 stages, order 4.
pub static RULE_38: ButcherTableau = ButcherTableau {
    c: &[1.0 / 3.0, 2.0 / 3.0, 1.0],
    a: &[
        1.0 / 3.0, //
        -1.0 / 3.0, 1.0, //
        1.0, -1.0, 1.0,
    ],
    b: &[1.0 / 8.0, 3.0 / 8.0, 3.0 / 8.0, 1.0 / 8.0],
};

/// Gill's √2 variant of RK4: 4 stages, order 4.
pub static GILL4: ButcherTableau = ButcherTableau {
    c: &[0.5, 0.5, 1.0],
    a: &[
        0.5, //
        0.20710678118654752440, // 1/√2 − 1/2
        0.29289321881345247560, // 1 − 1/√2
        0.0,
        -0.70710678118654752440, // −1/√2
        1.70710678118654752440,  // 1 + 1/√2
    ],
    b: &[
        1.0 / 6.0,
        0.09763107293781749187, // (2 − √2)/6
        0.56903559372884917480, // (2 + √2)/6
        1.0 / 6.0,
    ],
};

/// Kutta-Nyström's fifth-order method: 6 stages, order 5.
pub static KUTTA_NYSTROM5: ButcherTableau = ButcherTableau {
    c: &[1.0 / 3.0, 0.4, 1.0, 2.0 / 3.0, 0.8],
    a: &[
        1.0 / 3.0, //
        0.16, 0.24, //
        0.25, -3.0, 3.75, //
        6.0 / 81.0, 90.0 / 81.0, -50.0 / 81.0, 8.0 / 81.0, //
        6.0 / 75.0, 36.0 / 75.0, 10.0 / 75.0, 8.0 / 75.0, 0.0,
    ],
    b: &[
        23.0 / 192.0,
        0.0,
        125.0 / 192.0,
        0.0,
        -81.0 / 192.0,
        125.0 / 192.0,
    ],
};

/// A sixth-order Runge-Kutta scheme: 7 stages, order 6.
pub static RK6A: ButcherTableau = ButcherTableau {
    c: &[0.5, 2.0 / 3.0, 1.0 / 3.0, 5.0 / 6.0, 1.0 / 6.0, 1.0],
    a: &[
        0.5, //
        2.0 / 9.0, 4.0 / 9.0, //
        7.0 / 36.0, 2.0 / 9.0, -1.0 / 12.0, //
        -35.0 / 144.0, -55.0 / 36.0, 35.0 / 48.0, 15.0 / 8.0, //
        -1.0 / 360.0, -11.0 / 36.0, -1.0 / 8.0, 0.5, 0.1, //
        -41.0 / 260.0, 22.0 / 13.0, 43.0 / 156.0, -118.0 / 39.0, 32.0 / 195.0, 80.0 / 39.0,
    ],
    b: &[
        13.0 / 200.0,
        0.0,
        11.0 / 40.0,
        11.0 / 40.0,
        4.0 / 25.0,
        4.0 / 25.0,
        13.0 / 200.0,
    ],
};

/// Butcher's golden-ratio sixth-order method: 7 stages, order 6.
///
/// The abscissae are (5 ∓ √5)/10, the Gauss-Lobatto points that also
/// appear in the order-6 Everhart node set.
pub static BUTCHER6: ButcherTableau = ButcherTableau {
    c: &[
        0.27639320225002103036, // (5 − √5)/10
        0.72360679774997896964, // (5 + √5)/10
        0.27639320225002103036,
        0.72360679774997896964,
        0.27639320225002103036,
        1.0,
    ],
    a: &[
        0.27639320225002103036, // (5 − √5)/10
        //
        -0.22360679774997896964, // −√5/10
        0.94721359549995793928,  // 1/2 + √5/5
        //
        0.03262379212492639374,  // 7√5/20 − 3/4
        0.30901699437494742410,  // (√5 − 1)/4
        -0.06524758424985278749, // 3/2 − 7√5/10
        //
        0.04606553370833683839, // (5 − √5)/60
        0.0,
        1.0 / 6.0,
        0.51087459737497546458, // (15 + 7√5)/60
        //
        0.12060113295832982827, // (5 + √5)/60
        0.0,
        -0.18169499062491237350, // (9 − 5√5)/12
        1.0 / 6.0,
        0.17082039324993690892, // (3√5 − 5)/10
        //
        1.0 / 6.0,
        0.0,
        0.07514161979122853419,  // (25√5 − 55)/12
        -3.38770632020821065622, // −(25 + 7√5)/12
        0.52786404500042060718,  // 5 − 2√5
        3.61803398874989484820,  // 5/2 + √5/2
    ],
    b: &[
        1.0 / 12.0,
        0.0,
        0.0,
        0.0,
        5.0 / 12.0,
        5.0 / 12.0,
        1.0 / 12.0,
    ],
};

/// Abscissae shared by the two Dormand-Prince 5(4) weight choices.
static DOPRI5_C: [f64; 6] = [0.2, 0.3, 0.8, 8.0 / 9.0, 1.0, 1.0];

/// Stage matrix shared by the two Dormand-Prince 5(4) weight choices.
static DOPRI5_A: [f64; 21] = [
    0.2, //
    3.0 / 40.0,
    9.0 / 40.0, //
    44.0 / 45.0,
    -56.0 / 15.0,
    32.0 / 9.0, //
    19372.0 / 6561.0,
    -25360.0 / 2187.0,
    64448.0 / 6561.0,
    -212.0 / 729.0, //
    9017.0 / 3168.0,
    -355.0 / 33.0,
    46732.0 / 5247.0,
    49.0 / 176.0,
    -5103.0 / 18656.0, //
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// Dormand-Prince 5(4), fifth-order end state: 7 stages, order 5.
pub static DOPRI5: ButcherTableau = ButcherTableau {
    c: &DOPRI5_C,
    a: &DOPRI5_A,
    b: &[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ],
};

/// Dormand-Prince 5(4), embedded fourth-order end state: 7 stages, order 4.
pub static DOPRI4: ButcherTableau = ButcherTableau {
    c: &DOPRI5_C,
    a: &DOPRI5_A,
    b: &[
        5179.0 / 57600.0,
        0.0,
        7571.0 / 16695.0,
        393.0 / 640.0,
        -92097.0 / 339200.0,
        187.0 / 2100.0,
        1.0 / 40.0,
    ],
};

/// Abscissae of the 13-stage Dormand-Prince 8(5,3) scheme.
///
/// c₂..c₁₁ belong to the "sqrt(6)" family (c₂ = (12 − 2√6)/135, ...);
/// c₁₂ = c₁₃ = 1, making row 13 the FSAL evaluation at the step end.
pub static DOPRI8_C: [f64; 12] = [
    0.526001519587677318785587544488e-1,
    0.789002279381515978178381316732e-1,
    0.118350341907227396726757197510,
    0.281649658092772603273242802490,
    1.0 / 3.0,
    0.25,
    0.307692307692307692307692307692,
    0.651282051282051282051282051282,
    0.6,
    0.857142857142857142857142857142,
    1.0,
    1.0,
];

/// Stage matrix of the 13-stage Dormand-Prince 8(5,3) scheme, flattened.
///
/// The final row equals the weight vector, so the 13th stage derivative is
/// f(t + h, y_out), the first stage of the following step.
pub static DOPRI8_A: [f64; 78] = [
    // row 2
    5.26001519587677318785587544488e-2,
    // row 3
    1.97250569845378994544595329183e-2,
    5.91751709536136983633785987549e-2,
    // row 4
    2.95875854768068491816892993775e-2,
    0.0,
    8.87627564304205475450678981324e-2,
    // row 5
    2.41365134159266685502369798665e-1,
    0.0,
    -8.84549479328286085344864962717e-1,
    9.24834003261792003115737966543e-1,
    // row 6
    3.7037037037037037037037037037e-2,
    0.0,
    0.0,
    1.70828608729473871279604482173e-1,
    1.25467687566822425016691814123e-1,
    // row 7
    3.7109375e-2,
    0.0,
    0.0,
    1.70252211019544039314978060272e-1,
    6.02165389804559606850219397283e-2,
    -1.7578125e-2,
    // row 8
    3.70920001185047927108779319836e-2,
    0.0,
    0.0,
    1.70383925712239993810214054705e-1,
    1.07262030446373284651809199168e-1,
    -1.53194377486244017527936158236e-2,
    8.27378916381402288758473766002e-3,
    // row 9
    6.24110958716075717114429577812e-1,
    0.0,
    0.0,
    -3.36089262944694129406857109825,
    -8.68219346841726006818189891453e-1,
    2.75920996994467083049415600797e1,
    2.01540675504778934086186788979e1,
    -4.34898841810699588477366255144e1,
    // row 10
    4.77662536438264365890433908527e-1,
    0.0,
    0.0,
    -2.48811461997166764192642586468,
    -5.90290826836842996371446475743e-1,
    2.12300514481811942347288949897e1,
    1.52792336328824235832596922938e1,
    -3.32882109689848629194453265587e1,
    -2.03312017085086261358222928593e-2,
    // row 11
    -9.3714243008598732571704021658e-1,
    0.0,
    0.0,
    5.18637242884406370830023853209,
    1.09143734899672957818500254654,
    -8.14978701074692612513997267357,
    -1.85200656599969598641566180701e1,
    2.27394870993505042818970056734e1,
    2.49360555267965238987089396762,
    -3.0467644718982195003823669022,
    // row 12
    2.27331014751653820792359768449,
    0.0,
    0.0,
    -1.05344954667372501984066689879e1,
    -2.00087205822486249909675718444,
    -1.79589318631187989172765950534e1,
    2.79488845294199600508499808837e1,
    -2.85899827713502369474065508674,
    -8.87285693353062954433549289258,
    1.23605671757943030647266201528e1,
    6.43392746015763530355970484046e-1,
    // row 13 (= b, FSAL)
    5.42937341165687622380535766363e-2,
    0.0,
    0.0,
    0.0,
    0.0,
    4.45031289275240888144113950566,
    1.89151789931450038304281599044,
    -5.8012039600105847814672114227,
    3.1116436695781989440891606237e-1,
    -1.52160949662516078556178806805e-1,
    2.01365400804030348374776537501e-1,
    4.47106157277725905176885569043e-2,
];

/// Weights of the 13-stage Dormand-Prince 8(5,3) scheme (8th order).
pub static DOPRI8_B: [f64; 13] = [
    5.42937341165687622380535766363e-2,
    0.0,
    0.0,
    0.0,
    0.0,
    4.45031289275240888144113950566,
    1.89151789931450038304281599044,
    -5.8012039600105847814672114227,
    3.1116436695781989440891606237e-1,
    -1.52160949662516078556178806805e-1,
    2.01365400804030348374776537501e-1,
    4.47106157277725905176885569043e-2,
    0.0,
];

/// Fifth-order error weights for the Dormand-Prince 8(5,3) scheme.
///
/// err = √( (1/n) · Σᵢ (h · Σⱼ E5ⱼ · kⱼᵢ)² ) over the 13 stage
/// derivatives of a step.
pub static DOPRI8_E5: [f64; 13] = [
    0.1312004499419488073250102996e-1,
    0.0,
    0.0,
    0.0,
    0.0,
    -0.1225156446376204440720569753e1,
    -0.4957589496572501915214079952,
    0.1664377182454986536961530415e1,
    -0.3503288487499736816886487290,
    0.3341791187130174790297318841,
    0.8192320648511571246570742613e-1,
    -0.2235530786388629525884427845e-1,
    0.0,
];

/// The Dormand-Prince 8(5,3) tableau as a plain 13-stage scheme.
///
/// Usable by the generic executor; the dedicated
/// [`crate::dopri8::Dopri853`] stepper adds FSAL reuse and the embedded
/// error estimator on top of the same tables.
pub static DOPRI8: ButcherTableau = ButcherTableau {
    c: &DOPRI8_C,
    a: &DOPRI8_A,
    b: &DOPRI8_B,
};

#[cfg(test)]
mod tests {
    use super::*;

    // Summation of up to 13 f64 terms accumulates ~O(n·eps) roundoff
    const TOL: f64 = 1e-13;

    const ALL: [(&str, &ButcherTableau); 14] = [
        ("euler", &EULER),
        ("heun2", &HEUN2),
        ("midpoint", &MIDPOINT),
        ("ralston3", &RALSTON3),
        ("kutta3", &KUTTA3),
        ("heun3", &HEUN3),
        ("classical_rk4", &CLASSICAL_RK4),
        ("rule_38", &RULE_38),
        ("gill4", &GILL4),
        ("kutta_nystrom5", &KUTTA_NYSTROM5),
        ("rk6a", &RK6A),
        ("butcher6", &BUTCHER6),
        ("dopri5", &DOPRI5),
        ("dopri4", &DOPRI4),
    ];

    #[test]
    fn test_triangular_dimensions() {
        for (name, tab) in ALL {
            let s = tab.stages();
            assert_eq!(tab.a.len(), s * (s - 1) / 2, "{}", name);
            assert_eq!(tab.c.len(), s - 1, "{}", name);
        }
        DOPRI8.assert_dimensions();
    }

    #[test]
    fn test_weights_sum_to_one() {
        for (name, tab) in ALL {
            let sum: f64 = tab.b.iter().sum();
            assert!((sum - 1.0).abs() < TOL, "{} weights sum to {}", name, sum);
        }
        let sum: f64 = DOPRI8_B.iter().sum();
        assert!((sum - 1.0).abs() < TOL, "dopri8 weights sum to {}", sum);
    }

    #[test]
    fn test_row_sum_condition() {
        // Σⱼ a[i][j] = c[i] for each interior stage
        for (name, tab) in ALL {
            check_row_sums(name, tab);
        }
        check_row_sums("dopri8", &DOPRI8);
    }

    fn check_row_sums(name: &str, tab: &ButcherTableau) {
        for i in 1..tab.stages() {
            let row = i * (i - 1) / 2;
            let sum: f64 = tab.a[row..row + i].iter().sum();
            let expected = tab.c[i - 1];
            assert!(
                (sum - expected).abs() < 1e-12,
                "{} row {} sums to {}, expected {}",
                name,
                i,
                sum,
                expected
            );
        }
    }

    #[test]
    fn test_dopri8_fsal_row_matches_weights() {
        let row = 12 * 11 / 2;
        for j in 0..12 {
            assert_eq!(DOPRI8_A[row + j], DOPRI8_B[j], "column {}", j);
        }
        assert_eq!(DOPRI8_B[12], 0.0);
        assert_eq!(DOPRI8_C[10], 1.0);
        assert_eq!(DOPRI8_C[11], 1.0);
    }

    #[test]
    fn test_third_order_conditions() {
        // Σ bᵢcᵢ₋₁ = 1/2 and Σ bᵢcᵢ₋₁² = 1/3 for the three-stage schemes
        for (name, tab) in [
            ("ralston3", &RALSTON3),
            ("kutta3", &KUTTA3),
            ("heun3", &HEUN3),
        ] {
            let bc: f64 = (1..3).map(|i| tab.b[i] * tab.c[i - 1]).sum();
            let bc2: f64 = (1..3).map(|i| tab.b[i] * tab.c[i - 1] * tab.c[i - 1]).sum();
            assert!((bc - 0.5).abs() < TOL, "{}: Σbc = {}", name, bc);
            assert!((bc2 - 1.0 / 3.0).abs() < TOL, "{}: Σbc² = {}", name, bc2);
        }
    }
}
