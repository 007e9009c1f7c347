//! Everhart's implicit Gauss-Radau / Gauss-Lobatto integrator.
//!
//! Reference: Everhart, E. (1985). "An Efficient Integrator that Uses
//! Gauss-Radau Spacings", in Dynamics of Comets: Their Origin and
//! Evolution.

use log::debug;

use crate::error::{ConfigError, StepError};
use crate::method::Method;
use crate::system::OdeSystem;

/// Maximum supported integration order.
pub const MAX_ORDER: usize = 32;

/// Minimum supported integration order.
pub const MIN_ORDER: usize = 2;

/// Floor for the convergence tolerance.
const MIN_LOCAL_ERROR: f64 = 1e-15;

/// Default convergence tolerance.
const DEFAULT_LOCAL_ERROR: f64 = 1e-11;

/// Default cap on correction sweeps per step.
const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Quadrature nodes on (0, 1] for every order, stored back to back.
///
/// Odd orders use Gauss-Radau spacings (right endpoint excluded), even
/// orders Gauss-Lobatto spacings (τ_m = 1). The block for a given order
/// starts at offset m·(order − m − 1) with m = order/2 nodes.
#[rustfmt::skip]
static NODES: [f64; 256] = [
    // order 2 (Lobatto, 1 node, offset 0)
    1.0000000000000000000,
    // order 3 (Radau, 1 node, offset 1)
    0.66666666666666666667,
    // order 4 (Lobatto, 2 nodes, offset 2)
    0.50000000000000000000, 1.0000000000000000000,
    // order 5 (Radau, 2 nodes, offset 4)
    0.35505102572168219018, 0.84494897427831780982,
    // order 6 (Lobatto, 3 nodes, offset 6)
    0.27639320225002103036, 0.72360679774997896964, 1.0000000000000000000,
    // order 7 (Radau, 3 nodes, offset 9)
    0.21234053823915294397, 0.59053313555926528914, 0.91141204048729605260,
    // order 8 (Lobatto, 4 nodes, offset 12)
    0.17267316464601142810, 0.50000000000000000000, 0.82732683535398857190,
    1.0000000000000000000,
    // order 9 (Radau, 4 nodes, offset 16)
    0.13975986434378055215, 0.41640956763108317994, 0.72315698636187617232,
    0.94289580388548231781,
    // order 10 (Lobatto, 5 nodes, offset 20)
    0.11747233803526765357, 0.35738424175967745184, 0.64261575824032254816,
    0.88252766196473234643, 1.0000000000000000000,
    // order 11 (Radau, 5 nodes, offset 25)
    0.098535085798826426123, 0.30453572664636390549, 0.56202518975261385599,
    0.80198658212639182746, 0.96019014294853125766,
    // order 12 (Lobatto, 6 nodes, offset 30)
    0.084888051860716535064, 0.26557560326464289310, 0.50000000000000000000,
    0.73442439673535710690, 0.91511194813928346494, 1.0000000000000000000,
    // order 13 (Radau, 6 nodes, offset 36)
    0.073054328680258885148, 0.23076613796994549908, 0.44132848122844986792,
    0.66301530971884570090, 0.85192140033151570815, 0.97068357284021510803,
    // order 14 (Lobatto, 7 nodes, offset 42)
    0.064129925745196692331, 0.20414990928342884893, 0.39535039104876056562,
    0.60464960895123943438, 0.79585009071657115107, 0.93587007425480330767,
    1.0000000000000000000,
    // order 15 (Radau, 7 nodes, offset 49)
    0.056262560536922146466, 0.18024069173689236499, 0.35262471711316963737,
    0.54715362633055538300, 0.73421017721541053152, 0.88532094683909576809,
    0.97752061356128750189,
    // order 16 (Lobatto, 8 nodes, offset 56)
    0.050121002294269921344, 0.16140686024463112328, 0.31844126808691092064,
    0.50000000000000000000, 0.68155873191308907936, 0.83859313975536887672,
    0.94987899770573007866, 1.0000000000000000000,
    // order 17 (Radau, 8 nodes, offset 64)
    0.044633955289969850733, 0.14436625704214557149, 0.28682475714443051895,
    0.45481331519657335097, 0.62806783541672769757, 0.78569152060436924164,
    0.90867639210020604400, 0.98222008485263654819,
    // order 18 (Lobatto, 9 nodes, offset 72)
    0.040233045916770593086, 0.13061306744724746250, 0.26103752509477775217,
    0.41736052116680648769, 0.58263947883319351231, 0.73896247490522224783,
    0.86938693255275253750, 0.95976695408322940691, 1.0000000000000000000,
    // order 19 (Radau, 9 nodes, offset 81)
    0.036257812883209460941, 0.11807897878999870019, 0.23717698481496038532,
    0.38188276530470597536, 0.53802959891898906512, 0.69033242007236218294,
    0.82388334383700471814, 0.92561261029080395536, 0.98558759035112345137,
    // order 20 (Lobatto, 10 nodes, offset 90)
    0.032999284795970432834, 0.10775826316842779069, 0.21738233650189749676,
    0.35212093220653030428, 0.50000000000000000000, 0.64787906779346969572,
    0.78261766349810250324, 0.89224173683157220931, 0.96700071520402956717,
    1.0000000000000000000,
    // order 21 (Radau, 10 nodes, offset 100)
    0.030029032161486497043, 0.098289012209853229651, 0.19902107896310115486,
    0.32405553832333489264, 0.46326123428433936713, 0.60536015311421315704,
    0.73884032399154375973, 0.85288855035692975957, 0.93826792812285187448,
    0.98808238656758440309,
    // order 22 (Lobatto, 11 nodes, offset 110)
    0.027550363888558888296, 0.090360339177996660826, 0.18356192348406966117,
    0.30023452951732553387, 0.43172353357253622257, 0.56827646642746377743,
    0.69976547048267446613, 0.81643807651593033883, 0.90963966082200333917,
    0.97244963611144111170, 1.0000000000000000000,
    // order 23 (Radau, 11 nodes, offset 121)
    0.025273620397520349753, 0.083041613447405146707, 0.16917510037718142597,
    0.27779671510903207444, 0.40150272023286081677, 0.53186238691041595792,
    0.65999184208533481177, 0.77715939295616214449, 0.87538077485555692626,
    0.94796454887281944742, 0.98998171953831959416,
    // order 24 (Lobatto, 12 nodes, offset 132)
    0.023345076678918044052, 0.076826217674063841567, 0.15690576545912128696,
    0.25854508945433189913, 0.37535653494688000372, 0.50000000000000000000,
    0.62464346505311999628, 0.74145491054566810087, 0.84309423454087871304,
    0.92317378232593615843, 0.97665492332108195595, 1.0000000000000000000,
    // order 25 (Radau, 12 nodes, offset 144)
    0.021562063165850360908, 0.071057898735588982151, 0.14544745623506411921,
    0.24040111047477294626, 0.35039934972274500723, 0.46904915068718232937,
    0.58945491879854231751, 0.70461911573741977838, 0.80784894547014595901,
    0.89314550911652334237, 0.95555353684459227697, 0.99146094501157258063,
    // order 26 (Lobatto, 13 nodes, offset 156)
    0.020032477366369549322, 0.066099473084826374500, 0.13556570045433692971,
    0.22468029853567647234, 0.32863799332864357748, 0.44183406555814806617,
    0.55816593444185193383, 0.67136200667135642252, 0.77531970146432352766,
    0.86443429954566307029, 0.93390052691517362550, 0.97996752263363045068,
    1.0000000000000000000,
    // order 27 (Radau, 13 nodes, offset 169)
    0.018610365010987851440, 0.061475540899268987602, 0.12630517869331058063,
    0.20984297172656251445, 0.30789899828039834310, 0.41555603597865954450,
    0.52741561399588227482, 0.63786860271776119959, 0.74137645929423748341,
    0.83274898860844226850, 0.90740477530099736472, 0.96160186126032164962,
    0.99263534897391067835,
    // order 28 (Lobatto, 14 nodes, offset 182)
    0.017377036748080713602, 0.057458977888511850587, 0.11824015502409239965,
    0.19687339726507714444, 0.28968097264316375954, 0.39232302231810288089,
    0.50000000000000000000, 0.60767697768189711911, 0.71031902735683624046,
    0.80312660273492285556, 0.88175984497590760035, 0.94254102211148814941,
    0.98262296325191928640, 1.0000000000000000000,
    // order 29 (Radau, 14 nodes, offset 196)
    0.016224765901399761719, 0.053697299939724616467, 0.11065719118048446031,
    0.18461026055652535803, 0.27232354711073531456, 0.36996331162959604212,
    0.47326213866012696795, 0.57770534269242974216, 0.67872825601106382560,
    0.77191572935074200847, 0.85319513231878627008, 0.91901450031804481561,
    0.96649859546798685996, 0.99358323920718154319,
    // order 30 (Lobatto, 15 nodes, offset 210)
    0.015215976864891033524, 0.050399733453263953503, 0.10399585406909246803,
    0.17380564855875345527, 0.25697028905643119411, 0.35008476554961839595,
    0.44933686323902527608, 0.55066313676097472392, 0.64991523445038160405,
    0.74302971094356880589, 0.82619435144124654473, 0.89600414593090753197,
    0.94960026654673604650, 0.98478402313510896648, 1.0000000000000000000,
    // order 31 (Radau, 15 nodes, offset 225)
    0.014269454736825774734, 0.047299590094166685662, 0.097713299320621973369,
    0.16356903939438987602, 0.24233526096865728800, 0.33098480497004012346,
    0.42611083909331411933, 0.52405769153676513943, 0.62106131135302196189,
    0.71339391374247294002, 0.79750724494989595243, 0.87016897444640894403,
    0.92858704688484115995, 0.97051770135205751337, 0.99435931102748829024,
    // order 32 (Lobatto, 16 nodes, offset 240)
    0.013433911684290842922, 0.044560002042213202188, 0.092151874389114846447,
    0.15448550968615764730, 0.22930730033494923044, 0.31391278321726147905,
    0.40524401324084130585, 0.50000000000000000000, 0.59475598675915869415,
    0.68608721678273852095, 0.77069269966505076956, 0.84551449031384235270,
    0.90784812561088515355, 0.95543999795778679781, 0.98656608831570915708,
    1.0000000000000000000,
];

/// Everhart's implicit integrator with iterative coefficient correction
/// and dense intra-step interpolation.
///
/// Over a step [t, t + h] the solution is modeled as
///
/// y(t + τh) = y₀ + τh·f₀ + τh·Σⱼ bⱼ·τʲ
///
/// with the b-coefficients refined by correction sweeps over the
/// quadrature nodes until successive end-state iterates agree
/// component-wise to `local_error`. Between steps the b-vector of the
/// previous step warm-starts the next one through a power series in
/// r = h / h_prev, which also carries the step-size sign for backward
/// integration.
///
/// Orders 2..=32 are supported for arbitrary state dimension; even orders
/// use Lobatto spacings and reuse the derivative at τ = 1 as the next
/// step's f₀, odd orders use Radau spacings and evaluate f₀ fresh.
pub struct Everhart<S, const N: usize> {
    sys: S,
    order: usize,
    local_error: f64,
    max_iterations: usize,
    verify_convergence: bool,

    // Transformation matrices, (m+1)×(m+1), rebuilt on order change
    c_mat: Vec<Vec<f64>>,
    d_mat: Vec<Vec<f64>>,
    e_mat: Vec<Vec<f64>>,
    /// Reciprocal node differences 1/(τᵢ − τⱼ), j < i.
    dtau: Vec<Vec<f64>>,

    // Per-stage correction coefficients, m × N
    a: Vec<[f64; N]>,
    b: Vec<[f64; N]>,
    b_prev: Vec<[f64; N]>,
    b_scratch: Vec<[f64; N]>,

    f0: [f64; N],
    y0: [f64; N],
    y_stage: [f64; N],
    p: [f64; N],
    yk: [f64; N],
    last_f: [f64; N],

    step_begin: f64,
    step_size: f64,
    prev_step: f64,
    step_count: u64,
}

impl<S: OdeSystem<N>, const N: usize> Everhart<S, N> {
    /// Create an integrator of the given order bound to `sys`.
    pub fn new(sys: S, order: usize) -> Result<Self, ConfigError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(ConfigError::OrderOutOfRange { order });
        }
        let mut this = Self {
            sys,
            order,
            local_error: DEFAULT_LOCAL_ERROR,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            verify_convergence: true,
            c_mat: Vec::new(),
            d_mat: Vec::new(),
            e_mat: Vec::new(),
            dtau: Vec::new(),
            a: Vec::new(),
            b: Vec::new(),
            b_prev: Vec::new(),
            b_scratch: Vec::new(),
            f0: [0.0; N],
            y0: [0.0; N],
            y_stage: [0.0; N],
            p: [0.0; N],
            yk: [0.0; N],
            last_f: [0.0; N],
            step_begin: 0.0,
            step_size: 0.0,
            prev_step: 0.0,
            step_count: 0,
        };
        this.rebuild();
        Ok(this)
    }

    /// The bound system.
    pub fn system(&self) -> &S {
        &self.sys
    }

    /// The current integration order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Change the integration order; rebuilds the node-dependent matrices
    /// and resets all warm state.
    pub fn set_order(&mut self, order: usize) -> Result<(), ConfigError> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(ConfigError::OrderOutOfRange { order });
        }
        self.order = order;
        self.rebuild();
        Ok(())
    }

    /// Set the convergence tolerance, floored at 1e-15.
    pub fn set_local_error(&mut self, local_error: f64) {
        self.local_error = local_error.max(MIN_LOCAL_ERROR);
    }

    /// Set the cap on correction sweeps per step, floored at 1.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations.max(1);
    }

    /// When true (the default) a non-converged step fails hard; when
    /// false the last iterate is accepted.
    pub fn set_verify_convergence(&mut self, verify: bool) {
        self.verify_convergence = verify;
    }

    /// Number of quadrature nodes m = order/2.
    fn subdivisions(&self) -> usize {
        self.order / 2
    }

    /// Whether the current order uses Radau spacings (odd orders).
    fn is_radau(&self) -> bool {
        self.order % 2 == 1
    }

    /// Node block for the current order.
    fn nodes(&self) -> &'static [f64] {
        let m = self.order / 2;
        let offset = m * (self.order - m - 1);
        &NODES[offset..offset + m]
    }

    /// Resize working storage and recompute C, D, E, Δτ for the current
    /// order, then clear all warm state.
    fn rebuild(&mut self) {
        let m = self.subdivisions();
        self.c_mat = vec![vec![0.0; m + 1]; m + 1];
        self.d_mat = vec![vec![0.0; m + 1]; m + 1];
        self.e_mat = vec![vec![0.0; m + 1]; m + 1];
        self.dtau = vec![vec![0.0; m]; m];
        self.a = vec![[0.0; N]; m];
        self.b = vec![[0.0; N]; m];
        self.b_prev = vec![[0.0; N]; m];
        self.b_scratch = vec![[0.0; N]; m];

        let nodes = self.nodes();

        // Unit first column for E, unit diagonals everywhere
        for i in 0..=m {
            for j in 0..=m {
                let diag = if j != 0 && i == j { 1.0 } else { 0.0 };
                self.c_mat[i][j] = diag;
                self.d_mat[i][j] = diag;
                self.e_mat[i][j] = if j == 0 { 1.0 } else { diag };
            }
        }

        // Recurrences over the strict lower-left triangle
        for j in 0..m {
            for i in (j + 1)..m {
                let c = self.c_mat[i][j] - nodes[i - 1] * self.c_mat[i][j + 1];
                let d = self.d_mat[i][j] + nodes[j] * self.d_mat[i][j + 1];
                let e = self.e_mat[i][j] + self.e_mat[i][j + 1];
                self.c_mat[i + 1][j + 1] = c;
                self.d_mat[i + 1][j + 1] = d;
                self.e_mat[i + 1][j + 1] = e;
            }
        }

        // Column/row normalization: C columns divided by (i+1), D and E
        // rows multiplied by (i+1)
        for i in 1..=m {
            let f = (i + 1) as f64;
            for j in 1..=m {
                self.c_mat[j][i] /= f;
                self.d_mat[i][j] *= f;
                self.e_mat[i][j] *= f;
            }
        }

        for i in 0..m {
            for j in 0..i {
                self.dtau[i][j] = 1.0 / (nodes[i] - nodes[j]);
            }
        }

        self.reset_state();
    }

    /// Zero coefficients and cached vectors, clear the step counter.
    fn reset_state(&mut self) {
        for s in 0..self.subdivisions() {
            self.a[s] = [0.0; N];
            self.b[s] = [0.0; N];
            self.b_prev[s] = [0.0; N];
        }
        self.f0 = [0.0; N];
        self.y0 = [0.0; N];
        self.y_stage = [0.0; N];
        self.p = [0.0; N];
        self.yk = [0.0; N];
        self.last_f = [0.0; N];
        self.step_begin = 0.0;
        self.step_size = 0.0;
        self.prev_step = 0.0;
        self.step_count = 0;
    }

    /// Evaluate y(τ) = y₀ + hτ·f₀ + hτ·Σⱼ bⱼτʲ into `y_stage`, Horner
    /// nested from j = m−1 down.
    fn eval_solution(&mut self, tau: f64, h: f64) {
        self.p = [0.0; N];
        for j in (0..self.subdivisions()).rev() {
            for eq in 0..N {
                self.p[eq] = tau * (self.b[j][eq] + self.p[eq]);
            }
        }
        for eq in 0..N {
            self.y_stage[eq] = self.y0[eq] + h * tau * self.f0[eq] + h * tau * self.p[eq];
        }
    }

    /// One correction sweep over the nodes, strictly in node order: each
    /// node uses the a-values already updated earlier in the same sweep.
    fn sweep(&mut self, t: f64, h: f64) -> Result<(), StepError> {
        let m = self.subdivisions();
        let is_radau = self.is_radau();
        let nodes = self.nodes();
        for i in 0..m {
            let tau = nodes[i];
            self.eval_solution(tau, h);
            let t_node = t + h * tau;
            if !self.sys.rhs(t_node, &self.y_stage, &mut self.p) {
                return Err(StepError::RhsFailure { t: t_node });
            }
            // The τ = 1 derivative seeds f₀ of the next Lobatto step
            if !is_radau && i == m - 1 {
                self.last_f = self.p;
            }

            for eq in 0..N {
                self.p[eq] = (self.p[eq] - self.f0[eq]) / tau;
            }
            // Descending triangular correction through earlier nodes
            for j in 0..i {
                let dt = self.dtau[i][j];
                for eq in 0..N {
                    self.p[eq] = dt * (self.p[eq] - self.a[j][eq]);
                }
            }
            for eq in 0..N {
                let delta = self.p[eq] - self.a[i][eq];
                for j in 0..=i {
                    self.b[j][eq] += self.c_mat[i + 1][j + 1] * delta;
                }
            }
            self.a[i] = self.p;
        }
        Ok(())
    }

    /// Component-wise agreement between the latest and previous sweep's
    /// end-node candidate.
    fn converged(&self) -> bool {
        (0..N).all(|eq| {
            (self.y_stage[eq] - self.yk[eq]).abs()
                <= self.local_error * (self.y_stage[eq].abs() + 1e-15)
        })
    }
}

impl<S: OdeSystem<N>, const N: usize> Method<N> for Everhart<S, N> {
    fn step(
        &mut self,
        t: f64,
        y: &[f64; N],
        h: f64,
        y_out: &mut [f64; N],
    ) -> Result<(), StepError> {
        if h == 0.0 {
            *y_out = *y;
            return Ok(());
        }
        let m = self.subdivisions();
        let is_radau = self.is_radau();

        self.step_begin = t;
        self.step_size = h;

        let r = if self.prev_step == 0.0 || self.step_count == 0 {
            1.0
        } else {
            h / self.prev_step
        };

        // f₀ is evaluated exactly once per step: fresh for Radau schemes
        // and the first step, from the cached τ = 1 derivative for warm
        // Lobatto steps
        self.y0 = *y;
        if is_radau || self.step_count == 0 {
            if !self.sys.rhs(t, &self.y0, &mut self.f0) {
                return Err(StepError::RhsFailure { t });
            }
        } else {
            self.f0 = self.last_f;
        }

        // Until two full steps have run, the prediction history is the
        // current b-vector itself
        if self.step_count < 2 {
            for s in 0..m {
                self.b_prev[s] = self.b[s];
            }
        }
        for s in 0..m {
            self.b_scratch[s] = self.b[s];
        }

        // Warm-start prediction: scale the previous step's b-vector by a
        // power series in r = h/h_prev
        let mut q = 1.0;
        for s in 0..m {
            self.p = [0.0; N];
            for mm in s..m {
                let ems = self.e_mat[mm + 1][s + 1];
                for eq in 0..N {
                    self.p[eq] += ems * self.b_scratch[mm][eq];
                }
            }
            q *= r;
            for eq in 0..N {
                let old = self.b_prev[s][eq];
                let fresh = q * self.p[eq] / (s as f64 + 2.0);
                self.b[s][eq] += fresh - old;
                self.b_prev[s][eq] = fresh;
            }
        }

        // B → A conversion through D
        for s in 0..m {
            self.p = [0.0; N];
            for mm in s..m {
                let dms = self.d_mat[mm + 1][s + 1];
                for eq in 0..N {
                    self.p[eq] += dms * self.b[mm][eq];
                }
            }
            self.a[s] = self.p;
        }

        // Correction sweeps until the end-node candidate settles
        let mut converged = false;
        for iter in 0..self.max_iterations {
            self.sweep(t, h)?;
            if iter > 0 && self.converged() {
                converged = true;
                break;
            }
            self.yk = self.y_stage;
        }
        if self.verify_convergence && !converged {
            debug!(
                "order-{} corrector did not settle within {} sweeps at t = {}",
                self.order, self.max_iterations, t
            );
            return Err(StepError::NonConvergence {
                max_iterations: self.max_iterations,
            });
        }

        if is_radau {
            // Radau nodes exclude τ = 1; evaluate the end state from the
            // refined coefficients
            self.eval_solution(1.0, h);
        }
        *y_out = self.y_stage;

        self.prev_step = h;
        self.step_count += 1;
        Ok(())
    }

    fn interpolate(&mut self, t: f64, y_out: &mut [f64; N]) -> bool {
        if self.step_count == 0 {
            return false;
        }
        let tau = (t - self.step_begin) / self.step_size;
        if !(0.0..=1.0).contains(&tau) {
            return false;
        }
        self.eval_solution(tau, self.step_size);
        *y_out = self.y_stage;
        true
    }

    fn supports_interpolation(&self) -> bool {
        true
    }

    fn initialize(&mut self) {
        self.reset_state();
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

    struct Oscillator;
    impl OdeSystem<2> for Oscillator {
        fn rhs(&self, _t: f64, y: &[f64; 2], dydt: &mut [f64; 2]) -> bool {
            dydt[0] = y[1];
            dydt[1] = -y[0];
            true
        }
    }

    #[test]
    fn test_order_range_enforced() {
        assert!(matches!(
            Everhart::<_, 1>::new(Growth, 1),
            Err(ConfigError::OrderOutOfRange { order: 1 })
        ));
        assert!(matches!(
            Everhart::<_, 1>::new(Growth, 33),
            Err(ConfigError::OrderOutOfRange { order: 33 })
        ));
        assert!(Everhart::<_, 1>::new(Growth, 2).is_ok());
        assert!(Everhart::<_, 1>::new(Growth, 32).is_ok());
    }

    #[test]
    fn test_single_step_order_15() {
        // y' = y over [0, 1] in one step: |y(1) − e| below 1e-12
        let mut ev = Everhart::new(Growth, 15).unwrap();
        let mut out = [0.0];
        ev.step(0.0, &[1.0], 1.0, &mut out).unwrap();
        let err = (out[0] - std::f64::consts::E).abs();
        assert!(err < 1e-12, "err = {:e}", err);
    }

    #[test]
    fn test_interpolation_identities() {
        let mut ev = Everhart::new(Growth, 15).unwrap();
        let mut out = [0.0];
        ev.step(0.0, &[1.0], 1.0, &mut out).unwrap();

        // τ = 0 returns y₀ exactly
        let mut at0 = [f64::NAN];
        assert!(ev.interpolate(0.0, &mut at0));
        assert_eq!(at0[0], 1.0);

        // τ = 1 matches the published end state
        let mut at1 = [f64::NAN];
        assert!(ev.interpolate(1.0, &mut at1));
        assert!((at1[0] - out[0]).abs() < 1e-12);

        // Interior point against the analytic solution; the collocation
        // polynomial is less accurate inside the step than at its ends
        let mut mid = [f64::NAN];
        assert!(ev.interpolate(0.5, &mut mid));
        assert!((mid[0] - 0.5f64.exp()).abs() < 1e-10);

        // Outside the stored interval
        let mut outside = [f64::NAN];
        assert!(!ev.interpolate(1.5, &mut outside));
        assert!(!ev.interpolate(-0.25, &mut outside));
        assert!(outside[0].is_nan());
    }

    #[test]
    fn test_interpolation_requires_a_completed_step() {
        let mut ev = Everhart::new(Growth, 9).unwrap();
        let mut out = [0.0];
        assert!(!ev.interpolate(0.0, &mut out));
    }

    #[test]
    fn test_zero_step_copies_state() {
        let mut ev = Everhart::new(Growth, 9).unwrap();
        let mut out = [0.0];
        ev.step(2.0, &[4.25], 0.0, &mut out).unwrap();
        assert_eq!(out[0], 4.25);
    }

    #[test]
    fn test_lobatto_warm_steps() {
        // Even order: the τ = 1 derivative of each step seeds the next
        let mut ev = Everhart::new(Growth, 16).unwrap();
        let mut y = [1.0];
        let mut out = [0.0];
        let mut t = 0.0;
        for _ in 0..10 {
            ev.step(t, &y, 0.1, &mut out).unwrap();
            y = out;
            t += 0.1;
        }
        let err = (y[0] - std::f64::consts::E).abs();
        assert!(err < 1e-11, "err = {:e}", err);
    }

    #[test]
    fn test_order_two_is_second_order() {
        // Halving h must quarter the error for the order-2 scheme
        let run = |h: f64, steps: usize| {
            let mut ev = Everhart::new(Growth, 2).unwrap();
            let mut y = [1.0];
            let mut out = [0.0];
            let mut t = 0.0;
            for _ in 0..steps {
                ev.step(t, &y, h, &mut out).unwrap();
                y = out;
                t += h;
            }
            (y[0] - std::f64::consts::E).abs()
        };
        let ratio = run(0.1, 10) / run(0.05, 20);
        assert!(
            (3.0..5.0).contains(&ratio),
            "error ratio {} outside [3, 5]",
            ratio
        );
    }

    #[test]
    fn test_backward_integration() {
        // Negative h propagates through the node times and prediction
        let mut ev = Everhart::new(Growth, 15).unwrap();
        let mut y = [std::f64::consts::E];
        let mut out = [0.0];
        let mut t = 1.0;
        for _ in 0..10 {
            ev.step(t, &y, -0.1, &mut out).unwrap();
            y = out;
            t -= 0.1;
        }
        assert!((y[0] - 1.0).abs() < 1e-12, "y = {}", y[0]);
    }

    #[test]
    fn test_variable_step_prediction() {
        // Uneven step sizes exercise the r = h/h_prev power series
        let mut ev = Everhart::new(Growth, 15).unwrap();
        let mut y = [1.0];
        let mut out = [0.0];
        let mut t = 0.0;
        for h in [0.05, 0.15, 0.1, 0.05, 0.15, 0.1, 0.2] {
            ev.step(t, &y, h, &mut out).unwrap();
            y = out;
            t += h;
        }
        let err = (y[0] - t.exp()).abs();
        assert!(err < 1e-12, "err = {:e}", err);
    }

    #[test]
    fn test_oscillator_two_dimensional() {
        let mut ev = Everhart::new(Oscillator, 14).unwrap();
        let mut y = [1.0, 0.0];
        let mut out = [0.0; 2];
        let mut t = 0.0;
        let h = 2.0 * std::f64::consts::PI / 20.0;
        for _ in 0..20 {
            ev.step(t, &y, h, &mut out).unwrap();
            y = out;
            t += h;
        }
        assert!((y[0] - 1.0).abs() < 1e-12, "y0 = {}", y[0]);
        assert!(y[1].abs() < 1e-12, "y1 = {}", y[1]);
    }

    #[test]
    fn test_non_convergence_fails_hard() {
        let mut ev = Everhart::new(Growth, 15).unwrap();
        ev.set_max_iterations(1);
        // A single sweep can never report convergence
        let mut out = [0.0];
        let res = ev.step(0.0, &[1.0], 0.5, &mut out);
        assert!(matches!(res, Err(StepError::NonConvergence { .. })));

        let mut lenient = Everhart::new(Growth, 15).unwrap();
        lenient.set_max_iterations(1);
        lenient.set_verify_convergence(false);
        lenient.step(0.0, &[1.0], 0.5, &mut out).unwrap();
    }

    #[test]
    fn test_rhs_failure_propagates() {
        struct Domain;
        impl OdeSystem<1> for Domain {
            fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) -> bool {
                if y[0] < 0.0 {
                    return false;
                }
                dydt[0] = -2.0;
                true
            }
        }
        let mut ev = Everhart::new(Domain, 9).unwrap();
        let mut out = [0.0];
        // Starting near zero, interior nodes dip below the domain
        let res = ev.step(0.0, &[0.1], 1.0, &mut out);
        assert!(matches!(res, Err(StepError::RhsFailure { .. })));
    }

    #[test]
    fn test_set_order_rebuilds() {
        let mut ev = Everhart::new(Growth, 7).unwrap();
        let mut out = [0.0];
        ev.step(0.0, &[1.0], 0.5, &mut out).unwrap();
        ev.set_order(21).unwrap();
        assert_eq!(ev.order(), 21);
        // Warm state was discarded with the rebuild
        let mut after = [0.0];
        ev.step(0.0, &[1.0], 1.0, &mut after).unwrap();
        assert!((after[0] - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_initialize_restores_cold_start() {
        let mut ev = Everhart::new(Growth, 15).unwrap();
        let mut first = [0.0];
        ev.step(0.0, &[1.0], 1.0, &mut first).unwrap();
        ev.initialize();
        let mut second = [0.0];
        ev.step(0.0, &[1.0], 1.0, &mut second).unwrap();
        assert_eq!(first[0], second[0]);
    }
}
