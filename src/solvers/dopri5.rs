/// ==============================================================================================
/// ============================== Dormand–Prince 5(4), explicit =================================
/// ==============================================================================================

use super::control::{Attempt, SolverStats, Stepper, Tolerances, combine};
use super::system::OdeSystem;

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;
const A71: f64 = 35.0 / 384.0;
const A73: f64 = 500.0 / 1113.0;
const A74: f64 = 125.0 / 192.0;
const A75: f64 = -2187.0 / 6784.0;
const A76: f64 = 11.0 / 84.0;

// b − b̂ (5th minus embedded 4th order weights)
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// Seven-stage FSAL pair; propagates the 5th-order solution.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Dopri5;

impl<const N: usize> Stepper<N> for Dopri5 {
    const EXPONENT: f64 = 0.2;

    fn attempt<S: OdeSystem<N>>(
        &mut self,
        system: &S,
        t: f64,
        y: &[f64; N],
        f0: &[f64; N],
        h: f64,
        tol: &Tolerances,
        stats: &mut SolverStats,
    ) -> Attempt<N> {
        let k1 = *f0;
        let mut k2 = [0.0; N];
        let mut k3 = [0.0; N];
        let mut k4 = [0.0; N];
        let mut k5 = [0.0; N];
        let mut k6 = [0.0; N];
        let mut k7 = [0.0; N];

        let y2 = combine(y, h, &[(A21, &k1)]);
        system.rhs(t + C2 * h, &y2, &mut k2);

        let y3 = combine(y, h, &[(A31, &k1), (A32, &k2)]);
        system.rhs(t + C3 * h, &y3, &mut k3);

        let y4 = combine(y, h, &[(A41, &k1), (A42, &k2), (A43, &k3)]);
        system.rhs(t + C4 * h, &y4, &mut k4);

        let y5 = combine(y, h, &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]);
        system.rhs(t + C5 * h, &y5, &mut k5);

        let y6 = combine(
            y,
            h,
            &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
        );
        system.rhs(t + h, &y6, &mut k6);

        let y_new = combine(
            y,
            h,
            &[(A71, &k1), (A73, &k3), (A74, &k4), (A75, &k5), (A76, &k6)],
        );
        system.rhs(t + h, &y_new, &mut k7);
        stats.rhs_evals += 6;

        let err: [f64; N] = std::array::from_fn(|i| {
            h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i])
        });
        let error = tol.error_norm(&err, y, &y_new);

        // h·λ ≈ h·‖k7 − k6‖ / ‖y7 − y6‖ (both stages sit at t + h)
        let num: f64 = (0..N).map(|i| (k7[i] - k6[i]).powi(2)).sum();
        let den: f64 = (0..N).map(|i| (y_new[i] - y6[i]).powi(2)).sum();
        let stiffness = if den > 0.0 { h * (num / den).sqrt() } else { 0.0 };

        Attempt {
            y_new,
            f_new: k7,
            error,
            stiffness,
        }
    }
}
