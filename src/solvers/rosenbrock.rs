/// ==============================================================================================
/// ========================== Rosenbrock 2(3), linearly implicit ================================
/// ==============================================================================================

use super::control::{Attempt, SolverStats, Stepper, Tolerances, combine};
use super::linalg::{Lu, Matrix, inf_norm};
use super::system::OdeSystem;

/// Shampine–Reichelt modified Rosenbrock pair (L-stable, order 2 with order-3 error estimate).
///     W  = I − h·d·J,   d = 1 / (2 + √2)
///     k₁ = W⁻¹ (F₀ + h·d·∂f/∂t)
///     k₂ = W⁻¹ (F₁ − k₁) + k₁,                 F₁ = f(t + h/2, y + h/2·k₁)
///     ŷ  = y + h·k₂
///     k₃ = W⁻¹ (F₂ − e₃₂(k₂ − F₁) − 2(k₁ − F₀) + h·d·∂f/∂t),   F₂ = f(t + h, ŷ)
///     err = h/6 · (k₁ − 2k₂ + k₃)
/// The Jacobian is formed by forward differences at every attempt.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Rosenbrock23;

const D: f64 = 1.0 / (2.0 + std::f64::consts::SQRT_2);
const E32: f64 = 6.0 + std::f64::consts::SQRT_2;

impl<const N: usize> Stepper<N> for Rosenbrock23 {
    const EXPONENT: f64 = 1.0 / 3.0;

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
        let (jac, dfdt) = finite_difference_jacobian(system, t, y, f0, stats);

        let hd = h * D;
        let mut w: Matrix<N> = [[0.0; N]; N];
        for i in 0..N {
            for j in 0..N {
                w[i][j] = -hd * jac[i][j];
            }
            w[i][i] += 1.0;
        }
        let Some(lu) = Lu::factor(w) else {
            return Attempt::rejected();
        };

        let tdt: [f64; N] = std::array::from_fn(|i| hd * dfdt[i]);

        let rhs1: [f64; N] = std::array::from_fn(|i| f0[i] + tdt[i]);
        let k1 = lu.solve(&rhs1);

        let y1 = combine(y, 0.5 * h, &[(1.0, &k1)]);
        let mut f1 = [0.0; N];
        system.rhs(t + 0.5 * h, &y1, &mut f1);

        let rhs2: [f64; N] = std::array::from_fn(|i| f1[i] - k1[i]);
        let mut k2 = lu.solve(&rhs2);
        for i in 0..N {
            k2[i] += k1[i];
        }

        let y_new = combine(y, h, &[(1.0, &k2)]);
        let mut f2 = [0.0; N];
        system.rhs(t + h, &y_new, &mut f2);

        let rhs3: [f64; N] = std::array::from_fn(|i| {
            f2[i] - E32 * (k2[i] - f1[i]) - 2.0 * (k1[i] - f0[i]) + tdt[i]
        });
        let k3 = lu.solve(&rhs3);
        stats.rhs_evals += 2;

        let err: [f64; N] = std::array::from_fn(|i| h / 6.0 * (k1[i] - 2.0 * k2[i] + k3[i]));
        let error = tol.error_norm(&err, y, &y_new);

        Attempt {
            y_new,
            f_new: f2,
            error,
            stiffness: h * inf_norm(&jac),
        }
    }
}

/// Forward-difference ∂f/∂y and ∂f/∂t around (t, y), reusing f(t, y) = `f0`.
fn finite_difference_jacobian<S: OdeSystem<N>, const N: usize>(
    system: &S,
    t: f64,
    y: &[f64; N],
    f0: &[f64; N],
    stats: &mut SolverStats,
) -> (Matrix<N>, [f64; N]) {
    let sqrt_eps = f64::EPSILON.sqrt();
    let mut jac: Matrix<N> = [[0.0; N]; N];
    let mut shifted = *y;
    let mut f_shift = [0.0; N];

    for j in 0..N {
        let yj = y[j];
        // Representable increment.
        let delta = ((yj + sqrt_eps * yj.abs().max(1e-5)) - yj).max(f64::MIN_POSITIVE);
        shifted[j] = yj + delta;
        system.rhs(t, &shifted, &mut f_shift);
        for i in 0..N {
            jac[i][j] = (f_shift[i] - f0[i]) / delta;
        }
        shifted[j] = yj;
    }

    let dt = ((t + sqrt_eps * t.abs().max(1.0)) - t).max(f64::MIN_POSITIVE);
    system.rhs(t + dt, y, &mut f_shift);
    let dfdt: [f64; N] = std::array::from_fn(|i| (f_shift[i] - f0[i]) / dt);

    stats.rhs_evals += N + 1;
    stats.jacobian_evals += 1;
    (jac, dfdt)
}
