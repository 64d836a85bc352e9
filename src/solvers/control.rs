/// ==============================================================================================
/// ================================== Step-Size Control =========================================
/// ==============================================================================================

use serde::Serialize;

use super::system::OdeSystem;

pub(crate) const SAFETY: f64 = 0.9;
pub(crate) const MIN_FACTOR: f64 = 0.2;
pub(crate) const MAX_FACTOR: f64 = 5.0;

/// Mixed absolute/relative error weights.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerances {
    /// Weighted RMS norm of `err` against scale `atol + rtol·max(|y|, |ŷ|)`.
    #[inline]
    pub(crate) fn error_norm<const N: usize>(
        &self,
        err: &[f64; N],
        y: &[f64; N],
        y_new: &[f64; N],
    ) -> f64 {
        let sum: f64 = (0..N)
            .map(|i| {
                let scale = self.atol + self.rtol * y[i].abs().max(y_new[i].abs());
                (err[i] / scale).powi(2)
            })
            .sum();
        (sum / N as f64).sqrt()
    }

    #[inline]
    fn weighted_norm<const N: usize>(&self, v: &[f64; N], y: &[f64; N]) -> f64 {
        self.error_norm(v, y, y)
    }
}

/// Counters reported alongside every trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SolverStats {
    pub rhs_evals: usize,
    pub jacobian_evals: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub method_switches: usize,
}

/// Outcome of one trial step.
///     - `error`: scaled error norm (≤ 1 accepts)
///     - `stiffness`: estimate of h·|λ_max| used for method switching
pub(crate) struct Attempt<const N: usize> {
    pub y_new: [f64; N],
    pub f_new: [f64; N],
    pub error: f64,
    pub stiffness: f64,
}

impl<const N: usize> Attempt<N> {
    #[inline]
    pub(crate) fn is_finite(&self) -> bool {
        self.error.is_finite()
            && self.y_new.iter().all(|v| v.is_finite())
            && self.f_new.iter().all(|v| v.is_finite())
    }

    pub(crate) fn rejected() -> Self {
        Self {
            y_new: [f64::NAN; N],
            f_new: [f64::NAN; N],
            error: f64::INFINITY,
            stiffness: 0.0,
        }
    }
}

/// A one-step method with embedded error estimate and FSAL derivative.
pub(crate) trait Stepper<const N: usize> {
    /// Exponent of the step-size controller, 1 / (q + 1) for an order-q error estimate.
    const EXPONENT: f64;

    fn attempt<S: OdeSystem<N>>(
        &mut self,
        system: &S,
        t: f64,
        y: &[f64; N],
        f0: &[f64; N],
        h: f64,
        tol: &Tolerances,
        stats: &mut SolverStats,
    ) -> Attempt<N>;
}

/// New step size from an error norm.
#[inline]
pub(crate) fn scale_step(h: f64, error: f64, exponent: f64, max_factor: f64) -> f64 {
    let factor = SAFETY * error.powf(-exponent);
    let factor = if factor.is_nan() { MIN_FACTOR } else { factor };
    h * factor.clamp(MIN_FACTOR, max_factor)
}

/// y + h·Σ cᵢ·kᵢ
#[inline]
pub(crate) fn combine<const N: usize>(y: &[f64; N], h: f64, terms: &[(f64, &[f64; N])]) -> [f64; N] {
    std::array::from_fn(|i| {
        let incr: f64 = terms.iter().map(|(c, k)| c * k[i]).sum();
        y[i] + h * incr
    })
}

/// Starting step (Hairer–Nørsett–Wanner heuristic) for a method of order `order`.
pub(crate) fn initial_step<S: OdeSystem<N>, const N: usize>(
    system: &S,
    t0: f64,
    y0: &[f64; N],
    f0: &[f64; N],
    span: f64,
    order: i32,
    tol: &Tolerances,
    stats: &mut SolverStats,
) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }

    let d0 = tol.weighted_norm(y0, y0);
    let d1 = tol.weighted_norm(f0, y0);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 };
    let h0 = h0.min(span);

    let y1 = combine(y0, h0, &[(1.0, f0)]);
    let mut f1 = [0.0; N];
    system.rhs(t0 + h0, &y1, &mut f1);
    stats.rhs_evals += 1;

    let diff: [f64; N] = std::array::from_fn(|i| f1[i] - f0[i]);
    let d2 = tol.weighted_norm(&diff, y0) / h0;

    let dmax = d1.max(d2);
    let h1 = if !dmax.is_finite() {
        h0
    } else if dmax <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / dmax).powf(1.0 / f64::from(order + 1))
    };

    (100.0 * h0).min(h1).min(span)
}
