/// ==============================================================================================
/// ============================ Grid Driver with Method Switching ===============================
/// ==============================================================================================

use indicatif::ProgressBar;
use log::{debug, trace};
use ndarray::Array2;

use super::control::{
    MAX_FACTOR, SolverStats, Stepper, Tolerances, initial_step, scale_step,
};
use super::dopri5::Dopri5;
use super::rosenbrock::Rosenbrock23;
use super::system::OdeSystem;
use crate::config::{Method, SolverSettings};
use crate::error::IntegrationError;

/// h·λ above which an explicit step counts as stability-limited.
const STIFF_THRESHOLD: f64 = 3.25;
/// Stability-limited explicit steps before switching to the implicit method.
const STIFF_HITS_TO_SWITCH: usize = 15;
/// Calm explicit steps that reset the stiffness counter.
const CALM_STEPS_TO_RESET: usize = 6;
/// Consecutive implicit steps with h·‖J‖ < 1 before switching back.
const CALM_STEPS_TO_RETURN: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Active {
    NonStiff,
    Stiff,
}

/// Decides which stepper runs next from per-step stiffness estimates.
struct Switcher {
    automatic: bool,
    active: Active,
    stiff_hits: usize,
    calm_steps: usize,
}

impl Switcher {
    fn new(method: Method) -> Self {
        let active = match method {
            Method::Stiff => Active::Stiff,
            Method::Auto | Method::NonStiff => Active::NonStiff,
        };
        Self {
            automatic: method == Method::Auto,
            active,
            stiff_hits: 0,
            calm_steps: 0,
        }
    }

    /// Feed the estimate of an accepted step; returns the new method on a switch.
    fn observe(&mut self, h_lambda: f64) -> Option<Active> {
        if !self.automatic {
            return None;
        }

        match self.active {
            Active::NonStiff => {
                if h_lambda > STIFF_THRESHOLD {
                    self.calm_steps = 0;
                    self.stiff_hits += 1;
                    if self.stiff_hits >= STIFF_HITS_TO_SWITCH {
                        return Some(self.switch_to(Active::Stiff));
                    }
                } else {
                    self.calm_steps += 1;
                    if self.calm_steps >= CALM_STEPS_TO_RESET {
                        self.stiff_hits = 0;
                    }
                }
            }
            Active::Stiff => {
                if h_lambda < 1.0 {
                    self.calm_steps += 1;
                    if self.calm_steps >= CALM_STEPS_TO_RETURN {
                        return Some(self.switch_to(Active::NonStiff));
                    }
                } else {
                    self.calm_steps = 0;
                }
            }
        }
        None
    }

    fn switch_to(&mut self, next: Active) -> Active {
        self.active = next;
        self.stiff_hits = 0;
        self.calm_steps = 0;
        next
    }
}

/// Integrate y' = f(t, y) and sample the solution at every point of `times`.
///     Inputs:
///         - `times`: nondecreasing output grid; row 0 is `y0` itself
///         - `settings`: method selection, tolerances, step budget per output interval
///         - `progress`: optional bar advanced once per output sample
///     Steps are clipped to land exactly on each output time.
pub fn integrate<S: OdeSystem<N>, const N: usize>(
    system: &S,                     // f
    y0: &[f64; N],                  // initial state
    times: &[f64],                  // output grid
    settings: &SolverSettings,      // method + tolerances
    progress: Option<&ProgressBar>, // optional progress bar
) -> Result<(Array2<f64>, SolverStats), IntegrationError> {
    let mut stats = SolverStats::default();
    let mut out = Array2::zeros((times.len(), N));

    let Some((&t0, rest)) = times.split_first() else {
        return Ok((out, stats));
    };

    if y0.iter().any(|v| !v.is_finite()) {
        return Err(IntegrationError::NonFiniteState { t: t0 });
    }
    for (dst, &v) in out.row_mut(0).iter_mut().zip(y0.iter()) {
        *dst = v;
    }
    if let Some(pb) = progress {
        pb.inc(1);
    }
    if rest.is_empty() {
        return Ok((out, stats));
    }

    let tol = Tolerances {
        rtol: settings.rtol,
        atol: settings.atol,
    };
    let limit = settings.max_steps_per_sample;

    let mut t = t0;
    let mut y = *y0;
    let mut f = [0.0; N];
    system.rhs(t, &y, &mut f);
    stats.rhs_evals += 1;
    if f.iter().any(|v| !v.is_finite()) {
        return Err(IntegrationError::NonFiniteState { t });
    }

    let mut switcher = Switcher::new(settings.method);
    let order = match switcher.active {
        Active::NonStiff => 5,
        Active::Stiff => 2,
    };
    let span = times[times.len() - 1] - t0;
    let mut h = initial_step(system, t, &y, &f, span, order, &tol, &mut stats);
    debug!("integrate: {} samples over [{t0}, {}], h0 = {h:e}", times.len(), t0 + span);

    let mut dopri = Dopri5;
    let mut rosenbrock = Rosenbrock23;

    for (k, &target) in rest.iter().enumerate() {
        let mut attempts = 0usize;

        while t < target {
            if attempts >= limit {
                return Err(IntegrationError::TooManySteps { t, limit });
            }
            attempts += 1;

            let h_min = 16.0 * f64::EPSILON * t.abs().max(1.0);
            let remaining = target - t;
            let lands = h >= remaining - h_min;
            if !lands && h < h_min {
                return Err(IntegrationError::StepSizeUnderflow { t, h });
            }
            let h_step = if lands { remaining } else { h };

            let (attempt, exponent) = match switcher.active {
                Active::NonStiff => (
                    dopri.attempt(system, t, &y, &f, h_step, &tol, &mut stats),
                    <Dopri5 as Stepper<N>>::EXPONENT,
                ),
                Active::Stiff => (
                    rosenbrock.attempt(system, t, &y, &f, h_step, &tol, &mut stats),
                    <Rosenbrock23 as Stepper<N>>::EXPONENT,
                ),
            };

            if !attempt.is_finite() {
                stats.rejected_steps += 1;
                h = 0.25 * h_step;
                trace!("t = {t}: non-finite trial step, retry with h = {h:e}");
                continue;
            }

            if attempt.error > 1.0 {
                stats.rejected_steps += 1;
                h = scale_step(h_step, attempt.error, exponent, 1.0);
                trace!("t = {t}: rejected (err = {:.3}), h = {h:e}", attempt.error);
                continue;
            }

            stats.accepted_steps += 1;
            t = if lands { target } else { t + h_step };
            y = attempt.y_new;
            f = attempt.f_new;

            let proposal = scale_step(h_step, attempt.error, exponent, MAX_FACTOR);
            h = if lands && h_step < h { proposal.max(h) } else { proposal };

            if let Some(next) = switcher.observe(attempt.stiffness) {
                stats.method_switches += 1;
                debug!("t = {t}: switching to {next:?} method (h·λ = {:.3})", attempt.stiffness);
            }
        }

        for (dst, &v) in out.row_mut(k + 1).iter_mut().zip(y.iter()) {
            *dst = v;
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    debug!(
        "integrate: {} accepted / {} rejected steps, {} rhs evals, {} jacobians, {} switches",
        stats.accepted_steps,
        stats.rejected_steps,
        stats.rhs_evals,
        stats.jacobian_evals,
        stats.method_switches
    );
    Ok((out, stats))
}
