use crate::state::{BASIS, NUM_STRATEGIES, PayoffMatrix, Vec4, dot};

/// Autonomous or time-dependent first-order system y' = f(t, y) of fixed dimension N.
pub trait OdeSystem<const N: usize> {
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

/// ==============================================================================================
/// =================================== Replicator Equation ======================================
/// ==============================================================================================

/// Replicator dynamics on the 4-strategy simplex:
///     dxᵢ/dt = xᵢ · ( eᵢᵗ·M·x − xᵗ·M·x ),   i = 0, 1, 2
///     dx₃/dt = −(dx₀/dt + dx₁/dt + dx₂/dt)
/// The last component comes from Σxᵢ = 1, not from its own replicator term.
#[derive(Clone, Copy, Debug)]
pub struct ReplicatorSystem {
    matrix: PayoffMatrix,
}

impl ReplicatorSystem {
    #[inline]
    pub fn new(matrix: PayoffMatrix) -> Self {
        Self { matrix }
    }
}

impl OdeSystem<NUM_STRATEGIES> for ReplicatorSystem {
    #[inline]
    fn rhs(&self, _t: f64, x: &Vec4, dxdt: &mut Vec4) {
        // M·x and xᵗ·M·x once per evaluation, shared by every component.
        let w = self.matrix.apply(x);
        let mean = dot(x, &w);

        for i in 0..NUM_STRATEGIES - 1 {
            dxdt[i] = x[i] * (dot(&BASIS[i], &w) - mean);
        }
        dxdt[NUM_STRATEGIES - 1] = -(dxdt[0] + dxdt[1] + dxdt[2]);
    }
}
