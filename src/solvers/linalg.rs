/// ==============================================================================================
/// ================================ Small Dense LU (N ≤ ~8) =====================================
/// ==============================================================================================

pub(crate) type Matrix<const N: usize> = [[f64; N]; N];

/// LU factorization with partial pivoting, stored in place (unit lower triangle implied).
pub(crate) struct Lu<const N: usize> {
    lu: Matrix<N>,
    perm: [usize; N],
}

impl<const N: usize> Lu<N> {
    /// Factor `a`; `None` if a pivot vanishes or is not finite.
    pub(crate) fn factor(mut a: Matrix<N>) -> Option<Self> {
        let mut perm: [usize; N] = std::array::from_fn(|i| i);

        for k in 0..N {
            let p = (k..N)
                .max_by(|&i, &j| a[i][k].abs().total_cmp(&a[j][k].abs()))
                .unwrap_or(k);
            let pivot = a[p][k];
            if pivot == 0.0 || !pivot.is_finite() {
                return None;
            }
            a.swap(k, p);
            perm.swap(k, p);

            for i in k + 1..N {
                let factor = a[i][k] / a[k][k];
                a[i][k] = factor;
                for j in k + 1..N {
                    a[i][j] -= factor * a[k][j];
                }
            }
        }

        Some(Self { lu: a, perm })
    }

    /// Solve A·x = b.
    pub(crate) fn solve(&self, b: &[f64; N]) -> [f64; N] {
        let mut x: [f64; N] = std::array::from_fn(|i| b[self.perm[i]]);

        // L·z = P·b
        for i in 0..N {
            for j in 0..i {
                x[i] -= self.lu[i][j] * x[j];
            }
        }
        // U·x = z
        for i in (0..N).rev() {
            for j in i + 1..N {
                x[i] -= self.lu[i][j] * x[j];
            }
            x[i] /= self.lu[i][i];
        }
        x
    }
}

/// Maximum absolute row sum.
pub(crate) fn inf_norm<const N: usize>(a: &Matrix<N>) -> f64 {
    a.iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}
