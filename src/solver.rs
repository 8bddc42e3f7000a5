//! Direct elimination of the reduced deck system.
//!
//! Both routines share one pivot policy: a pivot is only replaced when its
//! magnitude drops below [`PIVOT_TOLERANCE`], and then by the first row below
//! with a larger entry in the pivot column. When no usable pivot exists the
//! system is singular and the solution is all zeros. A solve that overflows
//! to a non-finite value is reported the same way, at the first such row.

use nalgebra::{DMatrix, DVector};

use crate::banded::BandedMatrix;

/// Magnitude below which a pivot is treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Outcome of an elimination.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Solved unknowns, or zeros for a singular system.
    pub values: DVector<f64>,
    /// Row at which elimination found no usable pivot.
    pub singular_row: Option<usize>,
}

impl Solution {
    /// Zero solution reported for a singular system.
    fn singular(size: usize, row: usize) -> Self {
        log::debug!("no usable pivot in row {row} of {size}; returning zero solution");
        Self {
            values: DVector::zeros(size),
            singular_row: Some(row),
        }
    }

    /// Accept `values` unless one of them is infinite or NaN.
    fn checked(values: DVector<f64>) -> Self {
        match values.iter().position(|value| !value.is_finite()) {
            Some(row) => Self::singular(values.len(), row),
            None => Self {
                values,
                singular_row: None,
            },
        }
    }

    /// Whether elimination stopped on a singular pivot.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.singular_row.is_some()
    }
}

/// Whether `pivot` can be divided by. NaN and infinities never can.
fn usable(pivot: f64) -> bool {
    pivot.is_finite() && pivot.abs() >= PIVOT_TOLERANCE
}

/// Solve `matrix · x = rhs` by Gauss-Jordan elimination.
///
/// # Examples
/// ```
/// use airdeck::solver::solve_dense;
/// use nalgebra::{DMatrix, DVector};
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[0.0, 2.0, 4.0, 0.0]);
/// let solution = solve_dense(&matrix, &DVector::from_vec(vec![6.0, 8.0]));
/// assert_eq!(solution.values, DVector::from_vec(vec![2.0, 3.0]));
/// assert!(!solution.is_singular());
/// ```
#[must_use]
pub fn solve_dense(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Solution {
    let size = matrix.nrows();
    let mut work = matrix.clone();
    let mut x = rhs.clone();

    for k in 0..size {
        let mut pivot = work[(k, k)];
        if !usable(pivot) {
            if let Some(row) = ((k + 1)..size).find(|&row| work[(row, k)].abs() > pivot.abs()) {
                work.swap_rows(k, row);
                x.swap_rows(k, row);
                pivot = work[(k, k)];
            }
        }
        if !usable(pivot) {
            return Solution::singular(size, k);
        }

        let inverse = 1.0 / pivot;
        for col in k..size {
            work[(k, col)] *= inverse;
        }
        x[k] *= inverse;

        for row in 0..size {
            if row == k {
                continue;
            }
            let factor = work[(row, k)];
            if factor == 0.0 {
                continue;
            }
            for col in k..size {
                work[(row, col)] -= factor * work[(k, col)];
            }
            x[row] -= factor * x[k];
        }
    }

    Solution::checked(x)
}

/// Solve `matrix · x = rhs` by banded Gaussian elimination and back substitution.
///
/// Row exchanges can push entries up to `lower` places past the original upper
/// band, so elimination runs on a copy widened to `upper + lower`
/// super-diagonals. Work and memory grow linearly with the matrix size.
#[must_use]
pub fn solve_banded(matrix: &BandedMatrix, rhs: &DVector<f64>) -> Solution {
    let size = matrix.size();
    let lower = matrix.lower();
    let upper = matrix.upper() + lower;
    let mut work = matrix.with_upper(upper);
    let mut x = rhs.clone();

    for k in 0..size {
        let last_row = (k + lower).min(size - 1);
        let last_col = (k + upper).min(size - 1);

        let mut pivot = work.get(k, k);
        if !usable(pivot) {
            if let Some(row) = ((k + 1)..=last_row).find(|&row| work.get(row, k).abs() > pivot.abs()) {
                work.swap_rows(k, row, k..=last_col);
                x.swap_rows(k, row);
                pivot = work.get(k, k);
            }
        }
        if !usable(pivot) {
            return Solution::singular(size, k);
        }

        for row in (k + 1)..=last_row {
            let factor = work.get(row, k) / pivot;
            if factor == 0.0 {
                continue;
            }
            for col in k..=last_col {
                let updated = work.get(row, col) - factor * work.get(k, col);
                work.set(row, col, updated);
            }
            x[row] -= factor * x[k];
        }
    }

    for row in (0..size).rev() {
        let last_col = (row + upper).min(size - 1);
        let mut value = x[row];
        for col in (row + 1)..=last_col {
            value -= work.get(row, col) * x[col];
        }
        x[row] = value / work.get(row, row);
    }

    Solution::checked(x)
}
