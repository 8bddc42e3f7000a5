//! Banded matrix storage addressed by diagonal offset.
//!
//! The deck operators only couple nodes up to two apart, so the reduced
//! stiffness matrix fits in five diagonals. Storage is a `(lower + upper + 1) x n`
//! array where diagonal `d = col - row + lower` of row `row` lives at
//! `(d, row)`.

use nalgebra::DMatrix;
#[cfg(test)]
use nalgebra::DVector;

/// Square matrix with a fixed number of sub- and super-diagonals.
#[derive(Clone, Debug, PartialEq)]
pub struct BandedMatrix {
    /// Number of rows and columns.
    size: usize,
    /// Number of sub-diagonals.
    lower: usize,
    /// Number of super-diagonals.
    upper: usize,
    /// Diagonal storage, one row per offset.
    diagonals: DMatrix<f64>,
}

impl BandedMatrix {
    /// Create a zero matrix of dimension `size` with the given bandwidths.
    #[must_use]
    pub fn zeros(size: usize, lower: usize, upper: usize) -> Self {
        Self {
            size,
            lower,
            upper,
            diagonals: DMatrix::zeros(lower + upper + 1, size),
        }
    }

    /// Copy the band of a dense square matrix; entries outside the band are discarded.
    #[must_use]
    pub fn from_dense(matrix: &DMatrix<f64>, lower: usize, upper: usize) -> Self {
        let mut banded = Self::zeros(matrix.nrows(), lower, upper);
        for row in 0..banded.size {
            for col in banded.columns(row) {
                banded.set(row, col, matrix[(row, col)]);
            }
        }
        banded
    }

    /// Expand into a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.size, self.size);
        for row in 0..self.size {
            for col in self.columns(row) {
                dense[(row, col)] = self.get(row, col);
            }
        }
        dense
    }

    /// Matrix dimension.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sub-diagonals.
    #[must_use]
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Number of super-diagonals.
    #[must_use]
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Columns of `row` that fall inside the band.
    pub fn columns(&self, row: usize) -> std::ops::RangeInclusive<usize> {
        row.saturating_sub(self.lower)..=(row + self.upper).min(self.size.saturating_sub(1))
    }

    /// Storage row holding entry `(row, col)`, if it is inside the band.
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        let shifted = col + self.lower;
        (shifted >= row && shifted - row <= self.lower + self.upper).then(|| shifted - row)
    }

    /// Entry `(row, col)`; zero outside the band.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.offset(row, col)
            .map_or(0.0, |diagonal| self.diagonals[(diagonal, row)])
    }

    /// Overwrite entry `(row, col)`.
    ///
    /// Writes outside the band are ignored; only zeros may be written there.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        match self.offset(row, col) {
            Some(diagonal) => self.diagonals[(diagonal, row)] = value,
            None => debug_assert!(value == 0.0, "({row}, {col}) is outside the band"),
        }
    }

    /// Widen the upper bandwidth to `upper`, keeping every entry.
    #[must_use]
    pub fn with_upper(&self, upper: usize) -> Self {
        let mut widened = Self::zeros(self.size, self.lower, upper.max(self.upper));
        for row in 0..self.size {
            for col in self.columns(row) {
                widened.set(row, col, self.get(row, col));
            }
        }
        widened
    }

    /// Exchange rows `a` and `b` over `columns`.
    pub fn swap_rows(&mut self, a: usize, b: usize, columns: std::ops::RangeInclusive<usize>) {
        for col in columns {
            let value_a = self.get(a, col);
            let value_b = self.get(b, col);
            self.set(a, col, value_b);
            self.set(b, col, value_a);
        }
    }

    /// Matrix-vector product.
    #[cfg(test)]
    #[must_use]
    pub fn multiply(&self, vector: &DVector<f64>) -> DVector<f64> {
        DVector::from_fn(self.size, |row, _| {
            self.columns(row)
                .map(|col| self.get(row, col) * vector[col])
                .sum()
        })
    }
}
