//! Finite-difference operators and the global stiffness matrix.
//!
//! The deck is a beam on a grid of `n` nodes:
//!
//! ```text
//! EI·w'''' - T·w'' + k·w = q
//! ```
//!
//! `D4` and `D2` are the central-difference stencils `[1, -4, 6, -4, 1]` and
//! `[1, -2, 1]`. Under [`Scheme::Legacy`] they are only placed on rows
//! `2..=n-3`, where both neighbours on each side exist; rows 0, 1, n-2 and n-1
//! see the strap spring alone. [`Scheme::Consistent`] also places them on rows
//! 1 and n-2 using the simply-supported ghost node.

use nalgebra::DMatrix;

use crate::banded::BandedMatrix;
use crate::grid::Grid;
use crate::options::Scheme;
use crate::parameters::SectionProperties;

/// Sub- and super-diagonal count of the assembled operators.
pub const BANDWIDTH: usize = 2;

/// Central second difference.
const SECOND_DIFFERENCE: [f64; 3] = [1.0, -2.0, 1.0];
/// Central fourth difference.
const FOURTH_DIFFERENCE: [f64; 5] = [1.0, -4.0, 6.0, -4.0, 1.0];
/// Fourth difference on row 1 with `w[-1] = -w[1]` folded in, columns 0..=3.
const FOURTH_DIFFERENCE_LEFT: [f64; 4] = [-4.0, 5.0, -4.0, 1.0];
/// Mirror of [`FOURTH_DIFFERENCE_LEFT`] for row n-2, columns n-4..=n-1.
const FOURTH_DIFFERENCE_RIGHT: [f64; 4] = [1.0, -4.0, 5.0, -4.0];

/// Weights placed on one row starting at `first_column`.
#[derive(Clone, Copy, Debug)]
struct Stencil {
    /// Row receiving the weights.
    row: usize,
    /// Column of the first weight.
    first_column: usize,
    /// Weights in column order.
    weights: &'static [f64],
}

/// Rows that receive the full central stencils.
///
/// `nodes` comes from a [`Grid`], so it is at least [`MIN_NODES`](crate::grid::MIN_NODES).
fn full_stencil_rows(nodes: usize) -> std::ops::RangeInclusive<usize> {
    2..=nodes - 3
}

/// Placement of the second-difference stencil.
fn second_difference_stencils(nodes: usize, scheme: Scheme) -> Vec<Stencil> {
    let mut stencils: Vec<Stencil> = full_stencil_rows(nodes)
        .map(|row| Stencil {
            row,
            first_column: row - 1,
            weights: &SECOND_DIFFERENCE,
        })
        .collect();
    if scheme == Scheme::Consistent {
        for row in [1, nodes - 2] {
            stencils.push(Stencil {
                row,
                first_column: row - 1,
                weights: &SECOND_DIFFERENCE,
            });
        }
    }
    stencils
}

/// Placement of the fourth-difference stencil.
fn fourth_difference_stencils(nodes: usize, scheme: Scheme) -> Vec<Stencil> {
    let mut stencils: Vec<Stencil> = full_stencil_rows(nodes)
        .map(|row| Stencil {
            row,
            first_column: row - 2,
            weights: &FOURTH_DIFFERENCE,
        })
        .collect();
    if scheme == Scheme::Consistent {
        stencils.push(Stencil {
            row: 1,
            first_column: 0,
            weights: &FOURTH_DIFFERENCE_LEFT,
        });
        stencils.push(Stencil {
            row: nodes - 2,
            first_column: nodes - 4,
            weights: &FOURTH_DIFFERENCE_RIGHT,
        });
    }
    stencils
}

/// Dense matrix holding the given stencils.
fn dense_operator(nodes: usize, stencils: &[Stencil]) -> DMatrix<f64> {
    let mut operator = DMatrix::zeros(nodes, nodes);
    for stencil in stencils {
        for (offset, weight) in stencil.weights.iter().enumerate() {
            operator[(stencil.row, stencil.first_column + offset)] = *weight;
        }
    }
    operator
}

/// Banded matrix holding the given stencils.
fn banded_operator(nodes: usize, stencils: &[Stencil]) -> BandedMatrix {
    let mut operator = BandedMatrix::zeros(nodes, BANDWIDTH, BANDWIDTH);
    for stencil in stencils {
        for (offset, weight) in stencil.weights.iter().enumerate() {
            operator.set(stencil.row, stencil.first_column + offset, *weight);
        }
    }
    operator
}

/// Unscaled second-difference operator `D2` over the nodes of `grid`.
///
/// # Examples
/// ```
/// use airdeck::{operators, Grid, Scheme};
///
/// let grid = Grid::new(500.0, 6).expect("valid grid");
/// let d2 = operators::second_difference(&grid, Scheme::Legacy);
/// assert_eq!(d2[(2, 1)], 1.0);
/// assert_eq!(d2[(2, 2)], -2.0);
/// assert_eq!(d2.row(1).sum(), 0.0);
/// ```
#[must_use]
pub fn second_difference(grid: &Grid, scheme: Scheme) -> DMatrix<f64> {
    let nodes = grid.nodes();
    dense_operator(nodes, &second_difference_stencils(nodes, scheme))
}

/// Unscaled fourth-difference operator `D4` over the nodes of `grid`.
#[must_use]
pub fn fourth_difference(grid: &Grid, scheme: Scheme) -> DMatrix<f64> {
    let nodes = grid.nodes();
    dense_operator(nodes, &fourth_difference_stencils(nodes, scheme))
}

/// Factors applied to `D4` and `D2` and the nodal spring for one grid.
#[derive(Clone, Copy, Debug)]
struct Scaling {
    /// Multiplier of `D4` entries.
    bending: f64,
    /// Multiplier of `D2` entries, sign included.
    tension: f64,
    /// Diagonal spring added to every row.
    spring: f64,
}

impl Scaling {
    fn new(grid: &Grid, section: &SectionProperties, scheme: Scheme) -> Self {
        let dx = grid.spacing();
        let scale_d2 = 1.0 / (dx * dx);
        let scale_d4 = 1.0 / (dx * dx * dx * dx);
        let row_scale = match scheme {
            Scheme::Legacy => 1.0,
            Scheme::Consistent => dx,
        };
        Self {
            bending: section.flexural_rigidity * scale_d4 * row_scale,
            tension: section.tension * scale_d2 * row_scale,
            spring: section.distributed_stiffness * dx,
        }
    }

    /// Stiffness entry from the operator weights at one position.
    fn entry(&self, d4: f64, d2: f64) -> f64 {
        self.bending * d4 - self.tension * d2
    }
}

/// Global `n x n` stiffness matrix `EI·D4/dx⁴ - T·D2/dx² + k_dist·dx·I`.
///
/// Under [`Scheme::Consistent`] the bending and tension terms are multiplied
/// by `dx` so that every row balances a nodal force.
#[must_use]
pub fn assemble_stiffness(
    grid: &Grid,
    section: &SectionProperties,
    scheme: Scheme,
) -> DMatrix<f64> {
    let nodes = grid.nodes();
    let d2 = second_difference(grid, scheme);
    let d4 = fourth_difference(grid, scheme);
    let scaling = Scaling::new(grid, section, scheme);

    let mut stiffness = DMatrix::from_fn(nodes, nodes, |row, col| {
        scaling.entry(d4[(row, col)], d2[(row, col)])
    });
    for row in 0..nodes {
        stiffness[(row, row)] += scaling.spring;
    }
    log::trace!("assembled dense {nodes}x{nodes} stiffness matrix");
    stiffness
}

/// Strike the support rows and columns, leaving the `(n-2) x (n-2)` interior block.
///
/// # Panics
///
/// Panics if `stiffness` is smaller than 2 x 2.
#[must_use]
pub fn reduce_to_interior(stiffness: &DMatrix<f64>) -> DMatrix<f64> {
    let interior = stiffness.nrows() - 2;
    stiffness.view((1, 1), (interior, interior)).into_owned()
}

/// Interior stiffness assembled straight into banded storage.
///
/// Entries equal those of [`reduce_to_interior`] applied to
/// [`assemble_stiffness`] without ever forming the dense matrix.
#[must_use]
pub fn assemble_interior_banded(
    grid: &Grid,
    section: &SectionProperties,
    scheme: Scheme,
) -> BandedMatrix {
    let nodes = grid.nodes();
    let d2 = banded_operator(nodes, &second_difference_stencils(nodes, scheme));
    let d4 = banded_operator(nodes, &fourth_difference_stencils(nodes, scheme));
    let scaling = Scaling::new(grid, section, scheme);

    let interior = grid.interior_count();
    let mut stiffness = BandedMatrix::zeros(interior, BANDWIDTH, BANDWIDTH);
    for row in 0..interior {
        for col in stiffness.columns(row) {
            let mut value = scaling.entry(d4.get(row + 1, col + 1), d2.get(row + 1, col + 1));
            if row == col {
                value += scaling.spring;
            }
            stiffness.set(row, col, value);
        }
    }
    log::trace!("assembled banded stiffness over {interior} interior nodes");
    stiffness
}
