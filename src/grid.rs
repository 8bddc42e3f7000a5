//! Uniform one-dimensional discretization of the span.

use serde::Serialize;

use crate::errors::GridError;

/// Smallest node count the five-point bending stencil can be placed on.
pub const MIN_NODES: usize = 5;

/// Uniform grid of nodes from the left support (`x = 0`) to the right support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Grid {
    /// Span covered by the grid in millimetres.
    span: f64,
    /// Total number of nodes, supports included.
    nodes: usize,
}

impl Grid {
    /// Build a grid of `nodes` nodes spanning `span` millimetres.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonPositiveSpan`] when `span` is not strictly positive
    /// and [`GridError::TooFewNodes`] when `nodes` is below [`MIN_NODES`].
    ///
    /// # Examples
    /// ```
    /// use airdeck::Grid;
    ///
    /// let grid = Grid::new(8_000.0, 201).expect("valid grid");
    /// assert_eq!(grid.spacing(), 40.0);
    /// assert_eq!(grid.interior_count(), 199);
    /// ```
    pub fn new(span: f64, nodes: usize) -> Result<Self, GridError> {
        if !(span > 0.0 && span.is_finite()) {
            return Err(GridError::NonPositiveSpan { span });
        }
        if nodes < MIN_NODES {
            return Err(GridError::TooFewNodes { nodes });
        }
        Ok(Self { span, nodes })
    }

    /// Total number of nodes.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of nodes between the two supports.
    #[must_use]
    pub fn interior_count(&self) -> usize {
        self.nodes - 2
    }

    /// Node spacing `dx` in millimetres.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.span / (self.nodes - 1) as f64
    }

    /// Position of node `index` in millimetres.
    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        index as f64 * self.spacing()
    }

    /// Interior index nearest to `position`, before any range check.
    ///
    /// Halves round up, so a load exactly between two nodes goes to the one
    /// further from the left support. Positions too far out for an `i64`
    /// saturate at its bounds.
    #[must_use]
    pub fn nearest_interior_index(&self, position: f64) -> i64 {
        let node = (position / self.spacing() + 0.5).floor();
        (node as i64).saturating_sub(1)
    }

    /// Interior index nearest to `position`, or `None` when it falls on a
    /// support or outside the span.
    #[must_use]
    pub fn interior_index(&self, position: f64) -> Option<usize> {
        let index = self.nearest_interior_index(position);
        if position.is_nan() || index < 0 {
            return None;
        }
        let index = index as usize;
        (index < self.interior_count()).then_some(index)
    }
}
