//! Distribution of uniform, point and axle loads onto the interior nodes.

use nalgebra::DVector;

use crate::errors::{ConcentratedLoadKind, Warning};
use crate::grid::Grid;
use crate::parameters::{ConcentratedLoad, LoadSet};

/// Interior load vector together with the loads that could not be placed.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadVector {
    /// Nodal forces in newtons, one per interior node.
    pub values: DVector<f64>,
    /// One warning per dropped concentrated load.
    pub dropped: Vec<Warning>,
}

/// Build the interior load vector for `loads` on `grid`.
///
/// The uniform load contributes `q·dx` to every interior node. Point loads and
/// axles go whole to the nearest interior node; a load that rounds onto a
/// support or beyond the span is left out and reported in
/// [`LoadVector::dropped`].
///
/// # Examples
/// ```
/// use airdeck::{loads::assemble_load_vector, ConcentratedLoad, Grid, LoadSet};
///
/// let grid = Grid::new(1_000.0, 11).expect("valid grid");
/// let loads = LoadSet {
///     uniform: 2.0,
///     point_loads: vec![ConcentratedLoad { position: 300.0, magnitude: 500.0 }],
///     axles: Vec::new(),
/// };
/// let vector = assemble_load_vector(&grid, &loads);
/// assert_eq!(vector.values.len(), 9);
/// assert_eq!(vector.values[0], 200.0);
/// assert_eq!(vector.values[2], 700.0);
/// assert!(vector.dropped.is_empty());
/// ```
#[must_use]
pub fn assemble_load_vector(grid: &Grid, loads: &LoadSet) -> LoadVector {
    let nodal_uniform = loads.uniform * grid.spacing();
    let mut values = DVector::from_element(grid.interior_count(), 0.0);
    for value in values.iter_mut() {
        *value += nodal_uniform;
    }

    let mut dropped = Vec::new();
    let concentrated = loads
        .point_loads
        .iter()
        .map(|load| (ConcentratedLoadKind::Point, load))
        .chain(loads.axles.iter().map(|load| (ConcentratedLoadKind::Axle, load)));
    for (kind, load) in concentrated {
        if let Some(warning) = place_concentrated(grid, &mut values, kind, load) {
            dropped.push(warning);
        }
    }

    log::trace!(
        "load vector: {} interior nodes, {} concentrated loads dropped",
        values.len(),
        dropped.len()
    );
    LoadVector { values, dropped }
}

/// Add one concentrated load, or describe why it was left out.
fn place_concentrated(
    grid: &Grid,
    values: &mut DVector<f64>,
    kind: ConcentratedLoadKind,
    load: &ConcentratedLoad,
) -> Option<Warning> {
    match grid.interior_index(load.position) {
        Some(index) => {
            values[index] += load.magnitude;
            None
        }
        None => Some(Warning::OutOfRangeLoadPosition {
            load: kind,
            position: load.position,
            magnitude: load.magnitude,
            index: grid.nearest_interior_index(load.position),
        }),
    }
}
