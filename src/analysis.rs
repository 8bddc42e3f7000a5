//! The approximation pipeline from payload to [`ResultRecord`].

use crate::errors::Warning;
use crate::grid::Grid;
use crate::loads::assemble_load_vector;
use crate::operators::{assemble_interior_banded, assemble_stiffness, reduce_to_interior};
use crate::options::{ApproximationOptions, SolverKind};
use crate::parameters::ResolvedParameters;
use crate::payload::DeckPayload;
use crate::results::{expand_deflection, ResultRecord};
use crate::solver::{solve_banded, solve_dense};

/// Approximate the deflected shape of a deck with default options.
///
/// Never fails: missing inputs fall back to defaults, and a singular system
/// or unusable span yields a zero deflection field. Every fallback is listed
/// in the returned diagnostics.
///
/// # Examples
/// ```
/// use airdeck::{approximate, DeckPayload};
///
/// let payload = DeckPayload::from_json_str(
///     r#"{
///         "geometry": {"span": 8000, "clear_width": 1500},
///         "materials": [{"id": "steel", "E": 210000}],
///         "plates": {"top_thickness": 50, "bottom_thickness": 50, "material_id": "steel"},
///         "airbeam": {"height": 300, "pressure": 100},
///         "straps": {"enabled": true},
///         "loads": {"uniform_load_kN_per_m": 2.25}
///     }"#,
/// )
/// .expect("valid payload");
/// let result = approximate(&payload);
/// assert_eq!(result.deflection.len(), 201);
/// assert_eq!(result.deflection[0], 0.0);
/// assert!(result.max_deflection > 0.0);
/// ```
#[must_use]
pub fn approximate(payload: &DeckPayload) -> ResultRecord {
    approximate_with(payload, &ApproximationOptions::default())
}

/// Approximate the deflected shape of a deck.
#[must_use]
pub fn approximate_with(payload: &DeckPayload, options: &ApproximationOptions) -> ResultRecord {
    approximate_resolved(&ResolvedParameters::from_payload(payload), options)
}

/// Approximate the deflected shape of an already resolved deck.
#[must_use]
pub fn approximate_resolved(
    resolved: &ResolvedParameters,
    options: &ApproximationOptions,
) -> ResultRecord {
    let mut warnings = resolved.warnings.clone();

    let (nodes, requested) = options.resolve_nodes(resolved.requested_nodes);
    if let Some(requested) = requested {
        warnings.push(Warning::NodeCountClamped {
            requested,
            used: nodes,
        });
    }

    let deflection = match Grid::new(resolved.structure.span, nodes) {
        Ok(grid) => solve_deflection(&grid, resolved, options, &mut warnings),
        Err(reason) => {
            warnings.push(Warning::InvalidSpan { reason });
            vec![0.0; nodes]
        }
    };

    let record = ResultRecord::new(
        deflection,
        resolved,
        options.scheme,
        options.solver,
        warnings,
    );
    log::debug!(
        "approximated {} nodes: max deflection {:.4} mm, {} warnings",
        nodes,
        record.max_deflection,
        record.diagnostics.warnings.len()
    );
    record
}

/// Assemble, reduce and solve on a valid grid.
fn solve_deflection(
    grid: &Grid,
    resolved: &ResolvedParameters,
    options: &ApproximationOptions,
    warnings: &mut Vec<Warning>,
) -> Vec<f64> {
    let loads = assemble_load_vector(grid, &resolved.loads);
    warnings.extend(loads.dropped);

    let solution = match options.solver {
        SolverKind::Dense => {
            let stiffness = assemble_stiffness(grid, &resolved.section, options.scheme);
            solve_dense(&reduce_to_interior(&stiffness), &loads.values)
        }
        SolverKind::Banded => {
            let stiffness = assemble_interior_banded(grid, &resolved.section, options.scheme);
            solve_banded(&stiffness, &loads.values)
        }
    };
    if let Some(row) = solution.singular_row {
        warnings.push(Warning::SingularSystem { row });
    }

    expand_deflection(&solution.values)
}
