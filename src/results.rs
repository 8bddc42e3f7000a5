//! Post-processing of the solved interior deflections into the output record.

use nalgebra::DVector;
use serde::Serialize;

use crate::errors::Warning;
use crate::options::{Scheme, SolverKind};
use crate::parameters::{ResolvedParameters, StrapParameters};

/// Model quantities reported alongside every result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Flexural rigidity in N·mm².
    #[serde(rename = "EI")]
    pub flexural_rigidity: f64,
    /// Axial membrane tension.
    #[serde(rename = "T")]
    pub tension: f64,
    /// Strap support stiffness per unit length in N/mm².
    #[serde(rename = "k_dist")]
    pub distributed_stiffness: f64,
    /// Number of grid nodes, supports included.
    #[serde(rename = "solvedNodes")]
    pub solved_nodes: usize,
    /// Strap lever length in millimetres.
    #[serde(rename = "leverLength_mm")]
    pub lever_length: f64,
    /// Boundary treatment used.
    pub scheme: Scheme,
    /// Elimination routine used.
    pub solver: SolverKind,
    /// Fallbacks taken while producing the result.
    pub warnings: Vec<Warning>,
}

/// Whether a result was produced without any fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum Status<'a> {
    /// Every input was used as given and the system was regular.
    Ok,
    /// At least one fallback was taken.
    Warning(&'a [Warning]),
}

/// Deflection approximation for one deck.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Largest absolute deflection in millimetres.
    #[serde(rename = "maxDeflection_mm")]
    pub max_deflection: f64,
    /// Deflection at every node in millimetres, zero at both supports.
    #[serde(rename = "deflection_mm")]
    pub deflection: Vec<f64>,
    /// Estimated axial force per strap line in newtons.
    #[serde(rename = "strapForces_N")]
    pub strap_forces: Vec<f64>,
    /// Model quantities.
    pub diagnostics: Diagnostics,
}

impl ResultRecord {
    /// Assemble the record from a full deflection field.
    #[must_use]
    pub fn new(
        deflection: Vec<f64>,
        resolved: &ResolvedParameters,
        scheme: Scheme,
        solver: SolverKind,
        warnings: Vec<Warning>,
    ) -> Self {
        let strap_forces = estimate_strap_forces(
            &deflection,
            &resolved.straps,
            resolved.structure.width,
            resolved.section.lever_length,
        );
        Self {
            max_deflection: max_abs(&deflection),
            strap_forces,
            diagnostics: Diagnostics {
                flexural_rigidity: resolved.section.flexural_rigidity,
                tension: resolved.section.tension,
                distributed_stiffness: resolved.section.distributed_stiffness,
                solved_nodes: deflection.len(),
                lever_length: resolved.section.lever_length,
                scheme,
                solver,
                warnings,
            },
            deflection,
        }
    }

    /// Either [`Status::Ok`] or the fallbacks that were taken.
    #[must_use]
    pub fn status(&self) -> Status<'_> {
        if self.diagnostics.warnings.is_empty() {
            Status::Ok
        } else {
            Status::Warning(&self.diagnostics.warnings)
        }
    }

    /// Render the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Full deflection field with the supported end nodes pinned at zero.
#[must_use]
pub fn expand_deflection(interior: &DVector<f64>) -> Vec<f64> {
    let mut full = Vec::with_capacity(interior.len() + 2);
    full.push(0.0);
    full.extend(interior.iter().copied());
    full.push(0.0);
    full
}

/// Largest absolute value, zero for an empty field.
#[must_use]
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().map(|value| value.abs()).fold(0.0, f64::max)
}

/// Axial force estimate for every strap line.
///
/// Every line reads the same midspan deflection: the strain is that deflection
/// over the lever length, and the force adds the pretension on top.
#[must_use]
pub fn estimate_strap_forces(
    deflection: &[f64],
    straps: &StrapParameters,
    width: f64,
    lever_length: f64,
) -> Vec<f64> {
    let lines = straps.line_count(width);
    let midspan = deflection
        .get(deflection.len().saturating_sub(1) / 2)
        .copied()
        .unwrap_or(0.0);
    let axial_strain = midspan / lever_length;
    let force = axial_strain * straps.modulus * straps.area + straps.pretension();
    vec![force; lines]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn straps(pretension_kn: f64) -> StrapParameters {
        StrapParameters {
            enabled: true,
            spacing: 300.0,
            area: 100.0,
            modulus: 200_000.0,
            pretension_kn,
        }
    }

    #[test]
    fn expansion_pins_both_supports() {
        let full = expand_deflection(&DVector::from_vec(vec![1.0, -2.5, 1.0]));
        assert_eq!(full, vec![0.0, 1.0, -2.5, 1.0, 0.0]);
        assert_eq!(max_abs(&full), 2.5);
        assert_eq!(max_abs(&[]), 0.0);
    }

    #[test]
    fn strap_forces_share_the_midspan_sample() {
        let deflection = vec![0.0, 1.0, 2.0, 4.2, 2.0, 1.0, 0.0];
        let forces = estimate_strap_forces(&deflection, &straps(0.0), 1_500.0, 210.0);
        assert_eq!(forces.len(), 5);
        let expected = 4.2 / 210.0 * 200_000.0 * 100.0;
        for force in &forces {
            assert_relative_eq!(*force, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn midspan_index_rounds_down_for_even_node_counts() {
        let deflection = vec![0.0, 1.0, 3.0, 5.0, 2.0, 0.0];
        let forces = estimate_strap_forces(&deflection, &straps(0.0), 300.0, 100.0);
        assert_eq!(forces.len(), 1);
        assert_relative_eq!(forces[0], 3.0 / 100.0 * 2.0e7, max_relative = 1e-12);
    }

    #[test]
    fn pretension_is_added_in_newtons() {
        let deflection = vec![0.0; 9];
        let forces = estimate_strap_forces(&deflection, &straps(2.5), 900.0, 168.0);
        assert_eq!(forces, vec![2_500.0; 3]);
    }
}
