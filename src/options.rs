//! Run-time configuration for an approximation.

use serde::{Deserialize, Serialize};

use crate::grid::MIN_NODES;

/// Node count used when neither the options nor the payload ask for one.
pub const DEFAULT_NODES: usize = 201;
/// Default upper bound on the node count.
pub const DEFAULT_MAX_NODES: usize = 2_001;

/// How the finite-difference operators treat the rows next to the supports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Rows 0, 1, n-2 and n-1 carry no bending or tension stiffness, only the
    /// strap spring; bending and tension are per unit length while loads and
    /// springs are nodal. This reproduces the long-standing deck results.
    #[default]
    Legacy,
    /// Rows 1 and n-2 use the simply-supported ghost node `w[-1] = -w[1]` and
    /// every row is scaled to a nodal force, so the result converges to beam
    /// theory.
    Consistent,
}

/// Which elimination routine solves the reduced system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Gauss-Jordan elimination on the dense reduced matrix.
    #[default]
    Dense,
    /// Gaussian elimination on the banded reduced matrix.
    Banded,
}

/// Options controlling the discretization and the solver.
///
/// # Examples
/// ```
/// use airdeck::{ApproximationOptions, Scheme};
///
/// let options: ApproximationOptions =
///     serde_json::from_str(r#"{"scheme": "consistent", "nodes": 401}"#).expect("valid options");
/// assert_eq!(options.scheme, Scheme::Consistent);
/// assert_eq!(options.resolve_nodes(Some(101)), (401, None));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApproximationOptions {
    /// Node count; overrides the payload's `nNodes` when set.
    pub nodes: Option<usize>,
    /// Largest node count accepted before clamping.
    pub max_nodes: usize,
    /// Boundary treatment of the operators.
    pub scheme: Scheme,
    /// Elimination routine.
    pub solver: SolverKind,
}

impl Default for ApproximationOptions {
    fn default() -> Self {
        Self {
            nodes: None,
            max_nodes: DEFAULT_MAX_NODES,
            scheme: Scheme::default(),
            solver: SolverKind::default(),
        }
    }
}

impl ApproximationOptions {
    /// Pick the node count to solve with.
    ///
    /// Returns the count and, when the request had to be moved into
    /// `[MIN_NODES, max_nodes]`, the count originally requested.
    #[must_use]
    pub fn resolve_nodes(&self, payload_nodes: Option<usize>) -> (usize, Option<usize>) {
        let requested = self.nodes.or(payload_nodes).unwrap_or(DEFAULT_NODES);
        let upper = self.max_nodes.max(MIN_NODES);
        let used = requested.clamp(MIN_NODES, upper);
        (used, (used != requested).then_some(requested))
    }
}
