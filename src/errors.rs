//! Error and warning types produced while preparing or approximating a deck.

use serde::Serialize;
use thiserror::Error;

/// Error returned when a discretization grid cannot be built.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GridError {
    /// Returned when fewer nodes are requested than the five-point stencil needs.
    #[error("grid needs at least 5 nodes (received {nodes})")]
    TooFewNodes {
        /// Rejected node count.
        nodes: usize,
    },
    /// Returned when the span is zero, negative or not a number.
    #[error("span must be positive (received {span} mm)")]
    NonPositiveSpan {
        /// Rejected span in millimetres.
        span: f64,
    },
}

/// Error returned when a deck payload cannot be read.
///
/// The approximation itself never fails; this only covers getting the payload
/// into memory.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Returned when the payload file cannot be opened or read.
    #[error("could not read payload: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the payload is not valid JSON for a deck record.
    #[error("payload is not a valid deck record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which kind of concentrated load was dropped from the load vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentratedLoadKind {
    /// A point load from `loads.point_loads`.
    Point,
    /// A vehicle axle from `loads.vehicle.axles`.
    Axle,
}

impl std::fmt::Display for ConcentratedLoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point => f.write_str("point load"),
            Self::Axle => f.write_str("axle load"),
        }
    }
}

/// A condition the kernel absorbed instead of failing.
///
/// Every variant corresponds to a fallback that keeps the numerical output
/// unchanged; the warning only makes the fallback visible to stricter callers.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The plate material could not be resolved and a substitute modulus was used.
    #[error("plate material {requested:?} not found; using E = {substituted} N/mm²")]
    MissingMaterial {
        /// Material identifier requested by the plates section, if any.
        requested: Option<String>,
        /// Modulus actually used in N/mm².
        substituted: f64,
    },
    /// The reduced stiffness matrix had no usable pivot.
    #[error("stiffness matrix is singular at row {row}; deflection reported as zero")]
    SingularSystem {
        /// Interior row at which elimination stopped.
        row: usize,
    },
    /// A concentrated load mapped outside the interior nodes and was dropped.
    #[error("{load} of {magnitude} N at {position} mm maps to node {index}, outside the span interior; ignored")]
    OutOfRangeLoadPosition {
        /// Point load or axle.
        load: ConcentratedLoadKind,
        /// Position along the span in millimetres.
        position: f64,
        /// Load in newtons.
        magnitude: f64,
        /// Interior index the position rounded to.
        index: i64,
    },
    /// The span could not support a grid; deflection reported as zero.
    #[error("{reason}; deflection reported as zero")]
    InvalidSpan {
        /// Why the grid could not be built.
        reason: GridError,
    },
    /// More strap lines fit across the width than are modelled.
    #[error("{requested} strap lines fit across the deck; forces reported for {used}")]
    StrapLinesClamped {
        /// Lines implied by width over spacing.
        requested: f64,
        /// Lines actually reported.
        used: usize,
    },
    /// The requested node count was moved into the supported range.
    #[error("requested {requested} nodes; solved with {used}")]
    NodeCountClamped {
        /// Node count asked for.
        requested: usize,
        /// Node count actually used.
        used: usize,
    },
}

impl Serialize for GridError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_render_readable_messages() {
        let warning = Warning::OutOfRangeLoadPosition {
            load: ConcentratedLoadKind::Axle,
            position: 9_000.0,
            magnitude: 50_000.0,
            index: 224,
        };
        let message = warning.to_string();
        assert!(message.starts_with("axle load of 50000 N at 9000 mm"));
        assert!(message.ends_with("ignored"));

        let span = Warning::InvalidSpan {
            reason: GridError::NonPositiveSpan { span: 0.0 },
        };
        assert_eq!(
            span.to_string(),
            "span must be positive (received 0 mm); deflection reported as zero"
        );
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let warning = Warning::SingularSystem { row: 198 };
        let json = serde_json::to_value(&warning).expect("warning serializes");
        assert_eq!(json["kind"], "singular_system");
        assert_eq!(json["row"], 198);

        let dropped = Warning::OutOfRangeLoadPosition {
            load: ConcentratedLoadKind::Point,
            position: -50.0,
            magnitude: 1_000.0,
            index: -2,
        };
        let json = serde_json::to_value(&dropped).expect("warning serializes");
        assert_eq!(json["kind"], "out_of_range_load_position");
        assert_eq!(json["load"], "point");
        assert_eq!(json["index"], -2);
    }
}
