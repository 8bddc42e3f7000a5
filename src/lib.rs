#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod banded;
pub mod errors;
pub mod grid;
pub mod loads;
pub mod operators;
pub mod options;
pub mod parameters;
pub mod payload;
pub mod results;
pub mod solver;

pub use analysis::{approximate, approximate_resolved, approximate_with};
pub use banded::BandedMatrix;
pub use errors::{ConcentratedLoadKind, GridError, PayloadError, Warning};
pub use grid::Grid;
pub use options::{ApproximationOptions, Scheme, SolverKind};
pub use parameters::{
    AirbeamParameters, ConcentratedLoad, LoadSet, ResolvedParameters, SectionProperties,
    StrapParameters, StructureParameters,
};
pub use payload::DeckPayload;
pub use results::{Diagnostics, ResultRecord, Status};
