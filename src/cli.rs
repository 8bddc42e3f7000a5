use std::path::PathBuf;

use airdeck::{ApproximationOptions, Scheme, SolverKind};
use thiserror::Error;

/// Usage line printed alongside argument errors.
pub const USAGE: &str =
    "usage: airdeck [PAYLOAD.json] [--nodes N] [--scheme legacy|consistent] [--solver dense|banded] [--json]";

/// Error returned when the command line cannot be understood.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    /// Returned when a flag is not recognised.
    #[error("unknown option {0}")]
    UnknownOption(String),
    /// Returned when a flag that takes a value is last on the line.
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    /// Returned when a flag value cannot be parsed.
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue {
        /// Flag the value belongs to.
        flag: &'static str,
        /// Rejected value.
        value: String,
    },
    /// Returned when more than one payload path is given.
    #[error("only one payload file may be given")]
    ExtraPayload,
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct Arguments {
    /// Payload file; the demonstration deck is used when absent.
    pub payload: Option<PathBuf>,
    /// Solver configuration apart from the scheme.
    pub options: ApproximationOptions,
    /// Scheme asked for with `--scheme`.
    pub scheme: Option<Scheme>,
    /// Print the JSON output record instead of the report.
    pub json: bool,
}

impl Arguments {
    /// Options to approximate with.
    ///
    /// Without `--scheme` the demonstration deck uses [`Scheme::Consistent`],
    /// since its straps are disengaged and the legacy rows would leave it
    /// singular. Payload files keep the library default.
    pub fn approximation_options(&self) -> ApproximationOptions {
        let fallback = if self.payload.is_none() {
            Scheme::Consistent
        } else {
            Scheme::default()
        };
        ApproximationOptions {
            scheme: self.scheme.unwrap_or(fallback),
            ..self.options
        }
    }
}

/// Parse arguments following the program name.
pub fn parse<I>(args: I) -> Result<Arguments, ArgumentError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Arguments::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--nodes" => {
                let value = args.next().ok_or(ArgumentError::MissingValue("--nodes"))?;
                let nodes = value
                    .parse()
                    .map_err(|_| ArgumentError::InvalidValue {
                        flag: "--nodes",
                        value,
                    })?;
                parsed.options.nodes = Some(nodes);
            }
            "--scheme" => {
                let value = args.next().ok_or(ArgumentError::MissingValue("--scheme"))?;
                parsed.scheme = Some(match value.as_str() {
                    "legacy" => Scheme::Legacy,
                    "consistent" => Scheme::Consistent,
                    _ => {
                        return Err(ArgumentError::InvalidValue {
                            flag: "--scheme",
                            value,
                        })
                    }
                });
            }
            "--solver" => {
                let value = args.next().ok_or(ArgumentError::MissingValue("--solver"))?;
                parsed.options.solver = match value.as_str() {
                    "dense" => SolverKind::Dense,
                    "banded" => SolverKind::Banded,
                    _ => {
                        return Err(ArgumentError::InvalidValue {
                            flag: "--solver",
                            value,
                        })
                    }
                };
            }
            flag if flag.starts_with("--") => {
                return Err(ArgumentError::UnknownOption(flag.to_string()))
            }
            path => {
                if parsed.payload.is_some() {
                    return Err(ArgumentError::ExtraPayload);
                }
                parsed.payload = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}
