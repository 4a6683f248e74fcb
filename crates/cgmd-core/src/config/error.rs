use crate::core::models::boundary::BoundaryBoxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("expected exactly one [[{table}]] table, found {count}")]
    TableCount { table: &'static str, count: usize },

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("unknown integrator type '{0}'; the available integrator is UnderdampedLangevin")]
    UnknownIntegrator(String),

    #[error(
        "unknown boundary type '{0}'; available types are Unlimited, Reflecting, Periodic and PeriodicCuboid"
    )]
    UnknownBoundaryType(String),

    #[error(
        "unsupported combination of interaction '{interaction}' and potential '{potential}'; available combinations are {available}"
    )]
    UnsupportedPotential {
        interaction: String,
        potential: String,
        available: &'static str,
    },

    #[error("the length of indices must be {expected} for {interaction}, got {found}")]
    ArityMismatch {
        interaction: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("indices within a {interaction} tuple must be pairwise distinct, got {indices:?}")]
    DuplicateTupleIndex {
        interaction: &'static str,
        indices: Vec<usize>,
    },

    #[error("particle index {index} is out of range: the system declares {count} particles")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("particle {index}: mass must be strictly positive, got {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("gamma for particle {index} is declared more than once")]
    DuplicateGamma { index: usize },

    #[error(
        "gamma for particle {index} is missing; UnderdampedLangevin requires one gamma per particle"
    )]
    MissingGamma { index: usize },

    #[error("temperature must be non-negative, got {0}")]
    InvalidTemperature(f64),

    #[error("particle {index}: non-bonded parameter '{name}' must be non-negative, got {value}")]
    NegativeNonBondedParameter {
        index: usize,
        name: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Boundary(#[from] BoundaryBoxError),
}
