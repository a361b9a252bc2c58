//! Error types.
//!
//! [`ConfigError`] and [`InstanceError`] are raised before any search starts.
//! [`SolverError`] is what every fallible operation in the crate returns.

use crate::models::ClientId;

/// Invalid engine or operator configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The population must hold at least two individuals.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// The generation budget must be positive.
    #[error("generations must be at least 1")]
    ZeroGenerations,

    /// Application rates live in `(0, 1]`.
    #[error("operator `{operator}` has rate {rate}, expected a value in (0, 1]")]
    InvalidRate {
        /// Operator name.
        operator: String,
        /// Offending rate.
        rate: f64,
    },

    /// Operator name not found in the catalog.
    #[error("unknown {kind} operator `{name}`")]
    UnknownOperator {
        /// Catalog section (`crossover`, `mutation`, ...).
        kind: &'static str,
        /// Name as given.
        name: String,
    },

    /// A required operator parameter is absent.
    #[error("operator `{operator}` requires parameter `{parameter}`")]
    MissingParameter {
        /// Operator name.
        operator: String,
        /// Parameter name.
        parameter: &'static str,
    },

    /// A parameter is present with the wrong type.
    #[error("parameter `{parameter}` of operator `{operator}` must be {expected}")]
    MistypedParameter {
        /// Operator name.
        operator: String,
        /// Parameter name.
        parameter: &'static str,
        /// Expected type, e.g. `"an integer"`.
        expected: &'static str,
    },

    /// A parameter has the right type but an unusable value.
    #[error("parameter `{parameter}` of operator `{operator}` is invalid: {reason}")]
    InvalidParameter {
        /// Operator name.
        operator: String,
        /// Parameter name.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Full replacement needs exactly one child per population slot.
    #[error("full replacement needs {expected} children, got {actual}")]
    ChildCountMismatch {
        /// Target population size.
        expected: usize,
        /// Children supplied.
        actual: usize,
    },

    /// The elitism fill strategy cannot draw from a merged pool.
    #[error("elitism cannot fill with full replacement")]
    InvalidElitismFill,
}

/// Inconsistent problem data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstanceError {
    /// At least one worker is required.
    #[error("instance has no workers")]
    NoWorkers,

    /// The travel-time matrix must be `(N + 1) × (N + 1)`.
    #[error("travel-time matrix must be {expected}x{expected}, got {actual} entries")]
    MatrixSize {
        /// Expected side length.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// Client ids must be `1..=N`.
    #[error("client id {id} outside 1..={max}")]
    ClientIdOutOfRange {
        /// Offending id.
        id: ClientId,
        /// Number of clients.
        max: usize,
    },

    /// The same id was supplied twice.
    #[error("duplicate client id {0}")]
    DuplicateClient(ClientId),

    /// Window start after window end, or a non-finite bound.
    #[error("client {0} has an invalid time window")]
    InvalidTimeWindow(ClientId),
}

/// Errors raised by the solver.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Problem instance rejected.
    #[error(transparent)]
    Instance(#[from] InstanceError),

    /// An operator's structural precondition does not hold for this genome.
    #[error("{operator}: {reason}")]
    Precondition {
        /// Operator name.
        operator: &'static str,
        /// Violated precondition.
        reason: String,
    },

    /// A bounded retry loop ran out of attempts.
    #[error("{operator}: gave up after {attempts} attempts")]
    RetryLimitExceeded {
        /// Operator name.
        operator: &'static str,
        /// Attempts made.
        attempts: usize,
    },

    /// Feasible greedy construction failed for every attempt.
    #[error("feasible construction failed after {attempts} attempts (client {client} could not be placed)")]
    ConstructionExhausted {
        /// Attempts made.
        attempts: usize,
        /// Client left without a feasible worker on the last attempt.
        client: ClientId,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SolverError {
    pub(crate) fn precondition(operator: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            operator,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that only mean "operator not applicable here".
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    /// Returns `true` for failures of one operator application that leave
    /// its input untouched, so a run can carry on without it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Precondition { .. } | Self::RetryLimitExceeded { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T, E = SolverError> = std::result::Result<T, E>;
