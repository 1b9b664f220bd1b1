//! Error types shared by the physics, solver and experiment layers

use thiserror::Error;

/// Failure modes of a simulation run
///
/// An oscillating or divergent explicit scheme is not an error; it is
/// reported through [`StabilityReport`](crate::models::StabilityReport).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A parameter is out of its physical or numerical domain
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The solver cannot handle the requested configuration type
    #[error("{solver} only supports TimeEvolution configuration, got {requested}")]
    UnsupportedConfiguration {
        solver: &'static str,
        requested: String,
    },

    /// The scenario has no temporal boundary to start from
    #[error("no initial condition found in domain boundaries")]
    MissingInitialCondition,

    /// A model expected a quantity that the state does not carry
    #[error("quantity {0} is missing from the physical state")]
    MissingQuantity(String),

    /// NaN or Inf appeared in the state
    #[error("{kind} detected in {quantity} at step {step}; reduce the time step or check the model")]
    NonFinite {
        quantity: String,
        step: usize,
        kind: &'static str,
    },

    /// Two sequences that must be paired have different lengths
    #[error("sequence length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

impl SimulationError {
    /// Shorthand for [`SimulationError::InvalidConfiguration`]
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
