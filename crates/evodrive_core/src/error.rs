//! Error types for the training core.
//!
//! The variants follow how far a failure is allowed to propagate:
//! shape and argument errors found before the first trial abort the run,
//! environment failures abort only the current trial, and persistence
//! failures are logged and otherwise ignored.

use thiserror::Error;

/// Main error type for evodrive_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvolutionError {
    /// A parameter sequence does not fit the network topology.
    #[error("Shape error: expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// A configuration or call argument outside its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An individual index outside the population.
    #[error("Index {index} out of range for population of {len}")]
    Index { index: usize, len: usize },

    /// Weight storage could not be written or read.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The simulation collaborator failed during a trial.
    #[error("Environment error: {0}")]
    Environment(String),
}

/// Result type alias for evodrive_core operations.
pub type Result<T> = std::result::Result<T, EvolutionError>;

impl EvolutionError {
    #[must_use]
    pub fn shape(expected: usize, actual: usize) -> Self {
        Self::Shape { expected, actual }
    }

    #[must_use]
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[must_use]
    pub fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }

    #[must_use]
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::Persistence(msg.into())
    }

    #[must_use]
    pub fn environment<S: Into<String>>(msg: S) -> Self {
        Self::Environment(msg.into())
    }

    /// Re-tags a failure raised by the simulation collaborator so it is
    /// handled as trial-local whatever variant the collaborator chose.
    #[must_use]
    pub fn into_environment(self) -> Self {
        match self {
            Self::Environment(_) => self,
            other => Self::Environment(other.to_string()),
        }
    }

    /// Errors that only cost the current trial rather than the whole run.
    #[must_use]
    pub fn is_trial_local(&self) -> bool {
        matches!(self, Self::Environment(_) | Self::Shape { .. })
    }
}

/// Returns `InvalidArgument(msg)` unless `cond` holds.
pub(crate) fn ensure_arg(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(EvolutionError::invalid_argument(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvolutionError::shape(10, 4);
        assert_eq!(
            err.to_string(),
            "Shape error: expected 10 values, got 4"
        );
    }

    #[test]
    fn test_trial_local_classification() {
        assert!(EvolutionError::environment("sensor offline").is_trial_local());
        assert!(!EvolutionError::invalid_argument("k").is_trial_local());
        assert!(!EvolutionError::persistence("disk full").is_trial_local());
    }

    #[test]
    fn test_collaborator_failures_become_trial_local() {
        let err = EvolutionError::invalid_argument("sensor unavailable").into_environment();
        assert!(err.is_trial_local());
        assert!(err.to_string().contains("sensor unavailable"));

        let env = EvolutionError::environment("wheel slip");
        assert_eq!(env.clone().into_environment(), env);
    }

    #[test]
    fn test_ensure_arg() {
        assert!(ensure_arg(true, "fine").is_ok());
        assert_eq!(
            ensure_arg(false, "bad"),
            Err(EvolutionError::InvalidArgument("bad".to_string()))
        );
    }
}
