use crate::persistence::PersistenceError;

use thiserror::Error;

/// An error type indicating invalid pool configuration. These are
/// fatal: they are surfaced immediately and nothing is retried.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// Fewer than two players cannot breed.
    #[error("pool size must be at least 2, got {0}")]
    PoolTooSmall(usize),
    /// At least one competition round is needed to rank anything.
    #[error("at least 1 ranking iteration is required")]
    NoRankingIterations,
    /// A competition needs at least two participants.
    #[error("match size must be at least 2, got {0}")]
    MatchTooSmall(usize),
    /// A fractional parameter lies outside `[0.0, 1.0]`.
    #[error("{name} must lie within [0.0, 1.0], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },
    /// A scaling parameter is negative or non-finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidScale { name: &'static str, value: f64 },
    /// No survivors were available to breed children from.
    #[error("breeding pool is empty; raise survival_threshold or elite_fraction")]
    EmptyBreedingPool,
    /// A snapshot was restored with a different pool size than it
    /// was taken with. Resuming never silently truncates or pads a
    /// population.
    #[error("snapshot holds a pool of {persisted} players but {requested} were requested")]
    PoolSizeMismatch { requested: usize, persisted: usize },
}

/// Any error a pool operation can surface.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
