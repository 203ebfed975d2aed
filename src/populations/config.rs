use super::errors::ConfigurationError;

use serde::{Deserialize, Serialize};

/// Configuration data for pool generation and evolution.
///
/// # Note
/// All quantities expressing fractions or probabilities should be
/// in the range [0.0, 1.0]; [`validate`] enforces this before any
/// pool is built.
///
/// [`validate`]: PoolConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of players in the pool. Held constant across
    /// generations.
    pub pool_size: usize,
    /// Number of competition rounds played per generation to
    /// average out the noise of any single outcome.
    pub ranking_iterations: usize,
    /// Number of players per competition. With the default of 2
    /// every round is a set of duels; larger values play
    /// multi-player matches.
    pub match_size: usize,
    /// Top fraction of the ranking copied unchanged into the next
    /// generation.
    pub elite_fraction: f64,
    /// Top fraction of the ranking eligible as breeding parents.
    pub survival_threshold: f64,
    /// Scale applied to each gene's mutation probability when
    /// mutating children.
    pub mutation_rate: f64,
    /// Scale applied to each gene's perturbation size when mutating
    /// children.
    pub mutation_magnitude: f64,
    /// Seed for the pool's random number generator. Fixing it makes
    /// a run reproducible; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> PoolConfig {
        PoolConfig {
            pool_size: 150,
            ranking_iterations: 12,
            match_size: 2,
            elite_fraction: 0.25,
            survival_threshold: 0.5,
            mutation_rate: 1.0,
            mutation_magnitude: 1.0,
            seed: None,
        }
    }
}

impl PoolConfig {
    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    /// Returns the first violation found.
    ///
    /// # Examples
    /// ```
    /// use coevo::{ConfigurationError, PoolConfig};
    ///
    /// let config = PoolConfig {
    ///     pool_size: 1,
    ///     ..PoolConfig::default()
    /// };
    ///
    /// assert_eq!(config.validate(), Err(ConfigurationError::PoolTooSmall(1)));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.pool_size < 2 {
            return Err(ConfigurationError::PoolTooSmall(self.pool_size));
        }
        if self.ranking_iterations == 0 {
            return Err(ConfigurationError::NoRankingIterations);
        }
        if self.match_size < 2 {
            return Err(ConfigurationError::MatchTooSmall(self.match_size));
        }
        for (name, value) in [
            ("elite_fraction", self.elite_fraction),
            ("survival_threshold", self.survival_threshold),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ConfigurationError::FractionOutOfRange { name, value });
            }
        }
        if !(self.mutation_magnitude.is_finite() && self.mutation_magnitude >= 0.0) {
            return Err(ConfigurationError::InvalidScale {
                name: "mutation_magnitude",
                value: self.mutation_magnitude,
            });
        }
        Ok(())
    }

    /// Number of top-ranked players copied unchanged into the next
    /// generation.
    pub(super) fn elite_count(&self) -> usize {
        ((self.pool_size as f64 * self.elite_fraction).round() as usize).min(self.pool_size)
    }

    /// Number of top-ranked players eligible as breeding parents.
    pub(super) fn survivor_count(&self) -> usize {
        ((self.pool_size as f64 * self.survival_threshold).ceil() as usize).min(self.pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PoolConfig::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let base = PoolConfig::default();
        assert_eq!(
            PoolConfig {
                ranking_iterations: 0,
                ..base.clone()
            }
            .validate(),
            Err(ConfigurationError::NoRankingIterations)
        );
        assert_eq!(
            PoolConfig {
                match_size: 1,
                ..base.clone()
            }
            .validate(),
            Err(ConfigurationError::MatchTooSmall(1))
        );
        assert_eq!(
            PoolConfig {
                elite_fraction: 1.5,
                ..base.clone()
            }
            .validate(),
            Err(ConfigurationError::FractionOutOfRange {
                name: "elite_fraction",
                value: 1.5
            })
        );
        assert_eq!(
            PoolConfig {
                mutation_magnitude: -1.0,
                ..base
            }
            .validate(),
            Err(ConfigurationError::InvalidScale {
                name: "mutation_magnitude",
                value: -1.0
            })
        );
    }

    #[test]
    fn selection_counts_follow_fractions() {
        let config = PoolConfig {
            pool_size: 8,
            elite_fraction: 0.25,
            survival_threshold: 0.5,
            ..PoolConfig::default()
        };
        assert_eq!(config.elite_count(), 2);
        assert_eq!(config.survivor_count(), 4);

        let all = PoolConfig {
            pool_size: 8,
            elite_fraction: 1.0,
            survival_threshold: 1.0,
            ..PoolConfig::default()
        };
        assert_eq!(all.elite_count(), 8);
        assert_eq!(all.survivor_count(), 8);
    }
}
