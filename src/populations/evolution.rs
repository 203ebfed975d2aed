//! Next-generation breeding from a ranked population.

use super::config::PoolConfig;
use super::errors::ConfigurationError;
use crate::Player;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Auxiliary type for offspring generation. Turns a best-first
/// ranking into a full next generation of exactly `pool_size`
/// players: elites first, bred children after.
pub(super) struct OffspringFactory<'a, P: Player> {
    /// Current generation, best first.
    ranked: &'a [&'a P],
    player_config: &'a P::Config,
    config: &'a PoolConfig,
}

impl<'a, P: Player> OffspringFactory<'a, P> {
    pub(super) fn new(
        ranked: &'a [&'a P],
        player_config: &'a P::Config,
        config: &'a PoolConfig,
    ) -> OffspringFactory<'a, P> {
        OffspringFactory {
            ranked,
            player_config,
            config,
        }
    }

    /// Generates the next generation.
    ///
    /// The top [`elite_fraction`] of the ranking is cloned unchanged,
    /// which keeps best-individual fitness from regressing between
    /// generations. The remaining slots are filled by children: two
    /// parents are drawn with replacement from the top
    /// [`survival_threshold`] of the ranking using linear rank
    /// weights, so higher ranks are favored but every survivor keeps
    /// a nonzero chance. Each child is crossed over and then mutated.
    ///
    /// Every returned player is an independent clone or a fresh
    /// child; nothing aliases the previous generation.
    ///
    /// # Errors
    /// Fails if children are needed but no survivors are eligible
    /// as parents.
    ///
    /// [`elite_fraction`]: PoolConfig::elite_fraction
    /// [`survival_threshold`]: PoolConfig::survival_threshold
    pub(super) fn next_generation<R: Rng>(&self, rng: &mut R) -> Result<Vec<P>, ConfigurationError> {
        let size = self.config.pool_size;
        let elite = self.config.elite_count().min(self.ranked.len());

        let mut next: Vec<P> = self.ranked[..elite].iter().map(|p| (*p).clone()).collect();
        if next.len() >= size {
            next.truncate(size);
            return Ok(next);
        }

        let survivors = self.config.survivor_count().min(self.ranked.len());
        let parent_dist = WeightedIndex::new((0..survivors).map(|r| (survivors - r) as f64))
            .map_err(|_| ConfigurationError::EmptyBreedingPool)?;

        while next.len() < size {
            let first = self.ranked[parent_dist.sample(rng)];
            let second = self.ranked[parent_dist.sample(rng)];
            let mut child = first.crossover(second, self.player_config, rng);
            child.mutate(
                self.config.mutation_rate,
                self.config.mutation_magnitude,
                self.player_config,
                rng,
            );
            next.push(child);
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scalar_schema, ScalarPlayer};
    use crate::Player;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranked_players() -> Vec<ScalarPlayer> {
        // Already in best-first order.
        [0.9, 0.7, 0.4, 0.2]
            .iter()
            .map(|&s| ScalarPlayer::with_strength(s))
            .collect()
    }

    fn factory_config(elite_fraction: f64, survival_threshold: f64) -> PoolConfig {
        PoolConfig {
            pool_size: 4,
            elite_fraction,
            survival_threshold,
            mutation_rate: 1.0,
            mutation_magnitude: 1.0,
            ..PoolConfig::default()
        }
    }

    #[test]
    fn next_generation_has_exactly_pool_size_players() {
        let players = ranked_players();
        let ranked: Vec<&ScalarPlayer> = players.iter().collect();
        let schema = scalar_schema();
        let config = factory_config(0.25, 0.5);
        let mut rng = StdRng::seed_from_u64(9);

        let next = OffspringFactory::new(&ranked, &schema, &config)
            .next_generation(&mut rng)
            .unwrap();
        assert_eq!(next.len(), 4);
    }

    #[test]
    fn elites_are_carried_over_unchanged() {
        let players = ranked_players();
        let ranked: Vec<&ScalarPlayer> = players.iter().collect();
        let schema = scalar_schema();
        let config = factory_config(0.5, 0.5);
        let mut rng = StdRng::seed_from_u64(10);

        let next = OffspringFactory::new(&ranked, &schema, &config)
            .next_generation(&mut rng)
            .unwrap();
        assert_eq!(next[0].genome(), players[0].genome());
        assert_eq!(next[1].genome(), players[1].genome());
    }

    #[test]
    fn all_elite_configuration_clones_the_whole_ranking() {
        let players = ranked_players();
        let ranked: Vec<&ScalarPlayer> = players.iter().collect();
        let schema = scalar_schema();
        let config = factory_config(1.0, 0.0);
        let mut rng = StdRng::seed_from_u64(12);

        let next = OffspringFactory::new(&ranked, &schema, &config)
            .next_generation(&mut rng)
            .unwrap();
        assert_eq!(next, players);
    }

    #[test]
    fn empty_breeding_pool_is_an_error() {
        let players = ranked_players();
        let ranked: Vec<&ScalarPlayer> = players.iter().collect();
        let schema = scalar_schema();
        let config = factory_config(0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(13);

        let result = OffspringFactory::new(&ranked, &schema, &config).next_generation(&mut rng);
        assert_eq!(result, Err(ConfigurationError::EmptyBreedingPool));
    }

    #[test]
    fn children_never_alias_their_parents() {
        let players = ranked_players();
        let ranked: Vec<&ScalarPlayer> = players.iter().collect();
        let schema = scalar_schema();
        let config = factory_config(0.25, 1.0);
        let mut rng = StdRng::seed_from_u64(14);

        let mut next = OffspringFactory::new(&ranked, &schema, &config)
            .next_generation(&mut rng)
            .unwrap();
        // Mutating the new generation must not touch the old one.
        for child in &mut next {
            child.mutate(1.0, 10.0, &schema, &mut rng);
        }
        assert_eq!(players, ranked_players());
    }
}
