//! Shared test fixtures: a deterministic single-gene player whose
//! competition outcome depends only on its `strength` gene.

use crate::genomics::{GeneSpec, Genome, GenomeError, GenomeSchema};
use crate::Player;

use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScalarPlayer {
    genome: Genome,
}

impl ScalarPlayer {
    pub(crate) fn with_strength(strength: f64) -> ScalarPlayer {
        ScalarPlayer {
            genome: Genome::from_pairs(vec![("strength".to_string(), strength)]),
        }
    }

    pub(crate) fn strength(&self) -> f64 {
        self.genome.get("strength").unwrap()
    }
}

impl Player for ScalarPlayer {
    type Config = GenomeSchema;

    fn random<R: Rng>(config: &Self::Config, rng: &mut R) -> Self {
        ScalarPlayer {
            genome: config.random_genome(rng),
        }
    }

    fn from_genome(genome: Genome, config: &Self::Config) -> Result<Self, GenomeError> {
        config.conforms(&genome)?;
        Ok(ScalarPlayer { genome })
    }

    fn genome(&self) -> &Genome {
        &self.genome
    }

    fn crossover<R: Rng>(&self, other: &Self, config: &Self::Config, rng: &mut R) -> Self {
        ScalarPlayer {
            genome: config.combine(&self.genome, &other.genome, rng),
        }
    }

    fn mutate<R: Rng>(&mut self, rate: f64, magnitude: f64, config: &Self::Config, rng: &mut R) {
        config.mutate_genome(&mut self.genome, rate, magnitude, rng);
    }

    /// Stronger players always win: score one point per weaker opponent.
    fn compete<R: Rng>(&self, opponents: &[&Self], _rng: &mut R) -> f64 {
        opponents
            .iter()
            .filter(|o| o.strength() < self.strength())
            .count() as f64
    }
}

pub(crate) fn scalar_schema() -> GenomeSchema {
    GenomeSchema::new(vec![GeneSpec::continuous("strength", 0.0, 1.0, 0.5, 0.1)]).unwrap()
}
