//! A generic engine for competitive co-evolution of strategy
//! players.
//!
//! Populations are improved through a genetic-algorithm loop: every
//! generation is ranked by repeated simulated competition among its
//! members, the top of the ranking survives unchanged, and the rest
//! of the next generation is bred from the survivors by crossover
//! and mutation. The engine is generic over a user-defined
//! competitive task via the [`Player`] trait; a genome toolkit for
//! implementing that trait is supplied by the [`genomics`] module.
//! Long runs can be checkpointed to disk and resumed, and every
//! generation's genes are appended to a CSV audit log for offline
//! analysis.
//!
//! # Example usage: evolving duelists toward a target trait value
//! ```
//! use coevo::genomics::{GeneSpec, Genome, GenomeError, GenomeSchema};
//! use coevo::{Player, PlayerPool, PoolConfig};
//! use rand::Rng;
//!
//! // A player with a single gene; whoever guesses closer to 0.75
//! // wins a duel.
//! #[derive(Clone)]
//! struct Guesser {
//!     genome: Genome,
//! }
//!
//! impl Guesser {
//!     fn miss(&self) -> f64 {
//!         (self.genome.get("guess").unwrap_or(0.0) - 0.75).abs()
//!     }
//! }
//!
//! impl Player for Guesser {
//!     type Config = GenomeSchema;
//!
//!     fn random<R: Rng>(config: &Self::Config, rng: &mut R) -> Self {
//!         Guesser {
//!             genome: config.random_genome(rng),
//!         }
//!     }
//!
//!     fn from_genome(genome: Genome, config: &Self::Config) -> Result<Self, GenomeError> {
//!         config.conforms(&genome)?;
//!         Ok(Guesser { genome })
//!     }
//!
//!     fn genome(&self) -> &Genome {
//!         &self.genome
//!     }
//!
//!     fn crossover<R: Rng>(&self, other: &Self, config: &Self::Config, rng: &mut R) -> Self {
//!         Guesser {
//!             genome: config.combine(&self.genome, &other.genome, rng),
//!         }
//!     }
//!
//!     fn mutate<R: Rng>(&mut self, rate: f64, magnitude: f64, config: &Self::Config, rng: &mut R) {
//!         config.mutate_genome(&mut self.genome, rate, magnitude, rng);
//!     }
//!
//!     fn compete<R: Rng>(&self, opponents: &[&Self], _rng: &mut R) -> f64 {
//!         opponents.iter().filter(|o| o.miss() > self.miss()).count() as f64
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = GenomeSchema::new(vec![GeneSpec::continuous(
//!         "guess", 0.0, 1.0, 0.2, 0.1,
//!     )])?;
//!
//!     let mut pool = PlayerPool::<Guesser>::new(
//!         schema,
//!         PoolConfig {
//!             pool_size: 32,
//!             ranking_iterations: 4,
//!             seed: Some(42),
//!             ..PoolConfig::default()
//!         },
//!     )?;
//!
//!     for _ in 0..10 {
//!         pool.iteration()?;
//!     }
//!     assert_eq!(pool.iteration_count(), 10);
//!
//!     // pool.save("pool.json")?, PlayerPool::restore(..) and
//!     // pool.save_log("genes.csv")? checkpoint and audit the run.
//!     Ok(())
//! }
//! ```

pub mod genomics;
mod persistence;
mod player;
mod populations;

#[cfg(test)]
mod testing;

pub use persistence::{PersistenceError, PoolState};
pub use player::Player;
pub use populations::*;
