use crate::genomics::{Genome, GenomeError};

use rand::Rng;

/// An interface for strategy players that can be evolved by a
/// [`PlayerPool`].
///
/// The pool is generic over this trait and never over a concrete
/// game: implementors supply the competitive task, the engine
/// supplies ranking, selection, breeding and persistence.
///
/// Elites are carried into the next generation as independent
/// clones, which is why `Clone` is a supertrait; later mutation of
/// a new generation must never alter players recorded for an old
/// one.
///
/// [`PlayerPool`]: crate::PlayerPool
pub trait Player: Clone {
    /// Implementation-defined configuration, opaque to the pool.
    /// Typically holds a [`GenomeSchema`] plus any task parameters.
    ///
    /// [`GenomeSchema`]: crate::genomics::GenomeSchema
    type Config;

    /// Returns a randomly initialized player.
    fn random<R: Rng>(config: &Self::Config, rng: &mut R) -> Self;

    /// Reconstructs a player from a persisted genome.
    ///
    /// # Errors
    /// Returns an error if the genome does not fit the
    /// configuration's gene layout.
    fn from_genome(genome: Genome, config: &Self::Config) -> Result<Self, GenomeError>;

    /// Returns the player's genome.
    fn genome(&self) -> &Genome;

    /// Combines this player with another and returns a child player.
    fn crossover<R: Rng>(&self, other: &Self, config: &Self::Config, rng: &mut R) -> Self;

    /// Mutates the player in place. `rate` scales each gene's
    /// mutation probability and `magnitude` the perturbation size;
    /// both come from the pool configuration.
    fn mutate<R: Rng>(&mut self, rate: f64, magnitude: f64, config: &Self::Config, rng: &mut R);

    /// Plays one competition against `opponents` and returns this
    /// player's score contribution (e.g. the number of opponents
    /// beaten, or 1.0 for a win and 0.0 for a loss in a duel).
    ///
    /// Contributions are accumulated over repeated competitions to
    /// average out the noise of any single outcome, so a stochastic
    /// result is fine here.
    fn compete<R: Rng>(&self, opponents: &[&Self], rng: &mut R) -> f64;
}
