//! The pool of live players and the generation loop.
//!
//! A [`PlayerPool`] is the only mutable owner of evolutionary
//! state. Each [`iteration`] ranks the current generation by
//! repeated competition, breeds the next one from the ranking, and
//! commits the result atomically: on any failure the pool is left
//! exactly as it was.
//!
//! [`iteration`]: PlayerPool::iteration

mod config;
mod errors;
mod evolution;
pub mod logging;
mod ranking;

use crate::persistence::{self, PersistenceError, PoolState};
use crate::Player;
pub use config::PoolConfig;
pub use errors::{ConfigurationError, PoolError};
use evolution::OffspringFactory;
use logging::{GeneTable, GenerationRecord, Stats};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::path::Path;

/// A pool of competing players, evolved one generation at a time.
///
/// The pool is designed for a single-threaded, synchronous
/// generation loop: one [`iteration`] call runs to completion
/// before the next begins. Runs needing parallel evolution across
/// independent pools should use independent `PlayerPool` instances.
///
/// [`iteration`]: PlayerPool::iteration
///
/// # Examples
/// ```
/// # use coevo::genomics::{GeneSpec, Genome, GenomeError, GenomeSchema};
/// # use coevo::{Player, PlayerPool, PoolConfig};
/// # use rand::Rng;
/// # #[derive(Clone)]
/// # struct Duelist {
/// #     genome: Genome,
/// # }
/// # impl Player for Duelist {
/// #     type Config = GenomeSchema;
/// #     fn random<R: Rng>(config: &Self::Config, rng: &mut R) -> Self {
/// #         Duelist { genome: config.random_genome(rng) }
/// #     }
/// #     fn from_genome(genome: Genome, config: &Self::Config) -> Result<Self, GenomeError> {
/// #         config.conforms(&genome)?;
/// #         Ok(Duelist { genome })
/// #     }
/// #     fn genome(&self) -> &Genome {
/// #         &self.genome
/// #     }
/// #     fn crossover<R: Rng>(&self, other: &Self, config: &Self::Config, rng: &mut R) -> Self {
/// #         Duelist { genome: config.combine(&self.genome, &other.genome, rng) }
/// #     }
/// #     fn mutate<R: Rng>(&mut self, rate: f64, magnitude: f64, config: &Self::Config, rng: &mut R) {
/// #         config.mutate_genome(&mut self.genome, rate, magnitude, rng);
/// #     }
/// #     fn compete<R: Rng>(&self, opponents: &[&Self], _rng: &mut R) -> f64 {
/// #         let mine = self.genome.get("edge").unwrap_or(0.0);
/// #         opponents
/// #             .iter()
/// #             .filter(|o| o.genome.get("edge").unwrap_or(0.0) < mine)
/// #             .count() as f64
/// #     }
/// # }
/// let schema = GenomeSchema::new(vec![GeneSpec::continuous("edge", 0.0, 1.0, 0.2, 0.1)])?;
///
/// let mut pool = PlayerPool::<Duelist>::new(
///     schema,
///     PoolConfig {
///         pool_size: 16,
///         ranking_iterations: 4,
///         seed: Some(42),
///         ..PoolConfig::default()
///     },
/// )?;
///
/// for _ in 0..5 {
///     pool.iteration()?;
/// }
/// assert_eq!(pool.iteration_count(), 5);
/// assert_eq!(pool.len(), 16);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PlayerPool<P: Player> {
    players: Vec<P>,
    player_config: P::Config,
    config: PoolConfig,
    iteration_count: u64,
    history: Vec<GenerationRecord>,
    rng: StdRng,
}

impl<P: Player> PlayerPool<P> {
    /// Creates a pool of `pool_size` randomly initialized players,
    /// with an iteration count of 0.
    ///
    /// The type of `player_config` depends on the implementation of
    /// [`Player`], and is effectively opaque to the pool.
    ///
    /// # Errors
    /// Fails if any configuration parameter is out of range.
    pub fn new(
        player_config: P::Config,
        config: PoolConfig,
    ) -> Result<PlayerPool<P>, ConfigurationError> {
        config.validate()?;
        let mut rng = Self::seeded_rng(&config);
        let players: Vec<P> = (0..config.pool_size)
            .map(|_| P::random(&player_config, &mut rng))
            .collect();
        let history = vec![GenerationRecord::of(0, &players)];
        info!("initialized pool of {} players", config.pool_size);
        Ok(PlayerPool {
            players,
            player_config,
            config,
            iteration_count: 0,
            history,
            rng,
        })
    }

    /// Reconstructs a pool from the snapshot at `path`, continuing
    /// at the persisted iteration count.
    ///
    /// The requested `pool_size` must match the persisted one;
    /// resuming never silently truncates or pads a population. The
    /// requested `ranking_iterations` wins over the persisted value
    /// (it is a runtime knob, not population shape) with a warning
    /// when they differ.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::Missing`] if no snapshot
    /// exists (callers should fall back to [`new`]), with another
    /// [`PersistenceError`] if the snapshot is unreadable or does
    /// not fit the player's gene layout, or with a
    /// [`ConfigurationError`] on invalid or mismatching
    /// configuration.
    ///
    /// [`new`]: PlayerPool::new
    pub fn restore(
        player_config: P::Config,
        config: PoolConfig,
        path: impl AsRef<Path>,
    ) -> Result<PlayerPool<P>, PoolError> {
        let state = persistence::load_state(path.as_ref())?;
        let pool = Self::from_state(player_config, config, state)?;
        info!(
            "restored pool of {} players at iteration {}",
            pool.config.pool_size, pool.iteration_count
        );
        Ok(pool)
    }

    /// Reconstructs a pool from an in-memory [`PoolState`].
    pub fn from_state(
        player_config: P::Config,
        config: PoolConfig,
        state: PoolState,
    ) -> Result<PlayerPool<P>, PoolError> {
        config.validate()?;
        if state.pool_size != config.pool_size {
            return Err(ConfigurationError::PoolSizeMismatch {
                requested: config.pool_size,
                persisted: state.pool_size,
            }
            .into());
        }
        if state.ranking_iterations != config.ranking_iterations {
            warn!(
                "snapshot was taken with {} ranking iterations, continuing with {}",
                state.ranking_iterations, config.ranking_iterations
            );
        }
        let mut players = Vec::with_capacity(state.genomes.len());
        for genome in state.genomes {
            players.push(P::from_genome(genome, &player_config).map_err(PersistenceError::from)?);
        }
        let iteration_count = state.iteration_count;
        let history = vec![GenerationRecord::of(iteration_count, &players)];
        let rng = Self::seeded_rng(&config);
        Ok(PlayerPool {
            players,
            player_config,
            config,
            iteration_count,
            history,
            rng,
        })
    }

    /// Runs one full generation transition: rank the current
    /// population by repeated competition, breed the next
    /// generation from the ranking, then commit it and increment
    /// the iteration count by exactly 1.
    ///
    /// The commit is atomic: if ranking or breeding fails, the pool
    /// is left at the prior generation with its counter untouched.
    /// No transient condition is retried here; fitness noise is
    /// handled by repeated competitions, not by retrying.
    ///
    /// # Errors
    /// Fails if the configured selection parameters leave no
    /// breeding parents.
    pub fn iteration(&mut self) -> Result<(), ConfigurationError> {
        let result = ranking::rank(&self.players, &self.config, &mut self.rng);
        let ranked: Vec<&P> = result
            .standings
            .iter()
            .map(|&(i, _)| &self.players[i])
            .collect();
        let next = OffspringFactory::new(&ranked, &self.player_config, &self.config)
            .next_generation(&mut self.rng)?;

        let scores = Stats::from(result.standings.iter().map(|&(_, s)| s));
        self.players = next;
        self.iteration_count += 1;
        self.history
            .push(GenerationRecord::of(self.iteration_count, &self.players));
        debug!(
            "generation {}: best score {:.3}, mean {:.3}, median {:.3}",
            self.iteration_count, scores.maximum, scores.mean, scores.median
        );
        Ok(())
    }

    /// Serializes the full pool state to `path`, fully overwriting
    /// any prior snapshot there. This is the sole resume checkpoint
    /// for [`restore`].
    ///
    /// [`restore`]: PlayerPool::restore
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        persistence::save_state(path.as_ref(), &self.snapshot())?;
        info!(
            "saved snapshot at iteration {} to {}",
            self.iteration_count,
            path.as_ref().display()
        );
        Ok(())
    }

    /// Appends every generation record produced since this pool was
    /// created (or restored) to the CSV gene log at `path`. Rows
    /// already flushed by an earlier call, even in a previous
    /// process, are never emitted again.
    pub fn save_log(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        persistence::append_log(path.as_ref(), &self.history)
    }

    /// Returns a copy of the pool's persistable state.
    pub fn snapshot(&self) -> PoolState {
        PoolState {
            pool_size: self.config.pool_size,
            ranking_iterations: self.config.ranking_iterations,
            iteration_count: self.iteration_count,
            genomes: self.players.iter().map(|p| p.genome().clone()).collect(),
        }
    }

    /// Returns a tabular snapshot of current and historical genes,
    /// one row per player per generation, for plotting or analysis.
    pub fn gene_table(&self) -> GeneTable {
        GeneTable::from_records(&self.history)
    }

    /// Returns the per-generation records accumulated since this
    /// pool was created or restored.
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Returns an iterator over the current generation's players.
    pub fn players(&self) -> impl Iterator<Item = &P> {
        self.players.iter()
    }

    /// Returns the number of completed generations. The sole source
    /// of truth for how far the evolutionary search has progressed.
    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    /// Returns the number of players in the pool.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns whether the pool holds no players. Always false for
    /// a successfully constructed pool.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn seeded_rng(config: &PoolConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
