//! Genome building blocks for player implementations.
//!
//! The engine itself only ever sees the [`Player`] trait and the
//! [`Genome`] value type; the rest of this module is a toolkit for
//! implementing that trait. A [`GenomeSchema`] fixes the ordered
//! gene layout of a population at creation time and supplies the
//! genetic primitives (random initialization, crossover, mutation)
//! that most players delegate to.
//!
//! [`Player`]: crate::Player

mod errors;
mod genes;
mod genome;

pub use errors::GenomeError;
pub use genes::{GeneKind, GeneSpec, GenomeSchema};
pub use genome::Genome;
