use crate::genomics::{Genome, GenomeError};

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// The value domain of a single gene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GeneKind {
    /// A real-valued gene, uniformly initialized within its bounds
    /// and mutated by Gaussian perturbation of magnitude `granularity`.
    Continuous {
        min_value: f64,
        max_value: f64,
        granularity: f64,
    },
    /// A gene restricted to an explicit set of values, initialized
    /// and mutated by picking one of them at random.
    Discrete { values: Vec<f64> },
}

/// The specification of a single named gene: its value domain
/// and its `volatility`, the per-breeding likelihood of mutation.
///
/// # Examples
/// ```
/// use coevo::genomics::GeneSpec;
///
/// let weight = GeneSpec::continuous("att_bonus_wgt", -25.0, 25.0, 0.03, 0.10);
/// let cutoff = GeneSpec::discrete("turn_in_cutoff", vec![4.0, 6.0, 8.0, 10.0], 0.01);
///
/// assert_eq!(weight.name(), "att_bonus_wgt");
/// assert_eq!(cutoff.volatility(), 0.01);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneSpec {
    name: String,
    kind: GeneKind,
    volatility: f64,
}

impl GeneSpec {
    /// Returns the spec of a continuous gene within `[min_value, max_value]`.
    pub fn continuous(
        name: impl Into<String>,
        min_value: f64,
        max_value: f64,
        volatility: f64,
        granularity: f64,
    ) -> GeneSpec {
        GeneSpec {
            name: name.into(),
            kind: GeneKind::Continuous {
                min_value,
                max_value,
                granularity,
            },
            volatility,
        }
    }

    /// Returns the spec of a discrete gene restricted to `values`.
    pub fn discrete(name: impl Into<String>, values: Vec<f64>, volatility: f64) -> GeneSpec {
        GeneSpec {
            name: name.into(),
            kind: GeneKind::Discrete { values },
            volatility,
        }
    }

    /// Returns the gene's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the gene's value domain.
    pub fn kind(&self) -> &GeneKind {
        &self.kind
    }

    /// Returns the gene's mutation likelihood.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    fn validate(&self) -> Result<(), GenomeError> {
        if !(0.0..=1.0).contains(&self.volatility) {
            return Err(GenomeError::InvalidVolatility {
                name: self.name.clone(),
                volatility: self.volatility,
            });
        }
        match &self.kind {
            GeneKind::Continuous {
                min_value,
                max_value,
                granularity,
            } => {
                if !(min_value.is_finite() && max_value.is_finite() && min_value <= max_value) {
                    return Err(GenomeError::InvalidBounds {
                        name: self.name.clone(),
                        min_value: *min_value,
                        max_value: *max_value,
                    });
                }
                if !(granularity.is_finite() && *granularity >= 0.0) {
                    return Err(GenomeError::InvalidGranularity {
                        name: self.name.clone(),
                        granularity: *granularity,
                    });
                }
            }
            GeneKind::Discrete { values } => {
                if values.is_empty() {
                    return Err(GenomeError::EmptyValueSet(self.name.clone()));
                }
            }
        }
        Ok(())
    }

    fn random_value<R: Rng>(&self, rng: &mut R) -> f64 {
        match &self.kind {
            GeneKind::Continuous {
                min_value,
                max_value,
                ..
            } => rng.gen_range(*min_value..=*max_value),
            GeneKind::Discrete { values } => values.choose(rng).copied().unwrap_or(0.0),
        }
    }

    fn mutated_value<R: Rng>(&self, value: f64, rate: f64, magnitude: f64, rng: &mut R) -> f64 {
        if rng.gen::<f64>() >= self.volatility * rate {
            return value;
        }
        match &self.kind {
            GeneKind::Continuous {
                min_value,
                max_value,
                granularity,
            } => {
                let noise: f64 = rng.sample(StandardNormal);
                (value + noise * granularity * magnitude).clamp(*min_value, *max_value)
            }
            GeneKind::Discrete { values } => values.choose(rng).copied().unwrap_or(value),
        }
    }
}

/// The fixed gene layout shared by every genome in a population.
///
/// A schema owns an ordered list of [`GeneSpec`]s and provides the
/// genetic primitives built on them: random initialization, uniform
/// crossover, volatility-driven mutation and conformity checking.
/// Player implementations typically hold a schema in their
/// [`Player::Config`] and delegate to it.
///
/// [`Player::Config`]: crate::Player::Config
///
/// # Examples
/// ```
/// use coevo::genomics::{GeneSpec, GenomeSchema};
/// use rand::SeedableRng;
///
/// let schema = GenomeSchema::new(vec![
///     GeneSpec::continuous("aggression", -1.0, 1.0, 0.1, 0.05),
///     GeneSpec::discrete("opening", vec![0.0, 1.0, 2.0], 0.05),
/// ])
/// .unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let genome = schema.random_genome(&mut rng);
///
/// assert_eq!(genome.len(), 2);
/// assert!(schema.conforms(&genome).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct GenomeSchema {
    specs: Vec<GeneSpec>,
    index: AHashMap<String, usize>,
}

impl GenomeSchema {
    /// Builds a schema from an ordered list of gene specs.
    ///
    /// # Errors
    /// Returns an error if the list is empty, contains duplicate
    /// names, or any spec's bounds, volatility or value set is invalid.
    pub fn new(specs: Vec<GeneSpec>) -> Result<GenomeSchema, GenomeError> {
        if specs.is_empty() {
            return Err(GenomeError::EmptySchema);
        }
        let mut index = AHashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            spec.validate()?;
            if index.insert(spec.name.clone(), i).is_some() {
                return Err(GenomeError::DuplicateGene(spec.name.clone()));
            }
        }
        Ok(GenomeSchema { specs, index })
    }

    /// Returns the number of genes the schema defines.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns whether the schema defines no genes.
    /// Always false for a successfully constructed schema.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns the ordered gene specs.
    pub fn specs(&self) -> &[GeneSpec] {
        &self.specs
    }

    /// Returns an iterator over the gene names, in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    /// Returns the spec of the gene with the given name.
    pub fn spec(&self, name: &str) -> Option<&GeneSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    /// Returns a randomly initialized genome.
    pub fn random_genome<R: Rng>(&self, rng: &mut R) -> Genome {
        Genome::from_pairs(
            self.specs
                .iter()
                .map(|spec| (spec.name.clone(), spec.random_value(rng)))
                .collect(),
        )
    }

    /// Combines two genomes gene-by-gene, picking each value
    /// from one parent or the other with equal probability.
    ///
    /// Both genomes are expected to conform to the schema.
    pub fn combine<R: Rng>(&self, first: &Genome, second: &Genome, rng: &mut R) -> Genome {
        debug_assert_eq!(first.len(), self.specs.len());
        debug_assert_eq!(second.len(), self.specs.len());
        Genome::from_pairs(
            self.specs
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    let value = if rng.gen::<bool>() {
                        first.value_at(i)
                    } else {
                        second.value_at(i)
                    };
                    (spec.name.clone(), value)
                })
                .collect(),
        )
    }

    /// Mutates a genome in place. Each gene mutates with probability
    /// `volatility * rate`; continuous genes are perturbed by a
    /// Gaussian of standard deviation `granularity * magnitude` and
    /// clamped to their bounds, discrete genes are re-drawn from
    /// their value set.
    pub fn mutate_genome<R: Rng>(
        &self,
        genome: &mut Genome,
        rate: f64,
        magnitude: f64,
        rng: &mut R,
    ) {
        debug_assert_eq!(genome.len(), self.specs.len());
        for (i, spec) in self.specs.iter().enumerate() {
            let mutated = spec.mutated_value(genome.value_at(i), rate, magnitude, rng);
            genome.set_value_at(i, mutated);
        }
    }

    /// Checks that a genome has the schema's arity and gene names,
    /// in order.
    ///
    /// # Errors
    /// Returns an error describing the first mismatch found.
    pub fn conforms(&self, genome: &Genome) -> Result<(), GenomeError> {
        if genome.len() != self.specs.len() {
            return Err(GenomeError::ArityMismatch {
                expected: self.specs.len(),
                found: genome.len(),
            });
        }
        for (i, spec) in self.specs.iter().enumerate() {
            if genome.name_at(i) != spec.name {
                return Err(GenomeError::NameMismatch {
                    position: i,
                    expected: spec.name.clone(),
                    found: genome.name_at(i).to_string(),
                });
            }
        }
        Ok(())
    }
}
