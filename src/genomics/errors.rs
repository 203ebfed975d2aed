use thiserror::Error;

/// An error type indicating an invalid gene schema,
/// or a genome that does not fit one.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenomeError {
    /// The schema defines no genes at all.
    #[error("gene schema defines no genes")]
    EmptySchema,
    /// Two genes in the schema share a name.
    #[error("duplicate gene name {0:?} in schema")]
    DuplicateGene(String),
    /// A discrete gene was given no values to choose from.
    #[error("discrete gene {0:?} has an empty value set")]
    EmptyValueSet(String),
    /// A continuous gene's bounds are inverted or non-finite.
    #[error("gene {name:?} has invalid bounds [{min_value}, {max_value}]")]
    InvalidBounds {
        name: String,
        min_value: f64,
        max_value: f64,
    },
    /// A gene's volatility lies outside `[0.0, 1.0]`.
    #[error("gene {name:?} has volatility {volatility}, expected a value in [0.0, 1.0]")]
    InvalidVolatility { name: String, volatility: f64 },
    /// A continuous gene's granularity is negative or non-finite.
    #[error("gene {name:?} has invalid granularity {granularity}")]
    InvalidGranularity { name: String, granularity: f64 },
    /// A genome's gene count differs from the schema's.
    #[error("genome has {found} genes, schema defines {expected}")]
    ArityMismatch { expected: usize, found: usize },
    /// A gene appears at the right position under the wrong name.
    #[error("gene at position {position} is named {found:?}, schema defines {expected:?}")]
    NameMismatch {
        position: usize,
        expected: String,
        found: String,
    },
}
