use serde::{Deserialize, Serialize};

use std::fmt;

/// An ordered, fixed-arity sequence of named numeric traits.
///
/// A genome is the heritable configuration of a single player.
/// Gene order is significant: all genomes in a population share
/// the same arity and gene names, in the same order, for the
/// whole lifetime of the pool.
///
/// # Examples
/// ```
/// use coevo::genomics::Genome;
///
/// let genome = Genome::from_pairs(vec![
///     ("aggression".to_string(), 0.8),
///     ("caution".to_string(), -1.5),
/// ]);
///
/// assert_eq!(genome.len(), 2);
/// assert_eq!(genome.get("caution"), Some(-1.5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    genes: Vec<(String, f64)>,
}

impl Genome {
    /// Builds a genome from an ordered list of (name, value) pairs.
    pub fn from_pairs(genes: Vec<(String, f64)>) -> Genome {
        Genome { genes }
    }

    /// Returns the number of genes in the genome.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns whether the genome holds no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the value of the gene with the given name,
    /// or `None` if no such gene exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.genes
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// Returns an iterator over the gene names, in genome order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|(n, _)| n.as_str())
    }

    /// Returns an iterator over the gene values, in genome order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.genes.iter().map(|&(_, v)| v)
    }

    /// Returns an iterator over (name, value) pairs, in genome order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.genes.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        &self.genes[index].0
    }

    pub(crate) fn value_at(&self, index: usize) -> f64 {
        self.genes[index].1
    }

    pub(crate) fn set_value_at(&mut self, index: usize, value: f64) {
        self.genes[index].1 = value;
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Genome({})",
            self.genes
                .iter()
                .map(|(n, v)| format!("{}={}", n, v))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome() -> Genome {
        Genome::from_pairs(vec![("a".to_string(), 1.0), ("b".to_string(), -2.5)])
    }

    #[test]
    fn get_finds_genes_by_name() {
        let g = genome();
        assert_eq!(g.get("a"), Some(1.0));
        assert_eq!(g.get("b"), Some(-2.5));
        assert_eq!(g.get("c"), None);
    }

    #[test]
    fn iteration_preserves_gene_order() {
        let g = genome();
        assert_eq!(g.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(g.values().collect::<Vec<_>>(), vec![1.0, -2.5]);
        assert_eq!(g.iter().collect::<Vec<_>>(), vec![("a", 1.0), ("b", -2.5)]);
    }

    #[test]
    fn display_lists_genes() {
        assert_eq!(genome().to_string(), "Genome(a=1, b=-2.5)");
    }
}
