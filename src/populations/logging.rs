//! Per-generation records and summary statistics.

use crate::genomics::Genome;
use crate::Player;

use serde::{Deserialize, Serialize};

/// The genomes of one full generation, tagged with the iteration
/// index that produced it. One record per completed generation,
/// starting with a record for the initial population at index 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub iteration: u64,
    pub genomes: Vec<Genome>,
}

impl GenerationRecord {
    pub(crate) fn of<P: Player>(iteration: u64, players: &[P]) -> GenerationRecord {
        GenerationRecord {
            iteration,
            genomes: players.iter().map(|p| p.genome().clone()).collect(),
        }
    }
}

/// One row of a [`GeneTable`]: the gene values of a single player
/// in a single generation.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneRow {
    pub iteration: u64,
    pub values: Vec<f64>,
}

/// A tabular view of the pool's gene history, one row per player
/// per generation, suitable for plotting gene distributions or
/// offline statistical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneTable {
    columns: Vec<String>,
    rows: Vec<GeneRow>,
}

impl GeneTable {
    pub(crate) fn from_records(records: &[GenerationRecord]) -> GeneTable {
        let columns = records
            .first()
            .and_then(|r| r.genomes.first())
            .map(|g| g.names().map(String::from).collect())
            .unwrap_or_default();
        let rows = records
            .iter()
            .flat_map(|record| {
                record.genomes.iter().map(|genome| GeneRow {
                    iteration: record.iteration,
                    values: genome.values().collect(),
                })
            })
            .collect();
        GeneTable { columns, rows }
    }

    /// Returns the gene names, in genome order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns all rows, in generation order.
    pub fn rows(&self) -> &[GeneRow] {
        &self.rows
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// An empty sequence yields all-zero statistics.
    ///
    /// # Examples
    /// ```
    /// use coevo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: 0.0,
                minimum: 0.0,
                mean: 0.0,
                median: 0.0,
            };
        }
        let mid = data.len() / 2;
        let (mut max, mut min, mut sum) = (f64::MIN, f64::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f64;
        let mut median = *data.select_nth_unstable_by(mid, f64::total_cmp).1;
        if data.len() % 2 == 0 {
            median = (median + *data.select_nth_unstable_by(mid - 1, f64::total_cmp).1) / 2.0;
        }
        Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScalarPlayer;

    #[test]
    fn stats_handle_even_length_sequences() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
        assert_eq!(stats.maximum, 4.0);
        assert_eq!(stats.minimum, 1.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn stats_of_nothing_are_zero() {
        let stats = Stats::from(std::iter::empty());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
    }

    #[test]
    fn gene_table_flattens_generation_records() {
        let gen0 = GenerationRecord::of(
            0,
            &[
                ScalarPlayer::with_strength(0.1),
                ScalarPlayer::with_strength(0.2),
            ],
        );
        let gen1 = GenerationRecord::of(
            1,
            &[
                ScalarPlayer::with_strength(0.3),
                ScalarPlayer::with_strength(0.4),
            ],
        );

        let table = GeneTable::from_records(&[gen0, gen1]);
        assert_eq!(table.columns(), ["strength"]);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].iteration, 0);
        assert_eq!(table.rows()[3].iteration, 1);
        assert_eq!(table.rows()[3].values, vec![0.4]);
    }

    #[test]
    fn empty_history_yields_an_empty_table() {
        let table = GeneTable::from_records(&[]);
        assert!(table.columns().is_empty());
        assert!(table.rows().is_empty());
    }
}
