//! Durable snapshots and the append-only gene audit log.
//!
//! The snapshot is the sole resume checkpoint: a JSON record of the
//! full pool state, overwritten wholesale on every save via a
//! temporary sibling file and an atomic rename, so an interrupted
//! save never corrupts the previous checkpoint. The gene log is a
//! CSV file that is only ever appended to, one row per player per
//! generation.

use crate::genomics::{Genome, GenomeError};
use crate::populations::logging::GenerationRecord;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// An error type for snapshot and log file operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No snapshot exists at the given path. Callers resuming a run
    /// should treat this as "start fresh", not as a fatal condition.
    #[error("no snapshot found at {}", path.display())]
    Missing { path: PathBuf },
    /// The snapshot file exists but cannot be decoded.
    #[error("malformed snapshot content")]
    Malformed(#[source] serde_json::Error),
    /// The snapshot decoded but contradicts itself.
    #[error("snapshot records a pool size of {pool_size} but holds {genomes} genomes")]
    Inconsistent { pool_size: usize, genomes: usize },
    /// A persisted genome does not fit the player's gene layout.
    #[error("snapshot genome does not match the player's gene layout")]
    Genome(#[from] GenomeError),
    /// The underlying read or write failed.
    #[error("I/O failure during persistence")]
    Io(#[from] io::Error),
    /// The gene log could not be read or written.
    #[error("gene log could not be read or written")]
    Csv(#[from] csv::Error),
    /// The gene log at the target path was written for a different
    /// gene layout.
    #[error("gene log columns {found:?} do not match the pool's gene names {expected:?}")]
    LogColumns {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// The full persisted state of a pool: configuration fixed at
/// creation time, the iteration counter, and every live genome.
///
/// Owned exclusively by [`PlayerPool`]; persistence only ever reads
/// and writes serialized copies of it.
///
/// [`PlayerPool`]: crate::PlayerPool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    pub pool_size: usize,
    pub ranking_iterations: usize,
    pub iteration_count: u64,
    pub genomes: Vec<Genome>,
}

impl PoolState {
    fn validate(&self) -> Result<(), PersistenceError> {
        if self.genomes.len() != self.pool_size {
            return Err(PersistenceError::Inconsistent {
                pool_size: self.pool_size,
                genomes: self.genomes.len(),
            });
        }
        Ok(())
    }
}

/// Serializes the state to `path`, overwriting any prior snapshot.
/// The write goes to a `.tmp` sibling first and is renamed over the
/// target, so the previous snapshot survives an interrupted save.
pub(crate) fn save_state(path: &Path, state: &PoolState) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(state).map_err(PersistenceError::Malformed)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Deserializes a snapshot from `path`.
pub(crate) fn load_state(path: &Path) -> Result<PoolState, PersistenceError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PersistenceError::Missing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let state: PoolState = serde_json::from_str(&data).map_err(PersistenceError::Malformed)?;
    state.validate()?;
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Appends generation records to the CSV gene log at `path`,
/// creating it (with a header row) if absent.
///
/// Appends are idempotent across calls and process restarts: the
/// last iteration index already present in the file is read back
/// first, and only records with a greater index are written. An
/// existing log whose header does not match the records' gene
/// names is rejected rather than appended to.
pub(crate) fn append_log(path: &Path, records: &[GenerationRecord]) -> Result<(), PersistenceError> {
    let Some(first) = records.first().and_then(|r| r.genomes.first()) else {
        return Ok(());
    };

    let summary = scan_log(path)?;
    if let Some(summary) = &summary {
        let expected = std::iter::once("iteration").chain(first.names());
        if summary.columns.iter().map(String::as_str).ne(expected) {
            return Err(PersistenceError::LogColumns {
                expected: std::iter::once("iteration".to_string())
                    .chain(first.names().map(String::from))
                    .collect(),
                found: summary.columns.clone(),
            });
        }
    }
    let flushed = summary.as_ref().and_then(|s| s.last_iteration);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);
    if summary.is_none() {
        writer.write_record(std::iter::once("iteration").chain(first.names()))?;
    }
    for record in records {
        if flushed.is_some_and(|last| record.iteration <= last) {
            continue;
        }
        for genome in &record.genomes {
            let mut row = vec![record.iteration.to_string()];
            row.extend(genome.values().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

struct LogSummary {
    columns: Vec<String>,
    last_iteration: Option<u64>,
}

/// Reads back the log's header and the highest iteration index in
/// its data rows, or `None` if the log does not exist or is empty.
fn scan_log(path: &Path) -> Result<Option<LogSummary>, PersistenceError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.is_empty() {
        return Ok(None);
    }
    let mut last = None;
    for record in reader.records() {
        let record = record?;
        if let Some(iteration) = record.get(0).and_then(|v| v.parse::<u64>().ok()) {
            last = Some(last.map_or(iteration, |l: u64| l.max(iteration)));
        }
    }
    Ok(Some(LogSummary {
        columns,
        last_iteration: last,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(iteration_count: u64) -> PoolState {
        PoolState {
            pool_size: 2,
            ranking_iterations: 3,
            iteration_count,
            genomes: vec![
                Genome::from_pairs(vec![("x".to_string(), 0.25)]),
                Genome::from_pairs(vec![("x".to_string(), 0.75)]),
            ],
        }
    }

    fn record(iteration: u64) -> GenerationRecord {
        GenerationRecord {
            iteration,
            genomes: state(iteration).genomes,
        }
    }

    #[test]
    fn snapshots_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        let original = state(7);

        save_state(&path, &original).unwrap();
        assert_eq!(load_state(&path).unwrap(), original);
    }

    #[test]
    fn saving_twice_overwrites_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");

        save_state(&path, &state(1)).unwrap();
        save_state(&path, &state(2)).unwrap();
        assert_eq!(load_state(&path).unwrap().iteration_count, 2);
    }

    #[test]
    fn missing_snapshot_is_distinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_state(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersistenceError::Missing { .. })));
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_state(&path),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn inconsistent_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        let mut broken = state(0);
        broken.pool_size = 5;
        let json = serde_json::to_string(&broken).unwrap();
        fs::write(&path, json).unwrap();
        assert!(matches!(
            load_state(&path),
            Err(PersistenceError::Inconsistent {
                pool_size: 5,
                genomes: 2
            })
        ));
    }

    #[test]
    fn log_rows_are_never_duplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.csv");
        let records = vec![record(0), record(1)];

        append_log(&path, &records).unwrap();
        append_log(&path, &records).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        // Header plus 2 players x 2 generations.
        assert_eq!(contents.lines().count(), 5);
    }

    #[test]
    fn new_records_are_appended_after_old_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.csv");

        append_log(&path, &[record(0)]).unwrap();
        append_log(&path, &[record(0), record(1), record(2)]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 7);
        assert_eq!(contents.lines().next().unwrap(), "iteration,x");
        assert!(contents.lines().last().unwrap().starts_with("2,"));
    }

    #[test]
    fn log_with_foreign_columns_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.csv");
        append_log(&path, &[record(0)]).unwrap();

        let foreign = GenerationRecord {
            iteration: 1,
            genomes: vec![Genome::from_pairs(vec![("y".to_string(), 0.5)])],
        };
        let result = append_log(&path, &[foreign]);
        assert!(matches!(result, Err(PersistenceError::LogColumns { .. })));

        // Nothing was appended under the stale header.
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.lines().next().unwrap(), "iteration,x");
    }

    #[test]
    fn failed_saves_leave_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        // A directory at the target makes the final rename fail.
        fs::create_dir(&path).unwrap();

        assert!(save_state(&path, &state(0)).is_err());
        assert!(!dir.path().join("pool.json.tmp").exists());
    }
}
