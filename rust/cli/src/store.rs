//! Append-only CSV history of simulation runs.
//!
//! One `;`-delimited row per run, keyed by a run id assigned here when the
//! run is appended. Ids count up from `0`; a store that does not exist yet
//! or holds no rows is simply empty.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pokerstat_engine::hand::Category;
use pokerstat_engine::stats::{CategoryCounts, StatisticsRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::io_utils::ensure_parent_dir;

pub const DELIMITER: u8 = b';';

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}

/// Column layout of a persisted run; field order is the file's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredRow {
    id: u64,
    timestamp: String,
    trial_count: u64,
    elapsed_seconds: f64,
    royal_flush: u64,
    straight_flush: u64,
    four_of_a_kind: u64,
    full_house: u64,
    flush: u64,
    straight: u64,
    three_of_a_kind: u64,
    two_pair: u64,
    one_pair: u64,
    high_card: u64,
}

impl StoredRow {
    fn from_record(id: u64, record: &StatisticsRecord) -> Self {
        let c = |category| record.count(category);
        Self {
            id,
            timestamp: record.timestamp_rfc3339(),
            trial_count: record.trial_count(),
            elapsed_seconds: record.elapsed_seconds(),
            royal_flush: c(Category::RoyalFlush),
            straight_flush: c(Category::StraightFlush),
            four_of_a_kind: c(Category::FourOfAKind),
            full_house: c(Category::FullHouse),
            flush: c(Category::Flush),
            straight: c(Category::Straight),
            three_of_a_kind: c(Category::ThreeOfAKind),
            two_pair: c(Category::TwoPair),
            one_pair: c(Category::OnePair),
            high_card: c(Category::HighCard),
        }
    }

    fn into_record(self, row: usize) -> Result<StatisticsRecord, StoreError> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| StoreError::Malformed {
                row,
                reason: format!("bad timestamp {:?}: {}", self.timestamp, e),
            })?
            .with_timezone(&Utc);

        let mut counts = CategoryCounts::new();
        for (category, count) in [
            (Category::RoyalFlush, self.royal_flush),
            (Category::StraightFlush, self.straight_flush),
            (Category::FourOfAKind, self.four_of_a_kind),
            (Category::FullHouse, self.full_house),
            (Category::Flush, self.flush),
            (Category::Straight, self.straight),
            (Category::ThreeOfAKind, self.three_of_a_kind),
            (Category::TwoPair, self.two_pair),
            (Category::OnePair, self.one_pair),
            (Category::HighCard, self.high_card),
        ] {
            counts.set(category, count);
        }
        if counts.total() != self.trial_count {
            return Err(StoreError::Malformed {
                row,
                reason: format!(
                    "category counts add up to {} but trial_count is {}",
                    counts.total(),
                    self.trial_count
                ),
            });
        }
        if !self.elapsed_seconds.is_finite() || self.elapsed_seconds < 0.0 {
            return Err(StoreError::Malformed {
                row,
                reason: format!("bad elapsed_seconds {}", self.elapsed_seconds),
            });
        }

        Ok(StatisticsRecord::restore(
            self.id,
            timestamp,
            self.trial_count,
            self.elapsed_seconds,
            counts,
        ))
    }
}

/// Id for the next appended run: one past the largest stored id, or `0`
/// when nothing is stored yet. Fails when the largest id is `u64::MAX`.
pub fn next_run_id(rows: &[StatisticsRecord]) -> Result<u64, StoreError> {
    let largest = rows
        .iter()
        .enumerate()
        .filter_map(|(index, r)| r.run_id().map(|id| (id, index)))
        .max();
    match largest {
        Some((max, index)) => max.checked_add(1).ok_or_else(|| StoreError::Malformed {
            // row 1 is the header
            row: index + 2,
            reason: format!("run id {} leaves no room for another run", max),
        }),
        None => {
            info!("statistics store is empty; starting at run id 0");
            Ok(0)
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored runs in file order.
    pub fn load(&self) -> Result<Vec<StatisticsRecord>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "statistics store not found");
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<StoredRow>().enumerate() {
            // row 1 is the header
            records.push(row?.into_record(index + 2)?);
        }
        debug!(path = %self.path.display(), rows = records.len(), "loaded statistics store");
        Ok(records)
    }

    /// Persists `record` under the next free run id and returns it with
    /// that id attached. Prior rows are read back and written with the new
    /// one to a temporary file next to the store, which then replaces it.
    pub fn append(&self, record: StatisticsRecord) -> Result<StatisticsRecord, StoreError> {
        let mut rows = self.load()?;
        let id = next_run_id(&rows)?;
        let record = record.with_run_id(id);
        rows.push(record.clone());

        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        ensure_parent_dir(&self.path).map_err(io_err)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(DELIMITER)
                .from_writer(staged.as_file_mut());
            for row in &rows {
                let id = row.run_id().unwrap_or(id);
                writer.serialize(StoredRow::from_record(id, row))?;
            }
            writer.flush().map_err(io_err)?;
        }
        staged.as_file().sync_all().map_err(io_err)?;
        staged.persist(&self.path).map_err(|e| io_err(e.error))?;

        info!(path = %self.path.display(), run_id = id, trials = record.trial_count(), "run stored");
        Ok(record)
    }

    pub fn find(&self, run_id: u64) -> Result<Option<StatisticsRecord>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.run_id() == Some(run_id)))
    }

    /// The run with the highest id.
    pub fn latest(&self) -> Result<Option<StatisticsRecord>, StoreError> {
        Ok(self.load()?.into_iter().max_by_key(|r| r.run_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerstat_engine::sim::{run, SimConfig};
    use tempfile::tempdir;

    fn sample(trials: u64, seed: u64) -> StatisticsRecord {
        run(&SimConfig::new(trials).with_seed(seed).with_workers(1)).unwrap()
    }

    #[test]
    fn missing_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("none.csv"));
        assert!(store.load().unwrap().is_empty());
        assert!(store.latest().unwrap().is_none());
    }

    #[test]
    fn empty_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        std::fs::write(&path, "").unwrap();
        assert!(StatsStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn first_run_gets_id_zero_then_counts_up() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("nested").join("stats.csv"));

        let first = store.append(sample(100, 1)).unwrap();
        assert_eq!(first.run_id(), Some(0));
        let second = store.append(sample(200, 2)).unwrap();
        assert_eq!(second.run_id(), Some(1));

        let rows = store.load().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].trial_count(), 200);
        assert_eq!(rows[1].counts(), second.counts());
        assert_eq!(store.latest().unwrap().unwrap().run_id(), Some(1));
        assert_eq!(store.find(0).unwrap().unwrap().trial_count(), 100);
        assert!(store.find(7).unwrap().is_none());
    }

    #[test]
    fn next_id_follows_the_largest_id_not_the_row_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        std::fs::write(
            &path,
            "id;timestamp;trial_count;elapsed_seconds;royal_flush;straight_flush;four_of_a_kind;full_house;flush;straight;three_of_a_kind;two_pair;one_pair;high_card\n\
             41;2024-01-01T00:00:00Z;3;0.5;0;0;0;0;0;0;0;0;1;2\n",
        )
        .unwrap();
        let store = StatsStore::new(&path);
        let rows = store.load().unwrap();
        assert_eq!(next_run_id(&rows).unwrap(), 42);
        assert_eq!(rows[0].count(Category::OnePair), 1);
        assert_eq!(store.append(sample(10, 3)).unwrap().run_id(), Some(42));
    }

    #[test]
    fn exhausted_run_ids_are_an_error_not_a_wrap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let contents = "id;timestamp;trial_count;elapsed_seconds;royal_flush;straight_flush;four_of_a_kind;full_house;flush;straight;three_of_a_kind;two_pair;one_pair;high_card\n\
             3;2024-01-01T00:00:00Z;0;0.5;0;0;0;0;0;0;0;0;0;0\n\
             18446744073709551615;2024-01-02T00:00:00Z;0;0.5;0;0;0;0;0;0;0;0;0;0\n";
        std::fs::write(&path, contents).unwrap();
        let store = StatsStore::new(&path);

        let err = next_run_id(&store.load().unwrap()).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { row: 3, .. }), "{err}");

        assert!(store.append(sample(10, 4)).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn append_leaves_only_the_store_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let store = StatsStore::new(&path);
        store.append(sample(10, 1)).unwrap();
        store.append(sample(10, 2)).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("stats.csv")]);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn append_replaces_the_file_instead_of_truncating_it() {
        use std::io::Read;

        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let store = StatsStore::new(&path);
        store.append(sample(10, 1)).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // a reader holding the old file keeps seeing the complete old history
        let mut old = std::fs::File::open(&path).unwrap();
        store.append(sample(10, 2)).unwrap();
        let mut seen = String::new();
        old.read_to_string(&mut seen).unwrap();
        assert_eq!(seen, before);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn file_uses_semicolons_and_fixed_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        StatsStore::new(&path).append(sample(50, 9)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id;timestamp;trial_count;elapsed_seconds;royal_flush;straight_flush;four_of_a_kind;full_house;flush;straight;three_of_a_kind;two_pair;one_pair;high_card"
        );
        let row: Vec<&str> = lines.next().unwrap().split(';').collect();
        assert_eq!(row.len(), 14);
        assert_eq!(row[0], "0");
        assert!(row[1].ends_with('Z'));
        assert_eq!(row[2], "50");
    }

    #[test]
    fn counts_that_do_not_sum_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        std::fs::write(
            &path,
            "id;timestamp;trial_count;elapsed_seconds;royal_flush;straight_flush;four_of_a_kind;full_house;flush;straight;three_of_a_kind;two_pair;one_pair;high_card\n\
             0;2024-01-01T00:00:00Z;10;0.5;0;0;0;0;0;0;0;0;1;2\n",
        )
        .unwrap();
        let err = StatsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { row: 2, .. }), "{err}");
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        std::fs::write(
            &path,
            "id;timestamp;trial_count;elapsed_seconds;royal_flush;straight_flush;four_of_a_kind;full_house;flush;straight;three_of_a_kind;two_pair;one_pair;high_card\n\
             0;yesterday;0;0.5;0;0;0;0;0;0;0;0;0;0\n",
        )
        .unwrap();
        let err = StatsStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("bad timestamp"));
    }
}
