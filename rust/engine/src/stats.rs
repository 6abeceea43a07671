use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::hand::Category;

/// One counter per [`Category`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CategoryCounts {
    counts: [u64; 10],
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> u64 {
        self.counts[category as usize]
    }

    pub fn set(&mut self, category: Category, count: u64) {
        self.counts[category as usize] = count;
    }

    pub fn increment(&mut self, category: Category) {
        self.counts[category as usize] += 1;
    }

    pub fn merge(&mut self, other: &CategoryCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(category, count)` pairs in evaluation order, royal flush first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.as_str(), &count)?;
        }
        map.end()
    }
}

/// Summary of one simulation run.
///
/// A fresh record is built for every run and is read-only once returned.
/// The run id is left empty by the engine and attached by whoever persists
/// the record, see [`StatisticsRecord::with_run_id`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsRecord {
    run_id: Option<u64>,
    timestamp: DateTime<Utc>,
    trial_count: u64,
    elapsed_seconds: f64,
    counts: CategoryCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    cancelled: bool,
}

impl StatisticsRecord {
    pub(crate) fn completed(
        timestamp: DateTime<Utc>,
        elapsed_seconds: f64,
        counts: CategoryCounts,
        seed: u64,
        cancelled: bool,
    ) -> Self {
        Self {
            run_id: None,
            timestamp,
            trial_count: counts.total(),
            elapsed_seconds,
            counts,
            seed: Some(seed),
            cancelled,
        }
    }

    /// Rebuilds a record that was persisted earlier.
    pub fn restore(
        run_id: u64,
        timestamp: DateTime<Utc>,
        trial_count: u64,
        elapsed_seconds: f64,
        counts: CategoryCounts,
    ) -> Self {
        Self {
            run_id: Some(run_id),
            timestamp,
            trial_count,
            elapsed_seconds,
            counts,
            seed: None,
            cancelled: false,
        }
    }

    pub fn with_run_id(self, run_id: u64) -> Self {
        Self {
            run_id: Some(run_id),
            ..self
        }
    }

    pub fn run_id(&self) -> Option<u64> {
        self.run_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// RFC 3339 timestamp with second precision, as persisted.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Trials that actually ran; smaller than requested when cancelled.
    pub fn trial_count(&self) -> u64 {
        self.trial_count
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(category)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Share of trials in `category`, in percent. Zero for an empty run.
    pub fn percentage(&self, category: Category) -> f64 {
        if self.trial_count == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.trial_count as f64 * 100.0
    }
}
