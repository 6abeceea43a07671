use std::time::Instant;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::cards::Layout;
use crate::deck::Deck;
use crate::errors::{EngineError, HandSizeRule};
use crate::hand::{classify, Hand, HAND_SIZE};
use crate::stats::{CategoryCounts, StatisticsRecord};

/// Upper bound on shards per run; each shard owns its own deck and RNG.
pub const MAX_WORKERS: usize = 1024;

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub trial_count: u64,
    /// Must be [`HAND_SIZE`]; kept as an input so callers get a clear error.
    pub hand_size: usize,
    pub layout: Layout,
    /// Base seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    /// Number of shards, at most [`MAX_WORKERS`]. `0` uses the size of the
    /// rayon pool.
    pub workers: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trial_count: 0,
            hand_size: HAND_SIZE,
            layout: Layout::STANDARD,
            seed: None,
            workers: 0,
        }
    }
}

impl SimConfig {
    pub fn new(trial_count: u64) -> Self {
        Self {
            trial_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.hand_size != HAND_SIZE {
            return Err(EngineError::InvalidHandSize {
                requested: self.hand_size,
                rule: HandSizeRule::MustEqual(HAND_SIZE),
            });
        }
        if self.workers > MAX_WORKERS {
            return Err(EngineError::InvalidWorkerCount {
                requested: self.workers,
                max: MAX_WORKERS,
            });
        }
        // re-check in case the layout was deserialized rather than built
        Layout::new(self.layout.suit_count(), self.layout.rank_count())?;
        Ok(())
    }
}

/// Splits `total` trials into `shards` near-equal parts (sizes differ by at
/// most one, larger parts first).
///
/// The shard count is clamped to `1..=MAX_WORKERS` and never exceeds
/// `total`, so no shard is empty unless `total` is zero.
pub fn shard_sizes(total: u64, shards: usize) -> Vec<u64> {
    let shards = (shards.clamp(1, MAX_WORKERS) as u64).min(total.max(1));
    let base = total / shards;
    let extra = total % shards;
    (0..shards).map(|i| base + u64::from(i < extra)).collect()
}

/// Runs `config.trial_count` independent draw-and-classify trials.
pub fn run(config: &SimConfig) -> Result<StatisticsRecord, EngineError> {
    run_with_cancel(config, None)
}

/// Like [`run`], but stops between trials once `cancel` fires and returns
/// the trials completed so far, flagged as cancelled.
pub fn run_with_cancel(
    config: &SimConfig,
    cancel: Option<&CancellationToken>,
) -> Result<StatisticsRecord, EngineError> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let workers = if config.workers == 0 {
        rayon::current_num_threads().min(MAX_WORKERS)
    } else {
        config.workers
    };
    let sizes = shard_sizes(config.trial_count, workers);
    info!(
        trials = config.trial_count,
        shards = sizes.len(),
        seed,
        "starting simulation"
    );

    let timestamp = Utc::now();
    let start = Instant::now();
    let shards = sizes
        .par_iter()
        .enumerate()
        .map(|(index, &trials)| run_shard(config.layout, seed, index as u64, trials, cancel))
        .collect::<Result<Vec<_>, _>>()?;
    let elapsed = start.elapsed().as_secs_f64();

    let mut counts = CategoryCounts::new();
    for shard in &shards {
        counts.merge(shard);
    }
    let cancelled = cancel.is_some_and(|c| c.is_cancelled()) && counts.total() < config.trial_count;
    if cancelled {
        warn!(
            completed = counts.total(),
            requested = config.trial_count,
            "simulation cancelled"
        );
    } else {
        info!(trials = counts.total(), elapsed, "simulation complete");
    }

    Ok(StatisticsRecord::completed(
        timestamp, elapsed, counts, seed, cancelled,
    ))
}

fn run_shard(
    layout: Layout,
    seed: u64,
    stream: u64,
    trials: u64,
    cancel: Option<&CancellationToken>,
) -> Result<CategoryCounts, EngineError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    let mut deck = Deck::new(layout);
    let mut counts = CategoryCounts::new();
    for _ in 0..trials {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            break;
        }
        // every trial starts from a full deck so trials stay independent
        deck.reset();
        let cards = deck.draw_hand(HAND_SIZE, true, &mut rng)?;
        let hand = Hand::new(&cards, layout)?;
        counts.increment(classify(&hand));
    }
    debug!(stream, trials = counts.total(), "shard finished");
    Ok(counts)
}
