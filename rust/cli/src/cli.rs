//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use pokerstat_engine::cards::{Layout, SUIT_COUNT, SYMBOL_COUNT};
use pokerstat_engine::errors::EngineError;
use pokerstat_engine::hand::HAND_SIZE;

#[derive(Parser, Debug)]
#[command(
    name = "pokerstat",
    version,
    about = "Estimate five-card hand frequencies by random sampling"
)]
pub struct PokerstatCli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation, print its report and store it
    Sim(SimArgs),
    /// Show stored runs (latest by default)
    Report {
        /// Statistics file [default: from config]
        #[arg(long)]
        store: Option<String>,
        /// Run id to show
        #[arg(long, conflicts_with = "all")]
        run: Option<u64>,
        /// Show every stored run
        #[arg(long)]
        all: bool,
        /// Decimal places for percentages
        #[arg(long)]
        precision: Option<usize>,
    },
    /// Classify five cards, e.g. `classify Th Jh Qh Kh Ah`
    Classify {
        #[arg(required = true, num_args = HAND_SIZE, value_name = "CARD")]
        cards: Vec<String>,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Draw one random hand and classify it
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    /// Number of hands to draw [default: from config]
    #[arg(long)]
    pub trials: Option<u64>,
    /// Base RNG seed; the same seed and worker count repeat a run exactly
    #[arg(long)]
    pub seed: Option<u64>,
    /// Parallel shards (0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// Cards per hand; only 5 can be classified
    #[arg(long, default_value_t = HAND_SIZE)]
    pub hand_size: usize,
    /// Statistics file to append to [default: from config]
    #[arg(long)]
    pub store: Option<String>,
    /// Do not append the run to the statistics file
    #[arg(long)]
    pub no_store: bool,
    /// Cancel the run after this many seconds
    #[arg(long)]
    pub max_seconds: Option<f64>,
    /// Decimal places for percentages
    #[arg(long)]
    pub precision: Option<usize>,
    /// Print the run record as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LayoutArgs {
    /// Number of suits in the deck
    #[arg(long, default_value_t = SUIT_COUNT)]
    pub suits: u16,
    /// Number of ranks per suit; the top rank plays as the ace
    #[arg(long, default_value_t = SYMBOL_COUNT)]
    pub ranks: u16,
}

impl LayoutArgs {
    pub fn layout(&self) -> Result<Layout, EngineError> {
        Layout::new(self.suits, self.ranks)
    }
}
