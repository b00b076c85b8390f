//! Batch preprocessing of tagged Empatica recordings: one run log, one summary
//! table and a set of per-block output files per tag file.

pub mod batch;
pub mod block;
pub mod config;
pub mod recording;
pub mod render;
pub mod runlog;
pub mod tags;

pub use batch::{run_batch, BatchOptions, BatchSummary, BlockReport};
pub use block::{process_block, write_detection, Block, BlockOutcome, BlockStatus};
pub use render::{render_artefact_plot, PngBackend};
pub use config::{read_config, Device, PreproConfig};
pub use runlog::RunLog;
