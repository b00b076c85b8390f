use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::block::{process_block, Block, BlockOutcome, BlockStatus};
use crate::config::{Device, PreproConfig};
use crate::recording::{load_recording, Recording};
use crate::runlog::RunLog;
use crate::tags::{read_tag_file, TagRow};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub tag_file: PathBuf,
    pub device: Device,
    pub config: PreproConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    pub part: String,
    pub tag: String,
    #[serde(flatten)]
    pub outcome: BlockOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BlockReport {
    fn new(row: &TagRow, outcome: BlockOutcome, message: Option<String>) -> Self {
        Self {
            part: row.part.clone(),
            tag: row.tag.clone(),
            outcome,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub participants: usize,
    pub processed: usize,
    pub stopped: usize,
    pub skipped: usize,
    pub failed: usize,
    pub no_data: usize,
    pub blocks: Vec<BlockReport>,
    pub log_file: PathBuf,
    pub summary_file: PathBuf,
}

impl BatchSummary {
    pub fn status_of(&self, part: &str, tag: &str) -> Option<BlockStatus> {
        self.blocks
            .iter()
            .find(|b| b.part == part && b.tag == tag)
            .map(|b| b.outcome.status)
    }
}

fn tag_stem(tag_file: &Path) -> String {
    tag_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tags".into())
}

/// Run one tagged block, turning every per-block failure into a report.
fn run_row(
    row: &TagRow,
    recording: &Recording,
    opts: &BatchOptions,
    log: &mut RunLog,
) -> BlockReport {
    let window = match row.window(&recording.bvp) {
        Ok(w) => w,
        Err(reason) => {
            log.warn(format!("block {}: {}", row.tag, reason));
            return BlockReport::new(
                row,
                BlockOutcome::without_labels(BlockStatus::Skipped),
                Some(reason),
            );
        }
    };
    let result = Block::cut(&row.part, &row.tag, recording, window, log)
        .and_then(|block| process_block(&block, &opts.out_dir, &opts.config, log));
    match result {
        Ok(outcome) => BlockReport::new(row, outcome, None),
        Err(err) => {
            let message = format!("{:#}", err);
            log.error(format!("block {}: {}", row.tag, message));
            BlockReport::new(
                row,
                BlockOutcome::without_labels(BlockStatus::Failed),
                Some(message),
            )
        }
    }
}

/// Preprocess every participant block listed in the tag file.
pub fn run_batch(opts: &BatchOptions) -> Result<BatchSummary> {
    opts.config.validate()?;
    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating output directory {}", opts.out_dir.display()))?;
    let tags = read_tag_file(&opts.tag_file)?;
    let stem = tag_stem(&opts.tag_file);
    let log_file = opts.out_dir.join(format!("{}_log.txt", stem));
    let summary_file = opts.out_dir.join(format!("{}_prepro.csv", stem));
    let mut log = RunLog::open(&log_file)?;

    let participants = tags.participants();
    log.info(format!(
        "preprocessing {} participants from {} ({} data)",
        participants.len(),
        opts.tag_file.display(),
        opts.device
    ));

    let mut reports: Vec<Option<BlockReport>> = vec![None; tags.rows.len()];
    for part in &participants {
        log.section();
        if opts.config.is_excluded(part) {
            log.info(format!("participant {} excluded", part));
            for row in tags.rows_for(part) {
                reports[row.index] = Some(BlockReport::new(
                    row,
                    BlockOutcome::without_labels(BlockStatus::Skipped),
                    Some("excluded".into()),
                ));
            }
            continue;
        }
        log.info(format!("processing participant {}", part));

        let recording = match load_recording(opts.device, &opts.data_dir, part) {
            Ok(Some(rec)) => rec,
            Ok(None) => {
                log.warn(format!("some or all data was missing for participant {}", part));
                for row in tags.rows_for(part) {
                    reports[row.index] = Some(BlockReport::new(
                        row,
                        BlockOutcome::without_labels(BlockStatus::NoData),
                        None,
                    ));
                }
                continue;
            }
            Err(err) => {
                let message = format!("{:#}", err);
                log.error(format!("participant {}: {}", part, message));
                for row in tags.rows_for(part) {
                    reports[row.index] = Some(BlockReport::new(
                        row,
                        BlockOutcome::without_labels(BlockStatus::Failed),
                        Some(message.clone()),
                    ));
                }
                continue;
            }
        };

        for row in tags.rows_for(part) {
            reports[row.index] = Some(run_row(row, &recording, opts, &mut log));
        }
    }

    let blocks: Vec<BlockReport> = reports.into_iter().flatten().collect();
    let columns: Vec<(Option<f64>, String)> = blocks
        .iter()
        .map(|b| (b.outcome.artefact_percent, b.outcome.status.to_string()))
        .collect();
    tags.write_summary(&summary_file, &columns)?;

    let count = |status: BlockStatus| blocks.iter().filter(|b| b.outcome.status == status).count();
    let summary = BatchSummary {
        participants: participants.len(),
        processed: count(BlockStatus::Processed),
        stopped: count(BlockStatus::Stopped),
        skipped: count(BlockStatus::Skipped),
        failed: count(BlockStatus::Failed),
        no_data: count(BlockStatus::NoData),
        blocks,
        log_file,
        summary_file,
    };
    log.section();
    log.info(format!(
        "run finished: {} processed, {} stopped, {} skipped, {} failed, {} without data",
        summary.processed, summary.stopped, summary.skipped, summary.failed, summary.no_data
    ));
    log.flush()?;
    Ok(summary)
}
