//! One tagged block of a participant: cutting, artefact labelling, the stop
//! rule, correction and the per-block output files.

use anyhow::{Context, Result};
use psyphy_lib::artefact::{
    correct_series, detect_artefacts, expand_labels, ArtefactDetection, CorrectedSeries,
    EpochLabel, Interpolation, Label, PolicyDecision,
};
use psyphy_lib::dsp::{fill_linear, gauss_smooth};
use psyphy_lib::io::{
    read_artefact_labels, write_artefact_labels, write_columns, write_signal_csv, AccSeries,
};
use psyphy_lib::metrics::InterpolationReport;
use psyphy_lib::signal::TimeSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::PreproConfig;
use crate::recording::Recording;
use crate::render::render_artefact_plot;
use crate::runlog::RunLog;
use crate::tags::{cut_channel, BlockWindow};

/// Channels of one block, re-based to `t = 0` with recording gaps filled.
#[derive(Debug, Clone)]
pub struct Block {
    pub part: String,
    pub tag: String,
    pub eda: CorrectedSeries,
    pub bvp: CorrectedSeries,
    pub temp: Option<TimeSeries>,
    pub acc: Option<AccSeries>,
}

fn filled_linear(ts: &TimeSeries) -> Result<TimeSeries> {
    let mut out = ts.clone();
    fill_linear(&mut out.data)?;
    Ok(out)
}

impl Block {
    pub fn cut(
        part: &str,
        tag: &str,
        recording: &Recording,
        window: BlockWindow,
        log: &mut RunLog,
    ) -> Result<Self> {
        let eda = cut_channel(&recording.eda, window);
        let bvp = cut_channel(&recording.bvp, window);
        anyhow::ensure!(
            !eda.is_empty() && !bvp.is_empty(),
            "block {} has no EDA or BVP samples",
            tag
        );

        let eda = correct_series(&eda, &[], Interpolation::CubicSpline)?;
        let bvp = correct_series(&bvp, &[], Interpolation::Linear)?;
        log.quality("EDA", &InterpolationReport::from_flags(&eda.interpolated));
        log.quality("BVP", &InterpolationReport::from_flags(&bvp.interpolated));

        let temp = match &recording.temp {
            Some(t) => {
                let cut = cut_channel(t, window);
                log.quality("TEMP", &InterpolationReport::from_gaps(&cut.data));
                Some(filled_linear(&cut)?)
            }
            None => None,
        };
        let acc = match &recording.acc {
            Some(a) => {
                let cut = a.map_axes(|axis| cut_channel(axis, window));
                log.quality("ACC", &InterpolationReport::from_gaps(&cut.x.data));
                Some(AccSeries {
                    x: filled_linear(&cut.x)?,
                    y: filled_linear(&cut.y)?,
                    z: filled_linear(&cut.z)?,
                })
            }
            None => None,
        };

        Ok(Self {
            part: part.to_string(),
            tag: tag.to_string(),
            eda,
            bvp,
            temp,
            acc,
        })
    }

    fn stem(&self) -> String {
        format!("{}_{}", self.part, self.tag)
    }

    fn output(&self, out_dir: &Path, suffix: &str) -> PathBuf {
        out_dir.join(format!("{}_{}", self.stem(), suffix))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Processed,
    Stopped,
    Skipped,
    Failed,
    NoData,
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Processed => "processed",
            Self::Stopped => "stopped",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
            Self::NoData => "no_data",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockOutcome {
    pub status: BlockStatus,
    pub artefact_percent: Option<f64>,
    pub epochs: usize,
    pub reused_labels: bool,
    pub eda_interpolated: usize,
}

impl BlockOutcome {
    pub fn without_labels(status: BlockStatus) -> Self {
        Self {
            status,
            artefact_percent: None,
            epochs: 0,
            reused_labels: false,
            eda_interpolated: 0,
        }
    }
}

/// Labels of a block: from an earlier run when its label file exists,
/// otherwise from a fresh detection whose outputs are written alongside.
fn block_labels(
    block: &Block,
    out_dir: &Path,
    cfg: &PreproConfig,
    log: &mut RunLog,
) -> Result<(Vec<EpochLabel>, bool)> {
    let labels_path = block.output(out_dir, "artefacts.csv");
    if labels_path.is_file() {
        log.info(format!(
            "block {}: reusing labels from {}",
            block.tag,
            labels_path.display()
        ));
        return Ok((read_artefact_labels(&labels_path)?, true));
    }

    let det = detect_artefacts(&block.eda.series, &cfg.detector)
        .with_context(|| format!("detecting artefacts in block {}", block.tag))?;
    let stem = block.stem();
    write_detection(&det, out_dir, &stem)?;
    if cfg.plots {
        let title = format!("{} {}", block.part, block.tag);
        let png = block.output(out_dir, "artefacts.png");
        if let Err(err) = render_artefact_plot(&det, &title, &png) {
            log.warn(format!("block {}: plot failed: {:#}", block.tag, err));
        }
    }
    Ok((det.labels, false))
}

/// Write `<stem>_artefacts.csv` and the 8 Hz signal the labels refer to as
/// `<stem>_eda_8hz.csv`.
pub fn write_detection(det: &ArtefactDetection, out_dir: &Path, stem: &str) -> Result<()> {
    write_artefact_labels(&out_dir.join(format!("{}_artefacts.csv", stem)), &det.labels)?;
    let eda = &det.processed.eda;
    let times: Vec<f64> = (0..eda.len()).map(|i| eda.time_at(i)).collect();
    write_columns(
        &out_dir.join(format!("{}_eda_8hz.csv", stem)),
        &[
            ("time", times.as_slice()),
            ("eda", eda.data.as_slice()),
            ("filtered_eda", det.processed.filtered.as_slice()),
        ],
    )
}

fn flags(values: &[bool]) -> Vec<f64> {
    values.iter().map(|f| if *f { 1.0 } else { 0.0 }).collect()
}

fn label_column(labels: &[Label]) -> Vec<f64> {
    labels.iter().map(|l| l.value() as f64).collect()
}

/// Label, check and preprocess one block, writing its output files.
pub fn process_block(
    block: &Block,
    out_dir: &Path,
    cfg: &PreproConfig,
    log: &mut RunLog,
) -> Result<BlockOutcome> {
    let (labels, reused_labels) = block_labels(block, out_dir, cfg, log)?;
    let values: Vec<Label> = labels.iter().map(|l| l.label).collect();

    let percent = match cfg.policy().evaluate(&values) {
        PolicyDecision::Stop { percent } => {
            log.warn(format!(
                "block {}: STOPPED due to {:.2}% artefacts",
                block.tag, percent
            ));
            return Ok(BlockOutcome {
                status: BlockStatus::Stopped,
                artefact_percent: Some(percent),
                epochs: values.len(),
                reused_labels,
                eda_interpolated: block.eda.interpolated_count(),
            });
        }
        PolicyDecision::Proceed { percent } => percent,
    };
    log.info(format!(
        "block {}: {:.2}% artefacts in {} epochs",
        block.tag,
        percent,
        values.len()
    ));

    let eda_labels = expand_labels(&values, block.eda.series.fs, block.eda.series.len());
    let bvp_labels = expand_labels(&values, block.bvp.series.fs, block.bvp.series.len());
    let (eda, bvp) = if cfg.artefact_correction {
        let eda = block
            .eda
            .correct_again(&eda_labels, Interpolation::CubicSpline)?;
        let bvp = block.bvp.correct_again(&bvp_labels, Interpolation::Linear)?;
        log.quality("EDA", &InterpolationReport::from_flags(&eda.interpolated));
        log.quality("BVP", &InterpolationReport::from_flags(&bvp.interpolated));
        (eda, bvp)
    } else {
        (block.eda.clone(), block.bvp.clone())
    };

    let smooth = gauss_smooth(&eda.series.data, cfg.smoothing_window);
    let eda_times: Vec<f64> = (0..eda.series.len()).map(|i| eda.series.time_at(i)).collect();
    write_columns(
        &block.output(out_dir, "eda_signals.csv"),
        &[
            ("time", eda_times.as_slice()),
            ("eda_raw", eda.raw.as_slice()),
            ("eda", eda.series.data.as_slice()),
            ("eda_smooth", smooth.as_slice()),
            ("interpolated", flags(&eda.interpolated).as_slice()),
            ("label", label_column(&eda_labels).as_slice()),
        ],
    )?;

    let bvp_times: Vec<f64> = (0..bvp.series.len()).map(|i| bvp.series.time_at(i)).collect();
    write_columns(
        &block.output(out_dir, "bvp_signals.csv"),
        &[
            ("time", bvp_times.as_slice()),
            ("bvp_raw", bvp.raw.as_slice()),
            ("bvp", bvp.series.data.as_slice()),
            ("interpolated", flags(&bvp.interpolated).as_slice()),
            ("label", label_column(&bvp_labels).as_slice()),
        ],
    )?;

    if let Some(temp) = &block.temp {
        write_signal_csv(&block.output(out_dir, "temp.csv"), "temp", temp)?;
    }
    if let Some(acc) = &block.acc {
        let times: Vec<f64> = (0..acc.len()).map(|i| acc.x.time_at(i)).collect();
        write_columns(
            &block.output(out_dir, "acc.csv"),
            &[
                ("time", times.as_slice()),
                ("x", acc.x.data.as_slice()),
                ("y", acc.y.data.as_slice()),
                ("z", acc.z.data.as_slice()),
            ],
        )?;
    }

    log.info(format!("block {}: preprocessing done", block.tag));
    Ok(BlockOutcome {
        status: BlockStatus::Processed,
        artefact_percent: Some(percent),
        epochs: values.len(),
        reused_labels,
        eda_interpolated: eda.interpolated_count(),
    })
}
