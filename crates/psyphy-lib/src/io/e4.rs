//! Empatica E4 session exports (`EDA.csv`, `BVP.csv`, `TEMP.csv`, `ACC.csv`).
//!
//! Each file starts with the session start (unix seconds) and the sampling
//! rate, one value per column, followed by the samples.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::signal::TimeSeries;

/// Raw accelerometer counts per g.
pub const ACC_COUNTS_PER_G: f64 = 64.0;

/// Three-axis accelerometer channel in g.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccSeries {
    pub x: TimeSeries,
    pub y: TimeSeries,
    pub z: TimeSeries,
}

impl AccSeries {
    pub fn fs(&self) -> f64 {
        self.x.fs
    }
    pub fn start(&self) -> f64 {
        self.x.start
    }
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Apply the same sample selection to all three axes.
    pub fn map_axes(&self, f: impl Fn(&TimeSeries) -> TimeSeries) -> Self {
        Self {
            x: f(&self.x),
            y: f(&self.y),
            z: f(&self.z),
        }
    }
}

struct E4Table {
    start: f64,
    fs: f64,
    columns: Vec<Vec<f64>>,
}

fn read_e4_table(path: &Path, width: usize) -> Result<E4Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading line {}", idx + 1))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        anyhow::ensure!(
            record.len() >= width,
            "line {} of {} has {} columns, expected {}",
            idx + 1,
            path.display(),
            record.len(),
            width
        );
        let mut row = Vec::with_capacity(width);
        for field in record.iter().take(width) {
            let value = if field.is_empty() {
                f64::NAN
            } else {
                field
                    .parse::<f64>()
                    .with_context(|| format!("line {} is not numeric: {}", idx + 1, field))?
            };
            row.push(value);
        }
        rows.push(row);
    }
    anyhow::ensure!(
        rows.len() >= 2,
        "{} lacks the start-time and sampling-rate header rows",
        path.display()
    );
    let start = rows[0][0];
    let fs = rows[1][0];
    anyhow::ensure!(
        fs.is_finite() && fs > 0.0,
        "{} declares an invalid sampling rate {}",
        path.display(),
        fs
    );
    let columns = (0..width)
        .map(|c| rows[2..].iter().map(|r| r[c]).collect())
        .collect();
    Ok(E4Table { start, fs, columns })
}

/// Read a single-column E4 channel (`EDA.csv`, `BVP.csv`, `TEMP.csv`).
pub fn read_e4_channel(path: &Path) -> Result<TimeSeries> {
    let mut table = read_e4_table(path, 1)?;
    let data = table.columns.remove(0);
    Ok(TimeSeries::new(table.fs, table.start, data))
}

/// Read `ACC.csv`, scaling raw counts to g.
pub fn read_e4_acc(path: &Path) -> Result<AccSeries> {
    let table = read_e4_table(path, 3)?;
    let axis = |c: usize| {
        let data = table.columns[c].iter().map(|v| v / ACC_COUNTS_PER_G).collect();
        TimeSeries::new(table.fs, table.start, data)
    };
    Ok(AccSeries {
        x: axis(0),
        y: axis(1),
        z: axis(2),
    })
}
