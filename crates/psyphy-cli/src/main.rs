use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use psyphy_lib::{
    artefact::{detect_artefacts, extract_features, preprocess, DetectorConfig, FEATURE_NAMES},
    io::{read_e4_channel, read_signal_csv},
    signal::TimeSeries,
};
use psyphy_run::{
    read_config, render_artefact_plot, run_batch, write_detection, BatchOptions, Device,
    PreproConfig,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "psyphy",
    version,
    about = "EDA artefact detection and preprocessing of Empatica recordings"
)]
struct Cli {
    /// Console log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InputFormat {
    /// `timestamp,<column>` table
    #[value(name = "csv")]
    Csv,
    /// Empatica E4 session export (start, rate, samples)
    #[value(name = "e4")]
    E4,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DeviceArg {
    #[value(name = "e4")]
    E4,
    #[value(name = "e+", alias = "eplus")]
    EPlus,
    #[value(name = "cut")]
    Cut,
}

impl From<DeviceArg> for Device {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::E4 => Device::E4,
            DeviceArg::EPlus => Device::EPlus,
            DeviceArg::Cut => Device::Cut,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Label the 5 s epochs of an EDA recording and print a JSON summary
    Detect {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
        format: InputFormat,
        #[arg(long, default_value = "eda")]
        column: String,
        #[arg(long)]
        out_dir: PathBuf,
        /// Output file stem, defaults to the input file stem
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        cutoff_hz: f64,
        #[arg(long, default_value_t = 6)]
        filter_order: usize,
        #[arg(long)]
        no_plot: bool,
    },
    /// Print the per-epoch feature table as CSV
    Features {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
        format: InputFormat,
        #[arg(long, default_value = "eda")]
        column: String,
        #[arg(long, default_value_t = 1.0)]
        cutoff_hz: f64,
        #[arg(long, default_value_t = 6)]
        filter_order: usize,
    },
    /// Preprocess every block of a tag file and print a JSON run summary
    Batch {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long)]
        tag_file: PathBuf,
        #[arg(long, value_enum, default_value_t = DeviceArg::E4)]
        device: DeviceArg,
        /// Skip participants whose id contains this text (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
        /// TOML file with preprocessing settings
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        max_artefact_percent: Option<f64>,
        #[arg(long)]
        no_correction: bool,
        #[arg(long)]
        smoothing_window: Option<usize>,
        #[arg(long)]
        no_plot: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();
    match cli.command {
        Commands::Detect {
            input,
            format,
            column,
            out_dir,
            name,
            cutoff_hz,
            filter_order,
            no_plot,
        } => cmd_detect(
            &input,
            format,
            &column,
            &out_dir,
            name,
            DetectorConfig {
                cutoff_hz,
                filter_order,
            },
            !no_plot,
        )?,
        Commands::Features {
            input,
            format,
            column,
            cutoff_hz,
            filter_order,
        } => cmd_features(
            &input,
            format,
            &column,
            DetectorConfig {
                cutoff_hz,
                filter_order,
            },
        )?,
        Commands::Batch {
            data_dir,
            out_dir,
            tag_file,
            device,
            exclude,
            config,
            max_artefact_percent,
            no_correction,
            smoothing_window,
            no_plot,
        } => {
            let mut cfg = match config {
                Some(path) => read_config(&path)?,
                None => PreproConfig::default(),
            };
            cfg.exclude.extend(exclude);
            if let Some(p) = max_artefact_percent {
                cfg.max_artefact_percent = p;
            }
            if let Some(w) = smoothing_window {
                cfg.smoothing_window = w;
            }
            cfg.artefact_correction &= !no_correction;
            cfg.plots &= !no_plot;
            cmd_batch(BatchOptions {
                data_dir,
                out_dir,
                tag_file,
                device: device.into(),
                config: cfg,
            })?
        }
    }
    Ok(())
}

fn load_eda(input: &Path, format: InputFormat, column: &str) -> Result<TimeSeries> {
    match format {
        InputFormat::Csv => read_signal_csv(input, column),
        InputFormat::E4 => read_e4_channel(input),
    }
}

fn cmd_detect(
    input: &Path,
    format: InputFormat,
    column: &str,
    out_dir: &Path,
    name: Option<String>,
    cfg: DetectorConfig,
    plot: bool,
) -> Result<()> {
    let eda = load_eda(input, format, column)?;
    let det = detect_artefacts(&eda, &cfg)
        .with_context(|| format!("detecting artefacts in {}", input.display()))?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let stem = name.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "eda".into())
    });
    write_detection(&det, out_dir, &stem)?;
    if plot {
        let png = out_dir.join(format!("{}_artefacts.png", stem));
        if let Err(err) = render_artefact_plot(&det, &stem, &png) {
            warn!("plot failed: {:#}", err);
        }
    }
    let summary = det.summary(&eda);
    info!(
        "{}: {} of {} epochs labelled artefact",
        stem, summary.artefact_epochs, summary.epochs
    );
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn cmd_features(input: &Path, format: InputFormat, column: &str, cfg: DetectorConfig) -> Result<()> {
    let eda = load_eda(input, format, column)?;
    let processed = preprocess(&eda, &cfg)?;
    let features = extract_features(&processed.eda.data, &processed.filtered);
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(FEATURE_NAMES)?;
    for fv in &features {
        writer.write_record(fv.to_array().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn cmd_batch(opts: BatchOptions) -> Result<()> {
    let summary = run_batch(&opts)?;
    info!(
        "{} blocks processed, log written to {}",
        summary.processed,
        summary.log_file.display()
    );
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
