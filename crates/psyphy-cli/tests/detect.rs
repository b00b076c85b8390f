use assert_cmd::cargo::cargo_bin_cmd;
use psyphy_lib::artefact::{ArtefactSummary, FEATURE_NAMES};
use psyphy_lib::io::read_artefact_labels;
use std::{error::Error, path::PathBuf};

#[test]
fn detect_flat_recording_prints_summary() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/flat_eda_8hz.csv");
    let out = tempfile::tempdir()?;

    let mut cmd = cargo_bin_cmd!("psyphy");
    cmd.args([
        "detect",
        "--input",
        input.to_str().expect("utf8 path"),
        "--out-dir",
        out.path().to_str().expect("utf8 path"),
        "--name",
        "flat",
        "--no-plot",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let summary: ArtefactSummary = serde_json::from_slice(&output)?;

    assert_eq!(summary.input_samples, 400);
    assert_eq!(summary.samples_8hz, 400);
    assert_eq!(summary.epochs, 10);
    assert_eq!(summary.artefact_epochs, 1);
    assert_eq!(summary.labels[0], -1);
    assert!((summary.artefact_percent - 10.0).abs() < 1e-9);

    let labels = read_artefact_labels(&out.path().join("flat_artefacts.csv"))?;
    assert_eq!(labels.len(), 10);
    assert!(out.path().join("flat_eda_8hz.csv").is_file());
    assert!(!out.path().join("flat_artefacts.png").exists());
    Ok(())
}

#[test]
fn detect_reads_e4_exports() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/e4/P01/EDA.csv");
    let out = tempfile::tempdir()?;

    let mut cmd = cargo_bin_cmd!("psyphy");
    cmd.args([
        "detect",
        "--input",
        input.to_str().expect("utf8 path"),
        "--format",
        "e4",
        "--out-dir",
        out.path().to_str().expect("utf8 path"),
        "--no-plot",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let summary: ArtefactSummary = serde_json::from_slice(&output)?;
    assert_eq!(summary.input_fs, 4.0);
    assert_eq!(summary.samples_8hz, 479);
    assert_eq!(summary.epochs, 12);
    assert!(out.path().join("EDA_artefacts.csv").is_file());
    Ok(())
}

#[test]
fn detect_rejects_cutoff_above_nyquist() {
    let input = sample_path("test_data/flat_eda_8hz.csv");
    let out = tempfile::tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("psyphy");
    cmd.args([
        "detect",
        "--input",
        input.to_str().expect("utf8 path"),
        "--out-dir",
        out.path().to_str().expect("utf8 path"),
        "--cutoff-hz",
        "5",
        "--no-plot",
    ]);
    cmd.assert().failure();
}

#[test]
fn features_prints_one_row_per_epoch() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/flat_eda_8hz.csv");
    let mut cmd = cargo_bin_cmd!("psyphy");
    cmd.args(["features", "--input", input.to_str().expect("utf8 path")]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let mut reader = csv::Reader::from_reader(output.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(headers.len(), 43);
    assert_eq!(&headers[0], FEATURE_NAMES[0]);
    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.len() == 43));
    Ok(())
}

fn sample_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join(relative)
}
