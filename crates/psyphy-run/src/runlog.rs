use anyhow::{Context, Result};
use log::Level;
use psyphy_lib::metrics::InterpolationReport;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Text log of one batch run, passed explicitly to every participant and
/// block step. Entries are also forwarded to the `log` facade.
pub struct RunLog {
    out: Box<dyn Write>,
}

impl RunLog {
    /// Append to `path`, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening run log {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer(out: impl Write + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    pub fn write(&mut self, level: Level, message: &str) {
        log::log!(level, "{}", message);
        let stamp = chrono::Local::now().format("%H:%M:%S");
        if let Err(err) = writeln!(self.out, "{} - {}", stamp, message) {
            log::warn!("run log write failed: {}", err);
        }
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.write(Level::Info, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.write(Level::Warn, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.write(Level::Error, message.as_ref());
    }

    /// Record how much of a channel was interpolated at the matching severity.
    pub fn quality(&mut self, channel: &str, report: &InterpolationReport) {
        self.write(report.severity().level(), &report.describe(channel));
    }

    /// Blank line separating participants.
    pub fn section(&mut self) {
        let _ = writeln!(self.out);
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flushing run log")
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn entries_are_timestamped_and_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags_log.txt");
        {
            let mut log = RunLog::open(&path).unwrap();
            log.info("processing participant P01");
            log.quality("EDA", &InterpolationReport::new(10, 3));
        }
        {
            let mut log = RunLog::open(&path).unwrap();
            log.warn("block all: STOPPED due to 50.00% artefacts");
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" - processing participant P01"));
        assert_eq!(lines[0].as_bytes()[2], b':');
        assert!(lines[1].contains("30.00% EDA were interpolated"));
        assert!(lines[2].contains("STOPPED"));
    }
}
