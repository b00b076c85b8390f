use serde::{Deserialize, Serialize};

/// Interpolated share at or above which a channel is reported as a warning.
pub const WARN_FRACTION: f64 = 0.2;
/// Interpolated share at or above which a channel is reported at all.
pub const INFO_FRACTION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Quiet,
    Info,
    Warning,
}

impl Severity {
    pub fn level(self) -> log::Level {
        match self {
            Self::Quiet => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
        }
    }
}

/// How much of a channel was filled in rather than measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationReport {
    pub total: usize,
    pub interpolated: usize,
}

impl InterpolationReport {
    pub fn new(total: usize, interpolated: usize) -> Self {
        Self {
            total,
            interpolated,
        }
    }

    pub fn from_flags(flags: &[bool]) -> Self {
        Self::new(flags.len(), flags.iter().filter(|f| **f).count())
    }

    /// Count `NaN` samples of a not yet filled channel.
    pub fn from_gaps(data: &[f64]) -> Self {
        Self::new(data.len(), data.iter().filter(|v| v.is_nan()).count())
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.interpolated as f64 / self.total as f64
        }
    }

    pub fn severity(&self) -> Severity {
        let f = self.fraction();
        if f >= WARN_FRACTION {
            Severity::Warning
        } else if f >= INFO_FRACTION {
            Severity::Info
        } else {
            Severity::Quiet
        }
    }

    pub fn describe(&self, channel: &str) -> String {
        format!(
            "{:.2}% {} were interpolated",
            self.fraction() * 100.0,
            channel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_fraction() {
        assert_eq!(InterpolationReport::new(100, 0).severity(), Severity::Quiet);
        assert_eq!(InterpolationReport::new(100, 1).severity(), Severity::Info);
        assert_eq!(InterpolationReport::new(100, 19).severity(), Severity::Info);
        assert_eq!(InterpolationReport::new(100, 20).severity(), Severity::Warning);
        assert_eq!(InterpolationReport::new(0, 0).severity(), Severity::Quiet);
        assert_eq!(Severity::Warning.level(), log::Level::Warn);
    }

    #[test]
    fn counts_flags_and_gaps() {
        let r = InterpolationReport::from_flags(&[true, false, false, true]);
        assert_eq!(r.interpolated, 2);
        assert_eq!(r.describe("EDA"), "50.00% EDA were interpolated");
        let g = InterpolationReport::from_gaps(&[1.0, f64::NAN, 2.0]);
        assert_eq!(g.interpolated, 1);
    }
}
