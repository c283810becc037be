//! Session state: the last computed report.
//!
//! The advisor is request-per-interaction; the only state worth keeping
//! between interactions is the previous report so it can be redisplayed
//! without rerunning the models.

use crate::types::PredictionReport;

/// Holds the most recent pipeline output for redisplay.
#[derive(Debug, Default)]
pub struct SessionState {
    last_report: Option<PredictionReport>,
    runs: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed run.
    pub fn record(&mut self, report: PredictionReport) {
        self.runs += 1;
        self.last_report = Some(report);
    }

    /// The last computed report, if any run has completed.
    pub fn last(&self) -> Option<&PredictionReport> {
        self.last_report.as_ref()
    }

    /// Number of completed runs this session.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}
