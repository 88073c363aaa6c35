//! Record of the units skipped while building a bundle

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// Extraction step a skipped unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Roster,
    EventInfo,
    Telemetry,
    Timing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Roster => "roster",
            Stage::EventInfo => "event info",
            Stage::Telemetry => "telemetry",
            Stage::Timing => "timing",
        };
        f.write_str(name)
    }
}

/// Why a unit was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkipReason {
    /// Results row without a driver number
    MissingDriverNumber,
    /// Driver number already on the roster
    DuplicateNumber,
    /// Abbreviation already on the roster
    DuplicateAbbreviation,
    /// Per-driver lookup failed
    DriverLookupFailed,
    /// No laps for the driver
    NoLaps,
    /// Laps present but none with a lap time
    NoTimedLap,
    /// Fastest lap returned no samples
    EmptyCarData,
    /// Car data fetch failed
    TelemetryFetchFailed,
    /// Telemetry for a number missing from the roster
    NotInRoster,
    /// Circuit geometry fetch failed
    CircuitInfoUnavailable,
    /// Circuit geometry has no usable corner distance
    NoCorners,
    /// Timing row driver missing from the roster
    UnknownTimingDriver,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingDriverNumber => "missing driver number",
            SkipReason::DuplicateNumber => "duplicate driver number",
            SkipReason::DuplicateAbbreviation => "duplicate abbreviation",
            SkipReason::DriverLookupFailed => "driver lookup failed",
            SkipReason::NoLaps => "no laps",
            SkipReason::NoTimedLap => "no timed lap",
            SkipReason::EmptyCarData => "empty car data",
            SkipReason::TelemetryFetchFailed => "car data fetch failed",
            SkipReason::NotInRoster => "not in roster",
            SkipReason::CircuitInfoUnavailable => "circuit info unavailable",
            SkipReason::NoCorners => "no corner distances",
            SkipReason::UnknownTimingDriver => "timing driver not in roster",
        };
        f.write_str(text)
    }
}

/// One skipped unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub stage: Stage,
    /// Driver number, abbreviation or field the skip applies to
    pub subject: String,
    pub reason: SkipReason,
    /// Underlying error message, when there was one
    pub detail: Option<String>,
}

/// Units skipped while building one bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    skipped: Vec<SkippedItem>,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skip and log it.
    pub fn skip(&mut self, stage: Stage, subject: impl Into<String>, reason: SkipReason) {
        self.push(SkippedItem { stage, subject: subject.into(), reason, detail: None });
    }

    /// Record a skip caused by an error.
    pub fn skip_with(
        &mut self,
        stage: Stage,
        subject: impl Into<String>,
        reason: SkipReason,
        error: &dyn fmt::Display,
    ) {
        self.push(SkippedItem {
            stage,
            subject: subject.into(),
            reason,
            detail: Some(error.to_string()),
        });
    }

    fn push(&mut self, item: SkippedItem) {
        match &item.detail {
            Some(detail) => warn!(
                stage = %item.stage,
                subject = %item.subject,
                reason = %item.reason,
                error = %detail,
                "Skipped during extraction"
            ),
            None => warn!(
                stage = %item.stage,
                subject = %item.subject,
                reason = %item.reason,
                "Skipped during extraction"
            ),
        }
        self.skipped.push(item);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &SkippedItem> {
        self.skipped.iter().filter(move |item| item.stage == stage)
    }

    /// Subjects skipped in `stage`, in recording order.
    pub fn skipped_subjects(&self, stage: Stage) -> Vec<&str> {
        self.for_stage(stage).map(|item| item.subject.as_str()).collect()
    }

    /// Whether `subject` was skipped in `stage` for `reason`.
    pub fn contains(&self, stage: Stage, subject: &str, reason: SkipReason) -> bool {
        self.for_stage(stage).any(|item| item.subject == subject && item.reason == reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaddockError;

    #[test]
    fn new_report_is_clean() {
        let report = ExtractionReport::new();
        assert!(report.is_clean());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn filters_by_stage() {
        let mut report = ExtractionReport::new();
        report.skip(Stage::Telemetry, "44", SkipReason::NoLaps);
        report.skip(Stage::Roster, "", SkipReason::MissingDriverNumber);
        report.skip_with(
            Stage::Telemetry,
            "16",
            SkipReason::TelemetryFetchFailed,
            &PaddockError::TelemetryUnavailable { number: "16".into(), lap: 4 },
        );

        assert!(!report.is_clean());
        assert_eq!(report.skipped_subjects(Stage::Telemetry), vec!["44", "16"]);
        assert_eq!(report.for_stage(Stage::Roster).count(), 1);
        assert!(report.contains(Stage::Telemetry, "16", SkipReason::TelemetryFetchFailed));
        assert!(!report.contains(Stage::Telemetry, "16", SkipReason::NoLaps));

        let detail = report.skipped()[2].detail.as_deref().unwrap();
        assert!(detail.contains("lap 4"));
    }
}
