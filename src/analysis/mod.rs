//! Chart data preparation over a [`SessionBundle`](crate::SessionBundle)
//!
//! Pure functions over bundle tables. Rendering stays with the caller; these
//! produce the numbers a dashboard shows next to its charts.

pub mod comparison;
pub mod telemetry;
pub mod timing;

pub use comparison::{Leader, SpeedDelta, SpeedDeltaPoint, SpeedDeltaSummary, speed_delta};
pub use telemetry::{GearShare, TelemetrySummary, gear_usage};
pub use timing::{
    TyreStint, fastest_lap, final_positions, format_timedelta, latest_weather, total_laps,
    tyre_stints,
};

/// Arithmetic mean, `None` for no values.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1), `None` below two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
